//! Registry Controller
//!
//! Owns the one mutable state container behind the land registry view: the
//! fetched tree, its metrics, the navigation state, lookup categories and a
//! queue of operator notifications.
//!
//! # Failure policy
//!
//! Every service call is caught here. A failure is logged with its cause,
//! reported to the operator as a fixed message, and leaves the previous
//! state in place. Nothing is retried and no error escapes the controller.
//!
//! # Refetch after mutation
//!
//! Create, update and delete are single requests followed by a full tree
//! refetch. The navigation stack is then reconciled against the new tree by
//! client key, so a breadcrumb for a deleted node is dropped rather than
//! left dangling.

mod notification;

pub use notification::{
    ConfirmPrompt, Notification, NotificationLevel, CATEGORIES_FAILED, CREATE_FAILED,
    DELETE_FAILED, FETCH_FAILED, LOOKUP_FAILED, UPDATE_FAILED,
};

use crate::models::{
    discoverable_levels, validate_hierarchy, CreateLocation, LookupCategory, LookupValue,
    SpatialLevel, SpatialNode, UpdateLocation,
};
use crate::navigator::{
    column_schema, compute_metrics, find_resource_by_id, to_render_nodes, ColumnDef,
    FlattenedNode, NavigationState, RenderNode, TreeMetrics,
};
use crate::services::{LocationsService, LookupsService, ServiceError};

/// Page-level orchestration over the locations and lookups services
pub struct RegistryController<L, K> {
    locations: L,
    lookups: K,
    tree: Vec<SpatialNode>,
    metrics: TreeMetrics,
    navigation: NavigationState,
    categories: Vec<LookupCategory>,
    notifications: Vec<Notification>,
}

impl<L, K> RegistryController<L, K>
where
    L: LocationsService,
    K: LookupsService,
{
    /// Controller with an empty tree; call [`Self::refresh`] to load it
    pub fn new(locations: L, lookups: K) -> Self {
        Self {
            locations,
            lookups,
            tree: Vec::new(),
            metrics: TreeMetrics::default(),
            navigation: NavigationState::new(),
            categories: Vec::new(),
            notifications: Vec::new(),
        }
    }

    pub fn locations(&self) -> &L {
        &self.locations
    }

    pub fn lookups(&self) -> &K {
        &self.lookups
    }

    pub fn tree(&self) -> &[SpatialNode] {
        &self.tree
    }

    pub fn metrics(&self) -> &TreeMetrics {
        &self.metrics
    }

    pub fn navigation(&self) -> &NavigationState {
        &self.navigation
    }

    pub fn categories(&self) -> &[LookupCategory] {
        &self.categories
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    /// Drain pending notifications
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }

    /// Downgrade pending error notifications carrying `message` to warnings
    pub fn demote_errors(&mut self, message: &str) {
        for notification in &mut self.notifications {
            if notification.is_error() && notification.message == message {
                notification.level = NotificationLevel::Warning;
            }
        }
    }

    fn report(&mut self, message: &str, err: &ServiceError) {
        tracing::warn!("{}: {}", message, err);
        self.notifications.push(Notification::error(message));
    }

    // ------------------------------------------------------------------
    // Fetching
    // ------------------------------------------------------------------

    /// Fetch the tree and install it wholesale.
    ///
    /// Returns `false` (with a notification) when the fetch fails or the
    /// tree violates the level ordering; the previous tree is kept.
    pub async fn refresh(&mut self) -> bool {
        let fetched = match self.locations.get_tree().await {
            Ok(tree) => tree,
            Err(err) => {
                self.report(FETCH_FAILED, &err);
                return false;
            }
        };

        if let Err(err) = validate_hierarchy(&fetched) {
            self.report(FETCH_FAILED, &ServiceError::from(err));
            return false;
        }

        self.metrics = compute_metrics(&fetched);
        self.tree = fetched;
        self.navigation.reconcile(&self.tree);

        tracing::info!(
            "Loaded spatial registry: {} node(s), {:.2} m² total area",
            self.metrics.total_nodes(),
            self.metrics.total_area
        );
        true
    }

    /// Fetch lookup categories; previous categories are kept on failure
    pub async fn load_categories(&mut self) -> bool {
        match self.lookups.get_categories().await {
            Ok(categories) => {
                tracing::debug!("Loaded {} lookup categories", categories.len());
                self.categories = categories;
                true
            }
            Err(err) => {
                self.report(CATEGORIES_FAILED, &err);
                false
            }
        }
    }

    /// Values for a level-specific selector; empty on failure
    pub async fn lookup_values(&mut self, code: &str) -> Vec<LookupValue> {
        match self.lookups.get_by_category(code).await {
            Ok(values) => values,
            Err(err) => {
                self.report(LOOKUP_FAILED, &err);
                Vec::new()
            }
        }
    }

    /// Levels offered for discovery; every level until categories load
    pub fn discoverable_levels(&self) -> Vec<SpatialLevel> {
        if self.categories.is_empty() {
            return SpatialLevel::ALL.to_vec();
        }
        discoverable_levels(&self.categories)
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Drill into the listed row matching `key`.
    ///
    /// Only rows of the current view qualify: the zones at `Root`, the
    /// children of the current node when drilled, the cross-section in
    /// discovery. Any other key leaves the state unchanged.
    pub fn drill_down(&mut self, key: &str) -> bool {
        let target = self
            .navigation
            .visible_nodes(&self.tree)
            .into_iter()
            .map(|row| row.node)
            .find(|node| node.matches_id(key));

        match target {
            Some(node) => {
                self.navigation.drill_down(node);
                true
            }
            None => {
                tracing::debug!("Ignoring drill into '{}', not listed in the current view", key);
                false
            }
        }
    }

    pub fn go_back(&mut self, index: isize) {
        self.navigation.go_back(index);
    }

    pub fn go_home(&mut self) {
        self.navigation.go_home();
    }

    pub fn enter_discovery(&mut self, level: SpatialLevel) {
        self.navigation.enter_discovery(level);
    }

    /// Rows of the current view
    pub fn visible_rows(&self) -> Vec<FlattenedNode<'_>> {
        self.navigation.visible_nodes(&self.tree)
    }

    /// Column schema for the rows of the current view
    pub fn columns(&self) -> &'static [ColumnDef] {
        column_schema(self.navigation.display_level())
    }

    /// Render nodes for the current drill context, or the whole tree
    pub fn render_tree(&self) -> Vec<RenderNode> {
        match self.navigation.current_node(&self.tree) {
            Some(node) => to_render_nodes(&node.children, Some(node.display_name())),
            None => to_render_nodes(&self.tree, None),
        }
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Node for an edit form; `None` cancels the edit
    pub fn begin_edit(&self, key: &str) -> Option<SpatialNode> {
        find_resource_by_id(&self.tree, key).cloned()
    }

    /// Create a node and refetch the tree
    pub async fn create(&mut self, data: CreateLocation) -> bool {
        let level = data.level;
        match self.locations.create(data).await {
            Ok(()) => {
                tracing::info!("Created {}", level);
                self.notifications
                    .push(Notification::success(format!("{} created", level.label())));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.report(CREATE_FAILED, &err);
                false
            }
        }
    }

    /// Update the node matching `key` and refetch; unknown keys are a no-op
    pub async fn update(&mut self, key: &str, data: UpdateLocation) -> bool {
        let Some((level, real_id)) = self.resolve_target(key, UPDATE_FAILED) else {
            return false;
        };

        match self.locations.update(level, real_id, data).await {
            Ok(()) => {
                tracing::info!("Updated {} {}", level, real_id);
                self.notifications
                    .push(Notification::success(format!("{} updated", level.label())));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.report(UPDATE_FAILED, &err);
                false
            }
        }
    }

    /// Delete the node matching `key` (and, server-side, its descendants).
    ///
    /// Nothing is sent unless `prompt` confirms. There is no undo.
    pub async fn delete(&mut self, key: &str, prompt: &dyn ConfirmPrompt) -> bool {
        let Some(node) = find_resource_by_id(&self.tree, key) else {
            tracing::debug!("Ignoring delete of unknown node '{}'", key);
            return false;
        };
        let question = format!(
            "Delete {} {}? This also removes everything beneath it.",
            node.level.label(),
            node.display_name()
        );

        let Some((level, real_id)) = self.resolve_target(key, DELETE_FAILED) else {
            return false;
        };

        if !prompt.confirm(&question) {
            tracing::debug!("Delete of {} {} declined", level, real_id);
            return false;
        }

        match self.locations.delete(level, real_id).await {
            Ok(()) => {
                tracing::info!("Deleted {} {}", level, real_id);
                self.notifications
                    .push(Notification::success(format!("{} deleted", level.label())));
                self.refresh().await;
                true
            }
            Err(err) => {
                self.report(DELETE_FAILED, &err);
                false
            }
        }
    }

    /// Level and backend id of the node matching `key`.
    ///
    /// Unknown keys resolve to `None` silently; a node without a backend id
    /// is reported under `failure`.
    fn resolve_target(&mut self, key: &str, failure: &str) -> Option<(SpatialLevel, i64)> {
        let node = find_resource_by_id(&self.tree, key)?;
        let (level, real_id) = (node.level, node.real_id);
        match real_id {
            Some(real_id) => Some((level, real_id)),
            None => {
                let err = ServiceError::invalid_request(format!(
                    "{} '{}' has no backend id",
                    level, key
                ));
                self.report(failure, &err);
                None
            }
        }
    }
}
