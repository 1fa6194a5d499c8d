//! Drill-down / discovery navigation over a fetched spatial tree
//!
//! The navigation state is a single [`ViewMode`] value, so the registry is in
//! exactly one of three views at a time:
//!
//! - `Root` - the zones at the top of the tree
//! - `Drilled` - the children of the last node on a breadcrumb stack
//! - `Discovery` - every node of one level, wherever it sits in the tree
//!
//! The state never borrows or mutates the tree. Breadcrumbs are snapshots
//! resolved against whichever tree is current when rows are requested.
//!
//! # Examples
//!
//! ```rust
//! use plotline_core::models::{SpatialLevel, SpatialNode};
//! use plotline_core::navigator::NavigationState;
//!
//! let block = SpatialNode::new("b1", SpatialLevel::Block, "B1", "North Block");
//! let tree = vec![SpatialNode::new("z1", SpatialLevel::Zone, "Z1", "Zone 1").with_child(block)];
//!
//! let mut nav = NavigationState::new();
//! assert_eq!(nav.next_addable_level(), SpatialLevel::Zone);
//!
//! nav.drill_down(&tree[0]);
//! assert_eq!(nav.next_addable_level(), SpatialLevel::Block);
//! assert_eq!(nav.visible_nodes(&tree).len(), 1);
//!
//! nav.enter_discovery(SpatialLevel::Block);
//! assert_eq!(nav.stack_len(), 0);
//! ```

use super::flatten::{flatten_tree_by_type, FlattenedNode};
use super::locator::find_by_client_key;
use crate::models::{SpatialLevel, SpatialNode};
use serde::{Deserialize, Serialize};

/// Snapshot of a node on the drill-down path
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_id: Option<i64>,
    #[serde(rename = "type")]
    pub level: SpatialLevel,
    pub label: String,
}

impl Breadcrumb {
    pub fn from_node(node: &SpatialNode) -> Self {
        Self {
            id: node.id.clone(),
            real_id: node.real_id,
            level: node.level,
            label: node.display_name().to_string(),
        }
    }
}

/// Which view the registry is showing
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "camelCase")]
pub enum ViewMode {
    #[default]
    Root,
    /// Never empty; emptying the stack returns to `Root`
    Drilled(Vec<Breadcrumb>),
    Discovery(SpatialLevel),
}

/// Client-side navigation over the spatial tree
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NavigationState {
    mode: ViewMode,
}

impl NavigationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> &ViewMode {
        &self.mode
    }

    /// Breadcrumb stack, empty outside `Drilled`
    pub fn breadcrumbs(&self) -> &[Breadcrumb] {
        match &self.mode {
            ViewMode::Drilled(stack) => stack,
            ViewMode::Root | ViewMode::Discovery(_) => &[],
        }
    }

    pub fn stack_len(&self) -> usize {
        self.breadcrumbs().len()
    }

    pub fn discovery_level(&self) -> Option<SpatialLevel> {
        match self.mode {
            ViewMode::Discovery(level) => Some(level),
            ViewMode::Root | ViewMode::Drilled(_) => None,
        }
    }

    /// Push `node` onto the stack; leaves discovery if it was active
    pub fn drill_down(&mut self, node: &SpatialNode) {
        let crumb = Breadcrumb::from_node(node);
        tracing::debug!("Drilling into {} '{}'", crumb.level, crumb.id);

        match &mut self.mode {
            ViewMode::Drilled(stack) => stack.push(crumb),
            ViewMode::Root | ViewMode::Discovery(_) => self.mode = ViewMode::Drilled(vec![crumb]),
        }
    }

    /// Truncate the stack to `index + 1` entries; a negative index goes home.
    ///
    /// An index at or past the top of the stack, or any non-negative index
    /// outside `Drilled`, leaves the state unchanged.
    pub fn go_back(&mut self, index: isize) {
        let Ok(index) = usize::try_from(index) else {
            self.go_home();
            return;
        };

        if let ViewMode::Drilled(stack) = &mut self.mode {
            if index < stack.len() {
                stack.truncate(index + 1);
            }
        }
    }

    /// Clear the stack and leave discovery
    pub fn go_home(&mut self) {
        self.mode = ViewMode::Root;
    }

    /// Show every `level` node across the whole tree; clears the stack
    pub fn enter_discovery(&mut self, level: SpatialLevel) {
        tracing::debug!("Entering discovery for {}", level);
        self.mode = ViewMode::Discovery(level);
    }

    /// Level a new node would be created at from the current position.
    ///
    /// Zone with an empty stack, otherwise the adjacency map applied to the
    /// last stacked node (so a room yields room; see [`Self::can_add`]).
    pub fn next_addable_level(&self) -> SpatialLevel {
        self.breadcrumbs()
            .last()
            .map_or(SpatialLevel::Zone, |crumb| crumb.level.next())
    }

    /// False when the last stacked node is a room
    pub fn can_add(&self) -> bool {
        self.breadcrumbs()
            .last()
            .map_or(true, |crumb| crumb.level.child_level().is_some())
    }

    /// Level of the rows currently listed
    pub fn display_level(&self) -> SpatialLevel {
        match self.mode {
            ViewMode::Discovery(level) => level,
            ViewMode::Root | ViewMode::Drilled(_) => self.next_addable_level(),
        }
    }

    /// Rows for the current view.
    ///
    /// - `Discovery(level)`: the flattened cross-section for `level`
    /// - `Drilled`: children of the last stacked node, or nothing if it no
    ///   longer resolves in `tree`
    /// - `Root`: the root sequence
    pub fn visible_nodes<'a>(&self, tree: &'a [SpatialNode]) -> Vec<FlattenedNode<'a>> {
        match &self.mode {
            ViewMode::Root => FlattenedNode::siblings(tree, None),
            ViewMode::Discovery(level) => flatten_tree_by_type(tree, *level, None),
            ViewMode::Drilled(_) => match self.current_node(tree) {
                Some(parent) => {
                    FlattenedNode::siblings(&parent.children, Some(parent.display_name()))
                }
                None => Vec::new(),
            },
        }
    }

    /// The last stacked node, if the whole stack still resolves in `tree`
    pub fn current_node<'a>(&self, tree: &'a [SpatialNode]) -> Option<&'a SpatialNode> {
        let stack = self.breadcrumbs();
        let resolved = resolve_stack(stack, tree);
        if resolved.len() < stack.len() {
            return None;
        }
        resolved.last().copied()
    }

    /// Re-resolve the stack against a freshly fetched tree.
    ///
    /// Crumbs are matched by client key, the first one anywhere in the tree
    /// and each following one among its predecessor's children. The stack is
    /// cut at the first crumb that no longer resolves (back to `Root` if none
    /// do) and surviving labels are refreshed. Returns the number of crumbs
    /// dropped.
    pub fn reconcile(&mut self, tree: &[SpatialNode]) -> usize {
        let ViewMode::Drilled(stack) = &self.mode else {
            return 0;
        };

        let refreshed: Vec<Breadcrumb> = resolve_stack(stack, tree)
            .into_iter()
            .map(Breadcrumb::from_node)
            .collect();
        let dropped = stack.len() - refreshed.len();

        if dropped > 0 {
            tracing::info!(
                "Dropped {} stale breadcrumb(s) after refresh ({} remain)",
                dropped,
                refreshed.len()
            );
        }

        self.mode = if refreshed.is_empty() {
            ViewMode::Root
        } else {
            ViewMode::Drilled(refreshed)
        };
        dropped
    }
}

/// Longest prefix of `stack` that resolves in `tree`
fn resolve_stack<'a>(stack: &[Breadcrumb], tree: &'a [SpatialNode]) -> Vec<&'a SpatialNode> {
    let mut resolved: Vec<&'a SpatialNode> = Vec::with_capacity(stack.len());

    for crumb in stack {
        let next = match resolved.last() {
            None => find_by_client_key(tree, &crumb.id),
            Some(parent) => parent.children.iter().find(|child| child.id == crumb.id),
        };
        match next {
            Some(node) => resolved.push(node),
            None => break,
        }
    }

    resolved
}

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;
