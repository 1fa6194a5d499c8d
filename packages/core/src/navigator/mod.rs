//! Spatial Hierarchy Navigator
//!
//! Pure, in-memory operations over a fetched spatial tree:
//!
//! - [`metrics`] - per-level counts and total area for summary cards
//! - [`locator`] - resolve a selection key back to its node
//! - [`flatten`] - every node of one level across the whole tree
//! - [`navigation`] - drill-down / discovery view state
//! - [`adapter`] - projection into generic render nodes
//! - [`columns`] - per-level grid column schemas
//!
//! None of these functions touch the network or mutate the tree. The
//! registry controller owns the tree and calls into this module after every
//! fetch.

pub mod adapter;
pub mod columns;
pub mod flatten;
pub mod locator;
pub mod metrics;
pub mod navigation;

pub use adapter::{occupancy_status, to_render_node, to_render_nodes, RenderMeta, RenderNode};
pub use columns::{column_schema, Alignment, CellRender, ColumnDef};
pub use flatten::{flatten_tree_by_type, FlattenedNode};
pub use locator::{find_by_client_key, find_path_by_id, find_resource_by_id};
pub use metrics::{compute_metrics, TreeMetrics};
pub use navigation::{Breadcrumb, NavigationState, ViewMode};
