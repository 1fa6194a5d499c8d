//! Data Models
//!
//! This module contains the data structures exchanged with the registry API:
//!
//! - `SpatialNode` / `SpatialLevel` - the six-level spatial tree
//! - `LookupCategory` / `LookupValue` - server-maintained reference lists
//! - `CreateLocation` / `UpdateLocation` - mutation payloads
//!
//! All types deserialize leniently from the backend's camelCase JSON and keep
//! fields they do not model in an opaque `attributes` map.

mod location;
mod lookup;
mod spatial;

pub use location::{CreateLocation, UpdateLocation};
pub(crate) use lookup::deserialize_categories;
pub use lookup::{discoverable_levels, LookupCategory, LookupValue};
pub use spatial::{
    assign_missing_keys, tree_node_count, validate_hierarchy, IconKey, SpatialLevel, SpatialNode,
    ValidationError,
};
