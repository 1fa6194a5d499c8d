//! Spatial Hierarchy Data Structures
//!
//! This module defines the six-level spatial hierarchy used by the registry:
//!
//! ```text
//! Zone → Block → Plot → Building → Floor → Room
//! ```
//!
//! # Architecture
//!
//! - **Typed levels**: `SpatialLevel` is a closed enum, every per-level table
//!   (icons, columns, labels) is an exhaustive `match`
//! - **Server-owned tree**: `SpatialNode` mirrors the backend payload; the
//!   tree is fetched whole and never mutated in place after it is installed
//! - **Opaque extras**: level-specific attributes (occupancy, construction
//!   status, ...) are carried verbatim in `attributes`
//!
//! # Examples
//!
//! ```rust
//! use plotline_core::models::{SpatialLevel, SpatialNode};
//! use serde_json::json;
//!
//! let zone: SpatialNode = serde_json::from_value(json!({
//!     "id": "z-1",
//!     "realId": 1,
//!     "type": "ZONE",
//!     "code": "Z1",
//!     "name": "North Zone",
//!     "children": []
//! }))
//! .unwrap();
//!
//! assert_eq!(zone.level, SpatialLevel::Zone);
//! assert_eq!(zone.level.next(), SpatialLevel::Block);
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Validation errors for spatial trees and payloads
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Unknown spatial level: {0}")]
    UnknownLevel(String),

    #[error("Root node '{node_id}' is a {level}, only zones may sit at the root")]
    RootLevel { node_id: String, level: SpatialLevel },

    #[error("Node '{node_id}' is a {level} but its parent '{parent_id}' ({parent_level}) expects a {expected}")]
    LevelOrder {
        node_id: String,
        level: SpatialLevel,
        parent_id: String,
        parent_level: SpatialLevel,
        expected: SpatialLevel,
    },

    #[error("Room '{node_id}' cannot have spatial children")]
    RoomHasChildren { node_id: String },

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Icon selector for a spatial level
///
/// Rendering layers map these keys onto whatever icon set they use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IconKey {
    Map,
    Grid,
    LandPlot,
    Building,
    Layers,
    DoorOpen,
}

/// One level of the spatial hierarchy, ordered from the top (Zone) down
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpatialLevel {
    Zone,
    Block,
    Plot,
    Building,
    Floor,
    Room,
}

impl SpatialLevel {
    /// All levels in hierarchy order
    pub const ALL: [SpatialLevel; 6] = [
        SpatialLevel::Zone,
        SpatialLevel::Block,
        SpatialLevel::Plot,
        SpatialLevel::Building,
        SpatialLevel::Floor,
        SpatialLevel::Room,
    ];

    /// Wire representation (`ZONE`, `BLOCK`, ...)
    pub fn as_str(self) -> &'static str {
        match self {
            SpatialLevel::Zone => "ZONE",
            SpatialLevel::Block => "BLOCK",
            SpatialLevel::Plot => "PLOT",
            SpatialLevel::Building => "BUILDING",
            SpatialLevel::Floor => "FLOOR",
            SpatialLevel::Room => "ROOM",
        }
    }

    /// Lowercase path segment used by the REST endpoints
    pub fn path_segment(self) -> &'static str {
        match self {
            SpatialLevel::Zone => "zone",
            SpatialLevel::Block => "block",
            SpatialLevel::Plot => "plot",
            SpatialLevel::Building => "building",
            SpatialLevel::Floor => "floor",
            SpatialLevel::Room => "room",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpatialLevel::Zone => "Zone",
            SpatialLevel::Block => "Block",
            SpatialLevel::Plot => "Plot",
            SpatialLevel::Building => "Building",
            SpatialLevel::Floor => "Floor",
            SpatialLevel::Room => "Room",
        }
    }

    pub fn plural_label(self) -> &'static str {
        match self {
            SpatialLevel::Zone => "Zones",
            SpatialLevel::Block => "Blocks",
            SpatialLevel::Plot => "Plots",
            SpatialLevel::Building => "Buildings",
            SpatialLevel::Floor => "Floors",
            SpatialLevel::Room => "Rooms",
        }
    }

    /// Distance from the top of the hierarchy (Zone = 0, Room = 5)
    pub fn depth(self) -> usize {
        self as usize
    }

    /// Fixed adjacency map used to derive the next addable level.
    ///
    /// Room maps to itself; callers must consult [`SpatialLevel::child_level`]
    /// (or `NavigationState::can_add`) before offering an add action under a room.
    pub fn next(self) -> SpatialLevel {
        self.child_level().unwrap_or(SpatialLevel::Room)
    }

    /// Level of this level's children, `None` for rooms
    pub fn child_level(self) -> Option<SpatialLevel> {
        match self {
            SpatialLevel::Zone => Some(SpatialLevel::Block),
            SpatialLevel::Block => Some(SpatialLevel::Plot),
            SpatialLevel::Plot => Some(SpatialLevel::Building),
            SpatialLevel::Building => Some(SpatialLevel::Floor),
            SpatialLevel::Floor => Some(SpatialLevel::Room),
            SpatialLevel::Room => None,
        }
    }

    /// Only plots and rooms carry surveyed/contracted area
    pub fn carries_area(self) -> bool {
        matches!(self, SpatialLevel::Plot | SpatialLevel::Room)
    }

    pub fn icon(self) -> IconKey {
        match self {
            SpatialLevel::Zone => IconKey::Map,
            SpatialLevel::Block => IconKey::Grid,
            SpatialLevel::Plot => IconKey::LandPlot,
            SpatialLevel::Building => IconKey::Building,
            SpatialLevel::Floor => IconKey::Layers,
            SpatialLevel::Room => IconKey::DoorOpen,
        }
    }
}

impl fmt::Display for SpatialLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SpatialLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        SpatialLevel::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ValidationError::UnknownLevel(trimmed.to_string()))
    }
}

impl Serialize for SpatialLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SpatialLevel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

/// One node of the spatial tree as delivered by the backend
///
/// # Fields
///
/// - `id`: client-side key, may be synthetic (see [`assign_missing_keys`])
/// - `real_id`: backend numeric id, used for mutations
/// - `parent_id`: reference to the parent node, `None` at the root
/// - `level`: serialized as `type`
/// - `children`: display order, never re-sorted
/// - `attributes`: every other field the backend sends for this level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpatialNode {
    #[serde(default, deserialize_with = "deserialize_key")]
    pub id: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_real_id"
    )]
    pub real_id: Option<i64>,

    #[serde(default, deserialize_with = "deserialize_optional_key")]
    pub parent_id: Option<String>,

    #[serde(rename = "type")]
    pub level: SpatialLevel,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub code: String,

    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub area: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub contract_area: Option<f64>,

    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub area_variance: Option<f64>,

    #[serde(default, deserialize_with = "deserialize_children")]
    pub children: Vec<SpatialNode>,

    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl SpatialNode {
    /// Create a bare node with no children or attributes
    pub fn new(
        id: impl Into<String>,
        level: SpatialLevel,
        code: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            real_id: None,
            parent_id: None,
            level,
            code: code.into(),
            name: name.into(),
            area: None,
            contract_area: None,
            area_variance: None,
            children: Vec::new(),
            attributes: Map::new(),
        }
    }

    pub fn with_real_id(mut self, real_id: i64) -> Self {
        self.real_id = Some(real_id);
        self
    }

    pub fn with_area(mut self, area: f64) -> Self {
        self.area = Some(area);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Append a child, setting its `parent_id` to this node's key
    pub fn with_child(mut self, mut child: SpatialNode) -> Self {
        child.parent_id = Some(self.id.clone());
        self.children.push(child);
        self
    }

    /// Name, falling back to code when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.code
        } else {
            &self.name
        }
    }

    /// Whether `key` matches the client key or the backend id
    pub fn matches_id(&self, key: &str) -> bool {
        if self.id == key {
            return true;
        }
        match (self.real_id, key.trim().parse::<i64>()) {
            (Some(real_id), Ok(parsed)) => real_id == parsed,
            _ => false,
        }
    }

    /// Area with missing values treated as zero
    pub fn area_or_zero(&self) -> f64 {
        self.area.unwrap_or(0.0)
    }

    /// Name of whoever occupies this node, if the backend sent one
    pub fn occupant_name(&self) -> Option<&str> {
        ["occupantName", "tenantName"]
            .iter()
            .filter_map(|key| self.attributes.get(*key))
            .filter_map(Value::as_str)
            .map(str::trim)
            .find(|name| !name.is_empty())
    }

    /// `roomStatus.name` when present
    pub fn room_status_name(&self) -> Option<&str> {
        self.attributes
            .get("roomStatus")
            .and_then(|status| status.get("name"))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    /// Number of nodes in this subtree, including this node
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(SpatialNode::node_count).sum::<usize>()
    }
}

/// Total number of nodes in a forest
pub fn tree_node_count(roots: &[SpatialNode]) -> usize {
    roots.iter().map(SpatialNode::node_count).sum()
}

/// Check the strict six-level ordering of a fetched tree
///
/// # Errors
///
/// Returns the first violation found in depth-first pre-order:
/// - a root entry that is not a zone
/// - a child whose level is not its parent's child level
/// - a room with children
pub fn validate_hierarchy(roots: &[SpatialNode]) -> Result<(), ValidationError> {
    for root in roots {
        if root.level != SpatialLevel::Zone {
            return Err(ValidationError::RootLevel {
                node_id: root.id.clone(),
                level: root.level,
            });
        }
        validate_subtree(root)?;
    }
    Ok(())
}

fn validate_subtree(node: &SpatialNode) -> Result<(), ValidationError> {
    let Some(expected) = node.level.child_level() else {
        if node.children.is_empty() {
            return Ok(());
        }
        return Err(ValidationError::RoomHasChildren {
            node_id: node.id.clone(),
        });
    };

    for child in &node.children {
        if child.level != expected {
            return Err(ValidationError::LevelOrder {
                node_id: child.id.clone(),
                level: child.level,
                parent_id: node.id.clone(),
                parent_level: node.level,
                expected,
            });
        }
        validate_subtree(child)?;
    }
    Ok(())
}

/// Give every node without a client key a stable one
///
/// Nodes with a backend id get `{level}-{realId}`; anything else gets a
/// random UUID. Children's `parent_id` is filled from the parent when absent.
/// Runs once on a freshly fetched tree, before it is installed.
pub fn assign_missing_keys(roots: &mut [SpatialNode]) {
    for node in roots.iter_mut() {
        assign_node_key(node);
    }
}

fn assign_node_key(node: &mut SpatialNode) {
    if node.id.is_empty() {
        node.id = match node.real_id {
            Some(real_id) => format!("{}-{}", node.level.path_segment(), real_id),
            None => Uuid::new_v4().to_string(),
        };
    }
    let parent_key = node.id.clone();
    for child in node.children.iter_mut() {
        assign_node_key(child);
        if child.parent_id.is_none() {
            child.parent_id = Some(parent_key.clone());
        }
    }
}

// ============================================================================
// Lenient field deserializers
//
// The backend is loose about scalar types: ids arrive as numbers or strings,
// areas as numbers, numeric strings, or null.
// ============================================================================

fn value_to_key(value: Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn deserialize_key<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_key(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn deserialize_optional_key<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_key(Value::deserialize(deserializer)?))
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_real_id<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn deserialize_lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(value_to_number(&Value::deserialize(deserializer)?))
}

fn deserialize_children<'de, D>(deserializer: D) -> Result<Vec<SpatialNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SpatialNode>>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "spatial_test.rs"]
mod spatial_test;
