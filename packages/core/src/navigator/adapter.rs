//! Projection of the spatial tree into generic renderable tree nodes
//!
//! The output mirrors the input shape exactly: same branching, same order.
//! Each node only gains computed display fields in its `meta`.

use crate::models::{IconKey, SpatialLevel, SpatialNode};
use serde::Serialize;
use serde_json::{Map, Value};

pub const OCCUPIED: &str = "Occupied";
pub const VACANT: &str = "Vacant";

/// Widget-independent tree node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderNode {
    pub id: String,
    pub label: String,
    pub icon: IconKey,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RenderNode>,
    pub meta: RenderMeta,
}

/// The source node's fields plus computed convenience fields
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderMeta {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub real_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    pub code: String,
    pub name: String,
    pub usage_type: SpatialLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_m2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_area_m2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub area_variance_m2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub occupancy_status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ref_name: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Occupancy label for rooms: `roomStatus.name`, else occupied/vacant by
/// whether an occupant name is present. `None` for every other level.
pub fn occupancy_status(node: &SpatialNode) -> Option<&str> {
    if node.level != SpatialLevel::Room {
        return None;
    }
    Some(match (node.room_status_name(), node.occupant_name()) {
        (Some(status), _) => status,
        (None, Some(_)) => OCCUPIED,
        (None, None) => VACANT,
    })
}

/// Convert a forest; top-level nodes are tagged with `parent_ref_name`
pub fn to_render_nodes(roots: &[SpatialNode], parent_ref_name: Option<&str>) -> Vec<RenderNode> {
    roots
        .iter()
        .map(|node| to_render_node(node, parent_ref_name))
        .collect()
}

pub fn to_render_node(node: &SpatialNode, parent_ref_name: Option<&str>) -> RenderNode {
    let meta = RenderMeta {
        real_id: node.real_id,
        parent_id: node.parent_id.clone(),
        code: node.code.clone(),
        name: node.name.clone(),
        usage_type: node.level,
        area_m2: node.area,
        contract_area_m2: node.contract_area,
        area_variance_m2: node.area_variance,
        occupancy_status: occupancy_status(node).map(str::to_string),
        parent_ref_name: parent_ref_name.map(str::to_string),
        attributes: node.attributes.clone(),
    };

    RenderNode {
        id: node.id.clone(),
        label: node.display_name().to_string(),
        icon: node.level.icon(),
        children: to_render_nodes(&node.children, Some(node.display_name())),
        meta,
    }
}
