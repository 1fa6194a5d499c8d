//! Cross-section of one level across the whole tree ("discovery" views)

use crate::models::{SpatialLevel, SpatialNode};
use serde::Serialize;

/// A node listed outside its place in the tree, tagged with its parent's name
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlattenedNode<'a> {
    #[serde(flatten)]
    pub node: &'a SpatialNode,

    /// Display name of the nearest ancestor (name, falling back to code)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_ref_name: Option<String>,
}

impl<'a> FlattenedNode<'a> {
    pub fn new(node: &'a SpatialNode, parent_ref_name: Option<&str>) -> Self {
        Self {
            node,
            parent_ref_name: parent_ref_name.map(str::to_string),
        }
    }

    /// Annotate a sibling list with a shared parent name
    pub fn siblings(nodes: &'a [SpatialNode], parent_ref_name: Option<&str>) -> Vec<Self> {
        nodes
            .iter()
            .map(|node| FlattenedNode::new(node, parent_ref_name))
            .collect()
    }
}

/// Collect every node of `level`, in depth-first pre-order encounter order.
///
/// Top-level matches are tagged with `parent_display_name`; everything else
/// with the display name of its immediate parent. The tree is not modified.
pub fn flatten_tree_by_type<'a>(
    roots: &'a [SpatialNode],
    level: SpatialLevel,
    parent_display_name: Option<&str>,
) -> Vec<FlattenedNode<'a>> {
    let mut out = Vec::new();
    collect(roots, level, parent_display_name, &mut out);
    tracing::debug!(
        "Flattened {} {} node(s)",
        out.len(),
        level.label().to_lowercase()
    );
    out
}

fn collect<'a>(
    nodes: &'a [SpatialNode],
    level: SpatialLevel,
    parent_name: Option<&str>,
    out: &mut Vec<FlattenedNode<'a>>,
) {
    for node in nodes {
        if node.level == level {
            out.push(FlattenedNode::new(node, parent_name));
        }
        if !node.children.is_empty() {
            collect(&node.children, level, Some(node.display_name()), out);
        }
    }
}
