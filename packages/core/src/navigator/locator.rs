//! Resolve UI selections back to tree nodes

use crate::models::SpatialNode;

/// Find the first node whose client key or backend id matches `key`.
///
/// Search is depth-first pre-order; absence is `None`, callers treat it as a
/// no-op.
pub fn find_resource_by_id<'a>(roots: &'a [SpatialNode], key: &str) -> Option<&'a SpatialNode> {
    for node in roots {
        if node.matches_id(key) {
            return Some(node);
        }
        if let Some(found) = find_resource_by_id(&node.children, key) {
            return Some(found);
        }
    }
    None
}

/// Find a node by its client key only, ignoring backend ids
pub fn find_by_client_key<'a>(roots: &'a [SpatialNode], key: &str) -> Option<&'a SpatialNode> {
    for node in roots {
        if node.id == key {
            return Some(node);
        }
        if let Some(found) = find_by_client_key(&node.children, key) {
            return Some(found);
        }
    }
    None
}

/// Path from a root down to the first node matching `key`, inclusive.
///
/// Same match order as [`find_resource_by_id`]. Empty when nothing matches.
pub fn find_path_by_id<'a>(roots: &'a [SpatialNode], key: &str) -> Vec<&'a SpatialNode> {
    let mut path = Vec::new();
    if collect_path(roots, key, &mut path) {
        path
    } else {
        Vec::new()
    }
}

fn collect_path<'a>(nodes: &'a [SpatialNode], key: &str, path: &mut Vec<&'a SpatialNode>) -> bool {
    for node in nodes {
        path.push(node);
        if node.matches_id(key) || collect_path(&node.children, key, path) {
            return true;
        }
        path.pop();
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SpatialLevel;

    fn tree() -> Vec<SpatialNode> {
        let p1 = SpatialNode::new("P1", SpatialLevel::Plot, "P1", "").with_real_id(11);
        let p2 = SpatialNode::new("P2", SpatialLevel::Plot, "P2", "").with_real_id(12);
        let b1 = SpatialNode::new("B1", SpatialLevel::Block, "B1", "")
            .with_real_id(2)
            .with_child(p1)
            .with_child(p2);
        let z1 = SpatialNode::new("Z1", SpatialLevel::Zone, "Z1", "")
            .with_real_id(1)
            .with_child(b1);
        let z2 = SpatialNode::new("Z2", SpatialLevel::Zone, "Z2", "").with_real_id(12);
        vec![z1, z2]
    }

    #[test]
    fn test_find_by_client_key() {
        let tree = tree();
        let found = find_resource_by_id(&tree, "P2").unwrap();
        assert_eq!(found.code, "P2");
        assert!(find_resource_by_id(&tree, "nonexistent").is_none());
    }

    #[test]
    fn test_find_by_backend_id_first_match_wins() {
        let tree = tree();
        // P2 and Z2 share realId 12; P2 comes first in pre-order.
        let found = find_resource_by_id(&tree, "12").unwrap();
        assert_eq!(found.id, "P2");
    }

    #[test]
    fn test_find_by_client_key_ignores_backend_ids() {
        let tree = tree();
        assert!(find_by_client_key(&tree, "12").is_none());
        assert_eq!(find_by_client_key(&tree, "Z2").unwrap().real_id, Some(12));
    }

    #[test]
    fn test_find_path() {
        let tree = tree();
        let path: Vec<&str> = find_path_by_id(&tree, "P1")
            .into_iter()
            .map(|node| node.id.as_str())
            .collect();
        assert_eq!(path, vec!["Z1", "B1", "P1"]);
        assert!(find_path_by_id(&tree, "missing").is_empty());
    }
}
