//! Tree metrics for the registry summary cards

use crate::models::{SpatialLevel, SpatialNode};
use serde::{Deserialize, Serialize};

/// Per-level node counts plus the summed area of plots and rooms
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreeMetrics {
    pub zones: usize,
    pub blocks: usize,
    pub plots: usize,
    pub buildings: usize,
    pub floors: usize,
    pub rooms: usize,
    pub total_area: f64,
}

impl TreeMetrics {
    pub fn count_for(&self, level: SpatialLevel) -> usize {
        match level {
            SpatialLevel::Zone => self.zones,
            SpatialLevel::Block => self.blocks,
            SpatialLevel::Plot => self.plots,
            SpatialLevel::Building => self.buildings,
            SpatialLevel::Floor => self.floors,
            SpatialLevel::Room => self.rooms,
        }
    }

    /// Sum of all per-level counts
    pub fn total_nodes(&self) -> usize {
        self.zones + self.blocks + self.plots + self.buildings + self.floors + self.rooms
    }

    fn record(&mut self, node: &SpatialNode) {
        let counter = match node.level {
            SpatialLevel::Zone => &mut self.zones,
            SpatialLevel::Block => &mut self.blocks,
            SpatialLevel::Plot => &mut self.plots,
            SpatialLevel::Building => &mut self.buildings,
            SpatialLevel::Floor => &mut self.floors,
            SpatialLevel::Room => &mut self.rooms,
        };
        *counter += 1;

        if node.level.carries_area() {
            self.total_area += node.area_or_zero();
        }
    }
}

/// Count every node once and sum `area` over plots and rooms.
///
/// Missing or non-numeric areas count as zero. The input must be a tree;
/// there is no cycle detection.
pub fn compute_metrics(roots: &[SpatialNode]) -> TreeMetrics {
    let mut metrics = TreeMetrics::default();
    let mut pending: Vec<&SpatialNode> = roots.iter().rev().collect();

    while let Some(node) = pending.pop() {
        metrics.record(node);
        pending.extend(node.children.iter().rev());
    }

    metrics
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tree_node_count;
    use serde_json::json;

    fn plot(id: &str, area: Option<f64>) -> SpatialNode {
        let node = SpatialNode::new(id, SpatialLevel::Plot, id, id);
        match area {
            Some(area) => node.with_area(area),
            None => node,
        }
    }

    #[test]
    fn test_empty_tree() {
        let metrics = compute_metrics(&[]);
        assert_eq!(metrics, TreeMetrics::default());
        assert_eq!(metrics.total_nodes(), 0);
    }

    #[test]
    fn test_area_counts_only_plots_and_rooms() {
        let room = SpatialNode::new("r1", SpatialLevel::Room, "R1", "").with_area(12.5);
        let floor = SpatialNode::new("f1", SpatialLevel::Floor, "F1", "")
            .with_area(999.0)
            .with_child(room);
        let building = SpatialNode::new("bd1", SpatialLevel::Building, "BD1", "")
            .with_area(999.0)
            .with_child(floor);
        let block = SpatialNode::new("b1", SpatialLevel::Block, "B1", "")
            .with_child(plot("p1", Some(100.0)).with_child(building))
            .with_child(plot("p2", None));
        let tree = vec![SpatialNode::new("z1", SpatialLevel::Zone, "Z1", "").with_child(block)];

        let metrics = compute_metrics(&tree);

        assert_eq!(metrics.plots, 2);
        assert_eq!(metrics.rooms, 1);
        assert_eq!(metrics.total_area, 112.5);
        assert_eq!(metrics.total_nodes(), tree_node_count(&tree));
    }

    #[test]
    fn test_non_numeric_area_is_zero() {
        let node: SpatialNode = serde_json::from_value(json!({
            "id": "p", "type": "PLOT", "area": "unsurveyed"
        }))
        .unwrap();
        let block = SpatialNode::new("b", SpatialLevel::Block, "B", "").with_child(node);
        let tree = vec![SpatialNode::new("z", SpatialLevel::Zone, "Z", "").with_child(block)];

        let metrics = compute_metrics(&tree);
        assert_eq!(metrics.plots, 1);
        assert_eq!(metrics.total_area, 0.0);
    }

    #[test]
    fn test_count_for_matches_fields() {
        let tree = vec![
            SpatialNode::new("z1", SpatialLevel::Zone, "Z1", ""),
            SpatialNode::new("z2", SpatialLevel::Zone, "Z2", ""),
        ];
        let metrics = compute_metrics(&tree);
        assert_eq!(metrics.count_for(SpatialLevel::Zone), 2);
        assert_eq!(metrics.count_for(SpatialLevel::Room), 0);
    }
}
