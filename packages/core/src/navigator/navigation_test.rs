//! Tests for NavigationState

use super::*;

/// Z1 { B1 { P1, P2 { BD1 { F1 { R1 } } } } }, Z2 {}
fn registry() -> Vec<SpatialNode> {
    let room = SpatialNode::new("R1", SpatialLevel::Room, "R1", "Room 1");
    let floor = SpatialNode::new("F1", SpatialLevel::Floor, "F1", "Ground").with_child(room);
    let building =
        SpatialNode::new("BD1", SpatialLevel::Building, "BD1", "Depot").with_child(floor);
    let p1 = SpatialNode::new("P1", SpatialLevel::Plot, "P1", "").with_area(100.0);
    let p2 = SpatialNode::new("P2", SpatialLevel::Plot, "P2", "")
        .with_area(50.0)
        .with_child(building);
    let block = SpatialNode::new("B1", SpatialLevel::Block, "B1", "")
        .with_child(p1)
        .with_child(p2);

    vec![
        SpatialNode::new("Z1", SpatialLevel::Zone, "Z1", "North").with_child(block),
        SpatialNode::new("Z2", SpatialLevel::Zone, "Z2", "South"),
    ]
}

fn drill_path(nav: &mut NavigationState, tree: &[SpatialNode], keys: &[&str]) {
    for key in keys {
        let node = crate::navigator::find_resource_by_id(tree, key).unwrap();
        nav.drill_down(node);
    }
}

fn ids<'a>(rows: &[FlattenedNode<'a>]) -> Vec<&'a str> {
    rows.iter().map(|row| row.node.id.as_str()).collect()
}

#[test]
fn test_starts_at_root() {
    let tree = registry();
    let nav = NavigationState::new();

    assert_eq!(nav.mode(), &ViewMode::Root);
    assert_eq!(nav.next_addable_level(), SpatialLevel::Zone);
    assert!(nav.can_add());
    assert_eq!(ids(&nav.visible_nodes(&tree)), vec!["Z1", "Z2"]);
}

#[test]
fn test_drill_down_lists_children_of_last_entry() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1"]);

    assert_eq!(nav.stack_len(), 2);
    assert_eq!(nav.next_addable_level(), SpatialLevel::Plot);
    assert_eq!(nav.display_level(), SpatialLevel::Plot);

    let rows = nav.visible_nodes(&tree);
    assert_eq!(ids(&rows), vec!["P1", "P2"]);
    assert!(rows
        .iter()
        .all(|row| row.parent_ref_name.as_deref() == Some("B1")));
}

#[test]
fn test_go_back_truncates_to_prefix() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1", "P2", "BD1"]);
    let original: Vec<Breadcrumb> = nav.breadcrumbs().to_vec();

    nav.go_back(1);

    assert_eq!(nav.stack_len(), 2);
    assert_eq!(nav.breadcrumbs(), &original[..2]);
}

#[test]
fn test_go_back_negative_returns_home() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1"]);

    nav.go_back(-1);
    assert_eq!(nav.mode(), &ViewMode::Root);
}

#[test]
fn test_go_back_out_of_range_is_noop() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1"]);

    nav.go_back(5);
    assert_eq!(nav.stack_len(), 2);

    let mut discovery = NavigationState::new();
    discovery.enter_discovery(SpatialLevel::Room);
    discovery.go_back(0);
    assert_eq!(discovery.discovery_level(), Some(SpatialLevel::Room));
}

#[test]
fn test_discovery_and_drill_are_mutually_exclusive() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1"]);

    nav.enter_discovery(SpatialLevel::Plot);
    assert_eq!(nav.stack_len(), 0);
    assert_eq!(nav.discovery_level(), Some(SpatialLevel::Plot));
    assert_eq!(ids(&nav.visible_nodes(&tree)), vec!["P1", "P2"]);

    drill_path(&mut nav, &tree, &["P2"]);
    assert_eq!(nav.discovery_level(), None);
    assert_eq!(nav.stack_len(), 1);
    assert_eq!(ids(&nav.visible_nodes(&tree)), vec!["BD1"]);
}

#[test]
fn test_go_home_clears_everything() {
    let mut nav = NavigationState::new();
    nav.enter_discovery(SpatialLevel::Floor);
    nav.go_home();
    assert_eq!(nav.mode(), &ViewMode::Root);
    assert_eq!(nav.discovery_level(), None);
}

#[test]
fn test_room_is_terminal() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1", "P2", "BD1", "F1", "R1"]);

    assert_eq!(nav.next_addable_level(), SpatialLevel::Room);
    assert!(!nav.can_add());
    assert!(nav.visible_nodes(&tree).is_empty());
}

#[test]
fn test_discovery_display_level_and_add_level() {
    let mut nav = NavigationState::new();
    nav.enter_discovery(SpatialLevel::Room);
    assert_eq!(nav.display_level(), SpatialLevel::Room);
    assert_eq!(nav.next_addable_level(), SpatialLevel::Zone);
}

#[test]
fn test_reconcile_keeps_resolvable_stack_and_refreshes_labels() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1"]);

    let mut renamed = registry();
    renamed[0].name = "North (renamed)".to_string();

    assert_eq!(nav.reconcile(&renamed), 0);
    assert_eq!(nav.stack_len(), 2);
    assert_eq!(nav.breadcrumbs()[0].label, "North (renamed)");
}

#[test]
fn test_reconcile_truncates_at_deleted_node() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1", "P2", "BD1"]);

    let mut pruned = registry();
    pruned[0].children[0].children.truncate(1); // P2 removed

    assert_eq!(nav.reconcile(&pruned), 2);
    assert_eq!(nav.stack_len(), 2);
    assert_eq!(ids(&nav.visible_nodes(&pruned)), vec!["P1"]);
}

#[test]
fn test_reconcile_falls_back_to_root() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1"]);

    let pruned: Vec<SpatialNode> = registry().into_iter().skip(1).collect();
    assert_eq!(nav.reconcile(&pruned), 1);
    assert_eq!(nav.mode(), &ViewMode::Root);
}

#[test]
fn test_stale_stack_lists_nothing_until_reconciled() {
    let tree = registry();
    let mut nav = NavigationState::new();
    drill_path(&mut nav, &tree, &["Z1", "B1"]);

    let empty: Vec<SpatialNode> = Vec::new();
    assert!(nav.visible_nodes(&empty).is_empty());
    assert_eq!(nav.stack_len(), 2);
}
