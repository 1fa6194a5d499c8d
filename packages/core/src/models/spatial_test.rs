//! Tests for SpatialNode / SpatialLevel

use super::*;
use serde_json::json;

fn sample_tree() -> Vec<SpatialNode> {
    let room = SpatialNode::new("r-1", SpatialLevel::Room, "R1", "Room 1");
    let floor = SpatialNode::new("f-1", SpatialLevel::Floor, "F1", "Ground").with_child(room);
    let building =
        SpatialNode::new("bd-1", SpatialLevel::Building, "BD1", "Tower").with_child(floor);
    let plot = SpatialNode::new("p-1", SpatialLevel::Plot, "P1", "Plot 1").with_child(building);
    let block = SpatialNode::new("b-1", SpatialLevel::Block, "B1", "Block 1").with_child(plot);
    vec![SpatialNode::new("z-1", SpatialLevel::Zone, "Z1", "Zone 1").with_child(block)]
}

#[test]
fn test_level_parse_is_case_insensitive() {
    assert_eq!("ROOM".parse::<SpatialLevel>().unwrap(), SpatialLevel::Room);
    assert_eq!("building".parse::<SpatialLevel>().unwrap(), SpatialLevel::Building);
    assert_eq!(" Plot ".parse::<SpatialLevel>().unwrap(), SpatialLevel::Plot);

    let err = "parcel".parse::<SpatialLevel>().unwrap_err();
    assert_eq!(err, ValidationError::UnknownLevel("parcel".to_string()));
}

#[test]
fn test_adjacency_map_is_total_and_room_terminal() {
    assert_eq!(SpatialLevel::Zone.next(), SpatialLevel::Block);
    assert_eq!(SpatialLevel::Block.next(), SpatialLevel::Plot);
    assert_eq!(SpatialLevel::Plot.next(), SpatialLevel::Building);
    assert_eq!(SpatialLevel::Building.next(), SpatialLevel::Floor);
    assert_eq!(SpatialLevel::Floor.next(), SpatialLevel::Room);
    assert_eq!(SpatialLevel::Room.next(), SpatialLevel::Room);
    assert_eq!(SpatialLevel::Room.child_level(), None);
}

#[test]
fn test_level_order_matches_depth() {
    for (depth, level) in SpatialLevel::ALL.into_iter().enumerate() {
        assert_eq!(level.depth(), depth);
    }
    assert!(SpatialLevel::Zone < SpatialLevel::Room);
}

#[test]
fn test_deserialize_lenient_scalars() {
    let node: SpatialNode = serde_json::from_value(json!({
        "id": 17,
        "realId": "42",
        "parentId": 9,
        "type": "plot",
        "code": "P-17",
        "name": null,
        "area": "120.5",
        "contractArea": 100,
        "areaVariance": "n/a",
        "children": null,
        "landUse": "Industrial"
    }))
    .unwrap();

    assert_eq!(node.id, "17");
    assert_eq!(node.real_id, Some(42));
    assert_eq!(node.parent_id.as_deref(), Some("9"));
    assert_eq!(node.level, SpatialLevel::Plot);
    assert_eq!(node.name, "");
    assert_eq!(node.area, Some(120.5));
    assert_eq!(node.contract_area, Some(100.0));
    assert_eq!(node.area_variance, None);
    assert!(node.children.is_empty());
    assert_eq!(node.attributes.get("landUse"), Some(&json!("Industrial")));
}

#[test]
fn test_serialize_round_trips_extra_attributes() {
    let node = SpatialNode::new("r-1", SpatialLevel::Room, "R1", "Room 1")
        .with_attribute("occupantName", json!("Acme Ltd"));
    let value = serde_json::to_value(&node).unwrap();

    assert_eq!(value["type"], json!("ROOM"));
    assert_eq!(value["occupantName"], json!("Acme Ltd"));
    assert!(value.get("area").is_none());
}

#[test]
fn test_display_name_falls_back_to_code() {
    let named = SpatialNode::new("a", SpatialLevel::Block, "B1", "North Block");
    let unnamed = SpatialNode::new("b", SpatialLevel::Block, "B2", "  ");
    assert_eq!(named.display_name(), "North Block");
    assert_eq!(unnamed.display_name(), "B2");
}

#[test]
fn test_matches_id_checks_client_and_backend_keys() {
    let node = SpatialNode::new("plot-7", SpatialLevel::Plot, "P7", "").with_real_id(7);
    assert!(node.matches_id("plot-7"));
    assert!(node.matches_id("7"));
    assert!(!node.matches_id("8"));
    assert!(!node.matches_id("plot"));
}

#[test]
fn test_occupancy_helpers() {
    let room = SpatialNode::new("r", SpatialLevel::Room, "R", "")
        .with_attribute("tenantName", json!("  "))
        .with_attribute("occupantName", json!("Jane Doe"))
        .with_attribute("roomStatus", json!({ "name": "Reserved" }));
    assert_eq!(room.occupant_name(), Some("Jane Doe"));
    assert_eq!(room.room_status_name(), Some("Reserved"));

    let empty = SpatialNode::new("r2", SpatialLevel::Room, "R2", "");
    assert_eq!(empty.occupant_name(), None);
    assert_eq!(empty.room_status_name(), None);
}

#[test]
fn test_validate_hierarchy_accepts_strict_tree() {
    assert!(validate_hierarchy(&sample_tree()).is_ok());
    assert!(validate_hierarchy(&[]).is_ok());
}

#[test]
fn test_validate_hierarchy_rejects_non_zone_root() {
    let roots = vec![SpatialNode::new("b", SpatialLevel::Block, "B", "")];
    let err = validate_hierarchy(&roots).unwrap_err();
    assert!(matches!(err, ValidationError::RootLevel { level: SpatialLevel::Block, .. }));
}

#[test]
fn test_validate_hierarchy_rejects_skipped_level() {
    let plot = SpatialNode::new("p", SpatialLevel::Plot, "P", "");
    let roots = vec![SpatialNode::new("z", SpatialLevel::Zone, "Z", "").with_child(plot)];

    match validate_hierarchy(&roots).unwrap_err() {
        ValidationError::LevelOrder {
            node_id, expected, ..
        } => {
            assert_eq!(node_id, "p");
            assert_eq!(expected, SpatialLevel::Block);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_validate_hierarchy_rejects_room_children() {
    let mut tree = sample_tree();
    let room = &mut tree[0].children[0].children[0].children[0].children[0].children[0];
    room.children.push(SpatialNode::new("r-2", SpatialLevel::Room, "R2", ""));

    let err = validate_hierarchy(&tree).unwrap_err();
    assert_eq!(
        err,
        ValidationError::RoomHasChildren {
            node_id: "r-1".to_string()
        }
    );
}

#[test]
fn test_assign_missing_keys() {
    let mut roots: Vec<SpatialNode> = serde_json::from_value(json!([
        {
            "realId": 3,
            "type": "ZONE",
            "code": "Z3",
            "children": [
                { "type": "BLOCK", "code": "B?" }
            ]
        }
    ]))
    .unwrap();

    assign_missing_keys(&mut roots);

    assert_eq!(roots[0].id, "zone-3");
    let block = &roots[0].children[0];
    assert!(!block.id.is_empty());
    assert_eq!(block.parent_id.as_deref(), Some("zone-3"));
}

#[test]
fn test_node_count() {
    assert_eq!(tree_node_count(&sample_tree()), 6);
}
