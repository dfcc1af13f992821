//! Tests for building the saga/arc hierarchy and lookup indices from a dataset

use sagatree::domain::hierarchy::build;
use sagatree::domain::{Document, NodeType, Summary};
use sagatree::util::testing::init_test_setup;

const FIXTURE: &str = include_str!("resources/one_piece_anime.json");

fn document() -> Document {
    Document::parse(FIXTURE).expect("fixture parses")
}

#[test]
fn given_dataset_when_building_then_structure_mirrors_document_order() {
    init_test_setup();
    let doc = document();

    let (root, _) = build(&doc);

    assert_eq!(root.name, "One Piece");
    assert_eq!(root.node_type, NodeType::Root);
    let sagas: Vec<_> = root.children.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(sagas, ["East Blue", "Alabasta", "Final"]);
    let east_blue_arcs: Vec<_> = root.children[0]
        .children
        .iter()
        .map(|a| a.id.as_deref().unwrap())
        .collect();
    assert_eq!(east_blue_arcs, ["romance_dawn", "orange_town", "loguetown"]);
    assert!(root.children[0].children.iter().all(|a| a.is_leaf()));
}

#[test]
fn given_arc_with_split_ranges_when_building_then_each_range_formatted() {
    let (root, _) = build(&document());

    let loguetown = root.find_arc("loguetown").expect("loguetown node");

    assert_eq!(loguetown.range.as_deref(), Some("E48 – E50, E53 onward"));
}

#[test]
fn given_open_saga_range_when_building_then_formatted_as_onward() {
    let (root, _) = build(&document());

    let final_saga = &root.children[2];

    assert_eq!(final_saga.range.as_deref(), Some("E1086 onward"));
    assert_eq!(final_saga.super_saga.as_deref(), Some("Yonko"));
    assert_eq!(
        root.find_arc("egghead").unwrap().range.as_deref(),
        Some("E1086 onward")
    );
}

#[test]
fn given_dataset_when_building_then_every_arc_maps_to_its_saga() {
    let doc = document();

    let (_, indices) = build(&doc);

    for saga in &doc.sagas {
        assert_eq!(indices.saga_name(&saga.id), Some(saga.name.as_str()));
        for arc in &saga.arcs {
            assert_eq!(indices.saga_of_arc(&arc.id), Some(saga.id.as_str()));
            assert_eq!(indices.arc_name(&arc.id), Some(arc.name.as_str()));
        }
    }
    assert_eq!(indices.saga_count(), 3);
    assert_eq!(indices.arc_count(), 6);
}

#[test]
fn given_ids_missing_from_index_when_resolving_then_raw_id_returned() {
    let (_, indices) = build(&document());

    assert_eq!(indices.resolve_saga_name("lost_saga"), "lost_saga");
    assert_eq!(indices.resolve_arc_name("lost_arc"), "lost_arc");
    assert_eq!(indices.saga_of_arc("lost_arc"), None);
}

#[test]
fn given_hierarchy_when_serializing_then_layout_shape_is_used() {
    let (root, _) = build(&document());

    let json = serde_json::to_value(&root).unwrap();

    assert_eq!(json["type"], "root");
    assert!(json.get("range").is_none());
    let saga = &json["children"][0];
    assert_eq!(saga["type"], "saga");
    assert_eq!(saga["superSaga"], "Paradise");
    assert_eq!(saga["range"], "E1 – E61");
    let arc = &saga["children"][0];
    assert_eq!(arc["type"], "arc");
    assert_eq!(arc["id"], "romance_dawn");
    assert!(arc.get("children").is_none());
}

#[test]
fn given_dataset_when_summarizing_then_counts_sagas_and_arcs() {
    let summary = Summary::from_document(&document());

    assert_eq!(summary.series, "One Piece");
    assert_eq!(summary.status, "Ongoing");
    assert_eq!(summary.total_episodes, 1122);
    assert_eq!((summary.sagas, summary.arcs), (3, 6));
}
