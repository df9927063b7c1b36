use kindred_core::{FamilySnapshot, TreeConfig};
use kindred_render::model::{Edge, FamilyGraph, NodeId, PositionedNode};
use kindred_render::{build_family_graph, build_graph_document};
use serde_json::json;

fn family_of_five() -> FamilySnapshot {
    // Focal person 1 with one parent (2, no co-partner), one partner (3) and
    // two children (4, 5).
    FamilySnapshot::from_value(&json!({
        "focus": 1,
        "persons": {
            "1": { "name": { "first": "Robin", "last": "Fen" }, "parents": [2], "partnerships": [10] },
            "2": { "name": { "first": "Ada", "last": "Fen" }, "partnerships": [11] },
            "3": { "name": { "first": "Kim", "last": "Sand" }, "partnerships": [10] },
            "4": { "name": { "first": "Noa", "last": "Fen" }, "parents": [1, 3] },
            "5": { "name": { "first": "Iris", "last": "Fen" }, "parents": [1, 3] }
        },
        "partnerships": {
            "10": { "members": [1, 3], "children": [4, 5] },
            "11": { "members": [2], "children": [1] }
        }
    }))
    .unwrap()
}

fn positions(graph: &FamilyGraph) -> Vec<(String, f64, f64)> {
    graph
        .nodes
        .iter()
        .map(|n| (n.id.to_string(), n.x, n.y))
        .collect()
}

fn edge_pairs(graph: &FamilyGraph) -> Vec<(String, String)> {
    graph
        .edges
        .iter()
        .map(|e| (e.source.to_string(), e.target.to_string()))
        .collect()
}

#[test]
fn family_of_five_layout() {
    let graph = build_family_graph(&family_of_five(), &TreeConfig::defaults()).unwrap();
    graph.validate().unwrap();

    // 1 focal + 1 parent + ancestor anchor + 1 partner + descendant anchor
    // + 2 children + 2 child anchors + 1 midpoint.
    assert_eq!(graph.nodes.len(), 10);
    assert_eq!(graph.edges.len(), 8);

    assert_eq!(
        positions(&graph),
        vec![
            ("person_1".to_string(), 100.0, 100.0),
            ("person_2".to_string(), 50.0, 50.0),
            ("partnership_11".to_string(), 100.0, 50.0),
            ("partnership_10".to_string(), 150.0, 100.0),
            ("person_3".to_string(), 200.0, 100.0),
            ("person_4".to_string(), 125.0, 150.0),
            ("child_4".to_string(), 125.0, 125.0),
            ("person_5".to_string(), 175.0, 150.0),
            ("child_5".to_string(), 175.0, 125.0),
            ("midpoint_10".to_string(), 150.0, 125.0),
        ]
    );

    assert_eq!(
        edge_pairs(&graph),
        vec![
            ("person_1".to_string(), "partnership_11".to_string()),
            ("person_2".to_string(), "partnership_11".to_string()),
            ("person_1".to_string(), "partnership_10".to_string()),
            ("person_3".to_string(), "partnership_10".to_string()),
            ("child_4".to_string(), "person_4".to_string()),
            ("child_5".to_string(), "person_5".to_string()),
            ("child_5".to_string(), "child_4".to_string()),
            ("partnership_10".to_string(), "midpoint_10".to_string()),
        ]
    );
}

#[test]
fn coordinates_are_non_negative_after_normalization() {
    let graph = build_family_graph(&family_of_five(), &TreeConfig::defaults()).unwrap();
    for node in &graph.nodes {
        assert!(node.x >= 0.0, "{} has negative x {}", node.id, node.x);
        assert!(node.y >= 0.0, "{} has negative y {}", node.id, node.y);
    }
    // The minimum coordinate lands exactly on the margin.
    let min_x = graph.nodes.iter().map(|n| n.x).fold(f64::INFINITY, f64::min);
    let min_y = graph.nodes.iter().map(|n| n.y).fold(f64::INFINITY, f64::min);
    assert_eq!(min_x, 50.0);
    assert_eq!(min_y, 50.0);
}

#[test]
fn lone_person_yields_one_node_and_no_edges() {
    let snapshot = FamilySnapshot::from_value(&json!({
        "focus": 7,
        "persons": { "7": { "name": { "first": "Solo", "last": "Reed" } } },
        "partnerships": {}
    }))
    .unwrap();
    let graph = build_family_graph(&snapshot, &TreeConfig::defaults()).unwrap();
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    // With nothing extending past the origin the focal node sits on the
    // margin itself.
    let focal = &graph.nodes[0];
    assert_eq!(focal.id.to_string(), "person_7");
    assert_eq!((focal.x, focal.y), (50.0, 50.0));
}

#[test]
fn building_twice_is_structurally_identical() {
    let snapshot = family_of_five();
    let config = TreeConfig::defaults();
    let first = build_family_graph(&snapshot, &config).unwrap();
    let second = build_family_graph(&snapshot, &config).unwrap();
    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
}

#[test]
fn person_nodes_carry_labels_and_links() {
    let graph = build_family_graph(&family_of_five(), &TreeConfig::defaults()).unwrap();
    let node = |id: &str| -> &PositionedNode {
        graph
            .nodes
            .iter()
            .find(|n| n.id.to_string() == id)
            .unwrap()
    };
    assert_eq!(node("person_1").label.as_deref(), Some("Robin Fen"));
    assert_eq!(node("person_1").href.as_deref(), Some("/person/1/graph/"));
    assert_eq!(node("person_3").href.as_deref(), Some("/person/3/graph/"));
    assert_eq!(node("partnership_10").label, None);
    assert_eq!(node("partnership_10").href, None);
    assert_eq!(node("midpoint_10").href, None);
}

#[test]
fn unresolvable_children_leave_slot_gaps() {
    let snapshot = FamilySnapshot::from_value(&json!({
        "focus": 1,
        "persons": {
            "1": { "partnerships": [10] },
            "4": {},
            "5": {}
        },
        "partnerships": {
            "10": { "members": [1], "children": [4, 99, 5] }
        }
    }))
    .unwrap();
    let graph = build_family_graph(&snapshot, &TreeConfig::defaults()).unwrap();
    graph.validate().unwrap();

    // Three slots centered under the anchor at x=50: 0, 50, 100. The raw
    // slot arithmetic keeps the gap where child 99 would sit.
    let person_4 = graph.node("person_4".parse::<NodeId>().unwrap()).unwrap();
    let person_5 = graph.node("person_5".parse::<NodeId>().unwrap()).unwrap();
    assert_eq!(person_5.x - person_4.x, 100.0);

    // The sibling link joins the two placed children across the gap.
    assert!(
        edge_pairs(&graph).contains(&("child_5".to_string(), "child_4".to_string())),
        "missing sibling link across the slot gap"
    );
}

#[test]
fn repeated_people_are_placed_once() {
    // Child 5 appears in both of the focal person's partnerships; the first
    // placement wins and the second partnership drops its extra edges.
    let snapshot = FamilySnapshot::from_value(&json!({
        "focus": 1,
        "persons": {
            "1": { "partnerships": [10, 12] },
            "3": { "partnerships": [10] },
            "5": {},
            "6": { "partnerships": [12] },
            "7": {}
        },
        "partnerships": {
            "10": { "members": [1, 3], "children": [5] },
            "12": { "members": [1, 6], "children": [5, 7] }
        }
    }))
    .unwrap();
    let graph = build_family_graph(&snapshot, &TreeConfig::defaults()).unwrap();
    graph.validate().unwrap();

    let person_5_nodes = graph
        .nodes
        .iter()
        .filter(|n| n.id.to_string() == "person_5")
        .count();
    assert_eq!(person_5_nodes, 1);

    // Partnership 12 still gets its anchor, its second child and a midpoint,
    // but no sibling link since only one of its children was placed here.
    assert!(graph.node("partnership_12".parse().unwrap()).is_some());
    assert!(graph.node("person_7".parse().unwrap()).is_some());
    assert!(graph.node("midpoint_12".parse().unwrap()).is_some());
    assert!(
        !edge_pairs(&graph).contains(&("child_7".to_string(), "child_5".to_string())),
        "sibling link must only join children placed for the same partnership"
    );
}

#[test]
fn missing_focus_person_fails_the_build() {
    let snapshot = FamilySnapshot {
        focus: kindred_core::PersonId(99),
        persons: Default::default(),
        partnerships: Default::default(),
    };
    let err = build_family_graph(&snapshot, &TreeConfig::defaults()).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Focal person 99 is not present in the snapshot"
    );
}

#[test]
fn graph_document_carries_viewport_and_focus() {
    let snapshot = family_of_five();
    let doc = build_graph_document(&snapshot, &TreeConfig::defaults()).unwrap();
    assert_eq!((doc.width, doc.height), (500.0, 500.0));
    assert_eq!(doc.focus.to_string(), "person_1");

    let mut config = TreeConfig::defaults();
    config.deep_merge(&json!({ "viewport": { "width": 800, "height": 600 } }));
    let doc = build_graph_document(&snapshot, &config).unwrap();
    assert_eq!((doc.width, doc.height), (800.0, 600.0));

    let value = serde_json::to_value(&doc).unwrap();
    assert_eq!(value["focus"], json!("person_1"));
    assert_eq!(value["graph"]["nodes"][0]["id"], json!("person_1"));
}

#[test]
fn validation_names_the_dangling_edge_endpoint() {
    let mut graph = build_family_graph(&family_of_five(), &TreeConfig::defaults()).unwrap();
    graph.edges.push(Edge {
        source: "person_1".parse().unwrap(),
        target: "person_999".parse().unwrap(),
    });
    let err = graph.validate().unwrap_err();
    assert_eq!(
        err.to_string(),
        "graph contains an edge with a missing endpoint: person_1 -> person_999"
    );
}

#[test]
fn validation_rejects_duplicate_node_ids() {
    let mut graph = build_family_graph(&family_of_five(), &TreeConfig::defaults()).unwrap();
    let repeat = graph.nodes[0].clone();
    graph.nodes.push(repeat);
    let err = graph.validate().unwrap_err();
    assert_eq!(err.to_string(), "graph contains a duplicate node id: person_1");
}
