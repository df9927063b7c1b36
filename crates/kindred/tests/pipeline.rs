use kindred::render::{FamilyLayout, FamilyRenderer, LayoutVariant, layout_json};
use kindred::{SnapshotShape, TreeConfig, detect_shape};

const KEYED: &str = r#"{
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
}"#;

const RECORDS: &str = r#"{
  "person_id": 1,
  "records": [
    { "model": "webapp.legalname", "pk": 21, "fields": { "first_name": "Robin", "last_name": "Fen" } },
    { "model": "webapp.legalname", "pk": 22, "fields": { "first_name": "Ada", "last_name": "Fen" } },
    { "model": "webapp.person", "pk": 1, "fields": { "legal_name": 21 } },
    { "model": "webapp.person", "pk": 2, "fields": { "legal_name": 22 } },
    { "model": "webapp.partnership", "pk": 11, "fields": { "children": [1] } },
    { "model": "webapp.personpartnership", "pk": 31, "fields": { "person": 2, "partnership": 11 } }
  ]
}"#;

#[test]
fn json_text_lays_out_as_a_graph() {
    let layout = layout_json(KEYED, &TreeConfig::defaults(), LayoutVariant::Graph).unwrap();
    let FamilyLayout::Graph(doc) = layout else {
        panic!("expected the graph variant");
    };
    assert_eq!(doc.focus.to_string(), "person_1");
    assert_eq!(doc.graph.nodes.len(), 10);
    assert_eq!(doc.graph.edges.len(), 8);
}

#[test]
fn renderer_bundles_the_pipeline() {
    let svg = FamilyRenderer::new().render_svg_json(KEYED).unwrap();
    assert!(svg.contains(r#"<rect class="person-box""#));

    let svg = FamilyRenderer::new()
        .with_variant(LayoutVariant::Rows)
        .render_svg_json(KEYED)
        .unwrap();
    assert!(svg.contains(r#"<rect class="row-box""#));
}

#[test]
fn both_historical_shapes_flow_through_the_same_pipeline() {
    let value: serde_json::Value = serde_json::from_str(RECORDS).unwrap();
    assert_eq!(detect_shape(&value), Some(SnapshotShape::Records));

    let layout = layout_json(RECORDS, &TreeConfig::defaults(), LayoutVariant::Graph).unwrap();
    let FamilyLayout::Graph(doc) = layout else {
        panic!("expected the graph variant");
    };
    // Focal person plus their one parent and its partnership anchor.
    assert_eq!(doc.graph.nodes.len(), 3);
}

#[test]
fn malformed_text_surfaces_the_snapshot_error() {
    let err = layout_json("nonsense", &TreeConfig::defaults(), LayoutVariant::Graph).unwrap_err();
    assert!(matches!(
        err,
        kindred::render::HeadlessError::Snapshot(kindred::Error::Json(_))
    ));
}
