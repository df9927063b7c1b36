use crate::*;
use serde_json::json;

fn sample_keyed() -> serde_json::Value {
    json!({
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
    })
}

#[test]
fn keyed_snapshot_parses_and_validates() {
    let snapshot = FamilySnapshot::from_value(&sample_keyed()).unwrap();
    assert_eq!(snapshot.focus, PersonId(1));
    assert_eq!(snapshot.persons.len(), 5);
    assert_eq!(snapshot.partnerships.len(), 2);
    assert_eq!(
        snapshot.partnership(PartnershipId(10)).unwrap().children,
        vec![PersonId(4), PersonId(5)]
    );
    assert_eq!(snapshot.focus_person().unwrap().name.full(), "Robin Fen");
}

#[test]
fn missing_focus_person_is_fatal() {
    let mut doc = sample_keyed();
    doc["focus"] = json!(99);
    let err = FamilySnapshot::from_value(&doc).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Focal person 99 is not present in the snapshot"
    );
}

#[test]
fn unrecognized_document_shape_is_fatal() {
    let err = FamilySnapshot::from_value(&json!({ "nodes": [], "edges": [] })).unwrap_err();
    assert!(matches!(err, Error::UnknownShape));
}

#[test]
fn malformed_json_is_fatal() {
    let err = FamilySnapshot::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, Error::Json(_)));
}

#[test]
fn dangling_references_resolve_to_nothing() {
    let mut doc = sample_keyed();
    doc["persons"]["1"]["partnerships"] = json!([10, 99]);
    doc["partnerships"]["10"]["members"] = json!([1, 3, 77]);
    doc["partnerships"]["10"]["children"] = json!([4, 5, 88]);
    let snapshot = FamilySnapshot::from_value(&doc).unwrap();

    let focus = snapshot.focus_person().unwrap();
    let resolved: Vec<PartnershipId> = snapshot
        .partnerships_of(focus)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(resolved, vec![PartnershipId(10)]);

    let partnership = snapshot.partnership(PartnershipId(10)).unwrap();
    let members: Vec<PersonId> = snapshot.members_of(partnership).map(|(id, _)| id).collect();
    assert_eq!(members, vec![PersonId(1), PersonId(3)]);
    let children: Vec<PersonId> = snapshot
        .children_of(partnership)
        .map(|(id, _)| id)
        .collect();
    assert_eq!(children, vec![PersonId(4), PersonId(5)]);
}

#[test]
fn label_of_joins_name_parts() {
    let mut doc = sample_keyed();
    doc["persons"]["2"]["name"] = json!({ "first": "Ada" });
    doc["persons"]["3"]["name"] = json!({ "last": "Sand" });
    doc["persons"]["4"]["name"] = json!({});
    let snapshot = FamilySnapshot::from_value(&doc).unwrap();

    assert_eq!(snapshot.label_of(PersonId(1)).as_deref(), Some("Robin Fen"));
    assert_eq!(snapshot.label_of(PersonId(2)).as_deref(), Some("Ada"));
    assert_eq!(snapshot.label_of(PersonId(3)).as_deref(), Some("Sand"));
    assert_eq!(snapshot.label_of(PersonId(4)), None);
    assert_eq!(snapshot.label_of(PersonId(999)), None);
}
