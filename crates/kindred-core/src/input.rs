//! Input adapters for the two historical snapshot shapes.
//!
//! The hosting page serialized its data two ways over time: a keyed mapping
//! (`persons` / `partnerships` objects) and a flat list of tagged model
//! records (the page-serializer dump). Both feed the same [`FamilySnapshot`];
//! [`detect_shape`] sniffs which adapter applies.

use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;

use crate::error::Result;
use crate::model::{Partnership, PartnershipId, Person, PersonId, PersonName};
use crate::snapshot::FamilySnapshot;

/// Which historical document shape an input matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotShape {
    /// `{"focus": .., "persons": {..}, "partnerships": {..}}`
    Keyed,
    /// `{"person_id": .., "records": [{"model": .., "pk": .., "fields": ..}]}`
    Records,
}

impl SnapshotShape {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Keyed => "keyed",
            Self::Records => "records",
        }
    }
}

impl std::fmt::Display for SnapshotShape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sniffs the document shape without fully parsing it.
pub fn detect_shape(value: &Value) -> Option<SnapshotShape> {
    let obj = value.as_object()?;
    if obj.get("records").is_some_and(Value::is_array) {
        return Some(SnapshotShape::Records);
    }
    if obj.get("persons").is_some_and(Value::is_object) {
        return Some(SnapshotShape::Keyed);
    }
    None
}

/// The keyed shape is the snapshot's own serde form.
pub(crate) fn from_keyed(value: &Value) -> Result<FamilySnapshot> {
    Ok(FamilySnapshot::deserialize(value)?)
}

#[derive(Debug, Deserialize)]
struct RecordsDoc {
    person_id: i64,
    records: Vec<RawRecord>,
}

#[derive(Debug, Deserialize)]
struct RawRecord {
    model: String,
    pk: i64,
    #[serde(default)]
    fields: Value,
}

#[derive(Debug, Deserialize)]
struct PersonFields {
    #[serde(default)]
    legal_name: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct NameFields {
    #[serde(default)]
    first_name: String,
    #[serde(default)]
    last_name: String,
}

#[derive(Debug, Deserialize)]
struct PartnershipFields {
    #[serde(default)]
    children: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct JoinFields {
    person: i64,
    partnership: i64,
}

/// Assembles a snapshot from the page-serializer dump.
///
/// Person order, partnership order and join-row order in the record list are
/// preserved; the membership join rows decide both a person's partnership
/// list and a partnership's member list. Parent lists are derived afterwards
/// from partnership child lists, in record order. Unknown model tags are
/// skipped.
pub(crate) fn from_records(value: &Value) -> Result<FamilySnapshot> {
    let doc = RecordsDoc::deserialize(value)?;

    let mut name_pks: Vec<(PersonId, Option<i64>)> = Vec::new();
    let mut names: IndexMap<i64, PersonName> = IndexMap::new();
    let mut persons: IndexMap<PersonId, Person> = IndexMap::new();
    let mut partnerships: IndexMap<PartnershipId, Partnership> = IndexMap::new();
    let mut joins: Vec<(PersonId, PartnershipId)> = Vec::new();

    for record in &doc.records {
        match record.model.as_str() {
            "webapp.person" => {
                let fields = PersonFields::deserialize(&record.fields)?;
                let id = PersonId(record.pk);
                if persons.contains_key(&id) {
                    tracing::debug!("skipping duplicate person record: {}", id);
                    continue;
                }
                name_pks.push((id, fields.legal_name));
                persons.insert(id, Person::default());
            }
            "webapp.legalname" => {
                let fields = NameFields::deserialize(&record.fields)?;
                names.insert(
                    record.pk,
                    PersonName::new(fields.first_name, fields.last_name),
                );
            }
            "webapp.partnership" => {
                let fields = PartnershipFields::deserialize(&record.fields)?;
                let id = PartnershipId(record.pk);
                if partnerships.contains_key(&id) {
                    tracing::debug!("skipping duplicate partnership record: {}", id);
                    continue;
                }
                partnerships.insert(
                    id,
                    Partnership {
                        members: Vec::new(),
                        children: fields.children.into_iter().map(PersonId).collect(),
                    },
                );
            }
            "webapp.personpartnership" => {
                let fields = JoinFields::deserialize(&record.fields)?;
                joins.push((PersonId(fields.person), PartnershipId(fields.partnership)));
            }
            other => {
                tracing::debug!("skipping unrecognized record model: {}", other);
            }
        }
    }

    for (person_id, name_pk) in name_pks {
        let name = name_pk
            .and_then(|pk| names.get(&pk).cloned())
            .unwrap_or_default();
        if let Some(person) = persons.get_mut(&person_id) {
            person.name = name;
        }
    }

    // Join rows are recorded on whichever side exists; dangling halves are
    // dropped at resolution time like every other unknown id.
    for (person_id, partnership_id) in joins {
        if let Some(person) = persons.get_mut(&person_id) {
            person.partnerships.push(partnership_id);
        } else {
            tracing::debug!("membership row for unknown person: {}", person_id);
        }
        if let Some(partnership) = partnerships.get_mut(&partnership_id) {
            partnership.members.push(person_id);
        } else {
            tracing::debug!("membership row for unknown partnership: {}", partnership_id);
        }
    }

    let mut derived: Vec<(PersonId, Vec<PersonId>)> = Vec::new();
    for partnership in partnerships.values() {
        for &child in &partnership.children {
            derived.push((child, partnership.members.clone()));
        }
    }
    for (child, parents) in derived {
        if let Some(person) = persons.get_mut(&child) {
            person.parents.extend(parents);
        }
    }

    Ok(FamilySnapshot {
        focus: PersonId(doc.person_id),
        persons,
        partnerships,
    })
}
