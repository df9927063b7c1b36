//! The load-once family snapshot.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::input::{self, SnapshotShape};
use crate::model::{Partnership, PartnershipId, Person, PersonId};

/// A static view of the family records around one focal person.
///
/// Collections keep the order the hosting page serialized the records in, and
/// every layout pass walks them verbatim; building twice from the same
/// snapshot is therefore structurally identical. The snapshot is never
/// mutated after loading.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FamilySnapshot {
    pub focus: PersonId,
    #[serde(default)]
    pub persons: IndexMap<PersonId, Person>,
    #[serde(default)]
    pub partnerships: IndexMap<PartnershipId, Partnership>,
}

impl FamilySnapshot {
    /// Parses either historical snapshot shape and validates the focus
    /// reference.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Same as [`from_json_str`](Self::from_json_str) for an already parsed
    /// document.
    pub fn from_value(value: &Value) -> Result<Self> {
        let snapshot = match input::detect_shape(value) {
            Some(SnapshotShape::Keyed) => input::from_keyed(value)?,
            Some(SnapshotShape::Records) => input::from_records(value)?,
            None => return Err(Error::UnknownShape),
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// The one structural requirement: the focal person must exist. Every
    /// other dangling reference degrades at resolution time instead.
    pub fn validate(&self) -> Result<()> {
        if self.persons.contains_key(&self.focus) {
            Ok(())
        } else {
            Err(Error::MissingFocus { id: self.focus })
        }
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.persons.get(&id)
    }

    pub fn partnership(&self, id: PartnershipId) -> Option<&Partnership> {
        self.partnerships.get(&id)
    }

    pub fn focus_person(&self) -> Option<&Person> {
        self.person(self.focus)
    }

    /// A person's partnerships in join order, skipping ids that do not key a
    /// record.
    pub fn partnerships_of<'a>(
        &'a self,
        person: &'a Person,
    ) -> impl Iterator<Item = (PartnershipId, &'a Partnership)> {
        person.partnerships.iter().filter_map(|&id| {
            let found = self.partnerships.get(&id);
            if found.is_none() {
                tracing::debug!("skipping unknown partnership reference: {}", id);
            }
            found.map(|p| (id, p))
        })
    }

    /// A partnership's members in join order, skipping unknown ids.
    pub fn members_of<'a>(
        &'a self,
        partnership: &'a Partnership,
    ) -> impl Iterator<Item = (PersonId, &'a Person)> {
        partnership.members.iter().filter_map(|&id| {
            let found = self.persons.get(&id);
            if found.is_none() {
                tracing::debug!("skipping unknown member reference: {}", id);
            }
            found.map(|p| (id, p))
        })
    }

    /// A partnership's children in list order, skipping unknown ids.
    pub fn children_of<'a>(
        &'a self,
        partnership: &'a Partnership,
    ) -> impl Iterator<Item = (PersonId, &'a Person)> {
        partnership.children.iter().filter_map(|&id| {
            let found = self.persons.get(&id);
            if found.is_none() {
                tracing::debug!("skipping unknown child reference: {}", id);
            }
            found.map(|p| (id, p))
        })
    }

    /// Display label for a person node, `None` when the record carries no
    /// name parts (or no record at all).
    pub fn label_of(&self, id: PersonId) -> Option<String> {
        let name = self.person(id)?.name.full();
        (!name.is_empty()).then_some(name)
    }
}
