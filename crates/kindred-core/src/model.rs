//! Record types for the family snapshot.
//!
//! These mirror the hosting page's serialized rows closely enough that the
//! keyed snapshot shape deserializes straight into them. Referential fields
//! hold raw ids rather than references; resolution happens at lookup time and
//! tolerates dangling ids (see `FamilySnapshot`).

use serde::{Deserialize, Serialize};

/// Integer primary key of a person record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

/// Integer primary key of a partnership record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartnershipId(pub i64);

impl std::fmt::Display for PersonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for PartnershipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Legal name split the way the source records store it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonName {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
}

impl PersonName {
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Joined display form used for node labels. Missing halves are dropped
    /// rather than padded, so a single-part name renders without stray spaces.
    pub fn full(&self) -> String {
        match (self.first.is_empty(), self.last.is_empty()) {
            (true, true) => String::new(),
            (false, true) => self.first.clone(),
            (true, false) => self.last.clone(),
            (false, false) => format!("{} {}", self.first, self.last),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Person {
    #[serde(default)]
    pub name: PersonName,
    /// Parent ids in record order. The tagged-records adapter derives these
    /// from partnership child lists; the keyed shape carries them directly.
    #[serde(default)]
    pub parents: Vec<PersonId>,
    /// Partnerships this person belongs to, in join order.
    #[serde(default)]
    pub partnerships: Vec<PartnershipId>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Partnership {
    /// Member person ids in join order. Two is the common case; the layout
    /// passes tolerate any count.
    #[serde(default)]
    pub members: Vec<PersonId>,
    /// Child person ids in list order. List order decides sibling slots.
    #[serde(default)]
    pub children: Vec<PersonId>,
}

impl Partnership {
    /// Members other than `person`, preserving join order.
    pub fn other_members(&self, person: PersonId) -> impl Iterator<Item = PersonId> + '_ {
        self.members.iter().copied().filter(move |&m| m != person)
    }
}
