#![forbid(unsafe_code)]

//! Family snapshot model + input adapters (headless).
//!
//! Design goals:
//! - one internal data model fed by both historical page-snapshot shapes
//! - dangling cross-references degrade by omission, never by panicking
//! - deterministic iteration everywhere (snapshot order is layout order)

pub mod config;
pub mod error;
pub mod input;
pub mod model;
pub mod snapshot;

pub use config::TreeConfig;
pub use error::{Error, Result};
pub use input::{SnapshotShape, detect_shape};
pub use model::{Partnership, PartnershipId, Person, PersonId, PersonName};
pub use snapshot::FamilySnapshot;

#[cfg(test)]
mod tests;
