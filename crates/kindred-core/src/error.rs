use crate::model::PersonId;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Snapshot JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(
        "Unrecognized snapshot shape: expected either keyed person/partnership collections or a tagged record list"
    )]
    UnknownShape,

    #[error("Focal person {id} is not present in the snapshot")]
    MissingFocus { id: PersonId },
}
