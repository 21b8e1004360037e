use thiserror::Error;
use wardmap_shared::MalformedDivision;

/// Failure taxonomy for the engine. Variants are `Clone` so one load
/// failure can be handed to every caller waiting on the same
/// in-flight fetch.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    MalformedDivision(#[from] MalformedDivision),
    /// Backend or network failure while loading a dataset. The cache
    /// stays empty; callers retry explicitly.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),
    /// The boundary file could not be parsed at all.
    #[error("invalid boundary data: {0}")]
    InvalidBoundary(String),
}
