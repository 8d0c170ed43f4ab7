//! Extraction errors

use crate::config::ConfigError;
use crate::model::{EntityId, Guid, ModelError, RelationKind};
use thiserror::Error;

/// Errors that abort an extraction
///
/// Model and configuration errors are input errors and surface before any
/// ascension starts. `CyclicHierarchy` means the input broke the acyclic
/// hierarchy assumption. `InvariantViolation` is a bug in the extractor.
#[derive(Debug, Error)]
pub enum PatchError {
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Source entity not found: {0}")]
    UnknownEntity(EntityId),

    #[error("Cyclic {relation} hierarchy through {guid}")]
    CyclicHierarchy { guid: Guid, relation: RelationKind },

    #[error("Internal invariant violated: {0}")]
    InvariantViolation(String),
}

/// Result type for extraction operations
pub type PatchResult<T> = Result<T, PatchError>;
