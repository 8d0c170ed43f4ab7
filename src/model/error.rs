//! Model graph errors

use super::entity::EntityId;
use super::guid::Guid;
use super::relation::RelationKind;
use thiserror::Error;

/// Errors raised while building, loading, or querying a model
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Entity not found: {0}")]
    EntityNotFound(EntityId),

    #[error("GUID not found: {0}")]
    GuidNotFound(Guid),

    #[error("Duplicate entity id: {0}")]
    DuplicateEntity(EntityId),

    #[error("Duplicate GUID: {0}")]
    DuplicateGuid(Guid),

    #[error("Entity {from} references missing entity {to}")]
    DanglingReference { from: EntityId, to: EntityId },

    #[error("{relation} relation endpoint {entity} has no GUID")]
    MissingGuid { entity: EntityId, relation: RelationKind },

    #[error("{0} relation has no children")]
    EmptyRelation(RelationKind),

    #[error("Model has no IfcProject")]
    MissingProject,

    #[error("Invalid GUID: {0}")]
    InvalidGuid(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for model operations
pub type ModelResult<T> = Result<T, ModelError>;
