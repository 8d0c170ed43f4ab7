//! Core model graph data structures

mod entity;
mod error;
mod graph;
mod guid;
mod io;
mod relation;
pub mod schema;


pub use entity::{AttributeValue, Attributes, Entity, EntityId};
pub use error::{ModelError, ModelResult};
pub use graph::{Model, ModelHeader, DEFAULT_SCHEMA};
pub use guid::{Guid, GUID_LEN};
pub use io::ModelDocument;
pub use relation::{Relation, RelationKind};
