//! JSON model documents
//!
//! A document is the serialized form of a [`Model`]: header, entities in
//! instance order, then relation records. Loading rebuilds the GUID and
//! parent indices and rejects documents the extractor could not work on.

use super::entity::Entity;
use super::error::{ModelError, ModelResult};
use super::graph::{Model, ModelHeader};
use super::relation::Relation;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized shape of a model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelDocument {
    #[serde(default)]
    pub header: ModelHeader,
    #[serde(default)]
    pub entities: Vec<Entity>,
    #[serde(default)]
    pub relations: Vec<Relation>,
}

impl Model {
    /// Build a model from a document, validating ids, GUIDs, and references
    pub fn from_document(document: ModelDocument) -> ModelResult<Self> {
        let mut model = Model::with_header(document.header);
        for entity in document.entities {
            model.insert_reserved(entity)?;
        }
        for entity in model.entities() {
            for target in entity.references() {
                if model.get(target).is_none() {
                    return Err(ModelError::DanglingReference {
                        from: entity.id,
                        to: target,
                    });
                }
            }
        }
        for relation in document.relations {
            model.add_relation(relation)?;
        }
        Ok(model)
    }

    /// Snapshot the model as a document
    pub fn to_document(&self) -> ModelDocument {
        ModelDocument {
            header: self.header.clone(),
            entities: self.entities().cloned().collect(),
            relations: self.relations().cloned().collect(),
        }
    }

    pub fn from_json_str(json: &str) -> ModelResult<Self> {
        let document: ModelDocument = serde_json::from_str(json)?;
        Self::from_document(document)
    }

    pub fn to_json_string(&self) -> ModelResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document())?)
    }

    /// Read a model document from disk
    pub fn load(path: impl AsRef<Path>) -> ModelResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Write the model document to disk
    pub fn save(&self, path: impl AsRef<Path>) -> ModelResult<()> {
        std::fs::write(path, self.to_json_string()?)?;
        Ok(())
    }
}
