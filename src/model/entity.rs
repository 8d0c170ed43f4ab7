//! Entity representation in the model graph

use super::guid::Guid;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Instance number of an entity, local to the model that owns it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(u64);

impl EntityId {
    pub fn new(n: u64) -> Self {
        Self(n)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Typed attribute values
///
/// References serialize as `{"ref": n}` so they stay distinct from integers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Ref {
        #[serde(rename = "ref")]
        target: EntityId,
    },
    List(Vec<AttributeValue>),
}

impl AttributeValue {
    /// Reference to another entity
    pub fn reference(target: EntityId) -> Self {
        Self::Ref { target }
    }

    fn collect_references(&self, out: &mut Vec<EntityId>) {
        match self {
            Self::Ref { target } => out.push(*target),
            Self::List(items) => items.iter().for_each(|v| v.collect_references(out)),
            _ => {}
        }
    }

    fn map_references(&self, f: &mut impl FnMut(EntityId) -> EntityId) -> Self {
        match self {
            Self::Ref { target } => Self::Ref { target: f(*target) },
            Self::List(items) => Self::List(items.iter().map(|v| v.map_references(f)).collect()),
            other => other.clone(),
        }
    }
}

/// Attribute collection, ordered by name for stable output
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A node in a model graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Instance number (assigned by the owning model)
    pub id: EntityId,
    /// Schema type tag (e.g., "IfcWall", "IfcBuildingStorey")
    #[serde(rename = "type")]
    pub entity_type: String,
    /// Global identifier, present on rooted entities only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guid: Option<Guid>,
    /// Display name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Remaining attributes, opaque to the extraction core
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attributes: Attributes,
}

impl Entity {
    /// Create a new entity of the given type
    ///
    /// The id is a placeholder until the entity is added to a model.
    pub fn new(entity_type: impl Into<String>) -> Self {
        Self {
            id: EntityId::new(0),
            entity_type: entity_type.into(),
            guid: None,
            name: None,
            attributes: Attributes::new(),
        }
    }

    pub fn with_guid(mut self, guid: impl Into<Guid>) -> Self {
        self.guid = Some(guid.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Add an attribute to the entity
    pub fn with_attribute(mut self, key: impl Into<String>, value: AttributeValue) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Name, with an absent name read as the empty string
    pub fn name_or_empty(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// All entities referenced from attributes, in attribute order
    pub fn references(&self) -> Vec<EntityId> {
        let mut out = Vec::new();
        for value in self.attributes.values() {
            value.collect_references(&mut out);
        }
        out
    }

    /// Clone this entity under a new id, rewriting every reference through `f`
    pub fn remapped(&self, id: EntityId, mut f: impl FnMut(EntityId) -> EntityId) -> Self {
        Self {
            id,
            entity_type: self.entity_type.clone(),
            guid: self.guid.clone(),
            name: self.name.clone(),
            attributes: self
                .attributes
                .iter()
                .map(|(k, v)| (k.clone(), v.map_references(&mut f)))
                .collect(),
        }
    }
}
