//! Model: an in-memory entity graph with hierarchy relation records

use super::entity::{Entity, EntityId};
use super::error::{ModelError, ModelResult};
use super::guid::Guid;
use super::relation::{Relation, RelationKind};
use super::schema;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Default schema identifier for new models
pub const DEFAULT_SCHEMA: &str = "IFC4";

/// File-level information carried alongside the graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHeader {
    /// Schema identifier (e.g., "IFC2X3", "IFC4")
    pub schema: String,
    /// When the model was written
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Free-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl ModelHeader {
    pub fn new(schema: impl Into<String>) -> Self {
        Self {
            schema: schema.into(),
            created_at: Some(Utc::now()),
            description: None,
        }
    }
}

impl Default for ModelHeader {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEMA)
    }
}

/// An entity graph plus its containment and aggregation records
///
/// Entities are keyed by instance number and iterate in that order.
/// A GUID index and a child-to-parent index per relation kind are
/// maintained on every insertion.
#[derive(Debug, Clone, Default)]
pub struct Model {
    pub header: ModelHeader,
    entities: BTreeMap<EntityId, Entity>,
    relations: Vec<Relation>,
    next_id: u64,
    guid_index: HashMap<Guid, EntityId>,
    parent_index: HashMap<(RelationKind, EntityId), Vec<EntityId>>,
}

impl Model {
    /// Create an empty model for the given schema
    pub fn new(schema: impl Into<String>) -> Self {
        Self::with_header(ModelHeader::new(schema))
    }

    /// Create an empty model carrying an existing header
    pub fn with_header(header: ModelHeader) -> Self {
        Self {
            header,
            ..Default::default()
        }
    }

    /// Add an entity, assigning it the next instance number
    ///
    /// Every reference in its attributes must already resolve in this model.
    /// A rejected entity does not consume a number.
    pub fn add(&mut self, mut entity: Entity) -> ModelResult<EntityId> {
        let next = EntityId::new(self.next_id + 1);
        for target in entity.references() {
            if !self.entities.contains_key(&target) {
                return Err(ModelError::DanglingReference { from: next, to: target });
            }
        }
        let id = self.reserve_id();
        entity.id = id;
        self.insert_reserved(entity)?;
        Ok(id)
    }

    /// Allocate an instance number without inserting anything yet
    ///
    /// Used by copy operations that need to know target ids before the
    /// entities referring to them are built.
    pub fn reserve_id(&mut self) -> EntityId {
        self.next_id += 1;
        EntityId::new(self.next_id)
    }

    /// Insert an entity under an id obtained from [`Model::reserve_id`]
    ///
    /// References are not checked; callers insert a closed set of entities.
    pub fn insert_reserved(&mut self, entity: Entity) -> ModelResult<()> {
        if self.entities.contains_key(&entity.id) {
            return Err(ModelError::DuplicateEntity(entity.id));
        }
        if let Some(guid) = &entity.guid {
            if self.guid_index.contains_key(guid) {
                return Err(ModelError::DuplicateGuid(guid.clone()));
            }
            self.guid_index.insert(guid.clone(), entity.id);
        }
        self.next_id = self.next_id.max(entity.id.value());
        self.entities.insert(entity.id, entity);
        Ok(())
    }

    /// Add a relation record, checking that both ends exist and carry GUIDs
    pub fn add_relation(&mut self, relation: Relation) -> ModelResult<&Relation> {
        if relation.children.is_empty() {
            return Err(ModelError::EmptyRelation(relation.kind));
        }
        for id in std::iter::once(&relation.parent).chain(relation.children.iter()) {
            let entity = self.get(*id).ok_or(ModelError::EntityNotFound(*id))?;
            if entity.guid.is_none() {
                return Err(ModelError::MissingGuid {
                    entity: *id,
                    relation: relation.kind,
                });
            }
        }
        if let Some(owner_history) = relation.owner_history {
            if !self.entities.contains_key(&owner_history) {
                return Err(ModelError::EntityNotFound(owner_history));
            }
        }

        for child in &relation.children {
            let parents = self.parent_index.entry((relation.kind, *child)).or_default();
            if !parents.contains(&relation.parent) {
                parents.push(relation.parent);
            }
        }
        self.relations.push(relation);
        Ok(&self.relations[self.relations.len() - 1])
    }

    /// Create a spatial containment record
    pub fn create_containment(
        &mut self,
        guid: Guid,
        owner_history: Option<EntityId>,
        parent: EntityId,
        children: Vec<EntityId>,
    ) -> ModelResult<&Relation> {
        self.add_relation(
            Relation::new(RelationKind::Containment, parent, children)
                .with_guid(guid)
                .with_owner_history(owner_history),
        )
    }

    /// Create an aggregation (decomposition) record
    pub fn create_aggregation(
        &mut self,
        guid: Guid,
        owner_history: Option<EntityId>,
        parent: EntityId,
        children: Vec<EntityId>,
    ) -> ModelResult<&Relation> {
        self.add_relation(
            Relation::new(RelationKind::Aggregation, parent, children)
                .with_guid(guid)
                .with_owner_history(owner_history),
        )
    }

    /// Get an entity by instance number
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    /// Get an entity by GUID, failing when absent
    pub fn by_guid(&self, guid: &Guid) -> ModelResult<&Entity> {
        self.find_by_guid(guid)
            .ok_or_else(|| ModelError::GuidNotFound(guid.clone()))
    }

    /// Get an entity by GUID
    pub fn find_by_guid(&self, guid: &Guid) -> Option<&Entity> {
        self.guid_index.get(guid).and_then(|id| self.entities.get(id))
    }

    /// All entities whose type is `entity_type` or a subtype of it
    pub fn by_type<'a>(&'a self, entity_type: &'a str) -> impl Iterator<Item = &'a Entity> + 'a {
        self.entities
            .values()
            .filter(move |e| schema::is_a(&e.entity_type, entity_type))
    }

    /// Direct parents of `id` under the given relation
    pub fn parents(&self, id: EntityId, kind: RelationKind) -> &[EntityId] {
        self.parent_index
            .get(&(kind, id))
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The root project (first `IfcProject` by instance number)
    pub fn project(&self) -> ModelResult<&Entity> {
        self.by_type(schema::PROJECT)
            .next()
            .ok_or(ModelError::MissingProject)
    }

    /// The owner history singleton, if the model has one
    pub fn owner_history(&self) -> Option<&Entity> {
        self.by_type(schema::OWNER_HISTORY).next()
    }

    /// Get all entities
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }

    /// Get all relation records
    pub fn relations(&self) -> impl Iterator<Item = &Relation> {
        self.relations.iter()
    }

    /// Relation records of one kind
    pub fn relations_of(&self, kind: RelationKind) -> impl Iterator<Item = &Relation> {
        self.relations.iter().filter(move |r| r.kind == kind)
    }

    /// Get the number of entities
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Get the number of relation records
    pub fn relation_count(&self) -> usize {
        self.relations.len()
    }
}
