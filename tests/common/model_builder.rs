//! Model building utilities for extraction tests

use bimslice::{AttributeValue, Entity, EntityId, Guid, Model};

/// Fluent builder for hand-written source models
///
/// Every rooted entity gets its GUID as display name unless one is given.
pub struct ModelBuilder {
    model: Model,
    owner_history: Option<EntityId>,
}

impl Default for ModelBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelBuilder {
    pub fn new() -> Self {
        Self {
            model: Model::new("IFC4"),
            owner_history: None,
        }
    }

    /// Add an owner history that every later entity and relation references
    pub fn with_owner_history(mut self) -> Self {
        let history = self
            .model
            .add(
                Entity::new("IfcOwnerHistory")
                    .with_attribute("CreationDate", AttributeValue::Int(1_700_000_000)),
            )
            .expect("owner history");
        self.owner_history = Some(history);
        self
    }

    fn stamp(&self, entity: Entity) -> Entity {
        match self.owner_history {
            Some(history) => {
                entity.with_attribute("OwnerHistory", AttributeValue::reference(history))
            }
            None => entity,
        }
    }

    /// Add a rooted entity named after its GUID
    pub fn entity(&mut self, entity_type: &str, guid: &str) -> EntityId {
        self.named(entity_type, guid, guid)
    }

    /// Add a rooted entity with an explicit name
    pub fn named(&mut self, entity_type: &str, guid: &str, name: &str) -> EntityId {
        let entity = self.stamp(Entity::new(entity_type).with_guid(guid).with_name(name));
        self.model.add(entity).expect("entity")
    }

    /// Add a rooted entity without a name
    pub fn unnamed(&mut self, entity_type: &str, guid: &str) -> EntityId {
        let entity = self.stamp(Entity::new(entity_type).with_guid(guid));
        self.model.add(entity).expect("entity")
    }

    /// Add any entity as given
    pub fn raw(&mut self, entity: Entity) -> EntityId {
        self.model.add(entity).expect("entity")
    }

    pub fn contain(&mut self, parent: EntityId, children: &[EntityId]) {
        self.model
            .create_containment(Guid::new(), self.owner_history, parent, children.to_vec())
            .expect("containment");
    }

    pub fn aggregate(&mut self, parent: EntityId, children: &[EntityId]) {
        self.model
            .create_aggregation(Guid::new(), self.owner_history, parent, children.to_vec())
            .expect("aggregation");
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn build(self) -> Model {
        self.model
    }
}
