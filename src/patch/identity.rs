//! IdentityMap: at most one output copy per source entity
//!
//! Rooted entities are tracked by GUID, shared GUID-less values (placements,
//! materials, the owner history) by source instance number. Both tables only
//! grow; an entry is never overwritten.
//!
//! A deep copy can pull in rooted entities that nobody asked for, such as a
//! grid an element's placement refers to. Those are queued as discovered so
//! the session can climb their hierarchy too.

use crate::model::{schema, EntityId, Guid, Model};
use std::collections::HashMap;
use tracing::debug;

use super::error::{PatchError, PatchResult};

#[derive(Debug, Default, Clone)]
pub struct IdentityMap {
    /// GUID -> output entity
    by_guid: HashMap<Guid, EntityId>,
    /// Source instance -> output entity, for every copied entity
    copies: HashMap<EntityId, EntityId>,
    root: Option<EntityId>,
    /// Source ids of rooted entities copied only as dependencies, not yet climbed
    discovered: Vec<EntityId>,
}

impl IdentityMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Output entity for a GUID, if it has been appended
    pub fn lookup(&self, guid: &Guid) -> Option<EntityId> {
        self.by_guid.get(guid).copied()
    }

    /// Output entity for a source instance, if it has been copied
    pub fn lookup_source(&self, source: EntityId) -> Option<EntityId> {
        self.copies.get(&source).copied()
    }

    /// The output project, once it has been appended
    pub fn root(&self) -> Option<EntityId> {
        self.root
    }

    /// Number of GUIDs mapped
    pub fn len(&self) -> usize {
        self.by_guid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_guid.is_empty()
    }

    /// Take the rooted dependencies copied since the last call
    pub fn take_discovered(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.discovered)
    }

    /// Ensure `entity` has a copy in `target`, returning the copy's id
    ///
    /// An entity whose GUID is already mapped is returned as is. The project
    /// is cloned as the output root; anything else goes through the
    /// dependency-resolving copy. Hierarchy relations are never followed:
    /// they live in relation records, not in attributes.
    pub fn append(
        &mut self,
        source: &Model,
        target: &mut Model,
        entity: EntityId,
    ) -> PatchResult<EntityId> {
        let original = source
            .get(entity)
            .ok_or(PatchError::UnknownEntity(entity))?;
        if let Some(existing) = original.guid.as_ref().and_then(|g| self.lookup(g)) {
            return Ok(existing);
        }

        if schema::is_a(&original.entity_type, schema::PROJECT) {
            let root = self.copy_closure(source, target, entity)?;
            debug!(guid = ?original.guid, output = %root, "cloned project root");
            self.root.get_or_insert(root);
            return Ok(root);
        }

        let copy = self.copy_closure(source, target, entity)?;
        debug!(
            guid = ?original.guid,
            entity_type = %original.entity_type,
            output = %copy,
            "appended entity"
        );
        Ok(copy)
    }

    /// Copy `start` and every entity it transitively references
    ///
    /// Runs in two phases so reference cycles terminate: first reserve an
    /// output id for each entity of the closure not copied yet, then insert
    /// the remapped entities.
    pub fn copy_closure(
        &mut self,
        source: &Model,
        target: &mut Model,
        start: EntityId,
    ) -> PatchResult<EntityId> {
        if let Some(existing) = self.lookup_source(start) {
            return Ok(existing);
        }

        let mut order = Vec::new();
        let mut stack = vec![start];
        while let Some(id) = stack.pop() {
            if self.copies.contains_key(&id) {
                continue;
            }
            let entity = source.get(id).ok_or(PatchError::UnknownEntity(id))?;
            if let Some(existing) = entity.guid.as_ref().and_then(|g| self.lookup(g)) {
                self.copies.insert(id, existing);
                continue;
            }

            let reserved = target.reserve_id();
            self.copies.insert(id, reserved);
            if let Some(guid) = &entity.guid {
                self.by_guid.insert(guid.clone(), reserved);
            }
            order.push(id);
            stack.extend(entity.references().into_iter().rev());
        }

        for id in order {
            let entity = source.get(id).ok_or(PatchError::UnknownEntity(id))?;
            if id != start
                && entity.guid.is_some()
                && !schema::is_a(&entity.entity_type, schema::PROJECT)
            {
                debug!(guid = ?entity.guid, entity_type = %entity.entity_type, "copied rooted dependency");
                self.discovered.push(id);
            }
            let reserved = self.copies[&id];
            let copies = &self.copies;
            let copy = entity.remapped(reserved, |r| copies.get(&r).copied().unwrap_or(r));
            target.insert_reserved(copy)?;
        }

        self.lookup_source(start).ok_or_else(|| {
            PatchError::InvariantViolation(format!("copy of {} was not recorded", start))
        })
    }
}
