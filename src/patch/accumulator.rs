//! Pending parent -> children sets, filled during ascension

use crate::model::{EntityId, Guid, RelationKind};
use std::collections::{HashMap, HashSet};

/// Children recorded under one parent, in first-seen order
#[derive(Debug, Clone, PartialEq)]
pub struct PendingEntry {
    pub parent: Guid,
    pub children: Vec<EntityId>,
}

/// Parent-GUID keyed child sets for one relation kind
///
/// Insertion is idempotent and both parents and children keep the order in
/// which they were first recorded.
#[derive(Debug, Default, Clone)]
pub struct PendingSets {
    index: HashMap<Guid, usize>,
    entries: Vec<PendingEntry>,
    members: HashSet<(usize, EntityId)>,
}

impl PendingSets {
    /// Record `child` under `parent`, returning false if it was already there
    pub fn insert(&mut self, parent: &Guid, child: EntityId) -> bool {
        let slot = match self.index.get(parent) {
            Some(&slot) => slot,
            None => {
                let slot = self.entries.len();
                self.index.insert(parent.clone(), slot);
                self.entries.push(PendingEntry {
                    parent: parent.clone(),
                    children: Vec::new(),
                });
                slot
            }
        };
        if !self.members.insert((slot, child)) {
            return false;
        }
        self.entries[slot].children.push(child);
        true
    }

    /// Children pending under `parent`
    pub fn children(&self, parent: &Guid) -> &[EntityId] {
        self.index
            .get(parent)
            .map(|&slot| self.entries[slot].children.as_slice())
            .unwrap_or(&[])
    }

    pub fn entries(&self) -> &[PendingEntry] {
        &self.entries
    }

    /// Number of parents with pending children
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the sets, yielding entries in first-seen order
    pub fn into_entries(self) -> Vec<PendingEntry> {
        self.entries
    }
}

/// One [`PendingSets`] per hierarchy relation
#[derive(Debug, Default, Clone)]
pub struct RelationAccumulator {
    containment: PendingSets,
    aggregation: PendingSets,
}

impl RelationAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, kind: RelationKind, parent: &Guid, child: EntityId) -> bool {
        self.sets_mut(kind).insert(parent, child)
    }

    pub fn sets(&self, kind: RelationKind) -> &PendingSets {
        match kind {
            RelationKind::Containment => &self.containment,
            RelationKind::Aggregation => &self.aggregation,
        }
    }

    fn sets_mut(&mut self, kind: RelationKind) -> &mut PendingSets {
        match kind {
            RelationKind::Containment => &mut self.containment,
            RelationKind::Aggregation => &mut self.aggregation,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.containment.is_empty() && self.aggregation.is_empty()
    }

    /// Take every pending set, leaving the accumulator empty
    pub fn drain(&mut self) -> [(RelationKind, Vec<PendingEntry>); 2] {
        [
            (
                RelationKind::Containment,
                std::mem::take(&mut self.containment).into_entries(),
            ),
            (
                RelationKind::Aggregation,
                std::mem::take(&mut self.aggregation).into_entries(),
            ),
        ]
    }
}
