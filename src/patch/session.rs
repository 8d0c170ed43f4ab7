//! PatchSession: request-scoped extraction state

use crate::model::{EntityId, Guid, Model, RelationKind};
use std::collections::HashSet;
use tracing::debug;

use super::accumulator::RelationAccumulator;
use super::error::{PatchError, PatchResult};
use super::identity::IdentityMap;

/// Everything one extraction needs, owned for the length of one request
///
/// Created with the owner history (when the source has one) and the project
/// already copied. Elements are pulled in with
/// [`add_element`](PatchSession::add_element) and the hierarchy is written
/// once by [`finalize`](PatchSession::finalize).
#[derive(Debug)]
pub struct PatchSession<'a> {
    pub(super) source: &'a Model,
    pub(super) output: Model,
    pub(super) identities: IdentityMap,
    pub(super) pending: RelationAccumulator,
    pub(super) owner_history: Option<EntityId>,
    /// Probe states fully explored so far
    pub(super) completed: HashSet<(EntityId, RelationKind)>,
}

impl<'a> PatchSession<'a> {
    /// Start a session over `source`
    ///
    /// Fails before anything is copied when the source has no project.
    pub fn new(source: &'a Model) -> PatchResult<Self> {
        let project = source.project()?.id;

        let mut output = Model::new(source.header.schema.clone());
        output.header.description = source.header.description.clone();
        let mut identities = IdentityMap::new();

        let owner_history = match source.owner_history() {
            Some(history) => Some(identities.copy_closure(source, &mut output, history.id)?),
            None => None,
        };
        identities.append(source, &mut output, project)?;
        debug!(owner_history = ?owner_history, "session started");

        let mut session = Self {
            source,
            output,
            identities,
            pending: RelationAccumulator::new(),
            owner_history,
            completed: HashSet::new(),
        };
        // rooted entities the project itself refers to
        session.climb_discovered()?;
        Ok(session)
    }

    pub fn source(&self) -> &Model {
        self.source
    }

    /// The output graph built so far
    pub fn output(&self) -> &Model {
        &self.output
    }

    pub fn identities(&self) -> &IdentityMap {
        &self.identities
    }

    pub fn pending(&self) -> &RelationAccumulator {
        &self.pending
    }

    /// Output copy of the owner history, if the source had one
    pub fn owner_history(&self) -> Option<EntityId> {
        self.owner_history
    }

    /// Consume the session, yielding the output graph
    pub fn into_output(self) -> Model {
        self.output
    }

    pub(super) fn append(&mut self, entity: EntityId) -> PatchResult<EntityId> {
        self.identities.append(self.source, &mut self.output, entity)
    }

    /// GUID of a source entity that takes part in a hierarchy relation
    pub(super) fn hierarchy_guid(&self, entity: EntityId) -> PatchResult<Guid> {
        self.source
            .get(entity)
            .and_then(|e| e.guid.clone())
            .ok_or_else(|| {
                PatchError::InvariantViolation(format!("hierarchy entity {} has no GUID", entity))
            })
    }
}
