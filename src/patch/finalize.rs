//! Tree finalizer: turn pending child sets into relation records

use crate::model::{Guid, RelationKind};
use tracing::debug;

use super::error::{PatchError, PatchResult};
use super::session::PatchSession;

/// Relation records created by one finalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FinalizeSummary {
    pub containment: usize,
    pub aggregation: usize,
}

impl FinalizeSummary {
    pub fn total(&self) -> usize {
        self.containment + self.aggregation
    }

    fn count(&mut self, kind: RelationKind) {
        match kind {
            RelationKind::Containment => self.containment += 1,
            RelationKind::Aggregation => self.aggregation += 1,
        }
    }
}

impl PatchSession<'_> {
    /// Write one relation record per pending parent, then clear the pending sets
    ///
    /// Containment records come first, then aggregation, each in the order
    /// parents were first recorded. Every record gets a fresh GUID and the
    /// session's owner history.
    pub fn finalize(&mut self) -> PatchResult<FinalizeSummary> {
        let mut summary = FinalizeSummary::default();

        for (kind, entries) in self.pending.drain() {
            for entry in entries {
                if entry.children.is_empty() {
                    continue;
                }
                let parent = self.identities.lookup(&entry.parent).ok_or_else(|| {
                    PatchError::InvariantViolation(format!(
                        "pending {} parent {} was never appended",
                        kind, entry.parent
                    ))
                })?;
                let children = entry.children.len();
                let relation = match kind {
                    RelationKind::Containment => self.output.create_containment(
                        Guid::new(),
                        self.owner_history,
                        parent,
                        entry.children,
                    )?,
                    RelationKind::Aggregation => self.output.create_aggregation(
                        Guid::new(),
                        self.owner_history,
                        parent,
                        entry.children,
                    )?,
                };
                debug!(
                    relation = %kind,
                    guid = %relation.guid,
                    parent = %entry.parent,
                    children,
                    "created relation record"
                );
                summary.count(kind);
            }
        }

        Ok(summary)
    }
}
