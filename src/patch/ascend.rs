//! Ascension: pull an element and its full ancestor closure into the output
//!
//! Every ancestor is probed under both relations, whichever relation led to
//! it, because containment and aggregation interleave on the way to the root:
//!
//! - probing containment of `e` appends each spatial parent `p`, records
//!   `e` under `p`, then probes aggregation of `p`
//! - probing aggregation of `e` appends each aggregation parent `p`, records
//!   `e` under `p`, then probes aggregation and containment of `p`
//!
//! The walk is a depth-first worklist over probe states `(entity, kind)`.
//! States on the current path are grey; meeting one again means the input
//! hierarchy is cyclic. Completed states stay black for the whole session
//! and are skipped, which is sound because both appending and recording are
//! idempotent.

use crate::model::{EntityId, RelationKind};
use std::collections::HashSet;
use tracing::{debug, trace};

use super::error::{PatchError, PatchResult};
use super::session::PatchSession;

type ProbeKey = (EntityId, RelationKind);

enum Frame {
    Enter {
        entity: EntityId,
        output: EntityId,
        kind: RelationKind,
    },
    Exit(ProbeKey),
}

/// Probes a parent reached through `kind` must run next, in order
fn next_probes(kind: RelationKind) -> &'static [RelationKind] {
    match kind {
        RelationKind::Containment => &[RelationKind::Aggregation],
        RelationKind::Aggregation => &[RelationKind::Aggregation, RelationKind::Containment],
    }
}

impl PatchSession<'_> {
    /// Append `element` and every ancestor it needs, recording the edges
    ///
    /// Returns the element's output id. Calling this again for the same
    /// element changes nothing.
    pub fn add_element(&mut self, element: EntityId) -> PatchResult<EntityId> {
        let output = self.append(element)?;
        self.climb(element, output)?;
        self.climb_discovered()?;
        Ok(output)
    }

    /// Climb every rooted dependency copied so far and not yet climbed
    pub(super) fn climb_discovered(&mut self) -> PatchResult<()> {
        loop {
            let discovered = self.identities.take_discovered();
            if discovered.is_empty() {
                return Ok(());
            }
            for entity in discovered {
                let output = self.identities.lookup_source(entity).ok_or_else(|| {
                    PatchError::InvariantViolation(format!(
                        "discovered entity {} has no copy",
                        entity
                    ))
                })?;
                debug!(entity = %entity, output = %output, "climbing referenced entity");
                self.climb(entity, output)?;
            }
        }
    }

    fn climb(&mut self, element: EntityId, output: EntityId) -> PatchResult<()> {
        let source = self.source;

        let mut stack = vec![
            Frame::Enter {
                entity: element,
                output,
                kind: RelationKind::Aggregation,
            },
            Frame::Enter {
                entity: element,
                output,
                kind: RelationKind::Containment,
            },
        ];
        let mut on_path: HashSet<ProbeKey> = HashSet::new();

        while let Some(frame) = stack.pop() {
            let (entity, output, kind) = match frame {
                Frame::Exit(key) => {
                    on_path.remove(&key);
                    self.completed.insert(key);
                    continue;
                }
                Frame::Enter {
                    entity,
                    output,
                    kind,
                } => (entity, output, kind),
            };

            let key = (entity, kind);
            if self.completed.contains(&key) {
                trace!(entity = %entity, relation = %kind, "probe already complete");
                continue;
            }
            if !on_path.insert(key) {
                return Err(PatchError::CyclicHierarchy {
                    guid: self.hierarchy_guid(entity)?,
                    relation: kind,
                });
            }
            stack.push(Frame::Exit(key));

            let mut next = Vec::new();
            for &parent in source.parents(entity, kind) {
                let parent_output = self.append(parent)?;
                let parent_guid = self.hierarchy_guid(parent)?;
                if self.pending.record(kind, &parent_guid, output) {
                    debug!(parent = %parent_guid, child = %output, relation = %kind, "recorded edge");
                }
                for &probe in next_probes(kind) {
                    next.push(Frame::Enter {
                        entity: parent,
                        output: parent_output,
                        kind: probe,
                    });
                }
            }
            stack.extend(next.into_iter().rev());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AttributeValue, Entity, Guid, Model};

    /// Project <- Site <- Building <- Storey (aggregation), Wall in Storey,
    /// Window part of Wall, Space part of Storey, Chair in Space
    struct Tower {
        model: Model,
        wall: EntityId,
        window: EntityId,
        chair: EntityId,
    }

    fn tower() -> Tower {
        let mut model = Model::new("IFC4");
        let project = model.add(model_add("IfcProject", "P")).unwrap();
        let site = model.add(model_add("IfcSite", "SITE")).unwrap();
        let building = model.add(model_add("IfcBuilding", "B")).unwrap();
        let storey = model.add(model_add("IfcBuildingStorey", "S1")).unwrap();
        let wall = model.add(model_add("IfcWall", "W")).unwrap();
        let window = model.add(model_add("IfcWindow", "WIN")).unwrap();
        let space = model.add(model_add("IfcSpace", "SP")).unwrap();
        let chair = model.add(model_add("IfcFurniture", "CH")).unwrap();

        model.create_aggregation(Guid::new(), None, project, vec![site]).unwrap();
        model.create_aggregation(Guid::new(), None, site, vec![building]).unwrap();
        model.create_aggregation(Guid::new(), None, building, vec![storey]).unwrap();
        model.create_containment(Guid::new(), None, storey, vec![wall]).unwrap();
        model.create_aggregation(Guid::new(), None, wall, vec![window]).unwrap();
        model.create_aggregation(Guid::new(), None, storey, vec![space]).unwrap();
        model.create_containment(Guid::new(), None, space, vec![chair]).unwrap();

        Tower {
            model,
            wall,
            window,
            chair,
        }
    }

    fn model_add(entity_type: &str, guid: &str) -> Entity {
        Entity::new(entity_type).with_guid(guid).with_name(guid)
    }

    fn guids(session: &PatchSession<'_>) -> Vec<String> {
        let mut out: Vec<String> = session
            .output()
            .entities()
            .filter_map(|e| e.guid.as_ref().map(|g| g.to_string()))
            .collect();
        out.sort();
        out
    }

    #[test]
    fn climbs_aggregation_then_containment_then_aggregation() {
        let t = tower();
        let mut session = PatchSession::new(&t.model).unwrap();
        session.add_element(t.window).unwrap();

        assert_eq!(guids(&session), vec!["B", "P", "S1", "SITE", "W", "WIN"]);
        let out = |g: &str| session.identities().lookup(&Guid::from(g)).unwrap();
        let pending = session.pending();
        assert_eq!(
            pending.sets(RelationKind::Aggregation).children(&Guid::from("W")),
            &[out("WIN")]
        );
        assert_eq!(
            pending.sets(RelationKind::Containment).children(&Guid::from("S1")),
            &[out("W")]
        );
        assert_eq!(
            pending.sets(RelationKind::Aggregation).children(&Guid::from("P")),
            &[out("SITE")]
        );
    }

    #[test]
    fn climbs_through_a_contained_space() {
        let t = tower();
        let mut session = PatchSession::new(&t.model).unwrap();
        session.add_element(t.chair).unwrap();

        assert_eq!(guids(&session), vec!["B", "CH", "P", "S1", "SITE", "SP"]);
        let containment = session.pending().sets(RelationKind::Containment);
        assert_eq!(containment.len(), 1);
        let aggregation = session.pending().sets(RelationKind::Aggregation);
        assert_eq!(aggregation.len(), 4);
    }

    #[test]
    fn adding_twice_changes_nothing() {
        let t = tower();
        let mut session = PatchSession::new(&t.model).unwrap();
        let first = session.add_element(t.wall).unwrap();
        let entities = session.output().entity_count();
        let containment = session.pending().sets(RelationKind::Containment).entries().to_vec();
        let aggregation = session.pending().sets(RelationKind::Aggregation).entries().to_vec();

        let second = session.add_element(t.wall).unwrap();
        assert_eq!(first, second);
        assert_eq!(session.output().entity_count(), entities);
        assert_eq!(
            session.pending().sets(RelationKind::Containment).entries(),
            containment.as_slice()
        );
        assert_eq!(
            session.pending().sets(RelationKind::Aggregation).entries(),
            aggregation.as_slice()
        );
    }

    #[test]
    fn siblings_share_one_pending_parent() {
        let mut t = tower();
        let storey = t.model.by_guid(&Guid::from("S1")).unwrap().id;
        let second = t.model.add(model_add("IfcWall", "W2")).unwrap();
        t.model
            .create_containment(Guid::new(), None, storey, vec![second])
            .unwrap();

        let mut session = PatchSession::new(&t.model).unwrap();
        let a = session.add_element(t.wall).unwrap();
        let b = session.add_element(second).unwrap();

        let containment = session.pending().sets(RelationKind::Containment);
        assert_eq!(containment.len(), 1);
        assert_eq!(containment.children(&Guid::from("S1")), &[a, b]);
    }

    #[test]
    fn referenced_rooted_entity_is_climbed_too() {
        // a wall in S1 whose placement grid lives in another storey
        let mut t = tower();
        let building = t.model.by_guid(&Guid::from("B")).unwrap().id;
        let storey = t.model.by_guid(&Guid::from("S1")).unwrap().id;
        let upper = t.model.add(model_add("IfcBuildingStorey", "S2")).unwrap();
        let grid = t.model.add(model_add("IfcGrid", "G")).unwrap();
        let wall = t
            .model
            .add(
                model_add("IfcWall", "W2")
                    .with_attribute("PlacementGrid", AttributeValue::reference(grid)),
            )
            .unwrap();
        t.model
            .create_aggregation(Guid::new(), None, building, vec![upper])
            .unwrap();
        t.model
            .create_containment(Guid::new(), None, upper, vec![grid])
            .unwrap();
        t.model
            .create_containment(Guid::new(), None, storey, vec![wall])
            .unwrap();

        let mut session = PatchSession::new(&t.model).unwrap();
        session.add_element(wall).unwrap();

        assert_eq!(guids(&session), vec!["B", "G", "P", "S1", "S2", "SITE", "W2"]);
        let out = |g: &str| session.identities().lookup(&Guid::from(g)).unwrap();
        let pending = session.pending();
        assert_eq!(
            pending.sets(RelationKind::Containment).children(&Guid::from("S2")),
            &[out("G")]
        );
        assert_eq!(
            pending.sets(RelationKind::Aggregation).children(&Guid::from("B")),
            &[out("S1"), out("S2")]
        );
        assert!(session.identities().clone().take_discovered().is_empty());
    }

    #[test]
    fn cyclic_aggregation_fails_fast() {
        let mut model = Model::new("IFC4");
        let project = model.add(model_add("IfcProject", "P")).unwrap();
        let a = model.add(model_add("IfcElementAssembly", "A")).unwrap();
        let b = model.add(model_add("IfcElementAssembly", "B")).unwrap();
        model.create_aggregation(Guid::new(), None, project, vec![a]).unwrap();
        model.create_aggregation(Guid::new(), None, a, vec![b]).unwrap();
        model.create_aggregation(Guid::new(), None, b, vec![a]).unwrap();

        let mut session = PatchSession::new(&model).unwrap();
        let result = session.add_element(b);
        assert!(matches!(
            result,
            Err(PatchError::CyclicHierarchy { relation: RelationKind::Aggregation, .. })
        ));
    }

    #[test]
    fn cycle_across_relation_kinds_is_detected() {
        let mut model = Model::new("IFC4");
        model.add(model_add("IfcProject", "P")).unwrap();
        let storey = model.add(model_add("IfcBuildingStorey", "S")).unwrap();
        let wall = model.add(model_add("IfcWall", "W")).unwrap();
        model.create_containment(Guid::new(), None, storey, vec![wall]).unwrap();
        model.create_aggregation(Guid::new(), None, wall, vec![storey]).unwrap();

        let mut session = PatchSession::new(&model).unwrap();
        assert!(matches!(
            session.add_element(wall),
            Err(PatchError::CyclicHierarchy { .. })
        ));
    }

    #[test]
    fn diamond_ancestry_is_probed_once() {
        // a part aggregated into two assemblies that share one storey
        let mut model = Model::new("IFC4");
        let project = model.add(model_add("IfcProject", "P")).unwrap();
        let storey = model.add(model_add("IfcBuildingStorey", "S")).unwrap();
        let left = model.add(model_add("IfcElementAssembly", "L")).unwrap();
        let right = model.add(model_add("IfcElementAssembly", "R")).unwrap();
        let part = model.add(model_add("IfcMember", "M")).unwrap();
        model.create_aggregation(Guid::new(), None, project, vec![storey]).unwrap();
        model.create_containment(Guid::new(), None, storey, vec![left, right]).unwrap();
        model.create_aggregation(Guid::new(), None, left, vec![part]).unwrap();
        model.create_aggregation(Guid::new(), None, right, vec![part]).unwrap();

        let mut session = PatchSession::new(&model).unwrap();
        let out = session.add_element(part).unwrap();

        let aggregation = session.pending().sets(RelationKind::Aggregation);
        assert_eq!(aggregation.children(&Guid::from("L")), &[out]);
        assert_eq!(aggregation.children(&Guid::from("R")), &[out]);
        assert_eq!(
            session.pending().sets(RelationKind::Containment).children(&Guid::from("S")).len(),
            2
        );
        assert!(session.completed.contains(&(storey, RelationKind::Aggregation)));
    }
}
