//! Hierarchy inspection helpers for extraction tests

use bimslice::{Model, RelationKind};
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

/// (relation kind, parent GUID, child GUID)
pub type HierarchyEdge = (RelationKind, String, String);

fn guid_of(model: &Model, id: bimslice::EntityId) -> String {
    model
        .get(id)
        .and_then(|e| e.guid.as_ref())
        .map(|g| g.to_string())
        .expect("hierarchy endpoint has a GUID")
}

/// Every hierarchy edge of a model, by GUID
pub fn hierarchy_edges(model: &Model) -> BTreeSet<HierarchyEdge> {
    let mut edges = BTreeSet::new();
    for relation in model.relations() {
        let parent = guid_of(model, relation.parent);
        for child in &relation.children {
            edges.insert((relation.kind, parent.clone(), guid_of(model, *child)));
        }
    }
    edges
}

/// GUIDs of every rooted entity in a model
pub fn entity_guids(model: &Model) -> BTreeSet<String> {
    model
        .entities()
        .filter_map(|e| e.guid.as_ref().map(|g| g.to_string()))
        .collect()
}

/// Assert that no GUID appears twice among the entities of `model`
pub fn assert_unique_guids(model: &Model) {
    let mut seen = HashSet::new();
    for entity in model.entities() {
        if let Some(guid) = &entity.guid {
            assert!(seen.insert(guid.clone()), "GUID {} appears twice", guid);
        }
    }
}

/// Assert that every rooted entity reaches the project through relation records
pub fn assert_closure(model: &Model) {
    let root = model.project().expect("output has a project").id;

    let mut parents: HashMap<_, Vec<_>> = HashMap::new();
    for relation in model.relations() {
        for child in &relation.children {
            parents.entry(*child).or_default().push(relation.parent);
        }
    }

    for entity in model.entities().filter(|e| e.guid.is_some()) {
        let mut visited = HashSet::new();
        let mut queue = VecDeque::from([entity.id]);
        let mut reached = false;
        while let Some(current) = queue.pop_front() {
            if current == root {
                reached = true;
                break;
            }
            if !visited.insert(current) {
                continue;
            }
            if let Some(ps) = parents.get(&current) {
                queue.extend(ps.iter().copied());
            }
        }
        assert!(
            reached,
            "{} ({}) is not connected to the project",
            entity.guid.as_ref().map(|g| g.as_str()).unwrap_or_default(),
            entity.entity_type
        );
    }
}

/// Assert that every attribute reference in `model` resolves
pub fn assert_references_resolve(model: &Model) {
    for entity in model.entities() {
        for target in entity.references() {
            assert!(
                model.get(target).is_some(),
                "{} references missing {}",
                entity.id,
                target
            );
        }
    }
}
