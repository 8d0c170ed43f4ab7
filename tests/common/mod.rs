//! Common test utilities for extraction tests
//!
//! Provides a fluent builder for source models, a seeded generator for
//! larger towers, and assertions over the hierarchy of an output model.

#![allow(dead_code)]

pub mod hierarchy;
pub mod model_builder;
pub mod tower;

pub use hierarchy::{
    assert_closure, assert_references_resolve, assert_unique_guids, entity_guids, hierarchy_edges,
    HierarchyEdge,
};
pub use model_builder::ModelBuilder;
pub use tower::{random_tower, TowerShape};

use bimslice::{Entity, Model};

/// Selector that accepts every candidate product
pub fn accept_all(_: &Model, _: &Entity) -> bool {
    true
}
