//! bimslice: story and keyword based subset extraction for BIM model graphs
//!
//! Takes a building-information model, selects the elements matching a
//! filter, and writes a new model holding exactly those elements plus every
//! ancestor needed to keep them connected to the project under spatial
//! containment and aggregation.
//!
//! # Core Concepts
//!
//! - **Model**: an entity graph with GUIDs and parent-keyed relation records
//! - **Selector**: decides which products are extracted ([`FilterConfig`])
//! - **PatchSession**: copies elements and ancestors, then rebuilds relations
//!
//! # Example
//!
//! ```
//! use bimslice::{patch, Entity, FilterConfig, FilterMode, Guid, Model};
//!
//! let mut model = Model::new("IFC4");
//! let project = model.add(Entity::new("IfcProject").with_guid("P")).unwrap();
//! let storey = model
//!     .add(Entity::new("IfcBuildingStorey").with_guid("S").with_name("Level 1"))
//!     .unwrap();
//! let wall = model.add(Entity::new("IfcWall").with_guid("W")).unwrap();
//! model.create_aggregation(Guid::new(), None, project, vec![storey]).unwrap();
//! model.create_containment(Guid::new(), None, storey, vec![wall]).unwrap();
//!
//! let config = FilterConfig::new(FilterMode::KeywordOnly).with_story("Level 1");
//! let outcome = patch(&model, &config).unwrap();
//! assert_eq!(outcome.extraction().model.relation_count(), 2);
//! ```

pub mod config;
pub mod model;
pub mod patch;

pub use config::{ConfigError, ConfigResult, FilterSpec};
pub use model::{
    AttributeValue, Entity, EntityId, Guid, Model, ModelError, ModelResult, Relation, RelationKind,
};
pub use patch::{
    extract, patch, Extraction, FilterConfig, FilterMode, PatchError, PatchOutcome, PatchResult,
    PatchSession, Selector,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
