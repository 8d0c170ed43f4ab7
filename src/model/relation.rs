//! Hierarchy relation records

use super::entity::EntityId;
use super::guid::Guid;
use serde::{Deserialize, Serialize};

/// The two hierarchy relations the model tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Element is physically located in a spatial parent (IfcRelContainedInSpatialStructure)
    Containment,
    /// Element is a part of a parent (IfcRelAggregates)
    Aggregation,
}

impl RelationKind {
    pub const ALL: [RelationKind; 2] = [RelationKind::Containment, RelationKind::Aggregation];

    /// Schema type of the relation record
    pub fn ifc_type(&self) -> &'static str {
        match self {
            Self::Containment => "IfcRelContainedInSpatialStructure",
            Self::Aggregation => "IfcRelAggregates",
        }
    }
}

impl std::fmt::Display for RelationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Containment => write!(f, "containment"),
            Self::Aggregation => write!(f, "aggregation"),
        }
    }
}

/// One parent-keyed relation record
///
/// Children point "up" to `parent`; a parent may be the subject of several
/// records of the same kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relation {
    /// Global identifier of the record itself
    pub guid: Guid,
    pub kind: RelationKind,
    /// Audit record this relation was created under
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_history: Option<EntityId>,
    /// Relating structure or relating object
    pub parent: EntityId,
    /// Related elements or related objects
    pub children: Vec<EntityId>,
}

impl Relation {
    pub fn new(kind: RelationKind, parent: EntityId, children: Vec<EntityId>) -> Self {
        Self {
            guid: Guid::new(),
            kind,
            owner_history: None,
            parent,
            children,
        }
    }

    pub fn with_guid(mut self, guid: Guid) -> Self {
        self.guid = guid;
        self
    }

    pub fn with_owner_history(mut self, owner_history: Option<EntityId>) -> Self {
        self.owner_history = owner_history;
        self
    }
}
