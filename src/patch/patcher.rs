//! Extraction entry points

use crate::model::{schema, Entity, EntityId, Model};
use tracing::{debug, info};

use super::error::PatchResult;
use super::filter::{FilterConfig, Selector};
use super::finalize::FinalizeSummary;
use super::session::PatchSession;

/// The output of one extraction
#[derive(Debug)]
pub struct Extraction {
    /// Output graph: root, owner history, selected elements and their ancestors
    pub model: Model,
    /// Source ids of the selected elements, in instance order
    pub selected: Vec<EntityId>,
    /// Relation records written at finalization
    pub relations: FinalizeSummary,
}

/// How an extraction ended
///
/// Selecting nothing is a normal outcome rather than an error; the output
/// model then holds only the project and owner history.
#[derive(Debug)]
pub enum PatchOutcome {
    Extracted(Extraction),
    NoMatchingElements(Extraction),
}

impl PatchOutcome {
    pub fn extraction(&self) -> &Extraction {
        match self {
            Self::Extracted(e) | Self::NoMatchingElements(e) => e,
        }
    }

    pub fn into_extraction(self) -> Extraction {
        match self {
            Self::Extracted(e) | Self::NoMatchingElements(e) => e,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatchingElements(_))
    }
}

/// Candidate elements (every `IfcProduct`) the selector accepts
pub fn select_elements<'m>(model: &'m Model, selector: &impl Selector) -> Vec<&'m Entity> {
    model
        .by_type(schema::PRODUCT)
        .filter(|element| selector.select(model, element))
        .collect()
}

/// Extract the elements `selector` accepts, with their ancestors, into a new model
pub fn extract(model: &Model, selector: &impl Selector) -> PatchResult<PatchOutcome> {
    let mut session = PatchSession::new(model)?;

    let selected: Vec<EntityId> = select_elements(model, selector)
        .into_iter()
        .map(|e| e.id)
        .collect();
    debug!(count = selected.len(), "selected elements");

    for &element in &selected {
        session.add_element(element)?;
    }
    let relations = session.finalize()?;
    let output = session.into_output();

    info!(
        selected = selected.len(),
        entities = output.entity_count(),
        containment = relations.containment,
        aggregation = relations.aggregation,
        "extraction complete"
    );

    let extraction = Extraction {
        model: output,
        selected,
        relations,
    };
    if extraction.selected.is_empty() {
        Ok(PatchOutcome::NoMatchingElements(extraction))
    } else {
        Ok(PatchOutcome::Extracted(extraction))
    }
}

/// Validate `config`, then extract what it selects
pub fn patch(model: &Model, config: &FilterConfig) -> PatchResult<PatchOutcome> {
    config.validate()?;
    extract(model, config)
}
