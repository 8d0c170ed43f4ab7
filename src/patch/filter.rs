//! Selection predicates over candidate elements

use crate::config::{ConfigError, ConfigResult};
use crate::model::{Entity, Model, RelationKind};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Decides whether a candidate element belongs in the initial selection
pub trait Selector {
    fn select(&self, model: &Model, element: &Entity) -> bool;
}

impl<F> Selector for F
where
    F: Fn(&Model, &Entity) -> bool,
{
    fn select(&self, model: &Model, element: &Entity) -> bool {
        self(model, element)
    }
}

/// Which conditions besides the story check apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Type must equal the configured product type and a keyword must match
    TypeAndKeyword,
    /// Only the keyword condition applies
    #[default]
    KeywordOnly,
}

impl std::fmt::Display for FilterMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TypeAndKeyword => write!(f, "type_and_keyword"),
            Self::KeywordOnly => write!(f, "keyword_only"),
        }
    }
}

/// Story, keyword and type filter
///
/// Regardless of mode, an element is only selected when one of its *direct*
/// containment parents is named in `stories`. Story membership inherited
/// through aggregation does not count, and an empty story set selects
/// nothing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    pub stories: BTreeSet<String>,
    /// Case-insensitive name substrings; empty matches every element
    pub keywords: Vec<String>,
    pub product_type: Option<String>,
    pub mode: FilterMode,
}

impl FilterConfig {
    pub fn new(mode: FilterMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_story(mut self, story: impl Into<String>) -> Self {
        self.stories.insert(story.into());
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = Some(product_type.into());
        self
    }

    /// Reject configurations the predicate could never satisfy by design
    pub fn validate(&self) -> ConfigResult<()> {
        if self.mode == FilterMode::TypeAndKeyword && self.product_type.is_none() {
            return Err(ConfigError::MissingProductType(self.mode));
        }
        Ok(())
    }

    pub fn keyword_matches(&self, element: &Entity) -> bool {
        if self.keywords.is_empty() {
            return true;
        }
        let name = element.name_or_empty().to_lowercase();
        self.keywords
            .iter()
            .any(|keyword| name.contains(&keyword.to_lowercase()))
    }

    pub fn type_matches(&self, element: &Entity) -> bool {
        self.product_type
            .as_deref()
            .is_some_and(|t| element.entity_type.eq_ignore_ascii_case(t))
    }

    /// Whether an immediate spatial parent is one of the configured stories
    pub fn story_matches(&self, model: &Model, element: &Entity) -> bool {
        model
            .parents(element.id, RelationKind::Containment)
            .iter()
            .filter_map(|id| model.get(*id))
            .any(|parent| {
                parent
                    .name
                    .as_ref()
                    .is_some_and(|name| self.stories.contains(name))
            })
    }
}

impl Selector for FilterConfig {
    fn select(&self, model: &Model, element: &Entity) -> bool {
        let conditions = match self.mode {
            FilterMode::TypeAndKeyword => self.type_matches(element) && self.keyword_matches(element),
            FilterMode::KeywordOnly => self.keyword_matches(element),
        };
        conditions && self.story_matches(model, element)
    }
}
