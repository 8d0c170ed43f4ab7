//! Filter choices offered for a model, and names for extracted output

use crate::model::{schema, Model};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::warn;

use super::filter::{FilterConfig, FilterMode};

/// What a model offers to filter on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelOptions {
    /// Distinct non-empty story names, sorted
    pub stories: Vec<String>,
    /// Distinct concrete product types, sorted
    pub product_types: Vec<String>,
}

impl ModelOptions {
    pub fn from_model(model: &Model) -> Self {
        let stories: BTreeSet<String> = model
            .by_type(schema::BUILDING_STOREY)
            .filter_map(|e| e.name.clone())
            .filter(|name| !name.is_empty())
            .collect();
        let product_types: BTreeSet<String> = model
            .by_type(schema::PRODUCT)
            .map(|e| e.entity_type.clone())
            .collect();
        Self {
            stories: stories.into_iter().collect(),
            product_types: product_types.into_iter().collect(),
        }
    }
}

/// Which stories to keep, before resolving against a model
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "StoriesField", into = "StoriesField")]
pub enum StorySelection {
    /// Every story in the model
    #[default]
    All,
    /// Stories by name; an empty list also means every story
    Named(Vec<String>),
}

/// YAML/JSON shape: the string `all`, a single story name, or a list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum StoriesField {
    One(String),
    Many(Vec<String>),
}

impl From<StoriesField> for StorySelection {
    fn from(field: StoriesField) -> Self {
        match field {
            StoriesField::One(s) if s.eq_ignore_ascii_case("all") => Self::All,
            StoriesField::One(s) => Self::Named(vec![s]),
            StoriesField::Many(names) => Self::Named(names),
        }
    }
}

impl From<StorySelection> for StoriesField {
    fn from(selection: StorySelection) -> Self {
        match selection {
            StorySelection::All => Self::One("all".to_string()),
            StorySelection::Named(names) => Self::Many(names),
        }
    }
}

impl StorySelection {
    /// Story names to filter on
    ///
    /// Names the model does not know are kept (they simply match nothing)
    /// and logged.
    pub fn resolve(&self, model: &Model) -> BTreeSet<String> {
        let known = ModelOptions::from_model(model).stories;
        match self {
            Self::Named(names) if !names.is_empty() => {
                for name in names.iter().filter(|n| !known.contains(n)) {
                    warn!(story = %name, "story not found in model");
                }
                names.iter().cloned().collect()
            }
            _ => known.into_iter().collect(),
        }
    }
}

/// Split comma-separated keyword input, trimming and dropping blanks
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|k| !k.is_empty())
        .map(str::to_string)
        .collect()
}

fn underscored(s: &str) -> String {
    s.replace(' ', "_")
}

/// `{stem}_stories_{..}[_product_{..}][_keywords_{..}]`
pub fn default_output_name(stem: &str, config: &FilterConfig) -> String {
    let stories: Vec<String> = config.stories.iter().map(|s| underscored(s)).collect();
    let mut name = format!("{}_stories_{}", stem, stories.join("_"));
    if config.mode == FilterMode::TypeAndKeyword {
        if let Some(product) = &config.product_type {
            name.push_str("_product_");
            name.push_str(&underscored(product));
        }
    }
    if !config.keywords.is_empty() {
        let keywords: Vec<String> = config.keywords.iter().map(|k| underscored(k)).collect();
        name.push_str("_keywords_");
        name.push_str(&keywords.join("_"));
    }
    name
}

/// Append `.{extension}` unless the name already ends with it (ASCII case-insensitive)
pub fn ensure_extension(name: &str, extension: &str) -> String {
    let suffix = format!(".{}", extension);
    if name.to_ascii_lowercase().ends_with(&suffix.to_ascii_lowercase()) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}
