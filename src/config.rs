//! Filter specifications read from YAML
//!
//! ```yaml
//! stories: [Level 1, Level 2]   # or `all`
//! keywords: [fire, exterior]
//! product: IfcWall
//! mode: type_and_keyword        # optional, inferred from `product`
//! output: tower_walls           # optional output name
//! ```

use crate::model::Model;
use crate::patch::{parse_keywords, FilterConfig, FilterMode, StorySelection};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors in filter configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Filter mode {0} requires a product type")]
    MissingProductType(FilterMode),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// A filter as written by a user, before it is resolved against a model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    pub stories: StorySelection,
    pub keywords: Vec<String>,
    pub product: Option<String>,
    pub mode: Option<FilterMode>,
    /// Output name without extension
    pub output: Option<String>,
}

impl FilterSpec {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read a filter spec from disk
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let yaml = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Mode to run in: explicit, or type-and-keyword exactly when a product is given
    pub fn effective_mode(&self) -> FilterMode {
        self.mode.unwrap_or(if self.product.is_some() {
            FilterMode::TypeAndKeyword
        } else {
            FilterMode::KeywordOnly
        })
    }

    /// Turn the spec into a validated [`FilterConfig`] for `model`
    pub fn resolve(&self, model: &Model) -> ConfigResult<FilterConfig> {
        let keywords = self
            .keywords
            .iter()
            .flat_map(|k| parse_keywords(k))
            .collect();
        let config = FilterConfig {
            stories: self.stories.resolve(model),
            keywords,
            product_type: self.product.clone(),
            mode: self.effective_mode(),
        };
        config.validate()?;
        Ok(config)
    }
}
