//! Configuration model loaded from external sources.

use std::path::Path;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::domain::types::{
    DEFAULT_PAGE_SIZE, DEFAULT_PAGE_SIZE_OPTIONS, PageSize, SortDirection, TypeConstraintError,
};

/// Errors raised while loading or validating [`ListConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings: {0}")]
    Source(#[from] config::ConfigError),

    #[error("invalid settings: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid settings: {0}")]
    Invalid(String),
}

fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

fn default_page_size_options() -> Vec<usize> {
    DEFAULT_PAGE_SIZE_OPTIONS.to_vec()
}

fn default_id_field() -> String {
    "_id".to_string()
}

fn validate_page_size_options(config: &ListConfig) -> Result<(), ValidationError> {
    if config.page_size_options.contains(&0) {
        return Err(ValidationError::new("zero_page_size_option"));
    }
    if !config.page_size_options.contains(&config.default_page_size) {
        return Err(ValidationError::new("default_page_size_not_offered"));
    }
    Ok(())
}

#[derive(Clone, Debug, Deserialize, Validate, PartialEq)]
#[validate(schema(function = "validate_page_size_options"))]
/// Defaults applied when a list view mounts.
pub struct ListConfig {
    #[validate(length(min = 1))]
    pub default_order_by: String,
    #[serde(default)]
    pub default_order: SortDirection,
    #[serde(default = "default_page_size")]
    #[validate(range(min = 1))]
    pub default_page_size: usize,
    #[serde(default = "default_page_size_options")]
    #[validate(length(min = 1))]
    pub page_size_options: Vec<usize>,
    /// Dotted path of the row identifier.
    #[serde(default = "default_id_field")]
    #[validate(length(min = 1))]
    pub id_field: String,
}

impl ListConfig {
    /// Defaults for a list sorted on `default_order_by`.
    pub fn new(default_order_by: impl Into<String>) -> Self {
        Self {
            default_order_by: default_order_by.into(),
            default_order: SortDirection::default(),
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            id_field: default_id_field(),
        }
    }

    /// Reads `{dir}/default.*`, then the optional `{dir}/{app_env}.*`
    /// override, then `APP_*` environment variables.
    pub fn load(config_dir: &Path, app_env: &str) -> Result<Self, ConfigError> {
        let default_file = config_dir.join("default");
        let env_file = config_dir.join(app_env);

        let settings = Config::builder()
            .add_source(File::with_name(&default_file.to_string_lossy()))
            .add_source(File::with_name(&env_file.to_string_lossy()).required(false))
            .add_source(Environment::with_prefix("APP").try_parsing(true))
            .build()?;

        let config = settings.try_deserialize::<ListConfig>()?;
        config.validate()?;
        Ok(config)
    }

    pub fn page_size(&self) -> Result<PageSize, TypeConstraintError> {
        PageSize::new(self.default_page_size)
    }

    /// Page-size choices, dropping any zero entries.
    pub fn page_size_options(&self) -> Vec<PageSize> {
        self.page_size_options
            .iter()
            .filter_map(|size| PageSize::new(*size).ok())
            .collect()
    }
}
