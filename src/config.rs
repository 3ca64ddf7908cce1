//! Configuration System
//!
//! Layered configuration for an embedding application: built-in defaults, the
//! user's config file, an explicit file, then `RENDITION__SECTION__KEY`
//! environment overrides. The engine itself never reads configuration; the
//! embedder loads it and hands the pieces over.

use crate::engine::EngineSettings;
use crate::error::ConfigError;
use crate::format::FormatTable;
use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

mod facade;
mod merge;
mod sources;

pub use facade::ConfigLoader;

/// Root configuration structure
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenditionConfig {
    /// Engine behavior
    #[serde(default)]
    pub engine: EngineSettings,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// TOML format table to load expressions from
    #[serde(default)]
    pub formats: Option<PathBuf>,
}

impl RenditionConfig {
    /// Validate the entire configuration, collecting every problem found.
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let progress = &self.engine.progress;

        if progress.complete_value == 0 || progress.complete_value > 100 {
            errors.push(format!(
                "engine.progress.complete_value must be between 1 and 100 (got {})",
                progress.complete_value
            ));
        }

        if let Err(e) = self.logging.validate() {
            errors.push(format!("logging: {}", e));
        }

        if let Some(path) = &self.formats {
            if !path.is_file() {
                errors.push(format!("formats: {} is not a file", path.display()));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Load the configured format table, if one is configured.
    pub fn load_format_table(&self) -> Result<Option<FormatTable>, ConfigError> {
        match &self.formats {
            Some(path) => Ok(Some(FormatTable::from_path(path)?)),
            None => Ok(None),
        }
    }
}
