//! Config loader: assembles the layered sources and validates the result.

use super::merge::merge_policy;
use super::sources::{explicit_file, global_file};
use super::RenditionConfig;
use crate::error::ConfigError;
use config::Environment;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration.
    ///
    /// Precedence (highest to lowest):
    /// 1. Environment variables (`RENDITION__ENGINE__MODE`, ...)
    /// 2. Explicit file, when given
    /// 3. User file (`$XDG_CONFIG_HOME/rendition/config.toml`)
    /// 4. Defaults
    pub fn load(explicit: Option<&Path>) -> Result<RenditionConfig, ConfigError> {
        let mut builder = merge_policy::builder_with_defaults()?;
        builder = global_file::add_to_builder(builder)?;
        if let Some(path) = explicit {
            builder = explicit_file::add_to_builder(builder, path)?;
        }
        builder = builder.add_source(
            Environment::with_prefix("RENDITION")
                .separator("__")
                .try_parsing(true),
        );

        let config: RenditionConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Invalid)?;
        debug!(mode = %config.engine.mode, "configuration loaded");
        Ok(config)
    }

    /// Load a single file on top of the defaults, ignoring user file and environment.
    pub fn load_from_file(path: &Path) -> Result<RenditionConfig, ConfigError> {
        let builder = explicit_file::add_to_builder(merge_policy::builder_with_defaults()?, path)?;
        let config: RenditionConfig = builder.build()?.try_deserialize()?;
        config.validate().map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Path of the user config file, if one can be determined.
    pub fn user_config_path() -> Option<PathBuf> {
        global_file::global_config_path()
    }
}
