use super::{data::DataConfig, evolution::EvolutionConfig, traits::ConfigSection};
use crate::error::SymgpError;
use ::config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Prefix for environment overrides, e.g. `SYMGP_EVOLUTION__POPULATION_SIZE`.
pub const ENV_PREFIX: &str = "SYMGP";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub evolution: EvolutionConfig,
    pub data: DataConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), SymgpError> {
        self.evolution.validate()?;
        self.data.validate()?;
        Ok(())
    }

    /// Load a TOML file layered with `SYMGP_*` environment overrides.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, SymgpError> {
        let path = path.as_ref();
        log::debug!("Loading configuration from {}", path.display());

        let settings = Config::builder()
            .add_source(File::from(path).format(FileFormat::Toml).required(true))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, SymgpError> {
        let config: AppConfig = toml::from_str(contents)
            .map_err(|e| SymgpError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), SymgpError> {
        let toml_str = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_str)?;
        Ok(())
    }

    pub fn section_names() -> [&'static str; 2] {
        [EvolutionConfig::section_name(), DataConfig::section_name()]
    }
}
