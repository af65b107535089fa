//! High-level configuration service.

use crate::{ConfigManager, FileFormat, Result, Validate};
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Read-only view over a fully loaded [`ConfigManager`].
#[derive(Clone, Default)]
pub struct ConfigService {
    manager: ConfigManager,
}

impl ConfigService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_manager(manager: ConfigManager) -> Self {
        Self { manager }
    }

    pub fn builder() -> ConfigServiceBuilder {
        ConfigServiceBuilder::new()
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        self.manager.get(key)
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.manager.get_or(key, default)
    }

    pub fn has(&self, key: &str) -> bool {
        self.manager.has(key)
    }

    /// Deserialize and validate a settings struct from all loaded values.
    pub fn settings<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        self.manager.load_validated()
    }

    pub fn manager(&self) -> &ConfigManager {
        &self.manager
    }
}

/// Builder for [`ConfigService`].
///
/// Sources are applied in a fixed order regardless of call order: defaults,
/// then config files, then the `.env` file and environment variables.
#[derive(Default)]
pub struct ConfigServiceBuilder {
    prefix: Option<String>,
    defaults: Vec<(String, serde_json::Value)>,
    load_env: bool,
    load_dotenv: bool,
    dotenv_path: Option<PathBuf>,
    config_files: Vec<(PathBuf, FileFormat)>,
}

impl ConfigServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the environment variable prefix.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Seed a default value, overridden by every other source.
    pub fn default_value(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.defaults.push((key.to_string(), value.into()));
        self
    }

    pub fn load_env(mut self) -> Self {
        self.load_env = true;
        self
    }

    /// Load a `.env` file before reading the environment. `None` means the
    /// default `.env` lookup, which may be absent.
    pub fn load_dotenv(mut self, path: Option<PathBuf>) -> Self {
        self.load_dotenv = true;
        self.load_env = true;
        self.dotenv_path = path;
        self
    }

    pub fn add_file(mut self, path: impl Into<PathBuf>, format: FileFormat) -> Self {
        self.config_files.push((path.into(), format));
        self
    }

    pub fn build(self) -> Result<ConfigService> {
        let manager = match self.prefix {
            Some(prefix) => ConfigManager::with_prefix(prefix),
            None => ConfigManager::new(),
        };

        for (key, value) in self.defaults {
            manager.set(&key, value)?;
        }

        for (path, format) in self.config_files {
            manager.load_file(&path, format)?;
        }

        if self.load_dotenv {
            manager.load_dotenv(self.dotenv_path.as_deref())?;
        } else if self.load_env {
            manager.load_env()?;
        }

        Ok(ConfigService::from_manager(manager))
    }
}
