//! Layered configuration for the Booklist service.
//!
//! Values are collected into a [`ConfigManager`] from config files, `.env`
//! files and `BOOKLIST_*` environment variables, then deserialized into a
//! validated settings struct such as [`ServerSettings`].

pub mod config_service;
pub mod env;
pub mod error;
pub mod loader;
pub mod settings;
pub mod validation;

pub use config_service::{ConfigService, ConfigServiceBuilder};
pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use settings::ServerSettings;
pub use validation::{ConfigValidator, Validate};

use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, PoisonError, RwLock};

/// Environment prefix used by the service.
pub const ENV_PREFIX: &str = "BOOKLIST";

/// Key/value configuration store. Later loads override earlier ones.
#[derive(Clone, Default)]
pub struct ConfigManager {
    config: Arc<RwLock<HashMap<String, serde_json::Value>>>,
    env_prefix: Option<String>,
}

impl ConfigManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            config: Arc::default(),
            env_prefix: Some(prefix.into()),
        }
    }

    fn insert_all(&self, entries: impl IntoIterator<Item = (String, serde_json::Value)>) {
        let mut config = self.config.write().unwrap_or_else(PoisonError::into_inner);
        config.extend(entries);
    }

    /// Load prefixed environment variables, coercing numbers and booleans.
    pub fn load_env(&self) -> Result<()> {
        let loader = EnvLoader::new(self.env_prefix.clone());
        self.insert_all(loader.load_values()?);
        Ok(())
    }

    /// Load a `.env` file into the process environment, then the
    /// environment into this manager. A missing default `.env` is ignored.
    pub fn load_dotenv(&self, path: Option<&Path>) -> Result<()> {
        match path {
            Some(path) => {
                dotenvy::from_path(path).map_err(|e| ConfigError::LoadError(e.to_string()))?;
            }
            None => {
                dotenvy::dotenv().ok();
            }
        }
        self.load_env()
    }

    /// Merge the top-level keys of a config file.
    pub fn load_file(&self, path: impl AsRef<Path>, format: FileFormat) -> Result<()> {
        let data = ConfigLoader::new(format).load_file(path)?;

        if let serde_json::Value::Object(map) = data {
            self.insert_all(map);
        }
        Ok(())
    }

    pub fn set<T: serde::Serialize>(&self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value)
            .map_err(|e| ConfigError::SerializationError(e.to_string()))?;
        self.insert_all([(key.to_string(), json_value)]);
        Ok(())
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);

        let value = config
            .get(key)
            .ok_or_else(|| ConfigError::KeyNotFound(key.to_string()))?;

        serde_json::from_value(value.clone())
            .map_err(|e| ConfigError::DeserializationError(format!("{}: {}", key, e)))
    }

    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    pub fn get_string(&self, key: &str) -> Result<String> {
        self.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Result<bool> {
        self.get(key)
    }

    pub fn has(&self, key: &str) -> bool {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        config.contains_key(key)
    }

    pub fn keys(&self) -> Vec<String> {
        let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
        config.keys().cloned().collect()
    }

    /// Deserialize every known key into `T` and run its validation.
    ///
    /// Keys `T` does not know are ignored, so unrelated `BOOKLIST_*`
    /// variables do not break loading.
    pub fn load_validated<T: DeserializeOwned + Validate>(&self) -> Result<T> {
        let json_value = {
            let config = self.config.read().unwrap_or_else(PoisonError::into_inner);
            serde_json::Value::Object(config.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
        };

        let validated: T = serde_json::from_value(json_value)
            .map_err(|e| ConfigError::DeserializationError(e.to_string()))?;

        validated.validate()?;

        Ok(validated)
    }
}
