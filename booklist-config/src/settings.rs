//! Settings for the Booklist server process.

use crate::{
    ConfigError, ConfigService, ConfigValidator, ENV_PREFIX, FileFormat, Result, Validate,
};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable naming an optional config file.
pub const CONFIG_FILE_VAR: &str = "BOOKLIST_CONFIG";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];
const LOG_FORMATS: &[&str] = &["pretty", "compact", "json"];

/// Everything the server needs at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    /// Record store connection string (`memory://` or `file://<dir>`).
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Path of the GraphQL endpoint.
    pub endpoint: String,
    /// Serve GraphiQL on `GET {endpoint}`.
    #[serde(deserialize_with = "flag")]
    pub graphiql: bool,
    /// Serve the schema SDL on `GET {endpoint}/schema`.
    #[serde(deserialize_with = "flag")]
    pub sdl: bool,
    #[serde(deserialize_with = "flag")]
    pub introspection: bool,
    /// Maximum query depth, 0 for unlimited.
    pub max_depth: usize,
    /// Maximum query complexity, 0 for unlimited.
    pub max_complexity: usize,
    /// Attach Apollo tracing data to responses.
    #[serde(deserialize_with = "flag")]
    pub apollo_tracing: bool,
    /// Reject `addBook` when `authorId` names no stored author.
    #[serde(deserialize_with = "flag")]
    pub strict_references: bool,
    pub log_level: String,
    pub log_format: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            database_url: "memory://".to_string(),
            host: "0.0.0.0".to_string(),
            port: 4000,
            endpoint: "/graphql".to_string(),
            graphiql: true,
            sdl: true,
            introspection: true,
            max_depth: 0,
            max_complexity: 0,
            apollo_tracing: false,
            strict_references: false,
            log_level: "info".to_string(),
            log_format: "json".to_string(),
        }
    }
}

impl ServerSettings {
    /// Load from the optional `BOOKLIST_CONFIG` file, `.env`, and
    /// `BOOKLIST_*` environment variables, in increasing precedence.
    pub fn load() -> Result<Self> {
        let file = std::env::var_os(CONFIG_FILE_VAR).map(PathBuf::from);
        Self::load_from(file)
    }

    pub fn load_from(file: Option<PathBuf>) -> Result<Self> {
        let mut builder = ConfigService::builder()
            .with_prefix(ENV_PREFIX)
            .load_dotenv(None);

        if let Some(path) = file {
            let format = FileFormat::from_path(&path)?;
            builder = builder.add_file(path, format);
        }

        builder.build()?.settings()
    }

    /// `host:port` for binding the listener.
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Validate for ServerSettings {
    fn validate(&self) -> Result<()> {
        ConfigValidator::not_empty(&self.database_url, "database_url")?;
        ConfigValidator::not_empty(&self.host, "host")?;
        ConfigValidator::is_port(self.port, "port")?;
        ConfigValidator::starts_with(&self.endpoint, "/", "endpoint")?;
        ConfigValidator::one_of(&self.log_level, LOG_LEVELS, "log_level")?;
        ConfigValidator::one_of(&self.log_format, LOG_FORMATS, "log_format")?;
        if self.graphiql && !self.introspection {
            return Err(ConfigError::ValidationError(
                "graphiql requires introspection".to_string(),
            ));
        }
        Ok(())
    }
}

/// Boolean setting. Environment values reach the deserializer already
/// coerced, so `1`/`0` arrive as integers and the usual words as strings.
fn flag<'de, D>(deserializer: D) -> std::result::Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Int(1) => Ok(true),
        Flag::Int(0) => Ok(false),
        Flag::Int(other) => Err(de::Error::custom(format!(
            "expected a boolean, 0 or 1, found {other}"
        ))),
        Flag::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(de::Error::custom(format!(
                "expected a boolean, found '{text}'"
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConfigManager;

    #[test]
    fn test_defaults_are_valid() {
        let settings = ServerSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.socket_addr(), "0.0.0.0:4000");
        assert_eq!(settings.endpoint, "/graphql");
        assert!(settings.graphiql);
        assert!(settings.sdl);
        assert!(settings.introspection);
        assert_eq!(settings.max_depth, 0);
        assert!(!settings.apollo_tracing);
        assert!(!settings.strict_references);
    }

    #[test]
    fn test_flags_accept_numbers_and_words() {
        let manager = ConfigManager::new();
        manager.set("graphiql", 0).unwrap();
        manager.set("strict_references", 1).unwrap();
        manager.set("apollo_tracing", "yes").unwrap();
        manager.set("sdl", "False").unwrap();

        let settings: ServerSettings = manager.load_validated().unwrap();
        assert!(!settings.graphiql);
        assert!(settings.strict_references);
        assert!(settings.apollo_tracing);
        assert!(!settings.sdl);
        assert!(settings.introspection);
    }

    #[test]
    fn test_flag_rejects_other_values() {
        for value in [serde_json::json!(2), serde_json::json!("maybe")] {
            let manager = ConfigManager::new();
            manager.set("graphiql", value).unwrap();

            let err = manager.load_validated::<ServerSettings>().unwrap_err();
            assert!(matches!(err, ConfigError::DeserializationError(_)));
        }
    }

    #[test]
    fn test_query_limits() {
        let manager = ConfigManager::new();
        manager.set("max_depth", 8).unwrap();
        manager.set("max_complexity", 200).unwrap();

        let settings: ServerSettings = manager.load_validated().unwrap();
        assert_eq!(settings.max_depth, 8);
        assert_eq!(settings.max_complexity, 200);
    }

    #[test]
    fn test_graphiql_needs_introspection() {
        let settings = ServerSettings {
            introspection: false,
            ..ServerSettings::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());

        let settings = ServerSettings {
            graphiql: false,
            introspection: false,
            ..ServerSettings::default()
        };
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_values_fill_defaults() {
        let manager = ConfigManager::new();
        manager.set("database_url", "file://./data/booklist").unwrap();
        manager.set("port", 4100).unwrap();
        manager.set("unrelated_key", "ignored").unwrap();

        let settings: ServerSettings = manager.load_validated().unwrap();
        assert_eq!(settings.database_url, "file://./data/booklist");
        assert_eq!(settings.port, 4100);
        assert_eq!(settings.host, "0.0.0.0");
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        let manager = ConfigManager::new();
        manager.set("endpoint", "graphql").unwrap();

        let err = manager.load_validated::<ServerSettings>().unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_invalid_log_format_rejected() {
        let settings = ServerSettings {
            log_format: "xml".to_string(),
            ..ServerSettings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_empty_database_url_rejected() {
        let settings = ServerSettings {
            database_url: String::new(),
            ..ServerSettings::default()
        };
        assert!(settings.validate().unwrap_err().is_validation());
    }
}
