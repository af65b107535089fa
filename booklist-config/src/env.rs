//! Environment variable loading.

use crate::{ConfigError, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::env;

/// Loads prefixed environment variables into configuration keys.
///
/// With prefix `BOOKLIST`, the variable `BOOKLIST_DATABASE_URL` becomes the
/// key `database_url`. Variables without the prefix are ignored.
pub struct EnvLoader {
    prefix: Option<String>,
}

impl EnvLoader {
    pub fn new(prefix: Option<String>) -> Self {
        Self { prefix }
    }

    /// Load matching variables as raw strings.
    pub fn load(&self) -> Result<HashMap<String, String>> {
        Ok(self.collect(env::vars()))
    }

    /// Load matching variables, coercing each value with [`coerce_value`].
    pub fn load_values(&self) -> Result<HashMap<String, Value>> {
        Ok(self
            .load()?
            .into_iter()
            .map(|(key, raw)| (key, coerce_value(&raw)))
            .collect())
    }

    fn collect(&self, vars: impl Iterator<Item = (String, String)>) -> HashMap<String, String> {
        let mut config = HashMap::new();

        for (key, value) in vars {
            match self.prefix {
                Some(ref prefix) => {
                    let Some(rest) = key.strip_prefix(prefix.as_str()) else {
                        continue;
                    };
                    let Some(trimmed) = rest.strip_prefix('_') else {
                        continue;
                    };
                    if !trimmed.is_empty() {
                        config.insert(trimmed.to_lowercase(), value);
                    }
                }
                None => {
                    config.insert(key.to_lowercase(), value);
                }
            }
        }

        config
    }

    /// Load a single variable by its unprefixed key.
    pub fn load_var(&self, key: &str) -> Result<String> {
        let full_key = match self.prefix {
            Some(ref prefix) => format!("{}_{}", prefix, key.to_uppercase()),
            None => key.to_uppercase(),
        };

        env::var(&full_key).map_err(ConfigError::EnvError)
    }

    pub fn load_var_or(&self, key: &str, default: &str) -> String {
        self.load_var(key).unwrap_or_else(|_| default.to_string())
    }
}

impl Default for EnvLoader {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Turn a raw environment string into a typed JSON value.
///
/// Integers, floats and booleans become their JSON types so they
/// deserialize into numeric or boolean settings. Everything else, including
/// strings that only look like JSON objects, stays a string.
pub fn coerce_value(raw: &str) -> Value {
    let trimmed = raw.trim();
    match trimmed {
        "true" => return Value::Bool(true),
        "false" => return Value::Bool(false),
        _ => {}
    }
    if let Ok(int) = trimmed.parse::<i64>() {
        return Value::from(int);
    }
    if let Ok(float) = trimmed.parse::<f64>()
        && float.is_finite()
    {
        return Value::from(float);
    }
    Value::String(raw.to_string())
}
