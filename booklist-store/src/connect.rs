//! Connection strings.

use booklist_log::info;
use std::path::PathBuf;
use std::sync::Arc;

use crate::{RecordStore, Result, SharedStore, StoreError, SurrealStore};

/// Parsed record store location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreUrl {
    /// `memory://` or `mem://`
    Memory,
    /// `file://<dir>` or `surrealkv://<dir>`
    File(PathBuf),
}

impl StoreUrl {
    pub fn parse(url: &str) -> Result<Self> {
        let url = url.trim();
        let (scheme, rest) = url
            .split_once("://")
            .ok_or_else(|| StoreError::InvalidUrl(format!("missing scheme in '{}'", url)))?;

        match scheme.to_ascii_lowercase().as_str() {
            "memory" | "mem" => {
                if !rest.is_empty() {
                    return Err(StoreError::InvalidUrl(format!(
                        "memory store takes no location, got '{}'",
                        rest
                    )));
                }
                Ok(Self::Memory)
            }
            "file" | "surrealkv" => {
                if rest.is_empty() {
                    return Err(StoreError::InvalidUrl("file store needs a path".to_string()));
                }
                Ok(Self::File(PathBuf::from(rest)))
            }
            other => Err(StoreError::UnsupportedScheme(other.to_string())),
        }
    }

    /// Address understood by the embedded engine.
    pub fn engine_address(&self) -> String {
        match self {
            Self::Memory => "mem://".to_string(),
            Self::File(path) => format!("surrealkv://{}", path.display()),
        }
    }
}

/// Open the store named by `url` and check it is reachable.
pub async fn connect(url: &str) -> Result<SharedStore> {
    let address = StoreUrl::parse(url)?.engine_address();
    let store = SurrealStore::open(&address).await?;

    store.ping().await?;
    info!(target: "booklist::store", "connected to {} record store", store.backend());

    Ok(Arc::new(store))
}
