// Error types for the Booklist server process

use booklist_config::ConfigError;
use booklist_graphql::GraphQLError;
use booklist_store::StoreError;
use thiserror::Error;

/// Startup and serving failures.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    #[error("Schema error: {0}")]
    Schema(#[from] GraphQLError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Whether the process should refuse to start rather than retry.
    pub fn is_startup(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Store(_) | Self::Schema(_))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
