//! Record store error types.

use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Record store errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Connection string uses a scheme no backend handles.
    #[error("Unsupported store scheme: {0}")]
    UnsupportedScheme(String),

    /// Connection string could not be parsed.
    #[error("Invalid store URL: {0}")]
    InvalidUrl(String),

    /// Filter named a field that is not a plain identifier.
    #[error("Invalid field name: {0}")]
    InvalidField(String),

    /// The database engine rejected an operation or could not be opened.
    #[error("Database error: {0}")]
    Database(#[from] surrealdb::Error),

    /// A stored row could not be turned back into a record.
    #[error("Malformed record in {collection}: {reason}")]
    Malformed {
        /// Collection the row came from.
        collection: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A record or entity failed to (de)serialize.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend is not reachable.
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Whether the error comes from a bad connection string.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::UnsupportedScheme(_) | Self::InvalidUrl(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_config() {
        assert!(StoreError::UnsupportedScheme("mongodb".into()).is_config());
        assert!(StoreError::InvalidUrl("no scheme".into()).is_config());
        assert!(!StoreError::Unavailable("down".into()).is_config());
        assert!(!StoreError::InvalidField("a b".into()).is_config());
    }
}
