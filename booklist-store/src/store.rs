//! The record store capability.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{Collection, Document, Filter, Record, RecordId, Result};

/// Durable storage for records, reachable by identifier and by equality
/// filter.
///
/// Implementations serialize their own writes; callers never lock.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Look up one record. A miss is `Ok(None)`, not an error.
    async fn find_by_id(&self, collection: Collection, id: &RecordId) -> Result<Option<Record>>;

    /// All records matching `filter`, in insertion order.
    async fn find_where(&self, collection: Collection, filter: &Filter) -> Result<Vec<Record>>;

    /// Persist a new record. The store assigns the identifier; an `id` in
    /// `fields` is ignored.
    async fn insert(&self, collection: Collection, fields: Document) -> Result<Record>;

    /// Check that the backend is reachable.
    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    /// Backend name for logs.
    fn backend(&self) -> &'static str;
}

/// Shared handle passed to the resolver layer.
pub type SharedStore = Arc<dyn RecordStore>;
