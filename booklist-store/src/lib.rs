//! Record storage for Booklist.
//!
//! The service only needs three capabilities from its store: fetch a record
//! by identifier, fetch records by exact-match filter, and insert a record
//! with a store-assigned identifier. [`RecordStore`] captures exactly that.
//!
//! [`SurrealStore`] implements it over an embedded SurrealDB engine, either
//! in memory or persisted with SurrealKV. [`connect`] picks the engine from
//! a connection string (`memory://`, `file://<dir>`).
//!
//! ```rust
//! use booklist_store::{Collection, Filter, RecordStore, SurrealStore};
//! use serde_json::json;
//!
//! # async fn example() -> booklist_store::Result<()> {
//! const BOOKS: Collection = Collection::new("books");
//!
//! let store = SurrealStore::memory().await?;
//! let fields = json!({"name": "X", "authorId": "a1"});
//! let book = store.insert(BOOKS, fields.as_object().cloned().unwrap_or_default()).await?;
//!
//! let by_author = store.find_where(BOOKS, &Filter::eq("authorId", "a1")).await?;
//! assert_eq!(by_author, vec![book]);
//! # Ok(())
//! # }
//! ```

mod connect;
mod error;
mod filter;
mod record;
mod repository;
mod store;
mod surreal;

pub use connect::{StoreUrl, connect};
pub use error::{Result, StoreError};
pub use filter::Filter;
pub use record::{Collection, Document, ID_FIELD, Record, RecordId};
pub use repository::{Entity, Repository};
pub use store::{RecordStore, SharedStore};
pub use surreal::SurrealStore;
