// Booklist - a GraphQL API for authors and the books they wrote
//
// Wires configuration, the record store and the GraphQL schema into an
// HTTP server.

pub mod app;
pub mod error;

pub use app::Application;
pub use error::{AppError, Result};

// Re-export the service crates
pub use booklist_config;
pub use booklist_graphql;
pub use booklist_log;
pub use booklist_store;

// Prelude for common imports
pub mod prelude {
    pub use crate::{AppError, Application};

    pub use booklist_config::{ConfigError, ServerSettings, Validate};
    pub use booklist_graphql::{
        Author, Book, BooklistSchema, GraphQLConfig, GraphQLError, SchemaBuilder,
    };
    pub use booklist_store::{
        Filter, RecordStore, Repository, SharedStore, StoreError, SurrealStore, connect,
    };
}
