// Schema assembly

use async_graphql::extensions::ApolloTracing;
use async_graphql::{EmptySubscription, Schema};
use booklist_store::SharedStore;

use crate::config::GraphQLConfig;
use crate::error::GraphQLError;
use crate::mutation::MutationRoot;
use crate::query::QueryRoot;

/// The executable Booklist schema.
pub type BooklistSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds a [`BooklistSchema`] around an injected record store.
#[derive(Default)]
pub struct SchemaBuilder {
    store: Option<SharedStore>,
    config: GraphQLConfig,
}

impl SchemaBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the record store every resolver reads from and writes to
    pub fn store(mut self, store: SharedStore) -> Self {
        self.store = Some(store);
        self
    }

    pub fn config(mut self, config: GraphQLConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<BooklistSchema, GraphQLError> {
        let store = self
            .store
            .ok_or_else(|| GraphQLError::Schema("a record store is required".to_string()))?;
        let config = self.config;

        let mut builder = Schema::build(
            QueryRoot,
            MutationRoot::new(config.strict_references),
            EmptySubscription,
        )
        .data(store);

        if config.max_depth > 0 {
            builder = builder.limit_depth(config.max_depth);
        }
        if config.max_complexity > 0 {
            builder = builder.limit_complexity(config.max_complexity);
        }
        if !config.enable_introspection {
            builder = builder.disable_introspection();
        }
        if config.enable_tracing {
            builder = builder.extension(ApolloTracing);
        }

        Ok(builder.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use booklist_store::SurrealStore;
    use serde_json::json;
    use std::sync::Arc;

    async fn schema(config: GraphQLConfig) -> BooklistSchema {
        SchemaBuilder::new()
            .store(Arc::new(SurrealStore::memory().await.unwrap()))
            .config(config)
            .build()
            .unwrap()
    }

    #[test]
    fn test_store_is_required() {
        let err = SchemaBuilder::new().build().err().unwrap();
        assert_eq!(err.code(), "SCHEMA_ERROR");
    }

    #[tokio::test]
    async fn test_sdl_lists_root_fields() {
        let sdl = schema(GraphQLConfig::default()).await.sdl();

        for field in ["book(", "author(", "books:", "authors:", "addAuthor(", "addBook("] {
            assert!(sdl.contains(field), "missing {field} in SDL");
        }
        assert!(sdl.contains("type Book"));
        assert!(sdl.contains("type Author"));
    }

    #[tokio::test]
    async fn test_ids_are_strings() {
        let sdl = schema(GraphQLConfig::default()).await.sdl();

        assert!(sdl.contains("id: String!"));
        assert!(!sdl.contains("id: ID!"));
        assert!(sdl.contains("authorId: ID!"));
    }

    #[tokio::test]
    async fn test_depth_limit() {
        let schema = schema(GraphQLConfig::default().with_max_depth(2)).await;

        let response = schema
            .execute("{ authors { books { author { name } } } }")
            .await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Query is nested too deep.");

        let response = schema.execute("{ authors { name } }").await;
        assert!(response.errors.is_empty());
    }

    #[tokio::test]
    async fn test_complexity_limit() {
        let schema = schema(GraphQLConfig::default().with_max_complexity(3)).await;

        let response = schema
            .execute("{ authors { id name age books { id name } } }")
            .await;
        assert_eq!(response.errors.len(), 1);
        assert_eq!(response.errors[0].message, "Query is too complex.");
    }

    #[tokio::test]
    async fn test_introspection_disabled() {
        let schema = schema(GraphQLConfig::default().with_introspection(false)).await;

        let response = schema.execute(r#"{ __type(name: "QueryRoot") { name } }"#).await;
        assert!(response.errors.is_empty());
        assert_eq!(response.data.into_json().unwrap(), json!({"__type": null}));
    }

    #[tokio::test]
    async fn test_introspection_enabled() {
        let schema = schema(GraphQLConfig::default()).await;

        let response = schema.execute(r#"{ __type(name: "QueryRoot") { name } }"#).await;
        assert_eq!(
            response.data.into_json().unwrap(),
            json!({"__type": {"name": "QueryRoot"}})
        );
    }

    #[tokio::test]
    async fn test_apollo_tracing_extension() {
        let traced = schema(GraphQLConfig::default().with_tracing(true)).await;
        let response = traced.execute("{ books { id } }").await;
        assert!(response.extensions.contains_key("tracing"));

        let plain = schema(GraphQLConfig::default()).await;
        let response = plain.execute("{ books { id } }").await;
        assert!(!response.extensions.contains_key("tracing"));
    }
}
