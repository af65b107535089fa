// GraphQL surface of the Booklist service

pub mod config;
pub mod error;
pub mod model;
pub mod mutation;
pub mod query;
pub mod resolver;
pub mod router;
pub mod schema_builder;

pub use async_graphql;
pub use async_graphql::{EmptySubscription, ID, Request, Response, Schema};

pub use config::*;
pub use error::GraphQLError;
pub use model::{Author, Book, NewAuthor, NewBook};
pub use mutation::MutationRoot;
pub use query::QueryRoot;
pub use resolver::*;
pub use router::router;
pub use schema_builder::*;

use async_graphql::http::GraphiQLSource;

/// GraphiQL page pointed at `endpoint`
///
/// # Example
///
/// ```
/// use booklist_graphql::graphiql_html;
///
/// let html = graphiql_html("/graphql");
/// assert!(html.contains("/graphql"));
/// ```
pub fn graphiql_html(endpoint: &str) -> String {
    GraphiQLSource::build()
        .endpoint(endpoint)
        .title("Booklist")
        .finish()
}
