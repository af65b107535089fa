// GraphQL-facing errors

use async_graphql::ErrorExtensions;
use booklist_store::StoreError;
use thiserror::Error;

/// Errors raised by resolvers, reported through the GraphQL `errors` array
/// with a stable `code` extension.
#[derive(Debug, Error)]
pub enum GraphQLError {
    /// The record store failed during the request.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),

    /// `addBook` named an author that does not exist (strict references).
    #[error("author {0} does not exist")]
    AuthorNotFound(String),

    /// The schema could not be assembled.
    #[error("schema error: {0}")]
    Schema(String),
}

impl GraphQLError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Store(_) => "STORE_ERROR",
            Self::AuthorNotFound(_) => "AUTHOR_NOT_FOUND",
            Self::Schema(_) => "SCHEMA_ERROR",
        }
    }
}

impl ErrorExtensions for GraphQLError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, e| e.set("code", code))
    }
}

/// Lift store and resolver results into field results with extensions.
pub(crate) trait IntoFieldResult<T> {
    fn into_field_result(self) -> async_graphql::Result<T>;
}

impl<T> IntoFieldResult<T> for Result<T, GraphQLError> {
    fn into_field_result(self) -> async_graphql::Result<T> {
        self.map_err(|e| e.extend())
    }
}

impl<T> IntoFieldResult<T> for Result<T, StoreError> {
    fn into_field_result(self) -> async_graphql::Result<T> {
        self.map_err(|e| GraphQLError::from(e).extend())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            GraphQLError::Store(StoreError::Unavailable("down".into())).code(),
            "STORE_ERROR"
        );
        assert_eq!(
            GraphQLError::AuthorNotFound("a1".into()).code(),
            "AUTHOR_NOT_FOUND"
        );
    }

    #[test]
    fn test_extension_carries_code() {
        let error = GraphQLError::AuthorNotFound("a1".into()).extend();
        assert_eq!(error.message, "author a1 does not exist");

        let extensions = error.extensions.expect("extensions set");
        assert_eq!(
            extensions.get("code"),
            Some(&async_graphql::Value::from("AUTHOR_NOT_FOUND"))
        );
    }
}
