//! HTTP routes for the GraphQL endpoint.

use std::sync::Arc;

use async_graphql::{BatchRequest, ServerError};
use async_graphql_axum::{GraphQLBatchRequest, GraphQLResponse};
use axum::extract::{FromRequest, Request, State};
use axum::http::{StatusCode, header};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::GraphQLConfig;
use crate::graphiql_html;
use crate::schema_builder::BooklistSchema;

const GRAPHQL_CONTENT_TYPE: &str = "application/graphql";

#[derive(Clone)]
struct GraphQLState {
    schema: BooklistSchema,
    graphiql: Option<Arc<str>>,
}

/// Build the router.
///
/// `POST {endpoint}` executes JSON (single or batch) and
/// `application/graphql` bodies. `GET {endpoint}` executes a `?query=`
/// string, or serves GraphiQL when there is none and it is enabled.
/// `GET {endpoint}/schema` serves the SDL when enabled. Cross-origin
/// requests are allowed from anywhere.
pub fn router(schema: BooklistSchema, config: &GraphQLConfig) -> Router {
    let state = GraphQLState {
        schema,
        graphiql: config
            .enable_graphiql
            .then(|| Arc::from(graphiql_html(&config.endpoint))),
    };

    let mut router = Router::new().route(&config.endpoint, get(graphql_get).post(graphql_post));
    if config.enable_sdl {
        router = router.route(&config.sdl_endpoint(), get(sdl_handler));
    }

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    router
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn graphql_get(State(state): State<GraphQLState>, request: Request) -> Response {
    if !has_query_param(&request)
        && let Some(page) = &state.graphiql
    {
        return Html(page.to_string()).into_response();
    }
    execute(&state, request).await
}

async fn graphql_post(State(state): State<GraphQLState>, request: Request) -> Response {
    execute(&state, request).await
}

async fn execute(state: &GraphQLState, request: Request) -> Response {
    match extract(state, request).await {
        Ok(batch) => GraphQLResponse::from(state.schema.execute_batch(batch).await).into_response(),
        Err(message) => bad_request(message),
    }
}

/// Decode the operation(s) carried by `request`. `application/graphql`
/// bodies are the raw document; everything else goes through the standard
/// GraphQL-over-HTTP decoding (query string, JSON, multipart).
async fn extract(state: &GraphQLState, request: Request) -> Result<BatchRequest, String> {
    if is_graphql_body(&request) {
        let query = String::from_request(request, state)
            .await
            .map_err(|rejection| rejection.body_text())?;
        return Ok(BatchRequest::Single(async_graphql::Request::new(query)));
    }

    <GraphQLBatchRequest as FromRequest<GraphQLState>>::from_request(request, state)
        .await
        .map(GraphQLBatchRequest::into_inner)
        .map_err(|rejection| rejection.0.to_string())
}

/// Decoding failures are reported as a GraphQL error body.
fn bad_request(message: String) -> Response {
    let body = async_graphql::Response::from_errors(vec![ServerError::new(message, None)]);
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

fn has_query_param(request: &Request) -> bool {
    request
        .uri()
        .query()
        .is_some_and(|query| query.split('&').any(|pair| pair.starts_with("query=")))
}

fn is_graphql_body(request: &Request) -> bool {
    request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| mime.trim().eq_ignore_ascii_case(GRAPHQL_CONTENT_TYPE))
}

async fn sdl_handler(State(state): State<GraphQLState>) -> String {
    state.schema.sdl()
}
