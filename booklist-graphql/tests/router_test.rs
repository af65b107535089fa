//! HTTP behavior of the GraphQL routes

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use booklist_graphql::*;
use booklist_store::SurrealStore;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

async fn app(config: GraphQLConfig) -> Router {
    let schema = SchemaBuilder::new()
        .store(Arc::new(SurrealStore::memory().await.unwrap()))
        .config(config.clone())
        .build()
        .unwrap();
    router(schema, &config)
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn graphql_post(path: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

#[tokio::test]
async fn test_post_executes_mutation_then_query() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .clone()
        .oneshot(graphql_post(
            "/graphql",
            json!({
                "query": "mutation Add($name: String!) { addAuthor(name: $name, age: 40) { id name } }",
                "variables": {"name": "Jane"},
                "operationName": "Add"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created: Value = serde_json::from_str(&body_string(response).await).unwrap();
    let id = created["data"]["addAuthor"]["id"].as_str().unwrap().to_string();
    assert_eq!(created["data"]["addAuthor"]["name"], "Jane");

    let response = app
        .oneshot(graphql_post(
            "/graphql",
            json!({"query": format!(r#"{{ author(id: "{id}") {{ name age }} }}"#)}),
        ))
        .await
        .unwrap();
    let fetched: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(fetched["data"]["author"], json!({"name": "Jane", "age": 40}));
}

#[tokio::test]
async fn test_validation_errors_are_reported_in_body() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(graphql_post(
            "/graphql",
            json!({"query": "mutation { addAuthor { id } }"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!body["errors"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_get_serves_graphiql() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap().to_string();
    assert!(content_type.starts_with("text/html"));
    assert!(body_string(response).await.contains("/graphql"));
}

#[tokio::test]
async fn test_get_executes_query_string() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(
            Request::get("/graphql?query=%7B%20books%20%7B%20name%20%7D%20%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body, json!({"data": {"books": []}}));
}

#[tokio::test]
async fn test_get_without_graphiql_requires_query() {
    let app = app(GraphQLConfig::default().with_graphiql(false)).await;

    let response = app
        .clone()
        .oneshot(Request::get("/graphql").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert!(!body["errors"].as_array().unwrap().is_empty());

    let response = app
        .oneshot(
            Request::get("/graphql?query=%7B%20authors%20%7B%20id%20%7D%20%7D")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["data"]["authors"], json!([]));
}

#[tokio::test]
async fn test_post_graphql_content_type() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/graphql")
                .body(Body::from(r#"mutation { addAuthor(name: "Jane") { name } }"#))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["data"]["addAuthor"], json!({"name": "Jane"}));
}

#[tokio::test]
async fn test_post_batch() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(graphql_post(
            "/graphql",
            json!([
                {"query": "{ books { id } }"},
                {"query": "{ authors { id } }"}
            ]),
        ))
        .await
        .unwrap();

    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(
        body,
        json!([{"data": {"books": []}}, {"data": {"authors": []}}])
    );
}

#[tokio::test]
async fn test_malformed_json_is_a_graphql_error() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{ not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["errors"].as_array().unwrap().len(), 1);
    assert!(body["errors"][0]["message"].is_string());
}

#[tokio::test]
async fn test_sdl_route() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .clone()
        .oneshot(Request::get("/graphql/schema").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_string(response).await.contains("addBook"));

    let without_sdl = self::app(GraphQLConfig::default().with_sdl(false)).await;
    let response = without_sdl
        .oneshot(Request::get("/graphql/schema").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let app = app(GraphQLConfig::default()).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/graphql")
                .header(header::ORIGIN, "http://localhost:3000")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}

#[tokio::test]
async fn test_custom_endpoint() {
    let app = app(GraphQLConfig::new("/api/graphql")).await;

    let response = app
        .clone()
        .oneshot(graphql_post("/api/graphql", json!({"query": "{ books { id } }"})))
        .await
        .unwrap();
    let body: Value = serde_json::from_str(&body_string(response).await).unwrap();
    assert_eq!(body["data"]["books"], json!([]));

    let response = app
        .oneshot(graphql_post("/graphql", json!({"query": "{ books { id } }"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
