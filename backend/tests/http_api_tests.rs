//! HTTP API tests.
//! Drive the full router (routing, extraction, error mapping) against the
//! in-memory repository.
#![cfg(feature = "http-server")]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use users_service::db::repositories::LocalRepository;
use users_service::db::UserRepository;
use users_service::http::{create_router, AppState};

fn test_app() -> (Router, LocalRepository) {
    let repo = LocalRepository::new();
    let shared = Arc::new(repo.clone()) as Arc<dyn UserRepository>;
    (create_router(AppState::new(shared)), repo)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, location, body)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

async fn with_json(
    app: &Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Option<String>, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let (status, _, body) = send(app, request).await;
    (status, body)
}

async fn create(app: &Router, body: Value) -> Value {
    let (status, _, created) = with_json(app, "POST", "/api/User", body).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

async fn seed(app: &Router, n: usize) {
    for i in 0..n {
        create(app, json!({ "firstName": format!("U{}", i), "state": "TX" })).await;
    }
}

#[tokio::test]
async fn test_health_reports_database_status() {
    let (app, repo) = test_app();

    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "connected");

    repo.set_healthy(false);
    let (_, body) = get(&app, "/health").await;
    assert_eq!(body["database"], "disconnected");
}

#[tokio::test]
async fn test_create_ignores_client_id_and_timestamp() {
    let (app, _) = test_app();
    let before = chrono::Utc::now();

    let (status, location, body) = with_json(
        &app,
        "POST",
        "/api/User",
        json!({
            "id": 999,
            "createdAt": "1999-01-01T00:00:00Z",
            "firstName": "Ada",
            "email": "ada@example.com",
            "latitude": 37.5
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["id"], 1);
    assert_eq!(location.as_deref(), Some("/api/User/1"));
    assert_eq!(body["firstName"], "Ada");
    assert_eq!(body["latitude"], 37.5);

    let created_at: chrono::DateTime<chrono::Utc> =
        body["createdAt"].as_str().unwrap().parse().unwrap();
    assert!(created_at >= before);
}

#[tokio::test]
async fn test_mistyped_body_is_bad_request() {
    let (app, repo) = test_app();

    for body in [json!({ "age": "abc" }), json!({ "age": 36.5 }), json!([1, 2])] {
        let (status, _, error) = with_json(&app, "POST", "/api/User", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error["code"], "BAD_REQUEST");
        assert_eq!(error["message"], "Invalid request body");
    }
    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn test_unreadable_update_body_is_bad_request() {
    let (app, _) = test_app();
    create(&app, json!({ "firstName": "Ada" })).await;

    let request = Request::builder()
        .method("PUT")
        .uri("/api/User/1")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"firstName\": "))
        .unwrap();
    let (status, _, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "BAD_REQUEST");

    let request = Request::builder()
        .method("POST")
        .uri("/api/User")
        .body(Body::from("{}"))
        .unwrap();
    let (status, _, error) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["code"], "BAD_REQUEST");

    let (_, stored) = get(&app, "/api/User/1").await;
    assert_eq!(stored["firstName"], "Ada");
}

#[tokio::test]
async fn test_get_by_id() {
    let (app, _) = test_app();
    let created = create(&app, json!({ "email": "g@example.com" })).await;

    let (status, body) = get(&app, "/api/User/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, body) = get(&app, "/api/User/77").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with ID 77 not found");
}

#[tokio::test]
async fn test_list_defaults_and_metadata() {
    let (app, _) = test_app();
    seed(&app, 25).await;

    let (status, body) = get(&app, "/api/User").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);
    assert_eq!(body["data"][0]["id"], 1);
    assert_eq!(
        body["pagination"],
        json!({
            "currentPage": 1,
            "pageSize": 10,
            "totalUsers": 25,
            "totalPages": 3,
            "hasNext": true,
            "hasPrevious": false
        })
    );

    let (_, body) = get(&app, "/api/User/?page=3&pageSize=10").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["data"][0]["id"], 21);
    assert_eq!(body["pagination"]["hasNext"], false);
    assert_eq!(body["pagination"]["hasPrevious"], true);
}

#[tokio::test]
async fn test_list_clamps_out_of_range_parameters() {
    let (app, _) = test_app();
    seed(&app, 3).await;

    let (_, body) = get(&app, "/api/User?page=0&pageSize=0").await;
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["pageSize"], 10);

    let (_, body) = get(&app, "/api/User?page=-4&pageSize=1000").await;
    assert_eq!(body["pagination"]["currentPage"], 1);
    assert_eq!(body["pagination"]["pageSize"], 100);
    assert_eq!(body["pagination"]["totalPages"], 1);
}

#[tokio::test]
async fn test_list_of_empty_table() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/api/User").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["hasNext"], false);
}

#[tokio::test]
async fn test_update_overwrites_everything_but_identity() {
    let (app, _) = test_app();
    let created = create(
        &app,
        json!({ "firstName": "Ada", "email": "ada@example.com", "state": "CA" }),
    )
    .await;

    let (status, _, body) = with_json(
        &app,
        "PUT",
        "/api/User/1",
        json!({ "id": 50, "city": "Fresno", "createdAt": "2000-01-01T00:00:00Z" }),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, stored) = get(&app, "/api/User/1").await;
    assert_eq!(stored["id"], 1);
    assert_eq!(stored["createdAt"], created["createdAt"]);
    assert_eq!(stored["city"], "Fresno");
    assert_eq!(stored["firstName"], Value::Null);
    assert_eq!(stored["email"], Value::Null);
    assert_eq!(stored["state"], Value::Null);
}

#[tokio::test]
async fn test_update_missing_user_is_404_without_insert() {
    let (app, repo) = test_app();

    let (status, _, body) = with_json(&app, "PUT", "/api/User/9", json!({ "state": "CA" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(repo.user_count(), 0);
}

#[tokio::test]
async fn test_delete_returns_deleted_record() {
    let (app, _) = test_app();
    let created = create(&app, json!({ "firstName": "Temp" })).await;

    let (status, body) = delete(&app, "/api/User/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, created);

    let (status, _) = delete(&app, "/api/User/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, "/api/User/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_by_email() {
    let (app, _) = test_app();
    create(&app, json!({ "firstName": "First", "email": "dup@example.com" })).await;
    create(&app, json!({ "firstName": "Second", "email": "dup@example.com" })).await;

    let (status, body) = get(&app, "/api/User/search?email=dup@example.com").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["firstName"], "First");

    let (status, body) = get(&app, "/api/User/search?email=none@example.com").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "User with email none@example.com not found");
}

#[tokio::test]
async fn test_search_without_email_is_bad_request() {
    let (app, _) = test_app();

    for uri in ["/api/User/search", "/api/User/search?email="] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["message"], "Email parameter is required");
    }
}

#[tokio::test]
async fn test_by_state_with_no_matches_is_empty_list() {
    let (app, _) = test_app();
    seed(&app, 2).await;

    let (status, body) = get(&app, "/api/User/by-state/ZZ").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_state_lifecycle() {
    let (app, _) = test_app();
    seed(&app, 2).await;
    let created = create(&app, json!({ "firstName": "Cali", "state": "CA" })).await;
    let id = created["id"].as_i64().unwrap();

    let (_, body) = get(&app, "/api/User/by-state/CA").await;
    assert_eq!(body, json!([created]));

    let (status, body) = get(&app, "/api/User/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "totalUsers": 3 }));

    let (status, _) = delete(&app, &format!("/api/User/{}", id)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = get(&app, "/api/User/by-state/CA").await;
    assert_eq!(body, json!([]));
    let (_, body) = get(&app, "/api/User/count").await;
    assert_eq!(body["totalUsers"], 2);
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let (app, repo) = test_app();
    repo.set_healthy(false);

    let (status, body) = get(&app, "/api/User/count").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["code"], "REPOSITORY_ERROR");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn test_non_integer_id_is_rejected() {
    let (app, _) = test_app();

    let (status, _) = get(&app, "/api/User/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = test_app();

    let (status, body) = get(&app, "/swagger/v1/swagger.json").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/User/{id}"].is_object());
}
