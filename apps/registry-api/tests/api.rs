//! HTTP-level tests driving the router without a socket.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use registry_api::{router, AppState};
use registry_db::{Database, DbConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn app() -> (Router, Database) {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    db.statuses().seed_status_table().await.unwrap();
    (router(Arc::new(AppState::new(db.clone()))), db)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

fn ana_lee() -> Value {
    json!({
        "first_name": "Ana",
        "last_name": "Lee",
        "email": "ana@x.com",
        "date_of_birth": "1999-01-01",
        "status_code": "active"
    })
}

fn student(i: usize) -> Value {
    json!({
        "first_name": format!("First{i}"),
        "last_name": format!("Last{i}"),
        "email": format!("student{i}@x.com"),
        "date_of_birth": "2001-05-17",
        "status_code": "active"
    })
}

#[tokio::test]
async fn create_read_and_reject_duplicate_email() {
    let (app, _db) = app().await;

    let (status, created) = send(&app, Method::POST, "/create_user/", Some(ana_lee())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["id"], 1);
    assert_eq!(created["first_name"], "Ana");
    assert_eq!(created["last_name"], "Lee");
    assert_eq!(created["email"], "ana@x.com");
    assert_eq!(created["date_of_birth"], "1999-01-01");
    assert_eq!(created["status_code"], "active");
    assert!(created["created_at"].is_string());
    assert!(created["updated_at"].is_string());

    let (status, fetched) = send(&app, Method::GET, "/read_user/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, conflict) = send(&app, Method::POST, "/create_user/", Some(ana_lee())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(conflict["field"], "email");
    assert!(conflict["detail"].is_string());
}

#[tokio::test]
async fn email_is_normalized_before_uniqueness_check() {
    let (app, _db) = app().await;
    send(&app, Method::POST, "/create_user/", Some(ana_lee())).await;

    let mut shouted = ana_lee();
    shouted["email"] = json!("  ANA@X.COM ");
    let (status, body) = send(&app, Method::POST, "/create_user/", Some(shouted)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "email");
}

#[tokio::test]
async fn invalid_body_lists_every_violation() {
    let (app, db) = app().await;

    let body = json!({
        "first_name": "Ana",
        "last_name": "Lee",
        "email": "not-an-email",
        "date_of_birth": "31/12/1999",
        "status_code": "Active!"
    });
    let (status, response) = send(&app, Method::POST, "/create_user/", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response["detail"], "Validation failed");

    let errors = response["errors"].as_array().unwrap();
    let mut fields: Vec<&str> = errors.iter().map(|e| e["field"].as_str().unwrap()).collect();
    fields.sort();
    assert_eq!(fields, vec!["date_of_birth", "email", "status_code"]);
    assert!(errors.iter().all(|e| e["kind"] == "invalid_format"));

    assert_eq!(db.students().count().await.unwrap(), 0);
}

#[tokio::test]
async fn missing_and_mistyped_fields() {
    let (app, _db) = app().await;

    let body = json!({ "first_name": 42, "email": "ana@x.com" });
    let (status, response) = send(&app, Method::POST, "/create_user/", Some(body)).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = response["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 4);
    assert!(errors
        .iter()
        .any(|e| e["field"] == "first_name" && e["kind"] == "type_mismatch"));
    assert!(errors
        .iter()
        .any(|e| e["field"] == "last_name" && e["kind"] == "missing"));
}

#[tokio::test]
async fn malformed_json_is_a_validation_error() {
    let (app, _db) = app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/create_user/")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["errors"][0]["field"], "body");
}

#[tokio::test]
async fn unknown_status_is_a_conflict() {
    let (app, _db) = app().await;

    let mut body = ana_lee();
    body["status_code"] = json!("on_vacation");
    let (status, response) = send(&app, Method::POST, "/create_user/", Some(body)).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(response["field"], "status_code");
}

#[tokio::test]
async fn list_returns_every_created_student() {
    let (app, _db) = app().await;

    let (status, empty) = send(&app, Method::GET, "/read_users/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty, json!([]));

    for i in 0..4 {
        let (status, _) = send(&app, Method::POST, "/create_user/", Some(student(i))).await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, list) = send(&app, Method::GET, "/read_users/", None).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 4);

    for entry in list {
        let uri = format!("/read_user/{}", entry["id"]);
        let (status, fetched) = send(&app, Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(&fetched, entry);
    }
}

#[tokio::test]
async fn delete_then_not_found() {
    let (app, _db) = app().await;
    send(&app, Method::POST, "/create_user/", Some(ana_lee())).await;

    let (status, body) = send(&app, Method::DELETE, "/user_delete/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "User deleted" }));

    for _ in 0..2 {
        let (status, body) = send(&app, Method::DELETE, "/user_delete/1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "detail": "User not found" }));
    }

    let (status, body) = send(&app, Method::GET, "/read_user/1", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "User not found");
}

#[tokio::test]
async fn non_numeric_id_is_rejected() {
    let (app, _db) = app().await;

    let (status, body) = send(&app, Method::GET, "/read_user/abc", None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["errors"][0]["field"], "id");
    assert_eq!(body["errors"][0]["kind"], "type_mismatch");
}

#[tokio::test]
async fn full_view_includes_status_and_extra_info() {
    let (app, _db) = app().await;
    send(&app, Method::POST, "/create_user/", Some(ana_lee())).await;

    let (status, info) = send(
        &app,
        Method::POST,
        "/create_extra_info/",
        Some(json!({ "student_id": 1, "info_type": "address", "info_value": "Main st. 1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(info["student_id"], 1);

    let (status, full) = send(&app, Method::GET, "/read_user_full/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(full["email"], "ana@x.com");
    assert_eq!(full["status"]["status_code"], "active");
    assert_eq!(full["extra_info"].as_array().unwrap().len(), 1);
    assert_eq!(full["extra_info"][0]["info_type"], "address");

    let (status, _) = send(&app, Method::GET, "/read_user_full/2", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn extra_info_for_missing_student_is_a_conflict() {
    let (app, _db) = app().await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/create_extra_info/",
        Some(json!({ "student_id": 99, "info_type": "address", "info_value": "Nowhere" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], "student_id");
}

#[tokio::test]
async fn statuses_and_health() {
    let (app, db) = app().await;

    let (status, statuses) = send(&app, Method::GET, "/read_statuses/", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(statuses.as_array().unwrap().len(), 8);
    assert_eq!(statuses[0]["status_code"], "active");

    let (status, body) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("OK"));

    db.close().await;

    let (status, _) = send(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn storage_fault_hides_detail_behind_correlation_id() {
    let (app, db) = app().await;
    db.close().await;

    let (status, body) = send(&app, Method::GET, "/read_users/", None).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "Internal server error");
    let correlation_id = body["correlation_id"].as_str().unwrap();
    assert_eq!(correlation_id.len(), 36);
}
