//! HTTP tests for the gateway routes over the in-memory user service.

use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;

fn app() -> Router {
    create_router(AppState::new(user_service_lib::in_memory()))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

fn registration(email: &str, password: &str, confirm: &str) -> Value {
    json!({
        "firstName": "Ada",
        "lastName": "Lovelace",
        "email": email,
        "password": password,
        "confirmPassword": confirm,
    })
}

async fn register(app: &Router, email: &str) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/register",
        Some(registration(email, "password123", "password123")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn field_codes(body: &Value) -> Vec<(String, String)> {
    body["error"]["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| {
            (
                f["field"].as_str().unwrap().to_string(),
                f["code"].as_str().unwrap().to_string(),
            )
        })
        .collect()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_check() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn test_openapi_document_lists_schemas() {
    let (status, body) = send(&app(), Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(status, StatusCode::OK);
    let schemas = &body["components"]["schemas"];
    assert_eq!(
        schemas["FieldError"]["properties"]["code"]["example"],
        "EMAIL-NOT-PRESENT"
    );
    assert!(schemas.get("UserResponse").is_some());
    assert!(body["paths"].get("/auth/login").is_some());
    assert!(body["paths"].get("/users/{id}").is_some());
}

// =============================================================================
// Registration
// =============================================================================

#[tokio::test]
async fn test_register_returns_user_without_password() {
    let app = app();
    let body = register(&app, "ada@example.com").await;

    assert_eq!(body["email"], "ada@example.com");
    assert_eq!(body["firstName"], "Ada");
    assert!(body.get("password").is_none());
    assert!(body.get("passwordHash").is_none());
}

#[tokio::test]
async fn test_register_password_mismatch() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/auth/register",
        Some(registration("ada@example.com", "password123", "password456")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(
        field_codes(&body),
        vec![("confirmPassword".to_string(), "PW-MISMATCH".to_string())]
    );
    assert_eq!(body["error"]["fields"][0]["message"], "Passwords must match");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = app();
    register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/register",
        Some(registration("ada@example.com", "password123", "password123")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_codes(&body),
        vec![("email".to_string(), "EMAIL-PRESENT".to_string())]
    );
}

#[tokio::test]
async fn test_register_binding_errors() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/auth/register",
        Some(registration("not-an-email", "short", "other")),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let codes = field_codes(&body);
    assert!(codes.contains(&("email".to_string(), "email".to_string())));
    assert!(codes.contains(&("password".to_string(), "length".to_string())));
    // Binding errors are reported before the mismatch check runs
    assert!(!codes.iter().any(|(_, code)| code == "PW-MISMATCH"));
}

#[tokio::test]
async fn test_register_malformed_json() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/auth/register")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_success() {
    let app = app();
    let registered = register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "logEmail": "ada@example.com", "logPassword": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], registered["id"]);
}

#[tokio::test]
async fn test_login_unknown_email() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/auth/login",
        Some(json!({ "logEmail": "nobody@example.com", "logPassword": "password123" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_codes(&body),
        vec![("logEmail".to_string(), "EMAIL-NOT-PRESENT".to_string())]
    );
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = app();
    register(&app, "ada@example.com").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "logEmail": "ada@example.com", "logPassword": "wrongpass" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_codes(&body),
        vec![("logPassword".to_string(), "INVALID-LOGIN-PW".to_string())]
    );
}

#[tokio::test]
async fn test_login_binding_errors() {
    let (status, body) = send(
        &app(),
        Method::POST,
        "/auth/login",
        Some(json!({ "logEmail": "nope", "logPassword": "" })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_codes(&body),
        vec![
            ("logEmail".to_string(), "email".to_string()),
            ("logPassword".to_string(), "length".to_string()),
        ]
    );
}

// =============================================================================
// Users
// =============================================================================

#[tokio::test]
async fn test_list_users_hides_password_hash() {
    let app = app();
    register(&app, "ada@example.com").await;
    register(&app, "grace@example.com").await;

    let (status, body) = send(&app, Method::GET, "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    let users = body.as_array().unwrap();
    assert_eq!(users.len(), 2);
    assert!(users.iter().all(|u| u.get("passwordHash").is_none()));
}

#[tokio::test]
async fn test_get_user() {
    let app = app();
    let registered = register(&app, "ada@example.com").await;
    let id = registered["id"].as_str().unwrap();

    let (status, body) = send(&app, Method::GET, &format!("/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, registered);
}

#[tokio::test]
async fn test_get_unknown_user() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let (status, body) = send(&app(), Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_head_user_reports_existence() {
    let app = app();
    let registered = register(&app, "ada@example.com").await;
    let known = format!("/users/{}", registered["id"].as_str().unwrap());
    let unknown = format!("/users/{}", Uuid::new_v4());

    let (status, _) = send(&app, Method::HEAD, &known, None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, Method::HEAD, &unknown, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user() {
    let app = app();
    let registered = register(&app, "ada@example.com").await;
    let uri = format!("/users/{}", registered["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "lastName": "Byron" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["lastName"], "Byron");
    assert_eq!(body["firstName"], "Ada");

    // Password is untouched, so the account can still log in
    let (status, _) = send(
        &app,
        Method::POST,
        "/auth/login",
        Some(json!({ "logEmail": "ada@example.com", "logPassword": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_update_unknown_user() {
    let uri = format!("/users/{}", Uuid::new_v4());
    let (status, _) = send(&app(), Method::PUT, &uri, Some(json!({ "lastName": "Byron" }))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_user_binding_errors() {
    let app = app();
    let registered = register(&app, "ada@example.com").await;
    let uri = format!("/users/{}", registered["id"].as_str().unwrap());

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "email": "nope" }))).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        field_codes(&body),
        vec![("email".to_string(), "email".to_string())]
    );
}

#[tokio::test]
async fn test_update_user_to_taken_email() {
    let app = app();
    register(&app, "ada@example.com").await;
    let grace = register(&app, "grace@example.com").await;
    let uri = format!("/users/{}", grace["id"].as_str().unwrap());

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "email": "ada@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"]["code"], "CONFLICT");
}
