//! HTTP client and end-to-end tests against an in-process backend

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use formguard::controller::Tone;
use formguard::remote::{HttpRegistrationApi, RegistrationApi, SubmissionPayload, SubmitResponse};
use formguard::sync::Marker;
use formguard::{ApiError, Config, FieldId, FormController, FormError};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

async fn validate_username(Json(body): Json<Value>) -> Json<Value> {
    let username = body["username"].as_str().unwrap_or_default();
    Json(json!({ "available": username != "alice" }))
}

async fn submit_form(Json(payload): Json<SubmissionPayload>) -> Response {
    match payload.get("email").map(String::as_str) {
        Some("taken@example.org") => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "message": "Validation failed",
                "errors": [{ "msg": "Email already registered" }, { "msg": "Second error" }]
            })),
        )
            .into_response(),
        Some("plain@example.org") => (
            StatusCode::CONFLICT,
            Json(json!({ "message": "Try again tomorrow" })),
        )
            .into_response(),
        Some("empty@example.org") => (StatusCode::BAD_REQUEST, Json(json!({}))).into_response(),
        Some("broken@example.org") => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
        }
        _ => (
            StatusCode::CREATED,
            Json(json!({
                "message": "Registration successful!",
                "user": { "username": payload.get("username"), "terms": payload.get("terms") }
            })),
        )
            .into_response(),
    }
}

async fn spawn_backend() -> String {
    let app = Router::new()
        .route("/api/validate-username", post(validate_username))
        .route("/api/submit-form", post(submit_form))
        .route(
            "/down/validate-username",
            post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        )
        .route(
            "/slow/validate-username",
            post(|| async {
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!({ "available": true }))
            }),
        );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base: &str, path: &str) -> HttpRegistrationApi {
    HttpRegistrationApi::new(
        format!("{}/{}", base, path),
        Duration::from_millis(300),
        Duration::from_secs(5),
    )
    .unwrap()
}

fn payload(email: &str) -> SubmissionPayload {
    [("username", "ada_99"), ("email", email)]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[tokio::test]
async fn test_username_availability() {
    let base = spawn_backend().await;
    let api = client(&base, "api");

    assert!(api.check_username("bob").await.unwrap());
    assert!(!api.check_username("alice").await.unwrap());
}

#[tokio::test]
async fn test_username_check_failures() {
    let base = spawn_backend().await;

    let down = client(&base, "down");
    assert!(matches!(down.check_username("bob").await, Err(ApiError::Status(503))));

    let slow = client(&base, "slow");
    assert!(matches!(slow.check_username("bob").await, Err(ApiError::Timeout)));
}

#[tokio::test]
async fn test_submission_accepted() {
    let base = spawn_backend().await;
    let api = client(&base, "api");

    match api.submit_form(&payload("ada@example.org")).await.unwrap() {
        SubmitResponse::Accepted { message, user } => {
            assert_eq!(message, "Registration successful!");
            assert_eq!(user["username"], "ada_99");
        }
        other => panic!("unexpected response: {:?}", other),
    }
}

#[tokio::test]
async fn test_refusal_message_precedence() {
    let base = spawn_backend().await;
    let api = client(&base, "api");

    let cases = [
        ("taken@example.org", 400, "Email already registered"),
        ("plain@example.org", 409, "Try again tomorrow"),
        ("empty@example.org", 400, "An unknown error occurred."),
    ];
    for (email, expected_status, expected_message) in cases {
        match api.submit_form(&payload(email)).await.unwrap() {
            SubmitResponse::Refused { status, message } => {
                assert_eq!(status, expected_status);
                assert_eq!(message, expected_message);
            }
            other => panic!("unexpected response for {}: {:?}", email, other),
        }
    }
}

#[tokio::test]
async fn test_unreadable_refusal_is_a_parse_error() {
    let base = spawn_backend().await;
    let api = client(&base, "api");

    let result = api.submit_form(&payload("broken@example.org")).await;
    assert!(matches!(result, Err(ApiError::Parse(_))));
}

#[tokio::test]
async fn test_unreachable_backend() {
    // Nothing listens on the discard port
    let api = HttpRegistrationApi::new(
        "http://127.0.0.1:9/api",
        Duration::from_secs(1),
        Duration::from_secs(1),
    )
    .unwrap();

    let result = api.submit_form(&payload("ada@example.org")).await;
    assert!(matches!(result, Err(ApiError::Http(_)) | Err(ApiError::Timeout)));
}

fn fast_config(base: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = format!("{}/api", base);
    config.remote_check.debounce_ms = 50;
    config
}

fn fill(form: &mut FormController, username: &str, email: &str) {
    form.input(FieldId::Username, username);
    form.input(FieldId::FullName, "Ada Lovelace");
    form.input(FieldId::Email, email);
    form.input(FieldId::Phone, "+15551234567");
    form.input(FieldId::Password, "Analytical1!");
    form.input(FieldId::ConfirmPassword, "Analytical1!");
    form.input(FieldId::Birthdate, "1990-12-10");
    form.input(FieldId::Terms, true);
}

fn form_for(config: &Config) -> FormController {
    let api = HttpRegistrationApi::new(
        &config.api.base_url,
        config.check_timeout(),
        config.submit_timeout(),
    )
    .unwrap();
    FormController::from_config(Arc::new(api), config).unwrap()
}

#[tokio::test]
async fn test_end_to_end_registration() {
    let base = spawn_backend().await;
    let config = fast_config(&base);
    let mut form = form_for(&config);

    fill(&mut form, "ada_99", "ada@example.org");
    assert!(form.submit_enabled());

    let registered = form.submit_and_wait().await.unwrap();
    assert_eq!(registered.user["username"], "ada_99");
    assert_eq!(registered.user["terms"], "on");
    assert_eq!(form.progress_percent(), 0);
    assert_eq!(form.message().unwrap().tone, Tone::Success);
}

#[tokio::test]
async fn test_end_to_end_refusal() {
    let base = spawn_backend().await;
    let config = fast_config(&base);
    let mut form = form_for(&config);

    fill(&mut form, "ada_99", "taken@example.org");
    let err = form.submit_and_wait().await.unwrap_err();
    assert!(matches!(err, FormError::SubmissionRejected(_)));
    assert_eq!(form.message().unwrap().text, "Email already registered");
    assert_eq!(form.progress_percent(), 100);
}

#[tokio::test]
async fn test_end_to_end_taken_username() {
    let base = spawn_backend().await;
    let config = fast_config(&base);
    let mut form = form_for(&config);

    form.input(FieldId::Username, "alice");
    assert!(form.pump().await.is_none());

    let view = form.view(FieldId::Username).unwrap();
    assert_eq!(view.marker, Marker::Invalid);
    assert_eq!(view.error_text, "Username is already taken");
}
