//! ApiClient against an in-process mock server

use api::{ApiClient, ProfileEndpoint, RequestScope};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use shared::{ErpError, ExamType};
use std::time::Duration;

async fn spawn(router: Router) -> ApiClient {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{}", addr)).unwrap()
}

fn bearer(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

async fn me(headers: HeaderMap) -> Result<Json<Value>, (StatusCode, String)> {
    match bearer(&headers).as_deref() {
        Some("abc") => Ok(Json(json!({
            "userId": 7,
            "fullName": "Asha Verma",
            "email": "asha@example.edu",
            "role": "ROLE_STUDENT",
            "rollNumber": "S-101",
            "feePaid": true,
            "unknownField": "ignored"
        }))),
        _ => Err((StatusCode::UNAUTHORIZED, "Token expired".to_string())),
    }
}

fn router() -> Router {
    Router::new()
        .route(
            "/api/auth/login",
            post(|Json(body): Json<Value>| async move {
                if body["password"] == "secret" {
                    (StatusCode::OK, Json(json!({ "token": "abc" })))
                } else {
                    (StatusCode::OK, Json(json!({ "message": "no token here" })))
                }
            }),
        )
        .route("/api/users/me", get(me))
        .route(
            "/api/hostel-staff/rooms",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Room service down") }),
        )
        .route(
            "/api/student/result",
            get(|| async { Json(json!({ "studentName": 42 })) }),
        )
        .route(
            "/api/admin/analytics",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Json(json!({}))
            }),
        )
}

// ============== Auth Tests ==============

#[tokio::test]
async fn test_login_returns_token() {
    let client = spawn(router()).await;
    let token = client.login("asha@example.edu", "secret").await.unwrap();
    assert_eq!(token, "abc");
}

#[tokio::test]
async fn test_login_without_token_in_body() {
    let client = spawn(router()).await;
    let err = client.login("asha@example.edu", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed: Invalid response from server.");
}

// ============== Profile Tests ==============

#[tokio::test]
async fn test_profile_sends_bearer_token() {
    let client = spawn(router()).await.with_token("abc");
    let profile = client.profile(ProfileEndpoint::Me).await.unwrap();
    assert_eq!(profile.full_name, "Asha Verma");
    assert_eq!(profile.user_id.as_str(), "7");
    assert!(profile.has_paid_fees());
}

#[tokio::test]
async fn test_rejected_token_keeps_server_message() {
    let client = spawn(router()).await.with_token("stale");
    let err = client.profile(ProfileEndpoint::Me).await.unwrap_err();
    assert!(err.is_credential_rejection());
    match err {
        ErpError::ApiStatus(status) => {
            assert_eq!(status.status, 401);
            assert_eq!(status.message, "Token expired");
            assert_eq!(status.endpoint, "/api/users/me");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_protected_call_without_token() {
    let client = spawn(router()).await;
    let err = client.profile(ProfileEndpoint::Me).await.unwrap_err();
    assert!(matches!(err, ErpError::NotAuthenticated));
}

// ============== Error Mapping Tests ==============

#[tokio::test]
async fn test_server_error_message_is_verbatim() {
    let client = spawn(router()).await.with_token("abc");
    let err = client.rooms().await.unwrap_err();
    assert_eq!(err.to_string(), "Room service down");
    assert!(!err.is_credential_rejection());
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let client = spawn(router()).await.with_token("abc");
    let err = client.my_result(ExamType::MidTerm).await.unwrap_err();
    assert!(matches!(err, ErpError::Decode { .. }));
}

// ============== Cancellation Tests ==============

#[tokio::test]
async fn test_scope_cancels_inflight_request() {
    let client = spawn(router()).await.with_token("abc");
    let scope = RequestScope::new("analytics");
    let handle = scope.handle();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        handle.cancel();
    });

    let err = scope.run(client.analytics()).await.unwrap_err();
    assert!(matches!(err, ErpError::Cancelled));
}
