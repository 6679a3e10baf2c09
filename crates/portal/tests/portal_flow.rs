//! Portal lifecycle against an in-process ERP backend

use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use portal::{FileTokenStorage, MemoryTokenStorage, Portal, ResolveState, RouteDecision, SessionState};
use serde_json::{json, Value};
use shared::{ErpConfig, FailurePolicy};
use tempfile::TempDir;

fn teacher_jwt() -> String {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"meera@example.edu","roles":["ROLE_TEACHER"]}"#);
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", payload)
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

async fn login(Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    match body["email"].as_str() {
        Some("plain@example.edu") => (StatusCode::OK, Json(json!({ "token": "abc" }))),
        Some("meera@example.edu") => (StatusCode::OK, Json(json!({ "token": teacher_jwt() }))),
        Some("empty@example.edu") => (StatusCode::OK, Json(json!({}))),
        _ => (StatusCode::UNAUTHORIZED, Json(json!("Bad credentials"))),
    }
}

async fn teacher_profile(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    if bearer(&headers) != Some(teacher_jwt().as_str()) {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(Json(json!({
        "userId": 12,
        "fullName": "Meera Iyer",
        "email": "meera@example.edu",
        "role": "ROLE_TEACHER",
        "taughtClasses": [{ "classId": 3, "gradeLevel": "BSc CS Year 2", "section": "B" }],
        "taughtSubjects": [{ "subjectId": 9, "name": "Operating Systems", "code": "CS204" }]
    })))
}

async fn backend(unavailable_profile: bool) -> String {
    let mut router = Router::new().route("/api/auth/login", post(login));
    router = if unavailable_profile {
        router.route(
            "/api/users/me/teacher",
            get(|| async { (StatusCode::SERVICE_UNAVAILABLE, "Maintenance") }),
        )
    } else {
        router.route("/api/users/me/teacher", get(teacher_profile))
    };

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn config(base_url: &str) -> ErpConfig {
    ErpConfig::default().with_api_base_url(base_url)
}

// ============== Login Flow ==============

#[tokio::test]
async fn test_login_then_public_route_redirects() {
    let base = backend(false).await;
    let mut portal = Portal::new(&config(&base), MemoryTokenStorage::new()).unwrap();
    assert_eq!(portal.state(), SessionState::Anonymous);

    portal.login("plain@example.edu", "secret").await.unwrap();

    assert_eq!(portal.state(), SessionState::Authenticated);
    assert_eq!(portal.token(), Some("abc"));
    assert_eq!(portal.open("/login").redirect_target(), Some("/profile"));
}

#[tokio::test]
async fn test_login_without_token_stays_anonymous() {
    let base = backend(false).await;
    let mut portal = Portal::new(&config(&base), MemoryTokenStorage::new()).unwrap();

    let err = portal.login("empty@example.edu", "secret").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed: Invalid response from server.");
    assert_eq!(portal.state(), SessionState::Anonymous);
}

#[tokio::test]
async fn test_rejected_login_shows_server_message() {
    let base = backend(false).await;
    let mut portal = Portal::new(&config(&base), MemoryTokenStorage::new()).unwrap();

    let err = portal.login("nobody@example.edu", "wrong").await.unwrap_err();
    assert_eq!(err.to_string(), "\"Bad credentials\"");
    assert_eq!(portal.audit_stats().denial_count, 1);
}

// ============== Profile & Navigation ==============

#[tokio::test]
async fn test_teacher_profile_navigation_and_routes() {
    let base = backend(false).await;
    let mut portal = Portal::new(&config(&base), MemoryTokenStorage::new()).unwrap();
    portal.login("meera@example.edu", "secret").await.unwrap();

    let state = portal.load_profile().await;
    assert_eq!(state.profile().map(|p| p.full_name.as_str()), Some("Meera Iyer"));

    let labels: Vec<_> = portal.navigation().iter().map(|e| e.label).collect();
    assert_eq!(labels, vec!["Profile", "My Courses", "Time Table", "Upload Marks", "Risk Dashboard"]);

    assert!(portal.open("/take-attendance/31/3").is_render());
    assert!(matches!(portal.open("/fee-payment"), RouteDecision::Forbidden(_)));
}

#[tokio::test]
async fn test_session_survives_restart() {
    let base = backend(false).await;
    let dir = TempDir::new().unwrap();
    let token_file = dir.path().join("session.json");

    {
        let mut portal = Portal::new(&config(&base), FileTokenStorage::new(&token_file)).unwrap();
        portal.login("meera@example.edu", "secret").await.unwrap();
    }

    let mut portal = Portal::from_config(&config(&base).with_token_file(&token_file)).unwrap();
    assert_eq!(portal.state(), SessionState::Authenticated);
    assert!(matches!(portal.load_profile().await, ResolveState::Ready(_)));
}

// ============== Failure Policy ==============

#[tokio::test]
async fn test_server_outage_keeps_session_by_default() {
    let base = backend(true).await;
    let mut portal = Portal::new(&config(&base), MemoryTokenStorage::new()).unwrap();
    portal.login("meera@example.edu", "secret").await.unwrap();

    let state = portal.load_profile().await;
    assert_eq!(state, ResolveState::Failed("Maintenance".to_string()));
    assert_eq!(portal.state(), SessionState::Authenticated);
}

#[tokio::test]
async fn test_server_outage_logs_out_under_strict_policy() {
    let base = backend(true).await;
    let mut config = config(&base);
    config.failure_policy = FailurePolicy::InvalidateOnAnyFailure;
    let mut portal = Portal::new(&config, MemoryTokenStorage::new()).unwrap();
    portal.login("meera@example.edu", "secret").await.unwrap();

    portal.load_profile().await;
    assert_eq!(portal.state(), SessionState::Anonymous);
    assert_eq!(portal.open("/profile").redirect_target(), Some("/"));
}
