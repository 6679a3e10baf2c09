//! Profile resolution over HTTP with a file-backed session

use api::{ApiClient, RequestScope};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::{json, Value};
use session::{FileTokenStorage, ProfileResolver, ResolveState, SessionStore};
use tempfile::TempDir;

fn teacher_token() -> String {
    let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"t@example.edu","roles":["ROLE_TEACHER"]}"#);
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", payload)
}

async fn teacher_profile(headers: HeaderMap) -> Result<Json<Value>, StatusCode> {
    let expected = format!("Bearer {}", teacher_token());
    if headers.get("authorization").and_then(|v| v.to_str().ok()) != Some(expected.as_str()) {
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(Json(json!({
        "userId": "42",
        "fullName": "Meera Iyer",
        "email": "t@example.edu",
        "role": "ROLE_TEACHER",
        "taughtSubjects": [{ "subjectId": 5, "name": "Physics", "code": "PHY" }],
        "taughtClasses": []
    })))
}

async fn spawn() -> ApiClient {
    let router = Router::new()
        .route("/api/users/me/teacher", get(teacher_profile))
        .route("/api/users/me", get(|| async { StatusCode::FORBIDDEN }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    ApiClient::new(format!("http://{}", addr)).unwrap()
}

#[tokio::test]
async fn test_restored_teacher_session_resolves_profile() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("session.json");

    let mut first = SessionStore::restore(FileTokenStorage::new(&path)).unwrap();
    first.login(teacher_token()).unwrap();
    drop(first);

    let mut session = SessionStore::restore(FileTokenStorage::new(&path)).unwrap();
    assert!(session.is_authenticated());

    let resolver = ProfileResolver::new(spawn().await);
    let state = resolver.resolve(&mut session, &RequestScope::new("profile")).await;

    let profile = state.profile().expect("profile should resolve");
    assert_eq!(profile.full_name, "Meera Iyer");
    assert_eq!(profile.taught_subjects.as_ref().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_forbidden_profile_ends_session() {
    let dir = TempDir::new().unwrap();
    let mut session = SessionStore::restore(FileTokenStorage::new(dir.path().join("s.json"))).unwrap();
    let payload = URL_SAFE_NO_PAD.encode(r#"{"roles":["ROLE_STUDENT"]}"#);
    session.login(format!("h.{}.s", payload)).unwrap();

    let resolver = ProfileResolver::new(spawn().await);
    let state = resolver.resolve(&mut session, &RequestScope::new("profile")).await;

    assert!(matches!(state, ResolveState::Failed(_)));
    assert!(!session.is_authenticated());
}
