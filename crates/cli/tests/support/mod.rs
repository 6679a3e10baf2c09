//! In-process ERP backend that answers from a table and records every request

#![allow(dead_code)]

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use cli::Context;
use portal::{MemoryTokenStorage, Portal};
use serde_json::{json, Value};
use shared::ErpConfig;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// One request as the backend saw it
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: Method,
    pub path: String,
    pub query: Option<String>,
    /// JSON body, the raw text for other bodies, `Null` when empty
    pub body: Value,
}

#[derive(Debug, Clone)]
pub enum Reply {
    Json(Value),
    Text(&'static str),
    Bytes(&'static [u8]),
}

#[derive(Clone, Default)]
struct Shared {
    replies: Arc<HashMap<(Method, String), Reply>>,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

pub struct Backend {
    pub base: String,
    seen: Arc<Mutex<Vec<Recorded>>>,
}

impl Backend {
    /// Every request received, in order
    pub fn requests(&self) -> Vec<Recorded> {
        self.seen.lock().unwrap().clone()
    }

    /// Requests with the given method and path
    pub fn sent(&self, method: Method, path: &str) -> Vec<Recorded> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .collect()
    }

    /// The single request with the given method and path
    pub fn only(&self, method: Method, path: &str) -> Recorded {
        let mut sent = self.sent(method.clone(), path);
        assert_eq!(sent.len(), 1, "expected one {} {}, saw {:?}", method, path, self.requests());
        sent.remove(0)
    }
}

pub fn jwt(role: &str) -> String {
    let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user@example.edu","roles":["{}"]}}"#, role));
    format!("eyJhbGciOiJIUzI1NiJ9.{}.c2ln", payload)
}

/// Login and profile replies for a user holding `role`
pub fn account(role: &str, profile: Value) -> Vec<(Method, &'static str, Reply)> {
    let profile_path = if role == "ROLE_TEACHER" { "/api/users/me/teacher" } else { "/api/users/me" };
    vec![
        (Method::POST, "/api/auth/login", Reply::Json(json!({ "token": jwt(role) }))),
        (Method::GET, profile_path, Reply::Json(profile)),
    ]
}

async fn answer(State(shared): State<Shared>, method: Method, uri: Uri, body: Bytes) -> Response {
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&body).into_owned()))
    };
    let path = uri.path().to_string();
    shared.seen.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        body,
    });

    match shared.replies.get(&(method, path)) {
        Some(Reply::Json(value)) => Json(value.clone()).into_response(),
        Some(Reply::Text(text)) => (*text).into_response(),
        Some(Reply::Bytes(bytes)) => (*bytes).into_response(),
        None => (StatusCode::NOT_FOUND, "Not found").into_response(),
    }
}

pub async fn serve(replies: Vec<(Method, &'static str, Reply)>) -> Backend {
    let replies: HashMap<(Method, String), Reply> = replies
        .into_iter()
        .map(|(method, path, reply)| ((method, path.to_string()), reply))
        .collect();
    let shared = Shared { replies: Arc::new(replies), seen: Arc::default() };
    let seen = shared.seen.clone();
    let router = Router::new().fallback(answer).with_state(shared);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    Backend { base: format!("http://{}", addr), seen }
}

pub fn anonymous(backend: &Backend) -> Context {
    let config = ErpConfig::default().with_api_base_url(&backend.base);
    Context::new(Portal::new(&config, MemoryTokenStorage::new()).unwrap(), true)
}

pub async fn signed_in(backend: &Backend) -> Context {
    let mut ctx = anonymous(backend);
    ctx.portal.login("user@example.edu", "secret").await.unwrap();
    ctx
}
