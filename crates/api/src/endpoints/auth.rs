//! `/api/auth/*` - credential exchange

use crate::client::ApiClient;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::{Deserialize, Serialize};
use shared::{EntityId, ErpError, Result};

pub const LOGIN: &str = "/api/auth/login";
pub const FACE_LOGIN: &str = "/api/auth/face/login";
pub const FACE_REGISTER: &str = "/api/auth/face/register";

const INVALID_LOGIN_RESPONSE: &str = "Login failed: Invalid response from server.";

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// A captured face image for the biometric endpoints
#[derive(Debug, Clone)]
pub struct FaceImage {
    pub bytes: Vec<u8>,
    pub file_name: String,
}

impl FaceImage {
    pub fn jpeg(bytes: Vec<u8>) -> Self {
        Self { bytes, file_name: "capture.jpg".to_string() }
    }

    fn into_part(self) -> Result<Part> {
        Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str("image/jpeg")
            .map_err(crate::client::transport)
    }
}

/// Pull the token out of a login response body
fn extract_token(body: &str) -> Result<String> {
    match serde_json::from_str::<LoginResponse>(body) {
        Ok(LoginResponse { token: Some(token) }) if !token.trim().is_empty() => Ok(token),
        _ => Err(ErpError::Validation(INVALID_LOGIN_RESPONSE.to_string())),
    }
}

impl ApiClient {
    /// Exchange email and password for a session token
    pub async fn login(&self, email: &str, password: &str) -> Result<String> {
        let request = self
            .request(Method::POST, LOGIN)
            .json(&LoginRequest { email, password });
        let body = self.send_text(LOGIN, request).await?;
        extract_token(&body)
    }

    /// Exchange a face capture for a session token
    pub async fn face_login(&self, image: FaceImage) -> Result<String> {
        let form = Form::new().part("file", image.into_part()?);
        // A stored token is forwarded when present; the server ignores a stale one
        let request = self
            .authed(Method::POST, FACE_LOGIN)
            .unwrap_or_else(|_| self.request(Method::POST, FACE_LOGIN))
            .multipart(form);
        let body = self.send_text(FACE_LOGIN, request).await?;
        extract_token(&body)
    }

    /// Enroll a face capture for an existing user
    pub async fn face_register(&self, user_id: &EntityId, image: FaceImage) -> Result<String> {
        let form = Form::new()
            .text("userId", user_id.to_string())
            .part("file", image.into_part()?);
        let request = self.authed(Method::POST, FACE_REGISTER)?.multipart(form);
        self.send_text(FACE_REGISTER, request).await
    }
}
