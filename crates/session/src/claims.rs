//! Token claims
//!
//! The session token is a JWT. The client never verifies the signature; it
//! only reads the payload to decide which profile endpoint to call.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use shared::{InvalidTokenError, Role};

#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Claims {
    /// Subject, normally the user's email
    #[serde(default)]
    pub sub: Option<String>,

    /// Granted roles; the server sends either one string or a list
    #[serde(default, deserialize_with = "one_or_many")]
    pub roles: Vec<String>,

    /// Expiry as seconds since the epoch
    #[serde(default)]
    pub exp: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

fn one_or_many<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Option::<OneOrMany>::deserialize(deserializer)? {
        Some(OneOrMany::One(role)) => vec![role],
        Some(OneOrMany::Many(roles)) => roles,
        None => Vec::new(),
    })
}

impl Claims {
    /// Read the payload segment of `token`
    pub fn decode(token: &str) -> Result<Self, InvalidTokenError> {
        let segments: Vec<&str> = token.trim().split('.').collect();
        if segments.len() != 3 {
            return Err(InvalidTokenError::new(format!(
                "expected 3 segments, found {}",
                segments.len()
            )));
        }

        let payload = URL_SAFE_NO_PAD
            .decode(segments[1].trim_end_matches('='))
            .map_err(|e| InvalidTokenError::new(format!("payload is not base64url: {}", e)))?;

        serde_json::from_slice(&payload)
            .map_err(|e| InvalidTokenError::new(format!("payload is not a claims object: {}", e)))
    }

    pub fn is_teacher(&self) -> bool {
        self.roles.iter().any(|r| r.contains(Role::Teacher.as_str()))
    }

    /// First role the client recognises
    pub fn primary_role(&self) -> Option<Role> {
        self.roles.iter().find_map(|r| Role::parse(r))
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.exp.and_then(|exp| DateTime::from_timestamp(exp, 0))
    }
}
