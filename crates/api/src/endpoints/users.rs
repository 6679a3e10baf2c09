//! `/api/users/*` - the signed-in user

use crate::client::ApiClient;
use shared::{EntityId, PasswordChange, Result, StudentSummary, UserProfile};

pub const ME: &str = "/api/users/me";
pub const ME_TEACHER: &str = "/api/users/me/teacher";
pub const CHANGE_PASSWORD: &str = "/api/users/me/change-password";

/// Which profile endpoint serves the signed-in user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileEndpoint {
    /// Generic profile
    Me,
    /// Profile enriched with taught classes and subjects
    Teacher,
}

impl ProfileEndpoint {
    pub fn path(&self) -> &'static str {
        match self {
            ProfileEndpoint::Me => ME,
            ProfileEndpoint::Teacher => ME_TEACHER,
        }
    }
}

impl ApiClient {
    pub async fn profile(&self, endpoint: ProfileEndpoint) -> Result<UserProfile> {
        self.get_json(endpoint.path()).await
    }

    /// Look up any user by id (student detail views)
    pub async fn user(&self, user_id: &EntityId) -> Result<StudentSummary> {
        self.get_json(&format!("/api/users/{}", user_id)).await
    }

    pub async fn change_password(&self, change: &PasswordChange) -> Result<String> {
        self.post_text(CHANGE_PASSWORD, change).await
    }
}
