//! ProfileResolver - from session token to the signed-in user's profile

use crate::claims::Claims;
use crate::store::SessionStore;
use api::{ApiClient, ProfileEndpoint, RequestScope};
use async_trait::async_trait;
use shared::{ErpError, FailurePolicy, Result, UserProfile};
use tracing::{debug, warn};

/// Where profiles come from
#[async_trait]
pub trait ProfileSource: Send + Sync {
    async fn fetch_profile(&self, token: &str, endpoint: ProfileEndpoint) -> Result<UserProfile>;
}

#[async_trait]
impl ProfileSource for ApiClient {
    async fn fetch_profile(&self, token: &str, endpoint: ProfileEndpoint) -> Result<UserProfile> {
        self.with_token(token).profile(endpoint).await
    }
}

/// Progress of a profile lookup
#[derive(Debug, Clone, PartialEq)]
pub enum ResolveState {
    Loading,
    Ready(UserProfile),
    Failed(String),
}

impl ResolveState {
    pub fn profile(&self) -> Option<&UserProfile> {
        match self {
            ResolveState::Ready(profile) => Some(profile),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ResolveState::Loading)
    }
}

/// Resolves the profile for the current session and applies the failure
/// policy to the session when the lookup fails.
#[derive(Debug, Clone)]
pub struct ProfileResolver<S> {
    source: S,
    policy: FailurePolicy,
}

impl<S: ProfileSource> ProfileResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source,
            policy: FailurePolicy::default(),
        }
    }

    /// Builder: set failure policy
    pub fn with_policy(mut self, policy: FailurePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> FailurePolicy {
        self.policy
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Endpoint serving the holder of `token`
    pub fn endpoint_for(token: &str) -> Result<ProfileEndpoint> {
        let claims = Claims::decode(token)?;
        Ok(if claims.is_teacher() {
            ProfileEndpoint::Teacher
        } else {
            ProfileEndpoint::Me
        })
    }

    /// Fetch the profile inside `scope`, logging the session out when the
    /// policy says the failure ends it
    pub async fn resolve(&self, session: &mut SessionStore, scope: &RequestScope) -> ResolveState {
        let token = match session.token() {
            Some(token) => token.to_string(),
            None => return self.fail(session, ErpError::NotAuthenticated),
        };

        let endpoint = match Self::endpoint_for(&token) {
            Ok(endpoint) => endpoint,
            Err(e) => return self.fail(session, e),
        };
        debug!(endpoint = endpoint.path(), scope = scope.name(), "resolving profile");

        match scope.run(self.source.fetch_profile(&token, endpoint)).await {
            Ok(profile) => ResolveState::Ready(profile),
            Err(e) => self.fail(session, e),
        }
    }

    /// Whether `error` ends the session under the configured policy
    pub fn invalidates(&self, error: &ErpError) -> bool {
        if matches!(error, ErpError::Cancelled) {
            return false;
        }
        match self.policy {
            FailurePolicy::InvalidateOnAnyFailure => true,
            FailurePolicy::InvalidateOnRejection => error.is_credential_rejection(),
        }
    }

    fn fail(&self, session: &mut SessionStore, error: ErpError) -> ResolveState {
        if self.invalidates(&error) {
            warn!(error = %error, "profile lookup failed, ending session");
            if let Err(e) = session.logout() {
                warn!(error = %e, "could not clear stored session");
            }
        } else {
            warn!(error = %error, "profile lookup failed, session kept");
        }
        ResolveState::Failed(error.to_string())
    }
}
