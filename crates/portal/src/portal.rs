//! Portal - the client's central state machine
//!
//! `Anonymous -> (login) -> Authenticated -> (logout | rejected profile) -> Anonymous`

use api::{ApiClient, CancelHandle, FaceImage, RequestScope};
use audit::{AuditEventType, AuditLogger, AuditStats};
use rbac::{guard, match_route, navigation_for_role, GuardOutcome, NavEntry, RouteAccessPolicy, RouteKind, RouteMatch};
use session::{Claims, FileTokenStorage, ProfileResolver, ResolveState, SessionState, SessionStore, TokenStorage};
use shared::{ErpConfig, Result, Role, RouteForbiddenError, UserProfile};
use tokio::sync::watch;
use tracing::{debug, info, warn};

const ANONYMOUS: &str = "anonymous";

/// Outcome of opening a path
#[derive(Debug)]
pub enum RouteDecision {
    /// Show the screen
    Render(RouteMatch),
    /// Go to another path instead
    Redirect(String),
    /// Signed in, but the role may not open this screen
    Forbidden(RouteForbiddenError),
    /// No screen at this path
    NotFound(String),
}

impl RouteDecision {
    pub fn is_render(&self) -> bool {
        matches!(self, RouteDecision::Render(_))
    }

    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            RouteDecision::Redirect(to) => Some(to),
            _ => None,
        }
    }
}

/// Portal - session lifecycle plus routing for one user
pub struct Portal {
    /// Anonymous client; a credentialed copy is made per call
    client: ApiClient,
    session: SessionStore,
    resolver: ProfileResolver<ApiClient>,
    access: RouteAccessPolicy,
    audit: AuditLogger,
    /// Last successfully resolved profile
    profile: Option<UserProfile>,
    /// Scope of the work currently in flight
    scope: RequestScope,
}

impl Portal {
    /// Create a Portal restoring the session from `storage`
    pub fn new(config: &ErpConfig, storage: impl TokenStorage + 'static) -> Result<Self> {
        let client = ApiClient::from_config(config)?;
        let session = SessionStore::restore(storage)?;
        info!(api = client.base_url(), state = %session.state(), "portal ready");

        Ok(Self {
            resolver: ProfileResolver::new(client.clone()).with_policy(config.failure_policy),
            client,
            session,
            access: RouteAccessPolicy::new(config.route_policy),
            audit: AuditLogger::new(config.audit_capacity),
            profile: None,
            scope: RequestScope::new("portal"),
        })
    }

    /// Create a Portal whose session lives in the configured token file
    pub fn from_config(config: &ErpConfig) -> Result<Self> {
        Self::new(config, FileTokenStorage::new(&config.token_file))
    }

    // ============== Scopes ==============

    /// Start a fresh request scope; dropping the previous one cancels its work
    pub fn renew_scope(&mut self, name: &str) -> CancelHandle {
        self.scope = RequestScope::new(name);
        self.scope.handle()
    }

    pub fn scope(&self) -> &RequestScope {
        &self.scope
    }

    // ============== Session ==============

    /// Sign in with email and password
    pub async fn login(&mut self, email: &str, password: &str) -> Result<()> {
        let outcome = self.scope.run(self.client.anonymous().login(email, password)).await;
        self.finish_login(email, "password", outcome)
    }

    /// Sign in with a face capture
    pub async fn face_login(&mut self, image: FaceImage) -> Result<()> {
        let client = match self.session.token() {
            Some(token) => self.client.with_token(token),
            None => self.client.anonymous(),
        };
        let outcome = self.scope.run(client.face_login(image)).await;
        self.finish_login("face", "face", outcome)
    }

    fn finish_login(&mut self, actor: &str, method: &str, outcome: Result<String>) -> Result<()> {
        let token = match outcome {
            Ok(token) => token,
            Err(e) => {
                warn!(actor, method, error = %e, "login failed");
                self.audit.log_login_failed(actor, &e.to_string());
                return Err(e);
            }
        };
        self.session.login(token)?;
        self.profile = None;
        info!(actor, method, "logged in");
        self.audit.log_login(actor, method);
        Ok(())
    }

    pub async fn logout(&mut self) -> Result<()> {
        let actor = self.actor();
        self.scope = RequestScope::new("portal");
        self.session.logout()?;
        self.profile = None;
        info!(actor = %actor, "logged out");
        self.audit.log_logout(&actor);
        Ok(())
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.session.subscribe()
    }

    pub fn token(&self) -> Option<&str> {
        self.session.token()
    }

    /// Unverified claims of the current token
    pub fn claims(&self) -> Option<Claims> {
        self.session.token().and_then(|t| Claims::decode(t).ok())
    }

    /// Client carrying the current credential, if any
    pub fn client(&self) -> ApiClient {
        match self.session.token() {
            Some(token) => self.client.with_token(token),
            None => self.client.anonymous(),
        }
    }

    // ============== Profile ==============

    /// Resolve the signed-in user's profile, applying the failure policy
    pub async fn load_profile(&mut self) -> ResolveState {
        let actor = self.actor();
        let was_authenticated = self.session.is_authenticated();
        let state = self.resolver.resolve(&mut self.session, &self.scope).await;

        match &state {
            ResolveState::Ready(profile) => {
                debug!(user = %profile.email, role = %profile.role, "profile loaded");
                self.audit.log_profile_loaded(&profile.email, &profile.role);
                self.profile = Some(profile.clone());
            }
            ResolveState::Failed(message) => {
                let invalidated = was_authenticated && !self.session.is_authenticated();
                if invalidated {
                    self.profile = None;
                }
                self.audit.log_profile_failure(&actor, message, invalidated);
            }
            ResolveState::Loading => {}
        }
        state
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Role from the loaded profile, falling back to the token's claims
    pub fn role(&self) -> Option<Role> {
        match &self.profile {
            Some(profile) => profile.role(),
            None => self.claims().and_then(|c| c.primary_role()),
        }
    }

    /// Navigation for the loaded profile's role; Profile only when none
    pub fn navigation(&self) -> Vec<NavEntry> {
        navigation_for_role(self.profile.as_ref().and_then(|p| p.role()))
    }

    // ============== Routing ==============

    /// Decide what opening `path` shows
    pub fn open(&mut self, path: &str) -> RouteDecision {
        let actor = self.actor();

        let route = match match_route(path) {
            Some(route) => route,
            None => {
                debug!(path, "no route");
                self.audit.record(AuditEventType::RouteNotFound, &actor, Some(path), None);
                return RouteDecision::NotFound(path.to_string());
            }
        };

        if let GuardOutcome::Redirect(to) = guard(route.kind(), self.session.token()) {
            debug!(from = %route.path, to, "route redirected");
            self.audit.log_route_redirect(&actor, &route.path, to);
            return RouteDecision::Redirect(to.to_string());
        }

        if route.kind() == RouteKind::Protected {
            let label = self.role_label();
            if let Err(e) = self.access.check(&label, self.role(), &route) {
                self.audit
                    .record(AuditEventType::RouteDenied, &actor, Some(&route.path), Some(&e.to_string()));
                return RouteDecision::Forbidden(e);
            }
        }

        self.audit.record(AuditEventType::RouteRendered, &actor, Some(&route.path), None);
        RouteDecision::Render(route)
    }

    // ============== Audit ==============

    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    pub fn audit_stats(&self) -> AuditStats {
        self.audit.get_stats()
    }

    fn role_label(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.role.clone();
        }
        self.claims()
            .and_then(|c| c.roles.first().cloned())
            .unwrap_or_else(|| ANONYMOUS.to_string())
    }

    /// Who audit entries are attributed to
    fn actor(&self) -> String {
        if let Some(profile) = &self.profile {
            return profile.email.clone();
        }
        match self.claims().and_then(|c| c.sub) {
            Some(sub) => sub,
            None if self.session.is_authenticated() => self.role_label(),
            None => ANONYMOUS.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use session::MemoryTokenStorage;
    use shared::RoutePolicy;

    fn config() -> ErpConfig {
        // Nothing listens here; these tests never reach the network
        ErpConfig::default().with_api_base_url("http://127.0.0.1:9")
    }

    fn portal_with_token(token: Option<&str>) -> Portal {
        let storage = MemoryTokenStorage::new();
        if let Some(token) = token {
            storage.save(token).unwrap();
        }
        Portal::new(&config(), storage).unwrap()
    }

    fn jwt(role: &str) -> String {
        let payload = format!(r#"{{"sub":"u@example.edu","roles":["{}"]}}"#, role);
        format!("h.{}.s", URL_SAFE_NO_PAD.encode(payload))
    }

    // ============== Guard Tests ==============

    #[test]
    fn test_anonymous_routing() {
        let mut portal = portal_with_token(None);
        assert_eq!(portal.state(), SessionState::Anonymous);
        assert!(portal.open("/login").is_render());
        assert!(portal.open("/admissions/brochure/4").is_render());
        assert_eq!(portal.open("/profile").redirect_target(), Some("/"));
        assert_eq!(portal.open("/my-result").redirect_target(), Some("/"));
    }

    #[test]
    fn test_authenticated_public_routes_redirect_to_profile() {
        let mut portal = portal_with_token(Some(&jwt("ROLE_STUDENT")));
        assert_eq!(portal.open("/").redirect_target(), Some("/profile"));
        assert_eq!(portal.open("/login").redirect_target(), Some("/profile"));
        assert_eq!(portal.open("/face-login").redirect_target(), Some("/profile"));
    }

    #[test]
    fn test_unknown_path() {
        let mut portal = portal_with_token(None);
        assert!(matches!(portal.open("/nowhere"), RouteDecision::NotFound(_)));
        assert_eq!(portal.audit_stats().denial_count, 1);
    }

    // ============== Role Access Tests ==============

    #[test]
    fn test_role_from_claims_before_profile_loads() {
        let mut portal = portal_with_token(Some(&jwt("ROLE_STUDENT")));
        assert_eq!(portal.role(), Some(Role::Student));
        assert!(portal.open("/my-result").is_render());
        assert!(portal.open("/course-details/2/7").is_render());

        match portal.open("/upload-marks") {
            RouteDecision::Forbidden(e) => {
                assert_eq!(e.role, "ROLE_STUDENT");
                assert!(e.allowed_routes.contains(&"/my-result".to_string()));
            }
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }

    #[test]
    fn test_navigation_only_policy() {
        let storage = MemoryTokenStorage::new();
        storage.save(&jwt("ROLE_STUDENT")).unwrap();
        let mut config = config();
        config.route_policy = RoutePolicy::NavigationOnly;
        let mut portal = Portal::new(&config, storage).unwrap();

        assert!(portal.open("/upload-marks").is_render());
    }

    #[test]
    fn test_navigation_without_profile() {
        let portal = portal_with_token(Some(&jwt("ROLE_TEACHER")));
        assert_eq!(portal.navigation().len(), 1);
        assert_eq!(portal.navigation()[0].path, "/profile");
    }

    // ============== Session Tests ==============

    #[tokio::test]
    async fn test_logout_returns_to_anonymous() {
        let mut portal = portal_with_token(Some(&jwt("ROLE_TEACHER")));
        let mut rx = portal.subscribe();
        let in_flight = portal.renew_scope("timetable");

        portal.logout().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), SessionState::Anonymous);
        assert!(in_flight.is_cancelled());
        assert!(!portal.scope().is_cancelled());
        assert_eq!(portal.open("/time-table").redirect_target(), Some("/"));

        let entry = portal.audit().get_recent(10).into_iter().find(|e| e.event_type == AuditEventType::Logout);
        assert_eq!(entry.map(|e| e.actor.as_str()), Some("u@example.edu"));
    }

    #[tokio::test]
    async fn test_renewed_scope_is_live() {
        let mut portal = portal_with_token(None);
        let first = portal.renew_scope("whoami");
        let second = portal.renew_scope("nav");
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
        second.cancel();
        assert!(portal.scope().is_cancelled());
    }

    #[tokio::test]
    async fn test_undecodable_token_is_invalidated_on_profile_load() {
        let mut portal = portal_with_token(Some("abc"));
        let state = portal.load_profile().await;

        assert!(matches!(state, ResolveState::Failed(_)));
        assert_eq!(portal.state(), SessionState::Anonymous);
        let types: Vec<_> = portal.audit().get_recent(2).iter().map(|e| e.event_type).collect();
        assert_eq!(types, vec![AuditEventType::SessionInvalidated, AuditEventType::ProfileFailed]);
    }
}
