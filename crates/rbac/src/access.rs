//! RouteAccessPolicy - which protected screens a role may open

use crate::navigation::navigation_for_role;
use crate::routes::{RouteKind, RouteMatch};
use shared::{Role, RouteForbiddenError, RoutePolicy};
use tracing::warn;

/// Detail screens reached from a role's navigation rather than listed in it
fn detail_routes(role: Role) -> &'static [&'static str] {
    match role {
        Role::Teacher => &["/course-details/:classId/:subjectId", "/take-attendance/:slotId/:classId"],
        Role::Student => &["/course-details/:classId/:subjectId", "/hostel-brochure"],
        _ => &[],
    }
}

/// Decides whether an authenticated role may render a protected route.
///
/// Public routes are not this policy's concern; their guard handles them.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteAccessPolicy {
    mode: RoutePolicy,
}

impl RouteAccessPolicy {
    pub fn new(mode: RoutePolicy) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> RoutePolicy {
        self.mode
    }

    /// Route patterns `role` may open; the profile is always among them
    pub fn allowed_patterns(role: Option<Role>) -> Vec<&'static str> {
        let mut patterns: Vec<&'static str> = navigation_for_role(role).iter().map(|e| e.path).collect();
        if let Some(role) = role {
            patterns.extend_from_slice(detail_routes(role));
        }
        patterns
    }

    pub fn is_allowed(&self, role: Option<Role>, route: &RouteMatch) -> bool {
        match (self.mode, route.kind()) {
            (_, RouteKind::Public) | (RoutePolicy::NavigationOnly, _) => true,
            (RoutePolicy::EnforceRoles, RouteKind::Protected) => {
                Self::allowed_patterns(role).contains(&route.pattern())
            }
        }
    }

    /// `Ok` when allowed, otherwise an error naming what the role may open
    pub fn check(&self, role_label: &str, role: Option<Role>, route: &RouteMatch) -> Result<(), RouteForbiddenError> {
        if self.is_allowed(role, route) {
            return Ok(());
        }
        warn!(path = %route.path, role = role_label, "route denied");
        Err(RouteForbiddenError {
            path: route.path.clone(),
            role: role_label.to_string(),
            allowed_routes: Self::allowed_patterns(role).iter().map(|p| p.to_string()).collect(),
        })
    }
}
