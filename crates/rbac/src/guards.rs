//! Route guards
//!
//! Pure predicates over the session token. Public screens send signed-in
//! users to their profile; protected screens send anonymous visitors home.

use crate::routes::RouteKind;

/// Where signed-in users land when they open a public screen
pub const AUTHENTICATED_HOME: &str = "/profile";

/// Where anonymous visitors land when they open a protected screen
pub const ANONYMOUS_HOME: &str = "/";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    Render,
    Redirect(&'static str),
}

fn has_token(token: Option<&str>) -> bool {
    token.map(|t| !t.is_empty()).unwrap_or(false)
}

pub fn public_guard(token: Option<&str>) -> GuardOutcome {
    if has_token(token) {
        GuardOutcome::Redirect(AUTHENTICATED_HOME)
    } else {
        GuardOutcome::Render
    }
}

pub fn protected_guard(token: Option<&str>) -> GuardOutcome {
    if has_token(token) {
        GuardOutcome::Render
    } else {
        GuardOutcome::Redirect(ANONYMOUS_HOME)
    }
}

/// Guard for a route of the given kind
pub fn guard(kind: RouteKind, token: Option<&str>) -> GuardOutcome {
    match kind {
        RouteKind::Public => public_guard(token),
        RouteKind::Protected => protected_guard(token),
    }
}
