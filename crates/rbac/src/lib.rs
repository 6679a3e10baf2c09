//! # Campus ERP RBAC
//!
//! Role-based navigation and route access for the ERP client.
//!
//! ## Components
//!
//! - `navigation` - role to navigation-entry tables
//! - `routes` - the route table and path matching
//! - `guards` - public/protected route guards
//! - `RouteAccessPolicy` - per-role restriction of protected routes

pub mod access;
pub mod guards;
pub mod navigation;
pub mod routes;

pub use access::RouteAccessPolicy;
pub use guards::{guard, protected_guard, public_guard, GuardOutcome, ANONYMOUS_HOME, AUTHENTICATED_HOME};
pub use navigation::{navigation_for, navigation_for_role, NavEntry};
pub use routes::{match_route, routes_of, RouteDef, RouteKind, RouteMatch, ROUTES};
