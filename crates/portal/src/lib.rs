//! # Campus ERP Portal
//!
//! Integration layer tying the session, profile resolution, navigation,
//! route guards and the audit trail together behind one `Portal`.

mod portal;

pub use portal::{Portal, RouteDecision};

// Re-export dependencies
pub use api::{ApiClient, CancelHandle, FaceImage, MaterialUpload, RequestScope};
pub use audit::{AuditEntry, AuditLogger, AuditStats};
pub use rbac::{NavEntry, RouteAccessPolicy, RouteMatch};
pub use session::{FileTokenStorage, MemoryTokenStorage, ResolveState, SessionState, SessionStore, TokenStorage};
