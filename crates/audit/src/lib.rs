//! # Campus ERP Audit
//!
//! In-memory audit trail of session transitions and routing decisions.

mod audit_logger;

pub use audit_logger::{AuditEntry, AuditEventType, AuditLogger, AuditStats};
