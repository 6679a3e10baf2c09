//! AuditLogger - bounded audit trail for the ERP client

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use uuid::Uuid;

/// Audit log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub event_type: AuditEventType,
    /// Who acted: an email, a role, or `anonymous`
    pub actor: String,
    pub path: Option<String>,
    pub success: bool,
    pub reason: Option<String>,
    pub metadata: Option<serde_json::Value>,
}

/// Types of audit events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    Login,
    LoginFailed,
    Logout,
    SessionInvalidated,
    ProfileLoaded,
    ProfileFailed,
    RouteRendered,
    RouteRedirected,
    RouteDenied,
    RouteNotFound,
}

impl AuditEventType {
    fn is_success(&self) -> bool {
        !matches!(
            self,
            AuditEventType::LoginFailed
                | AuditEventType::SessionInvalidated
                | AuditEventType::ProfileFailed
                | AuditEventType::RouteDenied
                | AuditEventType::RouteNotFound
        )
    }
}

/// Audit logger
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    /// Create a logger keeping at most `max_entries` (at least one)
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
        }
    }

    /// Log an audit entry, evicting the oldest when full
    pub fn log(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Record an event of `event_type`; success follows from the type
    pub fn record(&mut self, event_type: AuditEventType, actor: &str, path: Option<&str>, reason: Option<&str>) {
        self.log(AuditEntry {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            event_type,
            actor: actor.to_string(),
            path: path.map(|s| s.to_string()),
            success: event_type.is_success(),
            reason: reason.map(|s| s.to_string()),
            metadata: None,
        });
    }

    pub fn log_login(&mut self, actor: &str, method: &str) {
        self.record(AuditEventType::Login, actor, None, Some(method));
    }

    pub fn log_login_failed(&mut self, actor: &str, reason: &str) {
        self.record(AuditEventType::LoginFailed, actor, None, Some(reason));
    }

    pub fn log_logout(&mut self, actor: &str) {
        self.record(AuditEventType::Logout, actor, None, None);
    }

    /// A failed profile lookup, and whether it ended the session
    pub fn log_profile_failure(&mut self, actor: &str, reason: &str, invalidated: bool) {
        self.record(AuditEventType::ProfileFailed, actor, None, Some(reason));
        if invalidated {
            self.record(AuditEventType::SessionInvalidated, actor, None, Some(reason));
        }
    }

    pub fn log_profile_loaded(&mut self, actor: &str, role: &str) {
        self.record(AuditEventType::ProfileLoaded, actor, None, Some(role));
    }

    pub fn log_route_redirect(&mut self, actor: &str, from: &str, to: &str) {
        self.record(
            AuditEventType::RouteRedirected,
            actor,
            Some(from),
            Some(&format!("Redirected to '{}'", to)),
        );
    }

    /// Get recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Get recent failures and denials, newest first
    pub fn get_recent_denials(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries
            .iter()
            .rev()
            .filter(|e| !e.success)
            .take(limit)
            .collect()
    }

    pub fn get_stats(&self) -> AuditStats {
        let total = self.entries.len();
        let denials = self.entries.iter().filter(|e| !e.success).count();

        AuditStats {
            total_entries: total,
            denial_count: denials,
        }
    }

    /// Export as JSON
    pub fn export_json(&self) -> serde_json::Value {
        serde_json::to_value(self.entries.iter().collect::<Vec<_>>()).unwrap_or_default()
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditStats {
    pub total_entries: usize,
    pub denial_count: usize,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::new(1000)
    }
}
