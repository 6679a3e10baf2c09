//! Configuration types for the ERP client

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default API location used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";

/// Environment variable overriding the API location
pub const API_BASE_URL_ENV: &str = "ERP_API_BASE_URL";

/// How routes are restricted beyond the authenticated/anonymous split
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoutePolicy {
    /// Roles only decide which navigation entries are shown
    NavigationOnly,
    /// Protected routes outside the role's navigation are refused
    #[default]
    EnforceRoles,
}

/// When a failed profile fetch ends the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Any failure logs the user out
    InvalidateOnAnyFailure,
    /// Only an undecodable token or a 401/403 logs the user out
    #[default]
    InvalidateOnRejection,
}

/// Client configuration (erp.yaml / erp.json)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ErpConfig {
    /// Base URL of the ERP REST API
    pub api_base_url: String,

    /// File holding the persisted session token
    pub token_file: PathBuf,

    /// Route restriction mode
    pub route_policy: RoutePolicy,

    /// Session invalidation mode for profile failures
    pub failure_policy: FailurePolicy,

    /// Request timeout; the HTTP client default applies when unset
    pub request_timeout_secs: Option<u64>,

    /// Number of audit entries kept in memory
    pub audit_capacity: usize,
}

impl Default for ErpConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            token_file: default_token_file(),
            route_policy: RoutePolicy::default(),
            failure_policy: FailurePolicy::default(),
            request_timeout_secs: None,
            audit_capacity: 1000,
        }
    }
}

fn default_token_file() -> PathBuf {
    let home = std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    home.join(".erp").join("session.json")
}

impl ErpConfig {
    /// Load configuration from a YAML or JSON file
    pub fn from_file(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
        let config: Self = if is_json {
            serde_json::from_str(&content)?
        } else {
            serde_yaml::from_str(&content)?
        };
        config.validate()?;
        Ok(config)
    }

    /// Apply `ERP_API_BASE_URL` if it is set and non-empty
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(url) = std::env::var(API_BASE_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
        self
    }

    /// Builder: set API base URL
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Builder: set token file
    pub fn with_token_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_file = path.into();
        self
    }

    /// Check values that cannot be expressed in the types
    pub fn validate(&self) -> crate::Result<()> {
        let url = self.api_base_url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(crate::ErpError::Config(format!(
                "apiBaseUrl must start with http:// or https://, got '{}'",
                self.api_base_url
            )));
        }
        if self.audit_capacity == 0 {
            return Err(crate::ErpError::Config("auditCapacity must be at least 1".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ErpConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:8080");
        assert_eq!(config.route_policy, RoutePolicy::EnforceRoles);
        assert_eq!(config.failure_policy, FailurePolicy::InvalidateOnRejection);
        assert!(config.request_timeout_secs.is_none());
        assert!(config.token_file.ends_with("session.json"));
    }

    #[test]
    fn test_config_parse_yaml() {
        let yaml = r#"
apiBaseUrl: https://erp.example.edu
routePolicy: navigation_only
failurePolicy: invalidate_on_any_failure
requestTimeoutSecs: 15
"#;
        let config: ErpConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_base_url, "https://erp.example.edu");
        assert_eq!(config.route_policy, RoutePolicy::NavigationOnly);
        assert_eq!(config.failure_policy, FailurePolicy::InvalidateOnAnyFailure);
        assert_eq!(config.request_timeout_secs, Some(15));
        assert_eq!(config.audit_capacity, 1000);
    }

    #[test]
    fn test_from_file_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp.json");
        std::fs::write(&path, r#"{"apiBaseUrl": "http://10.0.0.5:8080", "auditCapacity": 50}"#).unwrap();

        let config = ErpConfig::from_file(&path).unwrap();
        assert_eq!(config.api_base_url, "http://10.0.0.5:8080");
        assert_eq!(config.audit_capacity, 50);
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ErpConfig::default().with_api_base_url("localhost:8080");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_rejects_zero_capacity() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("erp.yaml");
        std::fs::write(&path, "auditCapacity: 0\n").unwrap();
        assert!(ErpConfig::from_file(&path).is_err());
    }
}
