//! Role enumeration

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Prefix the backend puts in front of every role name
pub const ROLE_PREFIX: &str = "ROLE_";

/// The fixed set of user roles.
///
/// Exactly one role per user. There is no hierarchy between roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    SuperStaff,
    AdmissionsStaff,
    AcademicAdmin,
    HostelAdmin,
    Teacher,
    Student,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::SuperStaff,
        Role::AdmissionsStaff,
        Role::AcademicAdmin,
        Role::HostelAdmin,
        Role::Teacher,
        Role::Student,
    ];

    /// Wire form, e.g. `ROLE_TEACHER`
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SuperStaff => "ROLE_SUPER_STAFF",
            Role::AdmissionsStaff => "ROLE_ADMISSIONS_STAFF",
            Role::AcademicAdmin => "ROLE_ACADEMIC_ADMIN",
            Role::HostelAdmin => "ROLE_HOSTEL_ADMIN",
            Role::Teacher => "ROLE_TEACHER",
            Role::Student => "ROLE_STUDENT",
        }
    }

    /// Parse a role with or without the `ROLE_` prefix
    pub fn parse(value: &str) -> Option<Role> {
        let name = value.trim();
        let name = name.strip_prefix(ROLE_PREFIX).unwrap_or(name);
        match name {
            "SUPER_STAFF" => Some(Role::SuperStaff),
            "ADMISSIONS_STAFF" => Some(Role::AdmissionsStaff),
            "ACADEMIC_ADMIN" => Some(Role::AcademicAdmin),
            "HOSTEL_ADMIN" => Some(Role::HostelAdmin),
            "TEACHER" => Some(Role::Teacher),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }

    /// Human-readable name, e.g. `Academic Admin`
    pub fn display_name(&self) -> String {
        format_role(self.as_str())
    }

    pub fn is_staff(&self) -> bool {
        !matches!(self, Role::Teacher | Role::Student)
    }
}

/// Turn any raw role string into a title-cased label.
///
/// `ROLE_HOSTEL_ADMIN` becomes `Hostel Admin`; an empty string becomes `User`.
pub fn format_role(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        return "User".to_string();
    }
    name.strip_prefix(ROLE_PREFIX)
        .unwrap_or(name)
        .split('_')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::parse(s).ok_or_else(|| format!("Unknown role '{}'", s))
    }
}

impl Serialize for Role {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Role {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Role::parse(&raw).ok_or_else(|| serde::de::Error::custom(format!("unknown role '{}'", raw)))
    }
}
