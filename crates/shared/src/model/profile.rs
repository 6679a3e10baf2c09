//! Authenticated user profile

use super::academic::{SchoolClass, Subject};
use super::id::EntityId;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// The authenticated user's record as returned by `/api/users/me[/teacher]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub user_id: EntityId,
    pub full_name: String,
    pub email: String,

    /// Raw role string; kept as-is so unknown roles still decode
    pub role: String,

    pub contact_number: Option<String>,

    // Teacher fields
    pub taught_classes: Option<Vec<SchoolClass>>,
    pub taught_subjects: Option<Vec<Subject>>,

    // Student fields
    pub roll_number: Option<String>,
    pub mentor_name: Option<String>,
    pub fee_paid: Option<bool>,
    pub academic_status: Option<String>,
}

/// Role-specific view of a profile
#[derive(Debug, Clone, PartialEq)]
pub enum RoleDetails<'a> {
    Teacher {
        classes: &'a [SchoolClass],
        subjects: &'a [Subject],
    },
    Student {
        roll_number: Option<&'a str>,
        mentor_name: Option<&'a str>,
        fee_paid: bool,
        academic_status: Option<&'a str>,
    },
    Staff,
}

impl UserProfile {
    /// Parsed role, `None` for roles this client does not know
    pub fn role(&self) -> Option<Role> {
        Role::parse(&self.role)
    }

    pub fn details(&self) -> RoleDetails<'_> {
        match self.role() {
            Some(Role::Teacher) => RoleDetails::Teacher {
                classes: self.taught_classes.as_deref().unwrap_or(&[]),
                subjects: self.taught_subjects.as_deref().unwrap_or(&[]),
            },
            Some(Role::Student) => RoleDetails::Student {
                roll_number: self.roll_number.as_deref(),
                mentor_name: self.mentor_name.as_deref(),
                fee_paid: self.fee_paid.unwrap_or(false),
                academic_status: self.academic_status.as_deref(),
            },
            _ => RoleDetails::Staff,
        }
    }

    pub fn initials(&self) -> String {
        initials(&self.full_name)
    }

    pub fn has_paid_fees(&self) -> bool {
        self.fee_paid.unwrap_or(false)
    }
}

/// First letter of the first and last word, upper-cased; `?` for blank names
pub fn initials(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    let first_letter = |s: &str| s.chars().next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
    match parts.as_slice() {
        [] => "?".to_string(),
        [only] => first_letter(only),
        [first, .., last] => format!("{}{}", first_letter(first), first_letter(last)),
    }
}

/// Body of `POST /api/users/me/change-password`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Build the request, refusing a confirmation that does not match
    pub fn new(old_password: &str, new_password: &str, confirm_password: &str) -> crate::Result<Self> {
        if new_password != confirm_password {
            return Err(crate::ErpError::Validation("New passwords do not match.".to_string()));
        }
        if new_password.is_empty() {
            return Err(crate::ErpError::Validation("New password is required.".to_string()));
        }
        Ok(Self {
            old_password: old_password.to_string(),
            new_password: new_password.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student_json() -> &'static str {
        r#"{
            "userId": "3f1c2a9e-0000-4000-8000-000000000001",
            "fullName": "Meera Nair",
            "email": "meera@college.edu",
            "role": "ROLE_STUDENT",
            "rollNumber": "CS-2024-017",
            "mentorName": "Dr. Rao",
            "feePaid": false,
            "academicStatus": "ACTIVE"
        }"#
    }

    // ============== Decoding Tests ==============

    #[test]
    fn test_decode_student_profile() {
        let profile: UserProfile = serde_json::from_str(student_json()).unwrap();
        assert_eq!(profile.role(), Some(Role::Student));
        assert!(profile.contact_number.is_none());

        match profile.details() {
            RoleDetails::Student { roll_number, fee_paid, .. } => {
                assert_eq!(roll_number, Some("CS-2024-017"));
                assert!(!fee_paid);
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_decode_teacher_profile() {
        let json = r#"{
            "userId": "t-1",
            "fullName": "Arjun Menon",
            "email": "arjun@college.edu",
            "role": "ROLE_TEACHER",
            "taughtClasses": [{"classId": 1, "gradeLevel": "BSc CS Year 1", "section": "A"}],
            "taughtSubjects": [{"subjectId": 10, "name": "Data Structures"}]
        }"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        match profile.details() {
            RoleDetails::Teacher { classes, subjects } => {
                assert_eq!(classes.len(), 1);
                assert_eq!(subjects[0].name, "Data Structures");
            }
            other => panic!("unexpected details: {:?}", other),
        }
    }

    #[test]
    fn test_unknown_role_still_decodes() {
        let json = r#"{"userId": "x", "fullName": "Guest", "email": "g@x", "role": "ROLE_LIBRARIAN"}"#;
        let profile: UserProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.role(), None);
        assert_eq!(profile.details(), RoleDetails::Staff);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"userId": "x", "fullName": "No Email", "role": "ROLE_STUDENT"}"#;
        assert!(serde_json::from_str::<UserProfile>(json).is_err());
    }

    // ============== Helper Tests ==============

    #[test]
    fn test_initials() {
        assert_eq!(initials("Meera Nair"), "MN");
        assert_eq!(initials("ada king lovelace"), "AL");
        assert_eq!(initials("Plato"), "P");
        assert_eq!(initials("   "), "?");
    }

    #[test]
    fn test_password_change_requires_matching_confirmation() {
        assert!(PasswordChange::new("old", "new-secret", "new-secret").is_ok());
        let err = PasswordChange::new("old", "new-secret", "typo").unwrap_err();
        assert_eq!(err.to_string(), "New passwords do not match.");
    }
}
