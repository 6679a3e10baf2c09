//! Admission applications

use super::id::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
    Completed,
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ApplicationStatus::Pending => "PENDING",
            ApplicationStatus::Approved => "APPROVED",
            ApplicationStatus::Rejected => "REJECTED",
            ApplicationStatus::Completed => "COMPLETED",
            ApplicationStatus::Unknown => "UNKNOWN",
        };
        f.write_str(label)
    }
}

/// An applicant's admission request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: EntityId,
    pub applicant_name: String,
    pub applicant_email: String,
    pub program_name: Option<String>,
    pub status: ApplicationStatus,
    pub applied_at: Option<String>,
}

impl Application {
    /// Staff can approve only pending applications
    pub fn can_approve(&self) -> bool {
        self.status == ApplicationStatus::Pending
    }

    /// Applicants finalize only approved applications
    pub fn can_finalize(&self) -> bool {
        self.status == ApplicationStatus::Approved
    }
}

/// Body of `POST /api/public/admissions/apply`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionForm {
    pub applicant_name: String,
    pub applicant_email: String,
    pub contact_number: String,
    pub previous_education_details: String,
    pub applying_class_id: Option<EntityId>,
    #[serde(default)]
    pub wants_hostel: bool,
}

impl AdmissionForm {
    /// Required-field check performed before submitting
    pub fn validate(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            ("applicantName", self.applicant_name.trim().is_empty()),
            ("applicantEmail", self.applicant_email.trim().is_empty()),
            ("contactNumber", self.contact_number.trim().is_empty()),
            ("applyingClassId", self.applying_class_id.is_none()),
        ]
        .iter()
        .filter(|(_, empty)| *empty)
        .map(|(name, _)| *name)
        .collect();

        if !missing.is_empty() {
            return Err(crate::ErpError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if !self.applicant_email.contains('@') {
            return Err(crate::ErpError::Validation("applicantEmail is not an email address".to_string()));
        }
        Ok(())
    }
}

/// Body of `POST /api/staff/admissions/{id}/register-student`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRegistrationRequest {
    pub mentor_id: EntityId,
}

/// Account created when an admission is finalized.
///
/// `password` is the temporary password and is only returned once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredStudent {
    pub full_name: String,
    pub roll_number: Option<String>,
    pub password: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> AdmissionForm {
        AdmissionForm {
            applicant_name: "Kabir Shah".to_string(),
            applicant_email: "kabir@mail.com".to_string(),
            contact_number: "9876543210".to_string(),
            previous_education_details: "HSC 2024, 88%".to_string(),
            applying_class_id: Some(EntityId::from(4)),
            wants_hostel: true,
        }
    }

    #[test]
    fn test_status_decoding() {
        let app: Application = serde_json::from_str(
            r#"{"applicationId": 11, "applicantName": "K", "applicantEmail": "k@m", "status": "APPROVED"}"#,
        )
        .unwrap();
        assert!(app.can_finalize());
        assert!(!app.can_approve());

        let odd: ApplicationStatus = serde_json::from_str("\"WAITLISTED\"").unwrap();
        assert_eq!(odd, ApplicationStatus::Unknown);
    }

    #[test]
    fn test_form_validation() {
        assert!(form().validate().is_ok());

        let mut missing = form();
        missing.applicant_name = " ".to_string();
        missing.applying_class_id = None;
        let err = missing.validate().unwrap_err().to_string();
        assert_eq!(err, "Missing required fields: applicantName, applyingClassId");

        let mut bad_email = form();
        bad_email.applicant_email = "kabir".to_string();
        assert!(bad_email.validate().is_err());
    }

    #[test]
    fn test_form_serializes_camel_case() {
        let value = serde_json::to_value(form()).unwrap();
        assert_eq!(value["applyingClassId"], 4);
        assert_eq!(value["wantsHostel"], true);
        assert_eq!(value["previousEducationDetails"], "HSC 2024, 88%");
    }
}
