//! `/api/public/*` - anonymous admissions flow

use crate::client::ApiClient;
use reqwest::Method;
use shared::{AdmissionForm, Application, EntityId, Result};

pub const APPLY: &str = "/api/public/admissions/apply";
pub const STATUS: &str = "/api/public/admissions/status";

impl ApiClient {
    /// Submit an admission application; fields are checked before sending
    pub async fn apply(&self, form: &AdmissionForm) -> Result<String> {
        form.validate()?;
        let request = self.request(Method::POST, APPLY).json(form);
        self.send_text(APPLY, request).await
    }

    /// Look up an application by the applicant's email
    pub async fn application_status(&self, email: &str) -> Result<Application> {
        let request = self.request(Method::GET, STATUS).query(&[("email", email)]);
        self.send_json(STATUS, request).await
    }

    /// Applicant accepts an approved offer
    pub async fn finalize_application(&self, application_id: &EntityId) -> Result<String> {
        let path = format!("/api/public/admissions/{}/finalize", application_id);
        let request = self.request(Method::POST, &path);
        self.send_text(&path, request).await
    }
}
