//! `/api/teacher/*` - attendance, marks and risk dashboards

use crate::client::ApiClient;
use shared::{
    AttendanceSubmission, EntityId, MarksUpload, Result, RiskDetail, RiskProfile, StudentSummary, TimetableSlot,
};

pub const ATTENDANCE: &str = "/api/teacher/attendance";
pub const MARKS_UPLOAD: &str = "/api/teacher/marks/upload";
pub const RISK_DASHBOARD: &str = "/api/teacher/risk-dashboard";
pub const TIMETABLE: &str = "/api/teacher/timetable/me";

impl ApiClient {
    /// Roster used when taking attendance
    pub async fn teacher_class_students(&self, class_id: &EntityId) -> Result<Vec<StudentSummary>> {
        self.get_json(&format!("/api/teacher/class/{}/students", class_id)).await
    }

    pub async fn submit_attendance(&self, submission: &AttendanceSubmission) -> Result<String> {
        self.post_text(ATTENDANCE, submission).await
    }

    pub async fn upload_marks(&self, upload: &MarksUpload) -> Result<String> {
        self.post_text(MARKS_UPLOAD, upload).await
    }

    pub async fn risk_dashboard(&self) -> Result<Vec<RiskProfile>> {
        self.get_json(RISK_DASHBOARD).await
    }

    pub async fn risk_profile(&self, student_id: &EntityId) -> Result<RiskDetail> {
        self.get_json(&format!("/api/teacher/risk-profile/{}", student_id)).await
    }

    pub async fn teacher_timetable(&self) -> Result<Vec<TimetableSlot>> {
        self.get_json(TIMETABLE).await
    }
}
