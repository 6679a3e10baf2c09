//! `/api/staff/*` - directory, admissions and timetable scheduling

use crate::client::ApiClient;
use shared::{
    Application, EntityId, NewTimetableSlot, RegisteredStudent, RegisteredUser, Result, StudentRegistrationRequest,
    StudentSummary, TeacherSummary, TimetableSlot, UserRegistration,
};

pub const REGISTERED_TEACHERS: &str = "/api/staff/registered-teachers";
pub const REGISTERED_STUDENTS: &str = "/api/staff/registered-students";
pub const REGISTER: &str = "/api/staff/register";
pub const PENDING_ADMISSIONS: &str = "/api/staff/admissions/pending";
pub const TIMETABLE: &str = "/api/staff/timetable";

impl ApiClient {
    pub async fn registered_teachers(&self) -> Result<Vec<TeacherSummary>> {
        self.get_json(REGISTERED_TEACHERS).await
    }

    pub async fn registered_students(&self) -> Result<Vec<StudentSummary>> {
        self.get_json(REGISTERED_STUDENTS).await
    }

    pub async fn teachers_by_class(&self, class_id: &EntityId) -> Result<Vec<TeacherSummary>> {
        self.get_json(&format!("/api/staff/teachers/by-class/{}", class_id)).await
    }

    pub async fn delete_user(&self, user_id: &EntityId) -> Result<String> {
        self.delete(&format!("/api/staff/user/{}", user_id)).await
    }

    /// Academic-admin registration of teachers and students
    pub async fn register_user(&self, registration: &UserRegistration) -> Result<RegisteredUser> {
        self.post_json(REGISTER, registration).await
    }

    // ============== Admissions ==============

    pub async fn pending_admissions(&self) -> Result<Vec<Application>> {
        self.get_json(PENDING_ADMISSIONS).await
    }

    pub async fn approve_admission(&self, application_id: &EntityId) -> Result<String> {
        let path = format!("/api/staff/admissions/{}/approve", application_id);
        self.post_text(&path, &serde_json::json!({})).await
    }

    /// Turn a finalized application into a student account
    pub async fn register_student(&self, application_id: &EntityId, mentor_id: &EntityId) -> Result<RegisteredStudent> {
        let path = format!("/api/staff/admissions/{}/register-student", application_id);
        let body = StudentRegistrationRequest { mentor_id: mentor_id.clone() };
        self.post_json(&path, &body).await
    }

    // ============== Timetable ==============

    pub async fn create_timetable_slot(&self, slot: &NewTimetableSlot) -> Result<TimetableSlot> {
        self.post_json(TIMETABLE, slot).await
    }
}
