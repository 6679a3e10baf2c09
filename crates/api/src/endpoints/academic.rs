//! `/api/academic/*` - class rosters, curriculum design and progression

use crate::client::ApiClient;
use shared::{
    ClassDesignEntry, EntityId, MentorAssignment, Promotion, Result, StudentStatusUpdate, StudentSummary,
};

pub const PROMOTE: &str = "/api/academic/students/promote";
pub const ASSIGN_MENTOR: &str = "/api/academic/students/assign-mentor";

impl ApiClient {
    pub async fn class_students(&self, class_id: &EntityId) -> Result<Vec<StudentSummary>> {
        self.get_json(&format!("/api/academic/class/{}/students", class_id)).await
    }

    pub async fn class_design(&self, class_id: &EntityId) -> Result<Vec<ClassDesignEntry>> {
        self.get_json(&format!("/api/academic/class/{}/design", class_id)).await
    }

    /// Replace the subject/teacher pairs of a class
    pub async fn save_class_design(&self, class_id: &EntityId, entries: &[ClassDesignEntry]) -> Result<String> {
        self.post_text(&format!("/api/academic/class/{}/design", class_id), entries).await
    }

    pub async fn promote_students(&self, promotion: &Promotion) -> Result<String> {
        self.post_text(PROMOTE, promotion).await
    }

    pub async fn assign_mentor(&self, assignment: &MentorAssignment) -> Result<String> {
        self.post_text(ASSIGN_MENTOR, assignment).await
    }

    pub async fn update_student_status(&self, student_id: &EntityId, update: &StudentStatusUpdate) -> Result<StudentSummary> {
        self.put_json(&format!("/api/academic/students/{}/status", student_id), update).await
    }
}
