//! `/api/master/*` - classes, subjects, classrooms and the teacher list

use crate::client::ApiClient;
use reqwest::Method;
use shared::{
    ClassForm, Classroom, ClassroomForm, EntityId, Result, SchoolClass, Subject, SubjectForm, TeacherSummary,
};

pub const CLASSES: &str = "/api/master/classes";
pub const SUBJECTS: &str = "/api/master/subjects";
pub const CLASSROOMS: &str = "/api/master/classrooms";
pub const TEACHERS: &str = "/api/master/teachers";

impl ApiClient {
    // ============== Classes ==============

    /// Class catalog; also served to anonymous visitors
    pub async fn classes(&self) -> Result<Vec<SchoolClass>> {
        let request = self.maybe_authed(Method::GET, CLASSES);
        self.send_json(CLASSES, request).await
    }

    /// One class with its subjects (course brochure)
    pub async fn class(&self, class_id: &EntityId) -> Result<SchoolClass> {
        let path = format!("{}/{}", CLASSES, class_id);
        let request = self.maybe_authed(Method::GET, &path);
        self.send_json(&path, request).await
    }

    pub async fn create_class(&self, form: &ClassForm) -> Result<SchoolClass> {
        self.post_json(CLASSES, form).await
    }

    pub async fn update_class(&self, class_id: &EntityId, form: &ClassForm) -> Result<SchoolClass> {
        self.put_json(&format!("{}/{}", CLASSES, class_id), form).await
    }

    pub async fn delete_class(&self, class_id: &EntityId) -> Result<String> {
        self.delete(&format!("{}/{}", CLASSES, class_id)).await
    }

    // ============== Subjects ==============

    pub async fn subjects(&self) -> Result<Vec<Subject>> {
        self.get_json(SUBJECTS).await
    }

    pub async fn create_subject(&self, form: &SubjectForm) -> Result<Subject> {
        self.post_json(SUBJECTS, form).await
    }

    pub async fn update_subject(&self, subject_id: &EntityId, form: &SubjectForm) -> Result<Subject> {
        self.put_json(&format!("{}/{}", SUBJECTS, subject_id), form).await
    }

    pub async fn delete_subject(&self, subject_id: &EntityId) -> Result<String> {
        self.delete(&format!("{}/{}", SUBJECTS, subject_id)).await
    }

    // ============== Classrooms ==============

    pub async fn classrooms(&self) -> Result<Vec<Classroom>> {
        self.get_json(CLASSROOMS).await
    }

    pub async fn create_classroom(&self, form: &ClassroomForm) -> Result<Classroom> {
        self.post_json(CLASSROOMS, form).await
    }

    pub async fn update_classroom(&self, classroom_id: &EntityId, form: &ClassroomForm) -> Result<Classroom> {
        self.put_json(&format!("{}/{}", CLASSROOMS, classroom_id), form).await
    }

    pub async fn delete_classroom(&self, classroom_id: &EntityId) -> Result<String> {
        self.delete(&format!("{}/{}", CLASSROOMS, classroom_id)).await
    }

    // ============== Teachers ==============

    /// Teachers eligible as mentors
    pub async fn teachers(&self) -> Result<Vec<TeacherSummary>> {
        self.get_json(TEACHERS).await
    }
}
