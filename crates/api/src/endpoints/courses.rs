//! `/api/courses/*` and `/api/timetable/*` - course material and class timetables

use crate::client::ApiClient;
use reqwest::multipart::{Form, Part};
use reqwest::Method;
use serde::de::DeserializeOwned;
use shared::{Assignment, CourseModule, EntityId, Result, TimetableSlot};

/// Title, description and optional attachment for a new module or assignment
#[derive(Debug, Clone, Default)]
pub struct MaterialUpload {
    pub title: String,
    pub description: String,
    pub file: Option<(String, Vec<u8>)>,
}

impl MaterialUpload {
    fn into_form(self) -> Form {
        let form = Form::new()
            .text("title", self.title)
            .text("description", self.description);
        match self.file {
            Some((name, bytes)) => form.part("file", Part::bytes(bytes).file_name(name)),
            None => form,
        }
    }
}

fn course_path(class_id: &EntityId, subject_id: &EntityId, kind: &str) -> String {
    format!("/api/courses/{}/{}/{}", class_id, subject_id, kind)
}

impl ApiClient {
    pub async fn course_modules(&self, class_id: &EntityId, subject_id: &EntityId) -> Result<Vec<CourseModule>> {
        self.get_json(&course_path(class_id, subject_id, "modules")).await
    }

    pub async fn course_assignments(&self, class_id: &EntityId, subject_id: &EntityId) -> Result<Vec<Assignment>> {
        self.get_json(&course_path(class_id, subject_id, "assignments")).await
    }

    pub async fn create_module(
        &self,
        class_id: &EntityId,
        subject_id: &EntityId,
        upload: MaterialUpload,
    ) -> Result<CourseModule> {
        self.post_material(&course_path(class_id, subject_id, "modules"), upload).await
    }

    pub async fn create_assignment(
        &self,
        class_id: &EntityId,
        subject_id: &EntityId,
        upload: MaterialUpload,
    ) -> Result<Assignment> {
        self.post_material(&course_path(class_id, subject_id, "assignments"), upload).await
    }

    pub async fn delete_module(&self, module_id: &EntityId) -> Result<String> {
        self.delete(&format!("/api/courses/modules/{}", module_id)).await
    }

    /// Weekly timetable of one class
    pub async fn class_timetable(&self, class_id: &EntityId) -> Result<Vec<TimetableSlot>> {
        self.get_json(&format!("/api/timetable/class/{}", class_id)).await
    }

    async fn post_material<T: DeserializeOwned>(&self, path: &str, upload: MaterialUpload) -> Result<T> {
        let request = self.authed(Method::POST, path)?.multipart(upload.into_form());
        self.send_json(path, request).await
    }
}
