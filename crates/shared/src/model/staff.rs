//! Staff, teacher and student directory records

use super::academic::{SchoolClass, Subject};
use super::id::EntityId;
use crate::role::Role;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StaffMember {
    pub user_id: EntityId,
    pub full_name: String,
    pub email: String,
    pub role: String,
    pub contact_number: Option<String>,
}

/// Teacher as listed by the master-data and staff endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherSummary {
    pub user_id: EntityId,
    pub full_name: String,
    pub email: Option<String>,
    #[serde(default)]
    pub taught_subjects: Vec<Subject>,
    #[serde(default)]
    pub taught_classes: Vec<SchoolClass>,
}

impl TeacherSummary {
    pub fn teaches(&self, subject_id: &EntityId) -> bool {
        self.taught_subjects.iter().any(|s| &s.subject_id == subject_id)
    }
}

/// Teachers able to take a subject, for slot and curriculum pickers
pub fn teachers_for_subject<'a>(teachers: &'a [TeacherSummary], subject_id: &EntityId) -> Vec<&'a TeacherSummary> {
    teachers.iter().filter(|t| t.teaches(subject_id)).collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentSummary {
    pub user_id: EntityId,
    pub full_name: String,
    pub email: Option<String>,
    pub roll_number: Option<String>,
    pub mentor_name: Option<String>,
    pub fee_paid: Option<bool>,
    pub academic_status: Option<String>,
}

/// Body of the staff/admin user registration endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRegistration {
    pub full_name: String,
    pub email: String,
    pub password: String,
    pub contact_number: Option<String>,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub subject_ids: Vec<EntityId>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub class_ids: Vec<EntityId>,
}

/// Account returned after a registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisteredUser {
    pub user_id: Option<EntityId>,
    pub full_name: String,
    pub email: Option<String>,
    pub role: Option<String>,
}

/// Body of `PUT /api/academic/students/{id}/status`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatusUpdate {
    pub fee_paid: bool,
    pub academic_status: String,
}

/// Body of `POST /api/academic/students/promote`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Promotion {
    pub student_ids: Vec<EntityId>,
    pub next_class_id: EntityId,
}

/// Body of `POST /api/academic/students/assign-mentor`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentorAssignment {
    pub student_ids: Vec<EntityId>,
    pub mentor_id: EntityId,
}

/// Super-staff dashboard figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminAnalytics {
    pub total_students: u64,
    pub total_teachers: u64,
    pub hostel_residents: u64,
    #[serde(default)]
    pub students_per_class: BTreeMap<String, u64>,
}

impl AdminAnalytics {
    pub fn class_count(&self) -> usize {
        self.students_per_class.len()
    }
}
