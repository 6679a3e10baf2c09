//! Exam marks and results

use super::id::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExamType {
    #[default]
    FinalExam,
    MidTerm,
    UnitTest,
}

impl ExamType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExamType::FinalExam => "FINAL_EXAM",
            ExamType::MidTerm => "MID_TERM",
            ExamType::UnitTest => "UNIT_TEST",
        }
    }

    /// "final exam", "mid term", ...
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ").to_lowercase()
    }
}

impl fmt::Display for ExamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExamType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', ' '], "_").as_str() {
            "FINAL_EXAM" | "FINAL" => Ok(ExamType::FinalExam),
            "MID_TERM" | "MIDTERM" => Ok(ExamType::MidTerm),
            "UNIT_TEST" => Ok(ExamType::UnitTest),
            other => Err(format!("Unknown exam type '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentMark {
    pub student_id: EntityId,
    pub marks_obtained: f64,
}

/// Body of `POST /api/teacher/marks/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarksUpload {
    pub subject_id: EntityId,
    pub exam_type: ExamType,
    pub student_marks: Vec<StudentMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectResult {
    pub subject_name: String,
    pub marks_obtained: f64,
    pub total_marks: f64,
}

/// A student's published results for one exam
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSheet {
    pub student_name: Option<String>,
    pub exam_type: Option<ExamType>,
    #[serde(default)]
    pub subject_results: Vec<SubjectResult>,
}
