//! Marks entry: per-cell validation, sheet statistics and the upload body

use serde::Serialize;
use shared::{EntityId, ErpError, ExamType, MarksUpload, Result, StudentMark};
use std::collections::BTreeMap;
use thiserror::Error;

/// Highest mark on the 0-100 scale
pub const MAX_MARK: f64 = 100.0;

/// Marks at or above this pass
pub const PASS_MARK: f64 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MarkError {
    #[error("Must be a number")]
    NotANumber,
    #[error("Cannot be negative")]
    Negative,
    #[error("Cannot exceed 100")]
    TooHigh,
}

/// Parse one entered mark
pub fn validate_mark(input: &str) -> std::result::Result<f64, MarkError> {
    let value: f64 = input.trim().parse().map_err(|_| MarkError::NotANumber)?;
    if value.is_nan() {
        Err(MarkError::NotANumber)
    } else if value < 0.0 {
        Err(MarkError::Negative)
    } else if value > MAX_MARK {
        Err(MarkError::TooHigh)
    } else {
        Ok(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkStatistics {
    /// Mean, rounded to one decimal place
    pub average: f64,
    pub highest: f64,
    pub lowest: f64,
    pub pass_count: usize,
    pub total_entered: usize,
}

impl MarkStatistics {
    /// `None` when no valid mark was entered
    pub fn from_marks(marks: &[f64]) -> Option<Self> {
        if marks.is_empty() {
            return None;
        }
        let sum: f64 = marks.iter().sum();
        let average = (sum / marks.len() as f64 * 10.0).round() / 10.0;
        Some(Self {
            average,
            highest: marks.iter().copied().fold(f64::MIN, f64::max),
            lowest: marks.iter().copied().fold(f64::MAX, f64::min),
            pass_count: marks.iter().filter(|m| **m >= PASS_MARK).count(),
            total_entered: marks.len(),
        })
    }
}

/// Marks being entered for one subject and exam.
///
/// Raw input is kept per student so invalid cells can be shown and fixed;
/// blank cells count as "not entered".
#[derive(Debug, Clone)]
pub struct MarkSheet {
    subject_id: EntityId,
    exam_type: ExamType,
    entries: BTreeMap<EntityId, String>,
}

impl MarkSheet {
    pub fn new(subject_id: EntityId, exam_type: ExamType) -> Self {
        Self {
            subject_id,
            exam_type,
            entries: BTreeMap::new(),
        }
    }

    /// Record raw input for a student and report whether it is valid
    pub fn enter(&mut self, student_id: EntityId, raw: impl Into<String>) -> std::result::Result<f64, MarkError> {
        let raw = raw.into();
        let checked = validate_mark(&raw);
        self.entries.insert(student_id, raw);
        checked
    }

    fn entered(&self) -> impl Iterator<Item = (&EntityId, &String)> {
        self.entries.iter().filter(|(_, raw)| !raw.trim().is_empty())
    }

    /// Students whose non-blank input is invalid
    pub fn errors(&self) -> Vec<(EntityId, MarkError)> {
        self.entered()
            .filter_map(|(id, raw)| validate_mark(raw).err().map(|e| (id.clone(), e)))
            .collect()
    }

    fn valid_marks(&self) -> Vec<(EntityId, f64)> {
        self.entered()
            .filter_map(|(id, raw)| validate_mark(raw).ok().map(|m| (id.clone(), m)))
            .collect()
    }

    pub fn statistics(&self) -> Option<MarkStatistics> {
        let marks: Vec<f64> = self.valid_marks().into_iter().map(|(_, m)| m).collect();
        MarkStatistics::from_marks(&marks)
    }

    /// Upload body; refused while any cell is invalid or nothing is entered
    pub fn to_upload(&self) -> Result<MarksUpload> {
        let errors = self.errors();
        if !errors.is_empty() {
            return Err(ErpError::Validation(format!(
                "Please fix {} invalid mark(s) before submitting.",
                errors.len()
            )));
        }
        let student_marks: Vec<StudentMark> = self
            .valid_marks()
            .into_iter()
            .map(|(student_id, marks_obtained)| StudentMark { student_id, marks_obtained })
            .collect();
        if student_marks.is_empty() {
            return Err(ErpError::Validation(
                "Please enter at least one valid mark before submitting.".to_string(),
            ));
        }
        Ok(MarksUpload {
            subject_id: self.subject_id.clone(),
            exam_type: self.exam_type,
            student_marks,
        })
    }
}
