//! Result grading

use crate::marks::PASS_MARK;
use serde::Serialize;
use shared::{ResultSheet, SubjectResult};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Grade {
    #[serde(rename = "A+")]
    APlus,
    A,
    #[serde(rename = "B+")]
    BPlus,
    B,
    #[serde(rename = "C+")]
    CPlus,
    C,
    F,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::F => "F",
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Grade for a percentage
pub fn grade_for(percentage: f64) -> Grade {
    match percentage {
        p if p >= 90.0 => Grade::APlus,
        p if p >= 80.0 => Grade::A,
        p if p >= 70.0 => Grade::BPlus,
        p if p >= 60.0 => Grade::B,
        p if p >= 50.0 => Grade::CPlus,
        p if p >= 40.0 => Grade::C,
        _ => Grade::F,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OverallStatus {
    Pass,
    Fail,
    /// No subject results published
    Unknown,
}

impl OverallStatus {
    /// Same text as the serialized form
    pub fn as_str(&self) -> &'static str {
        match self {
            OverallStatus::Pass => "PASS",
            OverallStatus::Fail => "FAIL",
            OverallStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Percentage for one subject; 0 when the subject has no total
pub fn subject_percentage(result: &SubjectResult) -> f64 {
    if result.total_marks > 0.0 {
        result.marks_obtained / result.total_marks * 100.0
    } else {
        0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectOutcome {
    pub subject_name: String,
    pub percentage: f64,
    pub grade: Grade,
    pub passed: bool,
}

/// A result sheet with grades worked out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSummary {
    pub subjects: Vec<SubjectOutcome>,
    pub total_obtained: f64,
    pub total_marks: f64,
    pub percentage: f64,
    pub grade: Grade,
    pub status: OverallStatus,
}

impl ResultSummary {
    pub fn from_sheet(sheet: &ResultSheet) -> Self {
        let results = &sheet.subject_results;
        let total_obtained: f64 = results.iter().map(|r| r.marks_obtained).sum();
        let total_marks: f64 = results.iter().map(|r| r.total_marks).sum();
        let percentage = if total_marks > 0.0 {
            total_obtained / total_marks * 100.0
        } else {
            0.0
        };

        let subjects: Vec<SubjectOutcome> = results
            .iter()
            .map(|r| {
                let percentage = subject_percentage(r);
                SubjectOutcome {
                    subject_name: r.subject_name.clone(),
                    percentage,
                    grade: grade_for(percentage),
                    passed: percentage >= PASS_MARK,
                }
            })
            .collect();

        let status = if subjects.is_empty() {
            OverallStatus::Unknown
        } else if subjects.iter().any(|s| !s.passed) || percentage < PASS_MARK {
            OverallStatus::Fail
        } else {
            OverallStatus::Pass
        };

        Self {
            subjects,
            total_obtained,
            total_marks,
            percentage,
            grade: grade_for(percentage),
            status,
        }
    }
}
