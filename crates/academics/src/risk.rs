//! Risk bucketing for the teacher's risk dashboard

use serde::Serialize;
use shared::{RiskDetail, RiskProfile};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum RiskLevel {
    High,
    Medium,
    Low,
}

impl RiskLevel {
    pub const ALL: [RiskLevel; 3] = [RiskLevel::High, RiskLevel::Medium, RiskLevel::Low];

    /// Bucket for a model probability
    pub fn from_probability(p: f64) -> Self {
        if p >= 0.75 {
            RiskLevel::High
        } else if p >= 0.50 {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn of(profile: &RiskProfile) -> Self {
        Self::from_probability(profile.risk_probability)
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::High => write!(f, "High"),
            RiskLevel::Medium => write!(f, "Medium"),
            RiskLevel::Low => write!(f, "Low"),
        }
    }
}

impl FromStr for RiskLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(RiskLevel::High),
            "medium" => Ok(RiskLevel::Medium),
            "low" => Ok(RiskLevel::Low),
            other => Err(format!("Unknown risk level '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RiskCounts {
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskCounts {
    pub fn tally(profiles: &[RiskProfile]) -> Self {
        profiles.iter().fold(Self::default(), |mut counts, p| {
            match RiskLevel::of(p) {
                RiskLevel::High => counts.high += 1,
                RiskLevel::Medium => counts.medium += 1,
                RiskLevel::Low => counts.low += 1,
            }
            counts
        })
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

/// Profiles in one bucket, or all of them
pub fn filter_by_level(profiles: &[RiskProfile], level: Option<RiskLevel>) -> Vec<&RiskProfile> {
    profiles
        .iter()
        .filter(|p| level.map_or(true, |l| RiskLevel::of(p) == l))
        .collect()
}

/// Qualitative reading of one indicator in a risk detail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskIndicator {
    Excellent,
    Good,
    Average,
    Poor,
}

impl RiskIndicator {
    pub fn for_attendance(percentage: f64) -> Self {
        if percentage >= 85.0 {
            RiskIndicator::Excellent
        } else if percentage >= 75.0 {
            RiskIndicator::Good
        } else {
            RiskIndicator::Poor
        }
    }

    pub fn for_exam(score: f64) -> Self {
        if score >= 80.0 {
            RiskIndicator::Excellent
        } else if score >= 60.0 {
            RiskIndicator::Average
        } else {
            RiskIndicator::Poor
        }
    }

    /// (attendance, exam) readings for a detail record
    pub fn of(detail: &RiskDetail) -> (Self, Self) {
        (
            Self::for_attendance(detail.attendance_percentage),
            Self::for_exam(detail.last_exam_score),
        )
    }
}

impl fmt::Display for RiskIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskIndicator::Excellent => "excellent",
            RiskIndicator::Good => "good",
            RiskIndicator::Average => "average",
            RiskIndicator::Poor => "poor",
        };
        f.write_str(label)
    }
}
