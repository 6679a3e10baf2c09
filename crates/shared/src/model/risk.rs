//! Student risk profiles

use super::id::EntityId;
use serde::{Deserialize, Serialize};

/// Row of the teacher's risk dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskProfile {
    pub student_id: EntityId,
    pub student_name: String,
    /// Model output in `[0, 1]`
    pub risk_probability: f64,
}

/// Full risk profile of one student
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskDetail {
    pub student_id: EntityId,
    pub student_name: String,
    pub risk_probability: f64,
    pub attendance_percentage: f64,
    pub last_exam_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_detail() {
        let detail: RiskDetail = serde_json::from_str(
            r#"{"studentId": "s-4", "studentName": "Ravi", "riskProbability": 0.81,
                "attendancePercentage": 62.5, "lastExamScore": 38}"#,
        )
        .unwrap();
        assert_eq!(detail.last_exam_score, 38.0);
    }

    #[test]
    fn test_detail_requires_indicators() {
        let json = r#"{"studentId": "s-4", "studentName": "Ravi", "riskProbability": 0.81}"#;
        assert!(serde_json::from_str::<RiskDetail>(json).is_err());
        assert!(serde_json::from_str::<RiskProfile>(json).is_ok());
    }
}
