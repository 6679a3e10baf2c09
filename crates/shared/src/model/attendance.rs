//! Attendance records

use super::id::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AttendanceStatus {
    Present,
    Absent,
    Late,
}

impl AttendanceStatus {
    /// Present and late both count as attended
    pub fn counts_as_attended(&self) -> bool {
        matches!(self, AttendanceStatus::Present | AttendanceStatus::Late)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AttendanceStatus::Present => "PRESENT",
            AttendanceStatus::Absent => "ABSENT",
            AttendanceStatus::Late => "LATE",
        }
    }
}

impl std::fmt::Display for AttendanceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A student's attendance for one class session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    pub attendance_id: EntityId,
    pub date: chrono::NaiveDate,
    pub subject_name: String,
    pub status: AttendanceStatus,
}

/// Body of `POST /api/teacher/attendance`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSubmission {
    pub timetable_slot_id: EntityId,
    pub student_statuses: BTreeMap<EntityId, AttendanceStatus>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_record() {
        let record: AttendanceRecord = serde_json::from_str(
            r#"{"attendanceId": 90, "date": "2025-08-14", "subjectName": "Compilers", "status": "LATE"}"#,
        )
        .unwrap();
        assert_eq!(record.status, AttendanceStatus::Late);
        assert!(record.status.counts_as_attended());
        assert!(!AttendanceStatus::Absent.counts_as_attended());
    }

    #[test]
    fn test_submission_body() {
        let mut statuses = BTreeMap::new();
        statuses.insert(EntityId::from("s-1"), AttendanceStatus::Present);
        statuses.insert(EntityId::from("s-2"), AttendanceStatus::Absent);
        let body = AttendanceSubmission { timetable_slot_id: EntityId::from(7), student_statuses: statuses };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["timetableSlotId"], 7);
        assert_eq!(value["studentStatuses"]["s-1"], "PRESENT");
        assert_eq!(value["studentStatuses"]["s-2"], "ABSENT");
    }
}
