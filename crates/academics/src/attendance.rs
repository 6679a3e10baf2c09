//! Attendance summaries and roll-call rosters

use serde::Serialize;
use shared::{AttendanceRecord, AttendanceStatus, AttendanceSubmission, EntityId, StudentSummary};
use std::collections::BTreeMap;

/// A student's attendance over a set of records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceSummary {
    pub total: usize,
    pub present: usize,
    pub absent: usize,
    /// Rounded to the nearest whole percent; 0 with no records
    pub percentage: u32,
}

impl AttendanceSummary {
    /// Present and late sessions both count as attended
    pub fn from_records(records: &[AttendanceRecord]) -> Self {
        let total = records.len();
        let present = records.iter().filter(|r| r.status.counts_as_attended()).count();
        Self {
            total,
            present,
            absent: total - present,
            percentage: percentage(present, total),
        }
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (100.0 * part as f64 / total as f64).round() as u32
}

/// Roll call for one timetable slot; every student starts out present
#[derive(Debug, Clone)]
pub struct AttendanceRoster {
    slot_id: EntityId,
    statuses: BTreeMap<EntityId, AttendanceStatus>,
}

impl AttendanceRoster {
    pub fn new(slot_id: EntityId, students: &[StudentSummary]) -> Self {
        let statuses = students
            .iter()
            .map(|s| (s.user_id.clone(), AttendanceStatus::Present))
            .collect();
        Self { slot_id, statuses }
    }

    /// Set one student's status; false when the student is not on the roster
    pub fn mark(&mut self, student_id: &EntityId, status: AttendanceStatus) -> bool {
        match self.statuses.get_mut(student_id) {
            Some(current) => {
                *current = status;
                true
            }
            None => false,
        }
    }

    pub fn status(&self, student_id: &EntityId) -> Option<AttendanceStatus> {
        self.statuses.get(student_id).copied()
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    pub fn present_count(&self) -> usize {
        self.statuses.values().filter(|s| **s == AttendanceStatus::Present).count()
    }

    pub fn into_submission(self) -> AttendanceSubmission {
        AttendanceSubmission {
            timetable_slot_id: self.slot_id,
            student_statuses: self.statuses,
        }
    }
}
