//! Classes, subjects, classrooms, timetable slots and course material

use super::id::EntityId;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A class section, e.g. "BSc CS Year 1 - A"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SchoolClass {
    pub class_id: EntityId,
    pub grade_level: String,
    pub section: String,
    pub section_capacity: Option<u32>,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

impl SchoolClass {
    /// "grade - section" label used in lists and timetable cells
    pub fn label(&self) -> String {
        format!("{} - {}", self.grade_level, self.section)
    }
}

/// Body for creating or updating a class
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassForm {
    pub grade_level: String,
    pub section: String,
    pub section_capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub subject_id: EntityId,
    pub name: String,
    pub code: Option<String>,
}

/// Body for creating or updating a subject
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectForm {
    pub name: String,
    pub code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    pub classroom_id: EntityId,
    pub room_number: String,
    pub capacity: Option<u32>,
}

/// Body for creating or updating a classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassroomForm {
    pub room_number: String,
    pub capacity: u32,
}

/// Day of the week as the timetable API spells it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayOfWeek::Monday => "MONDAY",
            DayOfWeek::Tuesday => "TUESDAY",
            DayOfWeek::Wednesday => "WEDNESDAY",
            DayOfWeek::Thursday => "THURSDAY",
            DayOfWeek::Friday => "FRIDAY",
            DayOfWeek::Saturday => "SATURDAY",
            DayOfWeek::Sunday => "SUNDAY",
        }
    }

    /// Three-letter column heading
    pub fn short(&self) -> &'static str {
        &self.as_str()[..3]
    }
}

impl From<chrono::Weekday> for DayOfWeek {
    fn from(day: chrono::Weekday) -> Self {
        match day {
            chrono::Weekday::Mon => DayOfWeek::Monday,
            chrono::Weekday::Tue => DayOfWeek::Tuesday,
            chrono::Weekday::Wed => DayOfWeek::Wednesday,
            chrono::Weekday::Thu => DayOfWeek::Thursday,
            chrono::Weekday::Fri => DayOfWeek::Friday,
            chrono::Weekday::Sat => DayOfWeek::Saturday,
            chrono::Weekday::Sun => DayOfWeek::Sunday,
        }
    }
}

impl FromStr for DayOfWeek {
    type Err = String;

    /// Full name or three-letter form, any case
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        ALL_DAYS
            .into_iter()
            .find(|day| day.as_str() == wanted || day.short() == wanted)
            .ok_or_else(|| format!("Unknown day '{}'", s))
    }
}

const ALL_DAYS: [DayOfWeek; 7] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
    DayOfWeek::Saturday,
    DayOfWeek::Sunday,
];

impl fmt::Display for DayOfWeek {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Teacher as embedded in timetable slots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherRef {
    pub user_id: EntityId,
    pub full_name: String,
}

/// One occupied cell of a weekly timetable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimetableSlot {
    pub slot_id: EntityId,
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub subject: Subject,
    pub teacher: TeacherRef,
    pub school_class: SchoolClass,
    pub classroom: Option<Classroom>,
}

/// Body of `POST /api/staff/timetable`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTimetableSlot {
    pub day_of_week: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_id: EntityId,
    pub subject_id: EntityId,
    pub teacher_id: EntityId,
    pub classroom_id: Option<EntityId>,
}

/// Subject/teacher pairing in a class curriculum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDesignEntry {
    pub subject_id: EntityId,
    pub teacher_id: EntityId,
}

/// Uploaded lecture material for a class subject
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseModule {
    pub module_id: EntityId,
    pub title: String,
    pub description: Option<String>,
    pub file_url: Option<String>,
    pub created_by: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub assignment_id: EntityId,
    pub title: String,
    pub instructions: Option<String>,
    pub due_date: Option<String>,
    pub created_by: Option<String>,
    pub assigned_at: Option<String>,
}

/// A class with its subjects, as listed on a student's course page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolledCourse {
    pub class_id: EntityId,
    pub grade_level: String,
    pub section: String,
    #[serde(default)]
    pub subjects: Vec<Subject>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_timetable_slot() {
        let json = r#"{
            "slotId": 5,
            "dayOfWeek": "TUESDAY",
            "startTime": "09:00:00",
            "endTime": "10:00:00",
            "subject": {"subjectId": 2, "name": "Operating Systems"},
            "teacher": {"userId": "t-9", "fullName": "Leela Das"},
            "schoolClass": {"classId": 1, "gradeLevel": "BSc CS Year 2", "section": "B"},
            "classroom": {"classroomId": 3, "roomNumber": "LH-101"}
        }"#;
        let slot: TimetableSlot = serde_json::from_str(json).unwrap();
        assert_eq!(slot.day_of_week, DayOfWeek::Tuesday);
        assert_eq!(slot.start_time, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(slot.school_class.label(), "BSc CS Year 2 - B");
        assert_eq!(slot.classroom.unwrap().room_number, "LH-101");
    }

    #[test]
    fn test_slot_without_classroom() {
        let json = r#"{
            "slotId": 6, "dayOfWeek": "FRIDAY", "startTime": "14:00:00", "endTime": "15:00:00",
            "subject": {"subjectId": 2, "name": "OS"},
            "teacher": {"userId": "t-9", "fullName": "Leela Das"},
            "schoolClass": {"classId": 1, "gradeLevel": "Y2", "section": "B"}
        }"#;
        let slot: TimetableSlot = serde_json::from_str(json).unwrap();
        assert!(slot.classroom.is_none());
    }

    #[test]
    fn test_day_of_week() {
        assert_eq!(DayOfWeek::from(chrono::Weekday::Wed), DayOfWeek::Wednesday);
        assert_eq!(DayOfWeek::Thursday.short(), "THU");
        assert_eq!(serde_json::to_string(&DayOfWeek::Monday).unwrap(), "\"MONDAY\"");
    }

    #[test]
    fn test_parse_day() {
        assert_eq!("monday".parse::<DayOfWeek>().unwrap(), DayOfWeek::Monday);
        assert_eq!("Thu".parse::<DayOfWeek>().unwrap(), DayOfWeek::Thursday);
        assert_eq!(" SUNDAY ".parse::<DayOfWeek>().unwrap(), DayOfWeek::Sunday);
        assert!("Mo".parse::<DayOfWeek>().is_err());
        assert!("someday".parse::<DayOfWeek>().is_err());
    }

    #[test]
    fn test_new_slot_serializes_camel_case() {
        let slot = NewTimetableSlot {
            day_of_week: DayOfWeek::Monday,
            start_time: NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            class_id: EntityId::from(1),
            subject_id: EntityId::from(2),
            teacher_id: EntityId::from("t-9"),
            classroom_id: None,
        };
        let value = serde_json::to_value(&slot).unwrap();
        assert_eq!(value["dayOfWeek"], "MONDAY");
        assert_eq!(value["startTime"], "11:00:00");
        assert_eq!(value["classId"], 1);
        assert!(value["classroomId"].is_null());
    }
}
