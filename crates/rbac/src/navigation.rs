//! Role-to-navigation mapping

use serde::Serialize;
use shared::Role;

/// One navigation link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavEntry {
    pub path: &'static str,
    pub label: &'static str,
}

const fn nav(path: &'static str, label: &'static str) -> NavEntry {
    NavEntry { path, label }
}

/// Shown to every authenticated user, always first
pub const PROFILE: NavEntry = nav("/profile", "Profile");

const SUPER_STAFF: &[NavEntry] = &[
    nav("/admin-dashboard", "Dashboard"),
    nav("/user-management", "Register Staff"),
    nav("/staff-list", "View Staff"),
    nav("/class-designer", "Curriculum Designer"),
    nav("/mentor-assignment", "Assign Mentors"),
    nav("/student-progression", "Student Progression"),
];

const ADMISSIONS_STAFF: &[NavEntry] = &[nav("/manage-admissions", "Manage Admissions")];

const ACADEMIC_ADMIN: &[NavEntry] = &[
    nav("/user-management", "Register Users"),
    nav("/class-designer", "Curriculum Designer"),
    nav("/manage-timetables", "Manage Timetables"),
    nav("/student-progression", "Student Progression"),
    nav("/view-teachers", "View Teachers"),
    nav("/view-students", "View Students"),
    nav("/mentor-assignment", "Assign Mentors"),
    nav("/manage-subjects", "Manage Subjects"),
    nav("/manage-classes", "Manage Classes"),
    nav("/manage-classrooms", "Manage Classrooms"),
];

const HOSTEL_ADMIN: &[NavEntry] = &[
    nav("/manage-hostel", "Manage Hostel"),
    nav("/hostel-residents", "View Residents"),
    nav("/manage-rooms", "Manage Rooms"),
];

const TEACHER: &[NavEntry] = &[
    nav("/my-courses", "My Courses"),
    nav("/time-table", "Time Table"),
    nav("/upload-marks", "Upload Marks"),
    nav("/risk-dashboard", "Risk Dashboard"),
];

const STUDENT: &[NavEntry] = &[
    nav("/my-courses", "My Courses"),
    nav("/time-table", "Time Table"),
    nav("/my-result", "My Result"),
    nav("/my-attendance", "My Attendance"),
    nav("/hostel", "Hostel"),
    nav("/payment-history", "Payment History"),
    nav("/fee-payment", "Pay College Fee"),
];

fn role_entries(role: Role) -> &'static [NavEntry] {
    match role {
        Role::SuperStaff => SUPER_STAFF,
        Role::AdmissionsStaff => ADMISSIONS_STAFF,
        Role::AcademicAdmin => ACADEMIC_ADMIN,
        Role::HostelAdmin => HOSTEL_ADMIN,
        Role::Teacher => TEACHER,
        Role::Student => STUDENT,
    }
}

/// Navigation for a known role (or none), Profile first
pub fn navigation_for_role(role: Option<Role>) -> Vec<NavEntry> {
    let mut entries = vec![PROFILE];
    if let Some(role) = role {
        entries.extend_from_slice(role_entries(role));
    }
    entries
}

/// Navigation for a raw role string; unrecognised roles get Profile only
pub fn navigation_for(role: &str) -> Vec<NavEntry> {
    navigation_for_role(Role::parse(role))
}
