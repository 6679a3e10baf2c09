//! # Campus ERP Academics
//!
//! Client-side rules applied to records fetched from the ERP API:
//! attendance summaries, marks entry, result grading, risk bucketing,
//! the weekly timetable grid, hostel queues, tuition fees and academic
//! administration (registrations, promotions, curricula).

pub mod administration;
pub mod attendance;
pub mod fees;
pub mod hostel;
pub mod marks;
pub mod results;
pub mod risk;
pub mod timetable;

pub use administration::{check_registration, curriculum, registrable_roles, select_students};
pub use attendance::{AttendanceRoster, AttendanceSummary};
pub use fees::{format_amount, tuition_payment};
pub use hostel::{available_rooms, awaiting_payment, pending, residents, status_label};
pub use marks::{validate_mark, MarkSheet, MarkStatistics};
pub use results::{grade_for, Grade, OverallStatus, ResultSummary};
pub use risk::{filter_by_level, RiskCounts, RiskIndicator, RiskLevel};
pub use timetable::{is_today, periods, plan_slot, sort_slots, Period, SlotRequest, TimetableGrid, WEEKDAYS};
