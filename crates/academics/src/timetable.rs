//! Weekly timetable grid

use chrono::{Datelike, NaiveDate, NaiveTime};
use shared::{DayOfWeek, EntityId, ErpError, NewTimetableSlot, Result, TeacherSummary, TimetableSlot};

/// Teaching days shown as grid columns
pub const WEEKDAYS: [DayOfWeek; 5] = [
    DayOfWeek::Monday,
    DayOfWeek::Tuesday,
    DayOfWeek::Wednesday,
    DayOfWeek::Thursday,
    DayOfWeek::Friday,
];

/// Starting hours of the one-hour periods (lunch 13:00-14:00)
pub const PERIOD_HOURS: [u32; 8] = [9, 10, 11, 12, 14, 15, 16, 17];

/// A one-hour grid row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl Period {
    /// "09:00 - 10:00"
    pub fn label(&self) -> String {
        format!("{} - {}", self.start.format("%H:%M"), self.end.format("%H:%M"))
    }
}

fn hour(h: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, 0, 0).unwrap_or_default()
}

/// The eight grid rows, in display order
pub fn periods() -> [Period; 8] {
    PERIOD_HOURS.map(|h| Period { start: hour(h), end: hour(h + 1) })
}

/// Order slots by weekday, then start time
pub fn sort_slots(slots: &mut [TimetableSlot]) {
    slots.sort_by(|a, b| {
        a.day_of_week
            .cmp(&b.day_of_week)
            .then_with(|| a.start_time.cmp(&b.start_time))
    });
}

pub fn is_today(day: DayOfWeek, today: NaiveDate) -> bool {
    DayOfWeek::from(today.weekday()) == day
}

/// Slots laid out by (day, start time)
#[derive(Debug, Clone, Default)]
pub struct TimetableGrid {
    slots: Vec<TimetableSlot>,
}

impl TimetableGrid {
    pub fn new(mut slots: Vec<TimetableSlot>) -> Self {
        sort_slots(&mut slots);
        Self { slots }
    }

    /// Slot occupying a grid cell
    pub fn cell(&self, day: DayOfWeek, start: NaiveTime) -> Option<&TimetableSlot> {
        self.slots
            .iter()
            .find(|s| s.day_of_week == day && s.start_time == start)
    }

    /// Add a newly created slot, keeping the order
    pub fn insert(&mut self, slot: TimetableSlot) {
        self.slots.push(slot);
        sort_slots(&mut self.slots);
    }

    pub fn slots(&self) -> &[TimetableSlot] {
        &self.slots
    }

    pub fn for_day(&self, day: DayOfWeek) -> impl Iterator<Item = &TimetableSlot> {
        self.slots.iter().filter(move |s| s.day_of_week == day)
    }

    /// Rows of the grid: each period with one optional cell per weekday
    pub fn rows(&self) -> Vec<(Period, [Option<&TimetableSlot>; 5])> {
        periods()
            .into_iter()
            .map(|p| (p, WEEKDAYS.map(|day| self.cell(day, p.start))))
            .collect()
    }

    /// Slots that fall outside the fixed grid (weekends, odd start times)
    pub fn off_grid(&self) -> Vec<&TimetableSlot> {
        self.slots
            .iter()
            .filter(|s| !WEEKDAYS.contains(&s.day_of_week) || !periods().iter().any(|p| p.start == s.start_time))
            .collect()
    }
}

/// A class to schedule into one free grid cell
#[derive(Debug, Clone)]
pub struct SlotRequest<'a> {
    pub class_id: EntityId,
    pub day: DayOfWeek,
    pub start: NaiveTime,
    pub subject_id: EntityId,
    pub teacher: &'a TeacherSummary,
    pub classroom_id: Option<EntityId>,
}

/// Body for a new slot in `grid`; it runs for the whole period
pub fn plan_slot(grid: &TimetableGrid, request: SlotRequest<'_>) -> Result<NewTimetableSlot> {
    if !WEEKDAYS.contains(&request.day) {
        return Err(ErpError::Validation(format!("Classes run Monday to Friday, not {}", request.day)));
    }
    let period = periods()
        .into_iter()
        .find(|p| p.start == request.start)
        .ok_or_else(|| {
            ErpError::Validation(format!("No period starts at {}", request.start.format("%H:%M")))
        })?;
    if let Some(taken) = grid.cell(request.day, period.start) {
        return Err(ErpError::Validation(format!(
            "{} {} is taken by {}",
            request.day.short(),
            period.label(),
            taken.subject.name
        )));
    }
    if !request.teacher.teaches(&request.subject_id) {
        return Err(ErpError::Validation(format!(
            "{} does not teach subject {}",
            request.teacher.full_name, request.subject_id
        )));
    }

    Ok(NewTimetableSlot {
        day_of_week: request.day,
        start_time: period.start,
        end_time: period.end,
        class_id: request.class_id,
        subject_id: request.subject_id,
        teacher_id: request.teacher.user_id.clone(),
        classroom_id: request.classroom_id,
    })
}
