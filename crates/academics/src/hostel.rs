//! Hostel work queues and room availability

use shared::{HostelRegistration, RegistrationStatus, Room};

/// Registrations waiting for a staff decision
pub fn pending(registrations: &[HostelRegistration]) -> Vec<&HostelRegistration> {
    with_status(registrations, RegistrationStatus::Pending)
}

/// Registrations the student accepted and has yet to pay for
pub fn awaiting_payment(registrations: &[HostelRegistration]) -> Vec<&HostelRegistration> {
    with_status(registrations, RegistrationStatus::AcceptedByStudent)
}

/// Residents: registrations that have run their course
pub fn residents(registrations: &[HostelRegistration]) -> Vec<&HostelRegistration> {
    with_status(registrations, RegistrationStatus::Completed)
}

fn with_status(registrations: &[HostelRegistration], status: RegistrationStatus) -> Vec<&HostelRegistration> {
    registrations.iter().filter(|r| r.status == status).collect()
}

/// Rooms that can still take a student
pub fn available_rooms(rooms: &[Room]) -> Vec<&Room> {
    rooms.iter().filter(|r| r.capacity > 0).collect()
}

/// "ACCEPTED_BY_STUDENT" -> "ACCEPTED BY STUDENT"
pub fn status_label(status: RegistrationStatus) -> &'static str {
    match status {
        RegistrationStatus::Pending => "PENDING",
        RegistrationStatus::Approved => "APPROVED",
        RegistrationStatus::AcceptedByStudent => "ACCEPTED BY STUDENT",
        RegistrationStatus::Completed => "COMPLETED",
        RegistrationStatus::Rejected => "REJECTED",
        RegistrationStatus::Unknown => "UNKNOWN",
    }
}
