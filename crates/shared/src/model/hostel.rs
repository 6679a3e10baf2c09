//! Hostel rooms and registrations

use super::id::EntityId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: EntityId,
    pub room_number: String,
    pub room_type: String,
    pub capacity: u32,
    pub fee: f64,
}

/// Body of `POST /api/hostel-staff/rooms`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub room_number: String,
    pub room_type: String,
    pub capacity: u32,
    pub fee: f64,
}

impl Default for NewRoom {
    fn default() -> Self {
        Self {
            room_number: String::new(),
            room_type: "DOUBLE_SHARING".to_string(),
            capacity: 2,
            fee: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RegistrationStatus {
    Pending,
    Approved,
    AcceptedByStudent,
    Completed,
    Rejected,
    #[serde(other)]
    Unknown,
}

/// A student's hostel registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostelRegistration {
    pub registration_id: EntityId,
    pub student_name: String,
    pub student_email: String,
    pub room_number: Option<String>,
    pub room_type: Option<String>,
    pub status: RegistrationStatus,
    pub fee_amount: Option<f64>,
}

/// Body of the approve endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomAssignment {
    pub room_id: EntityId,
}

/// Body of the change-room endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomChange {
    pub new_room_id: EntityId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_status_wire_names() {
        let status: RegistrationStatus = serde_json::from_str("\"ACCEPTED_BY_STUDENT\"").unwrap();
        assert_eq!(status, RegistrationStatus::AcceptedByStudent);
        assert_eq!(serde_json::to_string(&RegistrationStatus::Pending).unwrap(), "\"PENDING\"");
    }

    #[test]
    fn test_change_room_body() {
        let body = RoomChange { new_room_id: EntityId::from(12) };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"newRoomId":12}"#);
    }

    #[test]
    fn test_new_room_default() {
        let room = NewRoom::default();
        assert_eq!(room.room_type, "DOUBLE_SHARING");
        assert_eq!(room.capacity, 2);
    }
}
