//! `/api/hostel-staff/*` - rooms and registrations

use crate::client::ApiClient;
use shared::{EntityId, HostelRegistration, NewRoom, Result, Room, RoomAssignment, RoomChange};

pub const ROOMS: &str = "/api/hostel-staff/rooms";
pub const REGISTRATIONS: &str = "/api/hostel-staff/registrations";

impl ApiClient {
    pub async fn rooms(&self) -> Result<Vec<Room>> {
        self.get_json(ROOMS).await
    }

    pub async fn create_room(&self, room: &NewRoom) -> Result<Room> {
        self.post_json(ROOMS, room).await
    }

    pub async fn hostel_registrations(&self) -> Result<Vec<HostelRegistration>> {
        self.get_json(REGISTRATIONS).await
    }

    /// Approve a registration into a room
    pub async fn approve_registration(&self, registration_id: &EntityId, room_id: &EntityId) -> Result<String> {
        let path = format!("{}/{}/approve", REGISTRATIONS, registration_id);
        self.post_text(&path, &RoomAssignment { room_id: room_id.clone() }).await
    }

    pub async fn change_room(&self, registration_id: &EntityId, new_room_id: &EntityId) -> Result<String> {
        let path = format!("{}/{}/change-room", REGISTRATIONS, registration_id);
        let request = self
            .authed(reqwest::Method::PUT, &path)?
            .json(&RoomChange { new_room_id: new_room_id.clone() });
        self.send_text(&path, request).await
    }
}
