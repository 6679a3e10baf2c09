//! `/api/admin/*` - super-staff analytics and staff management

use crate::client::ApiClient;
use shared::{AdminAnalytics, EntityId, RegisteredUser, Result, StaffMember, UserRegistration};

pub const ANALYTICS: &str = "/api/admin/analytics";
pub const STAFF: &str = "/api/admin/staff";
pub const REGISTER: &str = "/api/admin/register";

impl ApiClient {
    pub async fn analytics(&self) -> Result<AdminAnalytics> {
        self.get_json(ANALYTICS).await
    }

    pub async fn staff(&self) -> Result<Vec<StaffMember>> {
        self.get_json(STAFF).await
    }

    pub async fn delete_staff(&self, user_id: &EntityId) -> Result<String> {
        self.delete(&format!("{}/{}", STAFF, user_id)).await
    }

    /// Super-staff registration of staff accounts
    pub async fn register_staff(&self, registration: &UserRegistration) -> Result<RegisteredUser> {
        self.post_json(REGISTER, registration).await
    }
}
