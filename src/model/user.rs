use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identity details used to fill in a submission and the admin user picker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub id: u64,
    pub display_name: Option<String>,
    /// login name, also used as the employee id on requests
    pub email: String,
    pub department: Option<String>,
    pub manager_id: Option<u64>,
}

/// Stored login record, never serialized out.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct UserCredentials {
    pub id: u64, // 👈 matches BIGINT UNSIGNED
    pub username: String,
    pub password: String,
    pub role_id: u8,
    pub is_active: bool,
}
