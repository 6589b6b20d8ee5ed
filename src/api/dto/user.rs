//! User-related DTOs for API requests and responses.

use crate::models::{Role, UpdateUser, User};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for updating the caller's profile.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: Option<String>,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}

impl UpdateProfileRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
            avatar: self.avatar,
            address: self.address,
        }
    }
}

/// Response body for user data (excludes password and token hashes).
#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub email_verified: bool,
    pub address: Option<String>,
    pub loyalty_tier: String,
    pub loyalty_points: i32,
    pub total_bookings: i32,
    #[schema(value_type = String, example = "125.50")]
    pub total_spent: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            avatar: user.avatar,
            role: user.role,
            is_active: user.is_active,
            email_verified: user.email_verified_at.is_some(),
            address: user.address,
            loyalty_tier: user.loyalty_tier,
            loyalty_points: user.loyalty_points,
            total_bookings: user.total_bookings,
            total_spent: user.total_spent.to_string(),
            created_at: user.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            updated_at: user.updated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}
