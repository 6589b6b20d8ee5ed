//! Business DTOs for API requests and responses.

use crate::models::{Business, UpdateBusiness};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a business.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBusinessRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 100, message = "Kind must be between 1 and 100 characters"))]
    pub kind: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    pub image: Option<String>,
}

/// Request body for updating a business.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBusinessRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 100, message = "Kind must be between 1 and 100 characters"))]
    pub kind: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub phone: Option<String>,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    pub image: Option<String>,
}

impl UpdateBusinessRequest {
    pub fn into_update_business(self) -> UpdateBusiness {
        UpdateBusiness {
            name: self.name,
            kind: self.kind,
            description: self.description,
            address: self.address,
            city: self.city,
            state: self.state,
            zip_code: self.zip_code,
            phone: self.phone,
            email: self.email,
            image: self.image,
        }
    }
}

/// Response body for business data.
#[derive(Debug, Serialize, ToSchema)]
pub struct BusinessResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub kind: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub phone: String,
    pub email: String,
    pub image: Option<String>,
    #[schema(value_type = String, example = "4.50")]
    pub rating: String,
    pub total_reviews: i32,
    pub is_verified: bool,
    pub created_at: String,
}

impl From<Business> for BusinessResponse {
    fn from(business: Business) -> Self {
        Self {
            id: business.id,
            user_id: business.user_id,
            name: business.name,
            kind: business.kind,
            description: business.description,
            address: business.address,
            city: business.city,
            state: business.state,
            zip_code: business.zip_code,
            phone: business.phone,
            email: business.email,
            image: business.image,
            rating: business.rating.to_string(),
            total_reviews: business.total_reviews,
            is_verified: business.is_verified,
            created_at: business.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}
