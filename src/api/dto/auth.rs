//! Authentication DTOs for API requests and responses.

use super::business::BusinessResponse;
use super::user::UserResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for customer registration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 72)]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
}

/// Request body for service-provider registration.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RegisterProviderRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 72)]
    pub password: String,
    #[validate(length(min = 1, max = 100, message = "First name must be between 1 and 100 characters"))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Last name must be between 1 and 100 characters"))]
    pub last_name: String,
    #[validate(length(max = 20, message = "Phone must be at most 20 characters"))]
    pub phone: Option<String>,
    #[validate(length(min = 1, max = 255, message = "Business name must be between 1 and 255 characters"))]
    pub business_name: Option<String>,
    pub business_kind: Option<String>,
    pub business_description: Option<String>,
    pub business_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
}

/// Request body for login.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(format = "password")]
    pub password: String,
}

/// Request body for refreshing tokens.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 1, message = "Refresh token is required"))]
    pub refresh_token: String,
}

/// Request body for starting a password reset.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ForgotPasswordRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
}

/// Request body for completing a password reset.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ResetPasswordRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
    #[validate(length(min = 8, max = 72, message = "Password must be between 8 and 72 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 72)]
    pub new_password: String,
}

/// Request body for verifying an email address.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct VerifyEmailRequest {
    #[validate(length(min = 1, message = "Token is required"))]
    pub token: String,
}

/// Request body for resending a verification email.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ResendVerificationRequest {
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
}

/// Response body for login and customer registration.
#[derive(Debug, Serialize, ToSchema)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub message: String,
}

/// Response body for provider registration (includes the new business).
#[derive(Debug, Serialize, ToSchema)]
pub struct ProviderAuthResponse {
    pub user: UserResponse,
    pub business: BusinessResponse,
    pub access_token: String,
    pub refresh_token: String,
    pub message: String,
}

/// Response body for token refresh.
#[derive(Debug, Serialize, ToSchema)]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}
