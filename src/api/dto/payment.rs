//! Payment DTOs for API requests and responses.

use crate::external::paystack::PaystackCard;
use crate::models::{Payment, PaymentMethod, PaymentStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Request body for initiating an M-Pesa charge.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct MpesaChargeRequest {
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
    #[validate(length(min = 7, max = 20, message = "Phone must be between 7 and 20 characters"))]
    pub phone: String,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
}

/// Request body for initiating a card charge.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CardChargeRequest {
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
    #[validate(email(message = "Invalid email format"))]
    #[schema(format = "email")]
    pub email: String,
    pub card: PaystackCard,
}

/// Request body for submitting a charge OTP.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct SubmitOtpRequest {
    #[validate(length(min = 1, message = "Reference is required"))]
    pub reference: String,
    #[validate(length(min = 1, message = "OTP is required"))]
    pub otp: String,
}

/// Request body for verifying a payment by gateway reference.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct VerifyPaymentRequest {
    #[validate(length(min = 1, message = "Reference is required"))]
    pub reference: String,
    pub booking_id: Option<Uuid>,
    #[validate(range(min = 0.01, message = "Amount must be positive"))]
    pub amount: f64,
}

/// Response body for payment data.
#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentResponse {
    pub id: Uuid,
    pub reference: String,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, example = "49.99")]
    pub amount: String,
    pub currency: String,
    pub status: PaymentStatus,
    pub method: Option<PaymentMethod>,
    pub paid_at: Option<String>,
    pub created_at: String,
}

impl From<Payment> for PaymentResponse {
    fn from(payment: Payment) -> Self {
        Self {
            id: payment.id,
            reference: payment.reference,
            booking_id: payment.booking_id,
            user_id: payment.user_id,
            amount: payment.amount.to_string(),
            currency: payment.currency,
            status: payment.status,
            method: payment.method,
            paid_at: payment
                .paid_at
                .map(|t| t.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()),
            created_at: payment.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

/// Response body for the verify endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyPaymentResponse {
    pub success: bool,
    pub message: String,
    pub data: PaymentResponse,
    pub already_processed: bool,
}
