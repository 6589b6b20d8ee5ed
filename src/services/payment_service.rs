//! Payment recording.
//!
//! The duplicate guard is a pre-check, not a transaction: find-then-insert
//! can race, and the unique index on payments.booking_id is what catches a
//! lost race (surfacing as a 409 Duplicate).

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewPayment, Payment, PaymentStatus};
use crate::repositories::{BookingRepository, PaymentRepository};

#[derive(Clone)]
pub struct PaymentService {
    payments: PaymentRepository,
    bookings: BookingRepository,
}

impl PaymentService {
    pub fn new(payments: PaymentRepository, bookings: BookingRepository) -> Self {
        Self { payments, bookings }
    }

    /// Records a gateway-verified payment for a booking.
    ///
    /// Returns the payment plus an `already_processed` flag: when a payment
    /// already exists for the booking the existing row comes back untouched.
    pub async fn record_verified(
        &self,
        reference: &str,
        booking_id: Uuid,
        user_id: Uuid,
        amount: BigDecimal,
        currency: &str,
    ) -> AppResult<(Payment, bool)> {
        self.bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "booking".to_string(),
                field: "id".to_string(),
                value: booking_id.to_string(),
            })?;

        if let Some(existing) = self.payments.find_by_booking_id(booking_id).await? {
            tracing::warn!(
                %booking_id,
                reference,
                existing_reference = %existing.reference,
                "Duplicate payment attempt, returning existing payment"
            );
            return Ok((existing, true));
        }

        let payment = self
            .payments
            .create(NewPayment {
                reference: reference.to_string(),
                booking_id,
                user_id,
                amount,
                currency: currency.to_string(),
                status: PaymentStatus::Succeeded,
                method: None,
                paid_at: Some(Utc::now().naive_utc()),
            })
            .await?;

        tracing::info!(%booking_id, payment_id = %payment.id, "Payment recorded");
        Ok((payment, false))
    }

    /// Lists the caller's payments, newest first.
    pub async fn list_for_user(&self, user_id: Uuid) -> AppResult<Vec<Payment>> {
        self.payments.list_by_user(user_id).await
    }
}
