//! Payment repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewPayment, Payment};
use crate::schema::payments;

#[derive(Clone)]
pub struct PaymentRepository {
    pool: AsyncDbPool,
}

impl PaymentRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a payment row.
    ///
    /// The unique index on booking_id makes a concurrent duplicate insert
    /// fail with a unique violation, which converts to a Duplicate error.
    pub async fn create(&self, new_payment: NewPayment) -> Result<Payment, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(payments::table)
            .values(&new_payment)
            .returning(Payment::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, payment_id: Uuid) -> Result<Option<Payment>, AppError> {
        let mut conn = self.pool.get().await?;

        payments::table
            .filter(payments::id.eq(payment_id))
            .select(Payment::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds the payment recorded for a booking, if any.
    pub async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<Payment>, AppError> {
        let mut conn = self.pool.get().await?;

        payments::table
            .filter(payments::booking_id.eq(booking_id))
            .select(Payment::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists a user's payments, newest first.
    pub async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<Payment>, AppError> {
        let mut conn = self.pool.get().await?;

        payments::table
            .filter(payments::user_id.eq(user_id))
            .order(payments::created_at.desc())
            .select(Payment::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
