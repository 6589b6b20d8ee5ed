//! Review repository for async database operations.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewReview, Review};
use crate::schema::{reviews, services};

#[derive(Clone)]
pub struct ReviewRepository {
    pool: AsyncDbPool,
}

impl ReviewRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a review. One review per booking is enforced by a unique
    /// index on booking_id.
    pub async fn create(&self, new_review: NewReview) -> Result<Review, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(reviews::table)
            .values(&new_review)
            .returning(Review::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_booking_id(&self, booking_id: Uuid) -> Result<Option<Review>, AppError> {
        let mut conn = self.pool.get().await?;

        reviews::table
            .filter(reviews::booking_id.eq(booking_id))
            .select(Review::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists reviews for a service, newest first.
    pub async fn list_by_service(
        &self,
        service_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Review>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let items = reviews::table
            .filter(reviews::service_id.eq(service_id))
            .order(reviews::created_at.desc())
            .offset(offset)
            .limit(limit)
            .select(Review::as_select())
            .load(&mut conn)
            .await?;

        let total = reviews::table
            .filter(reviews::service_id.eq(service_id))
            .select(diesel::dsl::count_star())
            .first::<i64>(&mut conn)
            .await?;

        Ok((items, total))
    }

    /// Computes (average rating, review count) across all services of a
    /// business, for rating aggregation after a new review.
    pub async fn business_rating_stats(
        &self,
        business_id: Uuid,
    ) -> Result<(Option<BigDecimal>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        reviews::table
            .inner_join(services::table)
            .filter(services::business_id.eq(business_id))
            .select((
                diesel::dsl::avg(reviews::rating),
                diesel::dsl::count_star(),
            ))
            .first::<(Option<BigDecimal>, i64)>(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
