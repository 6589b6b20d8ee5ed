//! Business repository for async database operations.

use bigdecimal::BigDecimal;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Business, NewBusiness, UpdateBusiness};
use crate::schema::businesses;

#[derive(Clone)]
pub struct BusinessRepository {
    pool: AsyncDbPool,
}

impl BusinessRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_business: NewBusiness) -> Result<Business, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(businesses::table)
            .values(&new_business)
            .returning(Business::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, business_id: Uuid) -> Result<Option<Business>, AppError> {
        let mut conn = self.pool.get().await?;

        businesses::table
            .filter(businesses::id.eq(business_id))
            .select(Business::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds the business owned by a user (one business per provider account).
    pub async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Business>, AppError> {
        let mut conn = self.pool.get().await?;

        businesses::table
            .filter(businesses::user_id.eq(user_id))
            .select(Business::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Business>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let items = businesses::table
            .order(businesses::created_at.desc())
            .offset(offset)
            .limit(limit)
            .select(Business::as_select())
            .load(&mut conn)
            .await?;

        let total = businesses::table
            .select(diesel::dsl::count_star())
            .first::<i64>(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn update(
        &self,
        business_id: Uuid,
        update_data: UpdateBusiness,
    ) -> Result<Business, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(businesses::table.filter(businesses::id.eq(business_id)))
            .set((&update_data, businesses::updated_at.eq(diesel::dsl::now)))
            .returning(Business::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Writes recomputed review aggregates after a new review lands.
    pub async fn update_rating(
        &self,
        business_id: Uuid,
        rating: BigDecimal,
        total_reviews: i32,
    ) -> Result<Business, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(businesses::table.filter(businesses::id.eq(business_id)))
            .set((
                businesses::rating.eq(rating),
                businesses::total_reviews.eq(total_reviews),
                businesses::updated_at.eq(diesel::dsl::now),
            ))
            .returning(Business::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
