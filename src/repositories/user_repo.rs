//! User repository for async database operations.

use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl, scoped_futures::ScopedFutureExt};
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{Business, NewBusiness, NewUser, UpdateUser, User};
use crate::schema::{businesses, users};

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap
/// (just reference count increment). No need for `Arc<UserRepository>`.
#[derive(Clone)]
pub struct UserRepository {
    pool: AsyncDbPool,
}

impl UserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Creates a new user in the database.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(users::table)
            .values(&new_user)
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Creates a user and their business in one transaction.
    ///
    /// Provider registration must not leave an account without its business
    /// row, so both inserts commit or roll back together.
    pub async fn create_with_business(
        &self,
        new_user: NewUser,
        make_business: impl FnOnce(Uuid) -> NewBusiness + Send,
    ) -> Result<(User, Business), AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<(User, Business), AppError, _>(|conn| {
            async move {
                let user: User = diesel::insert_into(users::table)
                    .values(&new_user)
                    .returning(User::as_returning())
                    .get_result(conn)
                    .await?;

                let new_business = make_business(user.id);
                let business: Business = diesel::insert_into(businesses::table)
                    .values(&new_business)
                    .returning(Business::as_returning())
                    .get_result(conn)
                    .await?;

                Ok((user, business))
            }
            .scope_boxed()
        })
        .await
    }

    /// Finds a user by their ID.
    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<User>, AppError> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::id.eq(user_id))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Finds a user by their email address.
    pub async fn find_by_email(&self, user_email: &str) -> Result<Option<User>, AppError> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::email.eq(user_email))
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists users with pagination, newest first.
    pub async fn list_paginated(
        &self,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<User>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let items = users::table
            .order(users::created_at.desc())
            .offset(offset)
            .limit(limit)
            .select(User::as_select())
            .load(&mut conn)
            .await?;

        let total = users::table
            .select(diesel::dsl::count_star())
            .first::<i64>(&mut conn)
            .await?;

        Ok((items, total))
    }

    /// Updates a user's profile fields.
    pub async fn update_profile(
        &self,
        user_id: Uuid,
        update_data: UpdateUser,
    ) -> Result<User, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((&update_data, users::updated_at.eq(diesel::dsl::now)))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Stores (or clears) the hashed refresh token for a user.
    pub async fn set_refresh_token(
        &self,
        user_id: Uuid,
        hashed_token: Option<String>,
    ) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((
                users::hashed_refresh_token.eq(hashed_token),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Replaces a user's password hash.
    pub async fn set_password(&self, user_id: Uuid, password_hash: &str) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((
                users::password.eq(password_hash),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Records email verification time.
    pub async fn mark_email_verified(&self, user_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((
                users::email_verified_at.eq(diesel::dsl::now),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await?;

        Ok(())
    }

    /// Activates or deactivates an account.
    pub async fn set_active(&self, user_id: Uuid, active: bool) -> Result<User, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(users::table.filter(users::id.eq(user_id)))
            .set((
                users::is_active.eq(active),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .returning(User::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
