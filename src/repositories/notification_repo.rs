//! Notification repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewNotification, Notification, NotificationStatus};
use crate::schema::notifications;

#[derive(Clone)]
pub struct NotificationRepository {
    pool: AsyncDbPool,
}

impl NotificationRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        new_notification: NewNotification,
    ) -> Result<Notification, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(notifications::table)
            .values(&new_notification)
            .returning(Notification::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(
        &self,
        notification_id: Uuid,
    ) -> Result<Option<Notification>, AppError> {
        let mut conn = self.pool.get().await?;

        notifications::table
            .filter(notifications::id.eq(notification_id))
            .select(Notification::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists a user's notifications, newest first.
    pub async fn list_by_user(
        &self,
        user_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Notification>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let items = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .order(notifications::created_at.desc())
            .offset(offset)
            .limit(limit)
            .select(Notification::as_select())
            .load(&mut conn)
            .await?;

        let total = notifications::table
            .filter(notifications::user_id.eq(user_id))
            .select(diesel::dsl::count_star())
            .first::<i64>(&mut conn)
            .await?;

        Ok((items, total))
    }

    pub async fn mark_read(&self, notification_id: Uuid) -> Result<Notification, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(notifications::table.filter(notifications::id.eq(notification_id)))
            .set((
                notifications::status.eq(NotificationStatus::Read),
                notifications::read_at.eq(diesel::dsl::now),
            ))
            .returning(Notification::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Marks all of a user's unread notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(
            notifications::table
                .filter(notifications::user_id.eq(user_id))
                .filter(notifications::status.eq(NotificationStatus::Unread)),
        )
        .set((
            notifications::status.eq(NotificationStatus::Read),
            notifications::read_at.eq(diesel::dsl::now),
        ))
        .execute(&mut conn)
        .await
        .map_err(AppError::from)
    }

    pub async fn delete(&self, notification_id: Uuid) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(notifications::table.filter(notifications::id.eq(notification_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }
}
