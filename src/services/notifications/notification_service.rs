//! Notification service for business logic.
//!
//! Persists in-app notification rows and relays them to the configured
//! external channels. External delivery never fails the caller.

use super::provider::{NotificationMessage, NotificationProvider, Recipient};
use crate::error::{AppError, AppResult};
use crate::models::{NewNotification, Notification};
use crate::repositories::NotificationRepository;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
    providers: Arc<Vec<Arc<dyn NotificationProvider>>>,
}

impl NotificationService {
    pub fn new(
        repo: NotificationRepository,
        providers: Vec<Arc<dyn NotificationProvider>>,
    ) -> Self {
        Self {
            repo,
            providers: Arc::new(providers),
        }
    }

    /// Persists a notification row and relays it to external channels.
    ///
    /// The row insert is the source of truth; channel delivery is
    /// best-effort and failures are only logged.
    pub async fn push(
        &self,
        new_notification: NewNotification,
        recipient: Recipient,
    ) -> AppResult<Notification> {
        let notification = self.repo.create(new_notification).await?;

        let message = NotificationMessage {
            title: Some(notification.title.clone()),
            body: notification.message.clone(),
            email: recipient.email,
            phone: recipient.phone,
            metadata: HashMap::new(),
        };
        self.dispatch(&message).await;

        Ok(notification)
    }

    /// Sends over external channels only, without persisting a row.
    ///
    /// Used for transactional mail (verification links, password resets)
    /// that has no place in the in-app notification feed.
    pub async fn send_direct(&self, recipient: Recipient, title: &str, body: &str) {
        let message = NotificationMessage {
            title: Some(title.to_string()),
            body: body.to_string(),
            email: recipient.email,
            phone: recipient.phone,
            metadata: HashMap::new(),
        };
        self.dispatch(&message).await;
    }

    async fn dispatch(&self, message: &NotificationMessage) {
        for provider in self.providers.iter() {
            match provider.send(message).await {
                Ok(result) if !result.success => {
                    tracing::warn!(
                        provider = provider.name(),
                        status = ?result.status_code,
                        response = ?result.response,
                        "Notification delivery failed"
                    );
                }
                Ok(_) => {}
                Err(e) => {
                    tracing::warn!(
                        provider = provider.name(),
                        error = %e,
                        "Notification delivery errored"
                    );
                }
            }
        }
    }

    /// Lists a user's notifications with pagination.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Notification>, i64)> {
        self.repo.list_by_user(user_id, offset, limit).await
    }

    /// Marks one notification as read. Only the owner may do this.
    pub async fn mark_read(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification> {
        let notification = self.get_owned(id, user_id).await?;
        self.repo.mark_read(notification.id).await
    }

    /// Marks all of a user's unread notifications as read.
    pub async fn mark_all_read(&self, user_id: Uuid) -> AppResult<usize> {
        self.repo.mark_all_read(user_id).await
    }

    /// Deletes a notification. Only the owner may do this.
    pub async fn delete(&self, id: Uuid, user_id: Uuid) -> AppResult<()> {
        let notification = self.get_owned(id, user_id).await?;
        self.repo.delete(notification.id).await?;
        Ok(())
    }

    async fn get_owned(&self, id: Uuid, user_id: Uuid) -> AppResult<Notification> {
        let notification =
            self.repo
                .find_by_id(id)
                .await?
                .ok_or_else(|| AppError::NotFound {
                    entity: "notification".to_string(),
                    field: "id".to_string(),
                    value: id.to_string(),
                })?;

        if notification.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You do not have permission to access this notification".to_string(),
            });
        }

        Ok(notification)
    }
}
