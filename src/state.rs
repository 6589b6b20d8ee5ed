//! Application state for Axum web framework.
//!
//! Contains shared services and resources that are accessible
//! across all request handlers.

use std::sync::Arc;

use crate::config::{JwtConfig, Settings};
use crate::db::AsyncDbPool;
use crate::external::PaystackClient;
use crate::repositories::Repositories;
use crate::services::Services;
use crate::services::notifications::{
    EmailProvider, NotificationProvider, NotificationService, SmsProvider,
};

/// Application state containing all shared services and resources.
///
/// This struct is designed to be used with Axum's State extractor.
/// Cloning is cheap since Services and AsyncDbPool use Arc internally.
#[derive(Clone)]
pub struct AppState {
    /// All business logic services
    pub services: Services,
    /// Direct access to the database connection pool
    pub db_pool: AsyncDbPool,
    /// JWT configuration for token generation and validation
    pub jwt_config: JwtConfig,
    /// Payment gateway client
    pub paystack: PaystackClient,
}

impl AppState {
    /// Creates a new AppState from a database connection pool and settings.
    ///
    /// Initializes repositories, notification channels (only the enabled
    /// ones), services and the payment gateway client.
    pub fn new(pool: AsyncDbPool, settings: &Settings) -> Self {
        let repos = Repositories::new(pool.clone());

        let mut providers: Vec<Arc<dyn NotificationProvider>> = Vec::new();
        if settings.email.enabled {
            providers.push(Arc::new(EmailProvider::new(settings.email.clone())));
        }
        if settings.sms.enabled {
            providers.push(Arc::new(SmsProvider::new(settings.sms.clone())));
        }

        let notifications = NotificationService::new(repos.notifications.clone(), providers);
        let services = Services::new(repos, notifications);

        Self {
            services,
            db_pool: pool,
            jwt_config: settings.jwt.clone(),
            paystack: PaystackClient::new(settings.paystack.clone()),
        }
    }
}
