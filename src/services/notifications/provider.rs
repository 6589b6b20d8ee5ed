//! Core notification provider trait and types.
//!
//! Providers deliver a message over an external channel (email, SMS).
//! Delivery is always best-effort: callers log failures and move on, they
//! never fail the operation that triggered the notification.

use crate::error::AppResult;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Where an outbound message should be delivered
#[derive(Debug, Clone, Default)]
pub struct Recipient {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Message to be sent via a notification provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationMessage {
    /// Message title/subject (optional for some providers)
    pub title: Option<String>,
    /// Message body/content (required)
    pub body: String,
    /// Recipient email address, when known
    pub email: Option<String>,
    /// Recipient phone number, when known
    pub phone: Option<String>,
    /// Additional metadata for provider-specific data
    pub metadata: HashMap<String, String>,
}

/// Result of a notification send attempt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationResult {
    /// Whether send was successful
    pub success: bool,
    /// HTTP status code or provider-specific status
    pub status_code: Option<u16>,
    /// Response body or error message
    pub response: Option<String>,
    /// Time taken for the operation in milliseconds
    pub duration_ms: u64,
}

impl NotificationResult {
    /// A send that was skipped before any request went out (e.g. the
    /// recipient has no address for this channel).
    pub fn skipped(reason: &str) -> Self {
        Self {
            success: false,
            status_code: None,
            response: Some(reason.to_string()),
            duration_ms: 0,
        }
    }
}

/// Trait for notification providers (email, SMS, etc.)
///
/// Uses `async_trait` to support async methods with dynamic dispatch.
/// All providers must be Send + Sync for use in async contexts.
#[async_trait]
pub trait NotificationProvider: Send + Sync {
    /// Sends a notification message
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult>;

    /// Returns the provider name for logging/debugging
    fn name(&self) -> &'static str;
}
