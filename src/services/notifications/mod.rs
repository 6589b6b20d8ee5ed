//! Notification subsystem: persistence plus best-effort external channels.

mod email_provider;
mod notification_service;
mod provider;
mod sms_provider;

pub use email_provider::EmailProvider;
pub use notification_service::NotificationService;
pub use provider::{NotificationMessage, NotificationProvider, NotificationResult, Recipient};
pub use sms_provider::SmsProvider;
