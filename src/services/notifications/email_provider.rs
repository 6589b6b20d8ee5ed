//! HTTP email notification provider.
//!
//! Posts outbound mail to a transactional email API using the shared
//! HTTP_CLIENT. Transport failures are reported in the result rather than
//! as errors so callers can log and continue.

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::EmailConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

pub struct EmailProvider {
    config: EmailConfig,
}

impl EmailProvider {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl NotificationProvider for EmailProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let Some(to) = message.email.as_deref() else {
            return Ok(NotificationResult::skipped("recipient has no email address"));
        };

        let start = Instant::now();

        let request = HTTP_CLIENT
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "from": self.config.from_address,
                "to": to,
                "subject": message.title,
                "text": message.body,
            }));

        let response = request.send().await;
        let duration_ms = start.elapsed().as_millis() as u64;

        match response {
            Ok(resp) => {
                let status_code = resp.status().as_u16();
                let success = resp.status().is_success();
                let response_text = resp.text().await.ok();

                Ok(NotificationResult {
                    success,
                    status_code: Some(status_code),
                    response: response_text,
                    duration_ms,
                })
            }
            Err(e) => Ok(NotificationResult {
                success: false,
                status_code: None,
                response: Some(e.to_string()),
                duration_ms,
            }),
        }
    }

    fn name(&self) -> &'static str {
        "email"
    }
}
