//! HTTP SMS notification provider.

use super::provider::{NotificationMessage, NotificationProvider, NotificationResult};
use crate::config::SmsConfig;
use crate::error::AppResult;
use crate::external::client::HTTP_CLIENT;
use async_trait::async_trait;
use serde_json::json;
use std::time::Instant;

pub struct SmsProvider {
    config: SmsConfig,
}

impl SmsProvider {
    pub fn new(config: SmsConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl NotificationProvider for SmsProvider {
    async fn send(&self, message: &NotificationMessage) -> AppResult<NotificationResult> {
        let Some(to) = message.phone.as_deref() else {
            return Ok(NotificationResult::skipped("recipient has no phone number"));
        };

        let start = Instant::now();

        let request = HTTP_CLIENT
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&json!({
                "to": to,
                "message": message.body,
                "sender_id": self.config.sender_id,
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
        "sms"
    }
}
