//! Paystack payment gateway client.
//!
//! Wraps the charge-initiate, OTP-submit and verify-by-reference endpoints.
//! Amounts are sent in minor currency units (x100).

use bigdecimal::{BigDecimal, ToPrimitive};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::PaystackConfig;
use crate::error::{AppError, AppResult};
use crate::external::client::HTTP_CLIENT;

/// Card details submitted for a direct card charge
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaystackCard {
    pub number: String,
    pub cvv: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub pin: Option<String>,
}

/// Data section of a charge response
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaystackChargeData {
    pub reference: String,
    pub status: String,
    #[serde(default)]
    pub display_text: Option<String>,
}

/// Response from the gateway charge endpoint
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaystackChargeResponse {
    pub status: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<PaystackChargeData>,
}

/// Data section of a verify response
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaystackVerifyData {
    pub id: i64,
    pub status: String,
    pub reference: String,
    /// Amount in minor currency units
    pub amount: i64,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
}

/// Response from the gateway verify endpoint
#[derive(Debug, Clone, Deserialize, Serialize, utoipa::ToSchema)]
pub struct PaystackVerifyResponse {
    pub status: bool,
    pub message: String,
    #[serde(default)]
    pub data: Option<PaystackVerifyData>,
}

impl PaystackVerifyResponse {
    /// Whether the gateway confirmed the transaction as successful.
    pub fn is_successful(&self) -> bool {
        self.status && self.data.as_ref().is_some_and(|d| d.status == "success")
    }
}

/// Converts a decimal amount to minor currency units (x100).
pub fn to_minor_units(amount: &BigDecimal) -> AppResult<i64> {
    (amount * BigDecimal::from(100))
        .to_i64()
        .ok_or_else(|| AppError::Validation {
            field: "amount".to_string(),
            reason: "Amount cannot be converted to minor currency units".to_string(),
        })
}

/// Client for the Paystack HTTP API.
///
/// Holds only configuration; all requests go through the shared HTTP_CLIENT.
#[derive(Clone)]
pub struct PaystackClient {
    config: PaystackConfig,
}

impl PaystackClient {
    pub fn new(config: PaystackConfig) -> Self {
        Self { config }
    }

    /// Initiates a mobile-money (M-Pesa) charge.
    pub async fn charge_mpesa(
        &self,
        amount: &BigDecimal,
        phone: &str,
        email: &str,
    ) -> AppResult<PaystackChargeResponse> {
        let payload = json!({
            "amount": to_minor_units(amount)?,
            "email": email,
            "currency": self.config.currency,
            "mobile_money": {
                "phone": phone,
                "provider": "mpesa",
            },
            "callback_url": self.config.callback_url,
        });

        self.post("/charge", &payload).await
    }

    /// Initiates a direct card charge.
    pub async fn charge_card(
        &self,
        amount: &BigDecimal,
        email: &str,
        card: &PaystackCard,
    ) -> AppResult<PaystackChargeResponse> {
        let payload = json!({
            "amount": to_minor_units(amount)?,
            "email": email,
            "currency": self.config.currency,
            "card": {
                "number": card.number,
                "cvv": card.cvv,
                "expiry_month": card.expiry_month,
                "expiry_year": card.expiry_year,
            },
            "pin": card.pin,
        });

        self.post("/charge", &payload).await
    }

    /// Submits an OTP to continue a pending charge.
    pub async fn submit_otp(
        &self,
        reference: &str,
        otp: &str,
    ) -> AppResult<PaystackChargeResponse> {
        let payload = json!({
            "otp": otp,
            "reference": reference,
        });

        self.post("/charge/submit_otp", &payload).await
    }

    /// Verifies a transaction by its gateway reference.
    pub async fn verify(&self, reference: &str) -> AppResult<PaystackVerifyResponse> {
        let url = format!("{}/transaction/verify/{}", self.config.base_url, reference);

        let response = HTTP_CLIENT
            .get(&url)
            .bearer_auth(&self.config.secret_key)
            .send()
            .await?;

        Self::decode(response, "verify").await
    }

    async fn post<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        payload: &serde_json::Value,
    ) -> AppResult<T> {
        let url = format!("{}{}", self.config.base_url, path);

        let response = HTTP_CLIENT
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(payload)
            .send()
            .await?;

        Self::decode(response, path).await
    }

    async fn decode<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        operation: &str,
    ) -> AppResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!(operation = %operation, status = %status, body = %body, "Paystack request failed");
            return Err(AppError::Gateway {
                message: format!("{} failed with status {}: {}", operation, status, body),
            });
        }

        response.json().await.map_err(|e| AppError::Gateway {
            message: format!("{} returned an unreadable response: {}", operation, e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn minor_units_conversion() {
        let amount = BigDecimal::from_str("49.99").unwrap();
        assert_eq!(to_minor_units(&amount).unwrap(), 4999);

        let amount = BigDecimal::from(1500);
        assert_eq!(to_minor_units(&amount).unwrap(), 150000);

        let amount = BigDecimal::from_str("0.5").unwrap();
        assert_eq!(to_minor_units(&amount).unwrap(), 50);
    }

    #[test]
    fn verify_response_success_requires_both_flags() {
        let confirmed = PaystackVerifyResponse {
            status: true,
            message: "Verification successful".to_string(),
            data: Some(PaystackVerifyData {
                id: 1,
                status: "success".to_string(),
                reference: "PSK_ref".to_string(),
                amount: 4999,
                channel: Some("mobile_money".to_string()),
                currency: Some("KES".to_string()),
            }),
        };
        assert!(confirmed.is_successful());

        let still_pending = PaystackVerifyResponse {
            status: true,
            message: "Transaction is pending".to_string(),
            data: Some(PaystackVerifyData {
                id: 1,
                status: "pending".to_string(),
                reference: "PSK_ref".to_string(),
                amount: 4999,
                channel: None,
                currency: None,
            }),
        };
        assert!(!still_pending.is_successful());

        let failed = PaystackVerifyResponse {
            status: false,
            message: "Transaction not found".to_string(),
            data: None,
        };
        assert!(!failed.is_successful());
    }

    #[test]
    fn charge_response_deserializes_with_missing_data() {
        let raw = r#"{"status": false, "message": "Charge attempted"}"#;
        let parsed: PaystackChargeResponse = serde_json::from_str(raw).unwrap();
        assert!(!parsed.status);
        assert!(parsed.data.is_none());
    }
}
