//! Service catalog DTOs for API requests and responses.

use crate::error::{AppError, AppResult};
use crate::models::{Service, ServiceStatus, ServiceType, UpdateService, VehicleType};
use crate::services::CreateServiceInput;
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Converts a JSON number into a two-decimal money amount.
pub(crate) fn money_from_f64(value: f64, field: &str) -> AppResult<BigDecimal> {
    BigDecimal::try_from(value)
        .map(|d| d.with_scale(2))
        .map_err(|_| AppError::Validation {
            field: field.to_string(),
            reason: "Not a representable monetary amount".to_string(),
        })
}

/// Request body for creating a service.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub vehicle_type: VehicleType,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub base_price: f64,
    #[serde(default = "default_duration")]
    #[validate(range(min = 15, max = 480, message = "Duration must be between 15 and 480 minutes"))]
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    #[serde(default = "default_status")]
    pub status: ServiceStatus,
}

fn default_duration() -> i32 {
    60
}

fn default_status() -> ServiceStatus {
    ServiceStatus::Active
}

impl CreateServiceRequest {
    pub fn into_input(self) -> AppResult<CreateServiceInput> {
        Ok(CreateServiceInput {
            name: self.name,
            description: self.description,
            service_type: self.service_type,
            vehicle_type: self.vehicle_type,
            base_price: money_from_f64(self.base_price, "base_price")?,
            duration_minutes: self.duration_minutes,
            image_url: self.image_url,
            status: self.status,
        })
    }
}

/// Request body for updating a service.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateServiceRequest {
    #[validate(length(min = 1, max = 255, message = "Name must be between 1 and 255 characters"))]
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
    pub vehicle_type: Option<VehicleType>,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub base_price: Option<f64>,
    #[validate(range(min = 15, max = 480, message = "Duration must be between 15 and 480 minutes"))]
    pub duration_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<ServiceStatus>,
}

impl UpdateServiceRequest {
    pub fn into_update_service(self) -> AppResult<UpdateService> {
        let base_price = self
            .base_price
            .map(|p| money_from_f64(p, "base_price"))
            .transpose()?;

        Ok(UpdateService {
            name: self.name,
            description: self.description,
            service_type: self.service_type,
            vehicle_type: self.vehicle_type,
            base_price,
            duration_minutes: self.duration_minutes,
            image_url: self.image_url,
            status: self.status,
        })
    }
}

/// Query parameters for catalog listing.
#[derive(Debug, Deserialize, IntoParams, Default)]
pub struct ServiceQueryParams {
    pub business_id: Option<Uuid>,
    pub status: Option<ServiceStatus>,
    pub service_type: Option<ServiceType>,
    pub vehicle_type: Option<VehicleType>,
}

/// Response body for service data.
#[derive(Debug, Serialize, ToSchema)]
pub struct ServiceResponse {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub vehicle_type: VehicleType,
    #[schema(value_type = String, example = "49.99")]
    pub base_price: String,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub status: ServiceStatus,
    pub booking_count: i32,
    pub created_at: String,
}

impl From<Service> for ServiceResponse {
    fn from(service: Service) -> Self {
        Self {
            id: service.id,
            business_id: service.business_id,
            name: service.name,
            description: service.description,
            service_type: service.service_type,
            vehicle_type: service.vehicle_type,
            base_price: service.base_price.to_string(),
            duration_minutes: service.duration_minutes,
            image_url: service.image_url,
            status: service.status,
            booking_count: service.booking_count,
            created_at: service.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn money_conversion_rounds_to_cents() {
        let amount = money_from_f64(49.99, "base_price").unwrap();
        assert_eq!(amount, BigDecimal::from_str("49.99").unwrap());

        let whole = money_from_f64(1500.0, "base_price").unwrap();
        assert_eq!(whole, BigDecimal::from_str("1500.00").unwrap());
    }

    #[test]
    fn money_conversion_rejects_nan() {
        assert!(money_from_f64(f64::NAN, "base_price").is_err());
    }
}
