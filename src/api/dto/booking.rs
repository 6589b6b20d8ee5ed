//! Booking DTOs for API requests and responses.

use super::service::money_from_f64;
use crate::error::AppResult;
use crate::models::{Booking, BookingAddOn, BookingStatus};
use crate::services::{CreateBookingInput, UpdateBookingInput};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// Add-on attached to a booking request.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct BookingAddOnRequest {
    #[validate(length(min = 1, max = 255, message = "Add-on name must be between 1 and 255 characters"))]
    pub name: String,
    #[validate(range(min = 0.0, message = "Add-on price cannot be negative"))]
    pub price: f64,
}

/// Request body for creating a booking.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBookingRequest {
    pub service_id: Uuid,
    /// Date of the slot (YYYY-MM-DD)
    #[schema(value_type = String, example = "2024-06-01")]
    pub service_date: NaiveDate,
    /// Start time of the slot (HH:MM:SS)
    #[schema(value_type = String, example = "10:00:00")]
    pub service_time: NaiveTime,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub total_amount: f64,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
    #[serde(default)]
    #[validate(nested)]
    pub booking_addons: Vec<BookingAddOnRequest>,
}

impl CreateBookingRequest {
    pub fn into_input(self) -> AppResult<CreateBookingInput> {
        let addons = self
            .booking_addons
            .into_iter()
            .map(|addon| Ok((addon.name, money_from_f64(addon.price, "price")?)))
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CreateBookingInput {
            service_id: self.service_id,
            service_date: self.service_date,
            service_time: self.service_time,
            total_amount: money_from_f64(self.total_amount, "total_amount")?,
            special_instructions: self.special_instructions,
            vehicle_info: self.vehicle_info,
            addons,
        })
    }
}

/// Request body for updating a booking.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBookingRequest {
    #[schema(value_type = Option<String>, example = "2024-06-02")]
    pub service_date: Option<NaiveDate>,
    #[schema(value_type = Option<String>, example = "11:00:00")]
    pub service_time: Option<NaiveTime>,
    pub status: Option<BookingStatus>,
    #[validate(range(min = 0.0, message = "Amount cannot be negative"))]
    pub total_amount: Option<f64>,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
}

impl UpdateBookingRequest {
    pub fn into_input(self) -> AppResult<UpdateBookingInput> {
        let total_amount = self
            .total_amount
            .map(|a| money_from_f64(a, "total_amount"))
            .transpose()?;

        Ok(UpdateBookingInput {
            service_date: self.service_date,
            service_time: self.service_time,
            status: self.status,
            total_amount,
            special_instructions: self.special_instructions,
            vehicle_info: self.vehicle_info,
        })
    }
}

/// Request body for cancelling a booking.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct CancelBookingRequest {
    pub reason: Option<String>,
}

/// Query parameters for booking listings.
#[derive(Debug, Deserialize, IntoParams, Default)]
pub struct BookingQueryParams {
    pub user_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    /// Earliest service date to include (YYYY-MM-DD)
    #[param(value_type = Option<String>)]
    pub date_from: Option<NaiveDate>,
    /// Latest service date to include (YYYY-MM-DD)
    #[param(value_type = Option<String>)]
    pub date_to: Option<NaiveDate>,
    /// Only bookings from today onwards
    #[serde(default)]
    pub upcoming: bool,
}

/// Query parameters for the availability check.
#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub service_id: Uuid,
    /// Date of the slot (YYYY-MM-DD)
    #[param(value_type = String)]
    pub date: NaiveDate,
    /// Start time of the slot (HH:MM:SS)
    #[param(value_type = String)]
    pub time: NaiveTime,
    /// Booking to exclude from the check (when rescheduling)
    pub exclude_booking_id: Option<Uuid>,
}

/// Response body for the availability check.
#[derive(Debug, Serialize, ToSchema)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// Response body for a booking add-on.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingAddOnResponse {
    pub id: Uuid,
    pub name: String,
    #[schema(value_type = String, example = "9.99")]
    pub price: String,
}

impl From<BookingAddOn> for BookingAddOnResponse {
    fn from(addon: BookingAddOn) -> Self {
        Self {
            id: addon.id,
            name: addon.name,
            price: addon.price.to_string(),
        }
    }
}

/// Response body for booking data.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookingResponse {
    pub id: Uuid,
    pub booking_number: String,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub service_date: String,
    pub service_time: String,
    pub status: BookingStatus,
    #[schema(value_type = String, example = "49.99")]
    pub total_amount: String,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addons: Vec<BookingAddOnResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl BookingResponse {
    /// Builds a response from a booking and its add-ons.
    pub fn from_parts(booking: Booking, addons: Vec<BookingAddOn>) -> Self {
        Self {
            id: booking.id,
            booking_number: booking.booking_number,
            user_id: booking.user_id,
            service_id: booking.service_id,
            service_date: booking.service_date.to_string(),
            service_time: booking.service_time.to_string(),
            status: booking.status,
            total_amount: booking.total_amount.to_string(),
            special_instructions: booking.special_instructions,
            vehicle_info: booking.vehicle_info,
            addons: addons.into_iter().map(BookingAddOnResponse::from).collect(),
            created_at: booking.created_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            updated_at: booking.updated_at.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
        }
    }
}

impl From<Booking> for BookingResponse {
    fn from(booking: Booking) -> Self {
        Self::from_parts(booking, Vec::new())
    }
}
