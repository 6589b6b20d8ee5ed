//! Booking models for database operations.

use bigdecimal::BigDecimal;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::io::Write;
use uuid::Uuid;

/// Booking lifecycle status.
///
/// pending -> confirmed -> in_progress -> completed, with cancelled and
/// no_show as terminal side-exits.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    utoipa::ToSchema,
    AsExpression,
    FromSqlRow,
)]
#[diesel(sql_type = Text)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    InProgress,
    Completed,
    Cancelled,
    NoShow,
}

impl BookingStatus {
    /// Statuses that occupy a time slot for availability checking
    pub const OCCUPYING: [BookingStatus; 3] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::InProgress,
    ];

    /// User-friendly label used in notification messages
    pub fn label(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::InProgress => "In Progress",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
            BookingStatus::NoShow => "No Show",
        }
    }
}

impl diesel::query_builder::QueryId for BookingStatus {
    type QueryId = BookingStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for BookingStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::InProgress => "in_progress",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::NoShow => "no_show",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for BookingStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "in_progress" => Ok(BookingStatus::InProgress),
            "completed" => Ok(BookingStatus::Completed),
            "cancelled" => Ok(BookingStatus::Cancelled),
            "no_show" => Ok(BookingStatus::NoShow),
            _ => Err(format!("Unrecognized booking status: {}", s).into()),
        }
    }
}

/// Booking query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::bookings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Booking {
    pub id: Uuid,
    pub booking_number: String,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub status: BookingStatus,
    pub total_amount: BigDecimal,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewBooking insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::bookings)]
pub struct NewBooking {
    pub booking_number: String,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub status: BookingStatus,
    pub total_amount: BigDecimal,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
}

/// UpdateBooking model for partial updates.
///
/// user_id and service_id are intentionally absent: a booking can never be
/// reassigned to another customer or service.
#[derive(Debug, AsChangeset, Clone, Default)]
#[diesel(table_name = crate::schema::bookings)]
pub struct UpdateBooking {
    pub service_date: Option<NaiveDate>,
    pub service_time: Option<NaiveTime>,
    pub status: Option<BookingStatus>,
    pub total_amount: Option<BigDecimal>,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
}

/// BookingAddOn query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Serialize, Clone)]
#[diesel(table_name = crate::schema::booking_addons)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BookingAddOn {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

/// NewBookingAddOn insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::booking_addons)]
pub struct NewBookingAddOn {
    pub booking_id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}
