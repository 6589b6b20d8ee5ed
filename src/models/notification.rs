//! Notification models for database operations.
//!
//! Notifications are written as side effects of booking/payment/review
//! operations and read back through the notifications API.

use chrono::NaiveDateTime;
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

/// What a notification is about
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
pub enum NotificationKind {
    BookingConfirmation,
    BookingReminder,
    BookingCompleted,
    BookingCancelled,
    PaymentSuccess,
    PaymentFailed,
    ReviewRequest,
    Promotional,
    System,
}

impl diesel::query_builder::QueryId for NotificationKind {
    type QueryId = NotificationKind;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for NotificationKind {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            NotificationKind::BookingConfirmation => "booking_confirmation",
            NotificationKind::BookingReminder => "booking_reminder",
            NotificationKind::BookingCompleted => "booking_completed",
            NotificationKind::BookingCancelled => "booking_cancelled",
            NotificationKind::PaymentSuccess => "payment_success",
            NotificationKind::PaymentFailed => "payment_failed",
            NotificationKind::ReviewRequest => "review_request",
            NotificationKind::Promotional => "promotional",
            NotificationKind::System => "system",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for NotificationKind {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "booking_confirmation" => Ok(NotificationKind::BookingConfirmation),
            "booking_reminder" => Ok(NotificationKind::BookingReminder),
            "booking_completed" => Ok(NotificationKind::BookingCompleted),
            "booking_cancelled" => Ok(NotificationKind::BookingCancelled),
            "payment_success" => Ok(NotificationKind::PaymentSuccess),
            "payment_failed" => Ok(NotificationKind::PaymentFailed),
            "review_request" => Ok(NotificationKind::ReviewRequest),
            "promotional" => Ok(NotificationKind::Promotional),
            "system" => Ok(NotificationKind::System),
            _ => Err(format!("Unrecognized notification kind: {}", s).into()),
        }
    }
}

/// Read state of a notification
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
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    Unread,
    Read,
    Archived,
}

impl diesel::query_builder::QueryId for NotificationStatus {
    type QueryId = NotificationStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for NotificationStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            NotificationStatus::Unread => "unread",
            NotificationStatus::Read => "read",
            NotificationStatus::Archived => "archived",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for NotificationStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "unread" => Ok(NotificationStatus::Unread),
            "read" => Ok(NotificationStatus::Read),
            "archived" => Ok(NotificationStatus::Archived),
            _ => Err(format!("Unrecognized notification status: {}", s).into()),
        }
    }
}

/// Notification query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::notifications)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Notification {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<JsonValue>,
    pub status: NotificationStatus,
    pub read_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

/// NewNotification insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::notifications)]
pub struct NewNotification {
    pub user_id: Uuid,
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
    pub data: Option<JsonValue>,
    pub status: NotificationStatus,
}
