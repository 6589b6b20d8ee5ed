//! Review models for database operations.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use uuid::Uuid;

/// Review query model. One review per booking (unique index on booking_id).
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::reviews)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Review {
    pub id: Uuid,
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_verified: bool,
    pub created_at: NaiveDateTime,
}

/// NewReview insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::reviews)]
pub struct NewReview {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub service_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub is_verified: bool,
}
