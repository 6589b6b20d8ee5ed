//! User models for database operations.
//!
//! Users carry identity/auth data plus customer-side loyalty fields.
//! Provider-side data lives on the `businesses` table.

use bigdecimal::BigDecimal;
use chrono::NaiveDateTime;
use diesel::AsExpression;
use diesel::FromSqlRow;
use diesel::deserialize::{self, FromSql};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel::serialize::{self, Output, ToSql};
use diesel::sql_types::Text;
use serde::{Deserialize, Serialize};
use std::io::Write;
use uuid::Uuid;

/// Account role deciding which side of the marketplace a user acts on
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
pub enum Role {
    Customer,
    ServiceProvider,
    Admin,
}

impl diesel::query_builder::QueryId for Role {
    type QueryId = Role;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for Role {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            Role::Customer => "customer",
            Role::ServiceProvider => "service_provider",
            Role::Admin => "admin",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for Role {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "customer" => Ok(Role::Customer),
            "service_provider" => Ok(Role::ServiceProvider),
            "admin" => Ok(Role::Admin),
            _ => Err(format!("Unrecognized role: {}", s).into()),
        }
    }
}

/// User query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub hashed_refresh_token: Option<String>,
    pub is_active: bool,
    pub email_verified_at: Option<NaiveDateTime>,
    pub address: Option<String>,
    pub loyalty_tier: String,
    pub loyalty_points: i32,
    pub total_bookings: i32,
    pub total_spent: BigDecimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewUser insert model. The password field holds the argon2 PHC string,
/// never the plain text.
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: Option<String>,
    pub role: Role,
    pub is_active: bool,
}

/// UpdateUser model for partial profile updates
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UpdateUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub avatar: Option<String>,
    pub address: Option<String>,
}
