//! Service catalog models for database operations.

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

/// Service tier offered by a business
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
pub enum ServiceType {
    Basic,
    Standard,
    Premium,
    Deluxe,
}

impl diesel::query_builder::QueryId for ServiceType {
    type QueryId = ServiceType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for ServiceType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            ServiceType::Basic => "basic",
            ServiceType::Standard => "standard",
            ServiceType::Premium => "premium",
            ServiceType::Deluxe => "deluxe",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for ServiceType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "basic" => Ok(ServiceType::Basic),
            "standard" => Ok(ServiceType::Standard),
            "premium" => Ok(ServiceType::Premium),
            "deluxe" => Ok(ServiceType::Deluxe),
            _ => Err(format!("Unrecognized service_type: {}", s).into()),
        }
    }
}

/// Vehicle category a service applies to
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
pub enum VehicleType {
    Sedan,
    Suv,
    Truck,
    Motorcycle,
    Van,
    Hatchback,
}

impl diesel::query_builder::QueryId for VehicleType {
    type QueryId = VehicleType;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for VehicleType {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            VehicleType::Sedan => "sedan",
            VehicleType::Suv => "suv",
            VehicleType::Truck => "truck",
            VehicleType::Motorcycle => "motorcycle",
            VehicleType::Van => "van",
            VehicleType::Hatchback => "hatchback",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for VehicleType {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "sedan" => Ok(VehicleType::Sedan),
            "suv" => Ok(VehicleType::Suv),
            "truck" => Ok(VehicleType::Truck),
            "motorcycle" => Ok(VehicleType::Motorcycle),
            "van" => Ok(VehicleType::Van),
            "hatchback" => Ok(VehicleType::Hatchback),
            _ => Err(format!("Unrecognized vehicle_type: {}", s).into()),
        }
    }
}

/// Lifecycle status of a catalog entry
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
pub enum ServiceStatus {
    Active,
    Inactive,
    Draft,
}

impl diesel::query_builder::QueryId for ServiceStatus {
    type QueryId = ServiceStatus;
    const HAS_STATIC_QUERY_ID: bool = false;
}

impl ToSql<Text, Pg> for ServiceStatus {
    fn to_sql<'b>(&'b self, out: &mut Output<'b, '_, Pg>) -> serialize::Result {
        let s = match self {
            ServiceStatus::Active => "active",
            ServiceStatus::Inactive => "inactive",
            ServiceStatus::Draft => "draft",
        };
        out.write_all(s.as_bytes())?;
        Ok(serialize::IsNull::No)
    }
}

impl FromSql<Text, Pg> for ServiceStatus {
    fn from_sql(
        bytes: <Pg as diesel::backend::Backend>::RawValue<'_>,
    ) -> deserialize::Result<Self> {
        let s = <String as FromSql<Text, Pg>>::from_sql(bytes)?;
        match s.as_str() {
            "active" => Ok(ServiceStatus::Active),
            "inactive" => Ok(ServiceStatus::Inactive),
            "draft" => Ok(ServiceStatus::Draft),
            _ => Err(format!("Unrecognized service status: {}", s).into()),
        }
    }
}

/// Service query model for SELECT operations
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::services)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Service {
    pub id: Uuid,
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub vehicle_type: VehicleType,
    pub base_price: BigDecimal,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub status: ServiceStatus,
    pub booking_count: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// NewService insert model for INSERT operations
#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::services)]
pub struct NewService {
    pub business_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub service_type: ServiceType,
    pub vehicle_type: VehicleType,
    pub base_price: BigDecimal,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub status: ServiceStatus,
}

/// UpdateService model for partial updates
#[derive(Debug, AsChangeset, Deserialize, Clone, Default)]
#[diesel(table_name = crate::schema::services)]
pub struct UpdateService {
    pub name: Option<String>,
    pub description: Option<String>,
    pub service_type: Option<ServiceType>,
    pub vehicle_type: Option<VehicleType>,
    pub base_price: Option<BigDecimal>,
    pub duration_minutes: Option<i32>,
    pub image_url: Option<String>,
    pub status: Option<ServiceStatus>,
}
