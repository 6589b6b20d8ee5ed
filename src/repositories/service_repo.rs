//! Service catalog repository for async database operations.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{NewService, Service, ServiceStatus, ServiceType, UpdateService, VehicleType};
use crate::schema::services;

/// Optional filters for catalog listing
#[derive(Debug, Clone, Default)]
pub struct ServiceFilter {
    pub business_id: Option<Uuid>,
    pub status: Option<ServiceStatus>,
    pub service_type: Option<ServiceType>,
    pub vehicle_type: Option<VehicleType>,
}

#[derive(Clone)]
pub struct ServiceRepository {
    pool: AsyncDbPool,
}

impl ServiceRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_service: NewService) -> Result<Service, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::insert_into(services::table)
            .values(&new_service)
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn find_by_id(&self, service_id: Uuid) -> Result<Option<Service>, AppError> {
        let mut conn = self.pool.get().await?;

        services::table
            .filter(services::id.eq(service_id))
            .select(Service::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    /// Lists services matching the filter, most-booked first.
    pub async fn list(
        &self,
        filter: &ServiceFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Service>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let mut query = services::table
            .select(Service::as_select())
            .into_boxed();
        let mut count_query = services::table
            .select(diesel::dsl::count_star())
            .into_boxed();

        if let Some(business_id) = filter.business_id {
            query = query.filter(services::business_id.eq(business_id));
            count_query = count_query.filter(services::business_id.eq(business_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(services::status.eq(status));
            count_query = count_query.filter(services::status.eq(status));
        }
        if let Some(service_type) = filter.service_type {
            query = query.filter(services::service_type.eq(service_type));
            count_query = count_query.filter(services::service_type.eq(service_type));
        }
        if let Some(vehicle_type) = filter.vehicle_type {
            query = query.filter(services::vehicle_type.eq(vehicle_type));
            count_query = count_query.filter(services::vehicle_type.eq(vehicle_type));
        }

        let items = query
            .order((services::booking_count.desc(), services::created_at.desc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await?;

        let total = count_query.first::<i64>(&mut conn).await?;

        Ok((items, total))
    }

    pub async fn update(
        &self,
        service_id: Uuid,
        update_data: UpdateService,
    ) -> Result<Service, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(services::table.filter(services::id.eq(service_id)))
            .set((&update_data, services::updated_at.eq(diesel::dsl::now)))
            .returning(Service::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    pub async fn delete(&self, service_id: Uuid) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::delete(services::table.filter(services::id.eq(service_id)))
            .execute(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Bumps the denormalized booking counter after a booking is created.
    pub async fn increment_booking_count(&self, service_id: Uuid) -> Result<(), AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(services::table.filter(services::id.eq(service_id)))
            .set(services::booking_count.eq(services::booking_count + 1))
            .execute(&mut conn)
            .await?;

        Ok(())
    }
}
