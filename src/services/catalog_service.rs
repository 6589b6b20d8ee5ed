//! Service catalog management.
//!
//! Write operations are gated on ownership of the business the service
//! belongs to; reads are open.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{NewService, Role, Service, UpdateService};
use crate::repositories::{BusinessRepository, ServiceFilter, ServiceRepository};

/// Input for creating a catalog entry. The business is resolved from the
/// authenticated provider, never taken from the request.
#[derive(Debug, Clone)]
pub struct CreateServiceInput {
    pub name: String,
    pub description: Option<String>,
    pub service_type: crate::models::ServiceType,
    pub vehicle_type: crate::models::VehicleType,
    pub base_price: bigdecimal::BigDecimal,
    pub duration_minutes: i32,
    pub image_url: Option<String>,
    pub status: crate::models::ServiceStatus,
}

#[derive(Clone)]
pub struct CatalogService {
    services: ServiceRepository,
    businesses: BusinessRepository,
}

impl CatalogService {
    pub fn new(services: ServiceRepository, businesses: BusinessRepository) -> Self {
        Self {
            services,
            businesses,
        }
    }

    /// Creates a service under the caller's business.
    pub async fn create(&self, owner_id: Uuid, input: CreateServiceInput) -> AppResult<Service> {
        let business = self
            .businesses
            .find_by_user_id(owner_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "user_id".to_string(),
                value: owner_id.to_string(),
            })?;

        self.services
            .create(NewService {
                business_id: business.id,
                name: input.name,
                description: input.description,
                service_type: input.service_type,
                vehicle_type: input.vehicle_type,
                base_price: input.base_price,
                duration_minutes: input.duration_minutes,
                image_url: input.image_url,
                status: input.status,
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Service> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "service".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    pub async fn list(
        &self,
        filter: &ServiceFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Service>, i64)> {
        self.services.list(filter, offset, limit).await
    }

    pub async fn update(
        &self,
        id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
        update: UpdateService,
    ) -> AppResult<Service> {
        self.authorize_write(id, viewer_id, viewer_role).await?;
        self.services.update(id, update).await
    }

    pub async fn delete(&self, id: Uuid, viewer_id: Uuid, viewer_role: Role) -> AppResult<()> {
        self.authorize_write(id, viewer_id, viewer_role).await?;
        self.services.delete(id).await?;
        Ok(())
    }

    async fn authorize_write(
        &self,
        service_id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
    ) -> AppResult<()> {
        let service = self.get(service_id).await?;

        if viewer_role == Role::Admin {
            return Ok(());
        }

        let business = self
            .businesses
            .find_by_id(service.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "id".to_string(),
                value: service.business_id.to_string(),
            })?;

        if business.user_id != viewer_id {
            return Err(AppError::Forbidden {
                message: "You do not have permission to modify this service".to_string(),
            });
        }

        Ok(())
    }
}
