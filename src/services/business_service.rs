//! Business profile management.

use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Business, NewBusiness, Role, UpdateBusiness};
use crate::repositories::{BusinessRepository, UserRepository};

#[derive(Clone)]
pub struct BusinessService {
    businesses: BusinessRepository,
    users: UserRepository,
}

impl BusinessService {
    pub fn new(businesses: BusinessRepository, users: UserRepository) -> Self {
        Self { businesses, users }
    }

    /// Creates a business for an existing user. One business per account.
    pub async fn create(&self, new_business: NewBusiness) -> AppResult<Business> {
        let owner = self
            .users
            .find_by_id(new_business.user_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "user".to_string(),
                field: "id".to_string(),
                value: new_business.user_id.to_string(),
            })?;

        if self.businesses.find_by_user_id(owner.id).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "business".to_string(),
                field: "user_id".to_string(),
                value: owner.id.to_string(),
            });
        }

        self.businesses.create(new_business).await
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Business> {
        self.businesses
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    /// Finds the business owned by a provider account.
    pub async fn get_by_owner(&self, user_id: Uuid) -> AppResult<Business> {
        self.businesses
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "user_id".to_string(),
                value: user_id.to_string(),
            })
    }

    pub async fn list(&self, offset: i64, limit: i64) -> AppResult<(Vec<Business>, i64)> {
        self.businesses.list_paginated(offset, limit).await
    }

    /// Updates a business. Only the owner or an admin may do this.
    pub async fn update(
        &self,
        id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
        update: UpdateBusiness,
    ) -> AppResult<Business> {
        let business = self.get(id).await?;

        if business.user_id != viewer_id && viewer_role != Role::Admin {
            return Err(AppError::Forbidden {
                message: "You do not have permission to modify this business".to_string(),
            });
        }

        self.businesses.update(id, update).await
    }
}
