//! Reviews and business rating aggregation.

use bigdecimal::BigDecimal;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{BookingStatus, NewReview, Review};
use crate::repositories::{
    BookingRepository, BusinessRepository, ReviewRepository, ServiceRepository,
};

#[derive(Clone)]
pub struct ReviewService {
    reviews: ReviewRepository,
    bookings: BookingRepository,
    services: ServiceRepository,
    businesses: BusinessRepository,
}

impl ReviewService {
    pub fn new(
        reviews: ReviewRepository,
        bookings: BookingRepository,
        services: ServiceRepository,
        businesses: BusinessRepository,
    ) -> Self {
        Self {
            reviews,
            bookings,
            services,
            businesses,
        }
    }

    /// Creates a review for a completed booking owned by the caller, then
    /// recomputes the business's rating aggregates.
    pub async fn create(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
        rating: i32,
        comment: Option<String>,
    ) -> AppResult<Review> {
        let booking = self
            .bookings
            .find_by_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "booking".to_string(),
                field: "id".to_string(),
                value: booking_id.to_string(),
            })?;

        if booking.user_id != user_id {
            return Err(AppError::Forbidden {
                message: "You can only review your own bookings".to_string(),
            });
        }

        if booking.status != BookingStatus::Completed {
            return Err(AppError::BadRequest {
                message: "Only completed bookings can be reviewed".to_string(),
            });
        }

        if self.reviews.find_by_booking_id(booking_id).await?.is_some() {
            return Err(AppError::Duplicate {
                entity: "review".to_string(),
                field: "booking_id".to_string(),
                value: booking_id.to_string(),
            });
        }

        let review = self
            .reviews
            .create(NewReview {
                booking_id,
                user_id,
                service_id: booking.service_id,
                rating,
                comment,
                // Tied to a completed booking, so this is a verified purchase
                is_verified: true,
            })
            .await?;

        if let Err(e) = self.refresh_business_rating(booking.service_id).await {
            tracing::warn!(service_id = %booking.service_id, error = %e, "Failed to refresh business rating");
        }

        Ok(review)
    }

    /// Lists reviews for a service, newest first.
    pub async fn list_for_service(
        &self,
        service_id: Uuid,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Review>, i64)> {
        self.reviews.list_by_service(service_id, offset, limit).await
    }

    /// Recomputes the average rating and review count for the business
    /// owning the given service.
    async fn refresh_business_rating(&self, service_id: Uuid) -> AppResult<()> {
        let service = self
            .services
            .find_by_id(service_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "service".to_string(),
                field: "id".to_string(),
                value: service_id.to_string(),
            })?;

        let (average, total) = self
            .reviews
            .business_rating_stats(service.business_id)
            .await?;

        let rating = average
            .unwrap_or_else(|| BigDecimal::from(0))
            .with_scale(2);

        self.businesses
            .update_rating(service.business_id, rating, total as i32)
            .await?;

        Ok(())
    }
}
