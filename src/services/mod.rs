//! Service layer for business logic operations.
//!
//! Services encapsulate business logic and coordinate between
//! repositories and handlers.

mod booking_service;
mod business_service;
mod catalog_service;
pub mod notifications;
mod payment_service;
mod review_service;
mod user_service;

pub use booking_service::{
    BookingService, CreateBookingInput, UpdateBookingInput, can_delete, can_update, slot_window,
    slots_overlap,
};
pub use business_service::BusinessService;
pub use catalog_service::{CatalogService, CreateServiceInput};
pub use notifications::NotificationService;
pub use payment_service::PaymentService;
pub use review_service::ReviewService;
pub use user_service::{
    RegisterCustomerInput, RegisterProviderInput, TokenPair, UserService,
};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// This struct is designed to be used as Axum application state.
/// Cloning is cheap since underlying pools use `Arc` internally.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub businesses: BusinessService,
    pub catalog: CatalogService,
    pub bookings: BookingService,
    pub payments: PaymentService,
    pub reviews: ReviewService,
    pub notifications: NotificationService,
}

impl Services {
    /// Creates a new Services instance from repositories and the
    /// notification service (which carries the configured channels).
    pub fn new(repos: Repositories, notifications: NotificationService) -> Self {
        Self {
            users: UserService::new(
                repos.users.clone(),
                repos.businesses.clone(),
                notifications.clone(),
            ),
            businesses: BusinessService::new(repos.businesses.clone(), repos.users.clone()),
            catalog: CatalogService::new(repos.services.clone(), repos.businesses.clone()),
            bookings: BookingService::new(
                repos.bookings.clone(),
                repos.services.clone(),
                repos.businesses.clone(),
                repos.users.clone(),
                notifications.clone(),
            ),
            payments: PaymentService::new(repos.payments.clone(), repos.bookings.clone()),
            reviews: ReviewService::new(
                repos.reviews,
                repos.bookings,
                repos.services,
                repos.businesses,
            ),
            notifications,
        }
    }
}
