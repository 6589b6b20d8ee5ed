//! Repository layer for data access operations.
//!
//! Provides async CRUD operations for all domain entities.

mod booking_repo;
mod business_repo;
mod notification_repo;
mod payment_repo;
mod review_repo;
mod service_repo;
mod user_repo;

pub use booking_repo::{BookingFilter, BookingRepository};
pub use business_repo::BusinessRepository;
pub use notification_repo::NotificationRepository;
pub use payment_repo::PaymentRepository;
pub use review_repo::ReviewRepository;
pub use service_repo::{ServiceFilter, ServiceRepository};
pub use user_repo::UserRepository;

use crate::db::AsyncDbPool;

/// Aggregates all repositories for convenient access.
///
/// Since `AsyncDbPool` uses `Arc` internally, cloning is cheap.
#[derive(Clone)]
pub struct Repositories {
    pub users: UserRepository,
    pub businesses: BusinessRepository,
    pub services: ServiceRepository,
    pub bookings: BookingRepository,
    pub payments: PaymentRepository,
    pub reviews: ReviewRepository,
    pub notifications: NotificationRepository,
}

impl Repositories {
    /// Creates a new Repositories instance with all repositories initialized.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            businesses: BusinessRepository::new(pool.clone()),
            services: ServiceRepository::new(pool.clone()),
            bookings: BookingRepository::new(pool.clone()),
            payments: PaymentRepository::new(pool.clone()),
            reviews: ReviewRepository::new(pool.clone()),
            notifications: NotificationRepository::new(pool),
        }
    }
}
