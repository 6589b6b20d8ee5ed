//! Database models for all domain entities.

mod booking;
mod business;
mod notification;
mod payment;
mod review;
mod service;
mod user;

pub use booking::{Booking, BookingAddOn, BookingStatus, NewBooking, NewBookingAddOn, UpdateBooking};
pub use business::{Business, NewBusiness, UpdateBusiness};
pub use notification::{NewNotification, Notification, NotificationKind, NotificationStatus};
pub use payment::{NewPayment, Payment, PaymentMethod, PaymentStatus};
pub use review::{NewReview, Review};
pub use service::{NewService, Service, ServiceStatus, ServiceType, UpdateService, VehicleType};
pub use user::{NewUser, Role, UpdateUser, User};
