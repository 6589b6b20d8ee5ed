use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::handlers;

pub const AUTH_TAG: &str = "Auth";
pub const USER_TAG: &str = "User";
pub const BUSINESS_TAG: &str = "Business";
pub const SERVICE_TAG: &str = "Service";
pub const BOOKING_TAG: &str = "Booking";
pub const PAYMENT_TAG: &str = "Payment";
pub const REVIEW_TAG: &str = "Review";
pub const NOTIFICATION_TAG: &str = "Notifications";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Washhub",
        description = "Car-wash marketplace backend API",
    ),
    modifiers(&SecurityAddon),
    paths(
        handlers::auth::register,
        handlers::auth::register_provider,
        handlers::auth::login,
        handlers::auth::refresh_token,
        handlers::auth::logout,
        handlers::auth::forgot_password,
        handlers::auth::reset_password,
        handlers::auth::verify_email,
        handlers::auth::resend_verification,
        handlers::users::list_users,
        handlers::users::me,
        handlers::users::update_me,
        handlers::users::deactivate_me,
        handlers::businesses::list_businesses,
        handlers::businesses::create_business,
        handlers::businesses::my_business,
        handlers::businesses::get_business,
        handlers::businesses::update_business,
        handlers::services::list_services,
        handlers::services::create_service,
        handlers::services::get_service,
        handlers::services::update_service,
        handlers::services::delete_service,
        handlers::bookings::check_availability,
        handlers::bookings::create_booking,
        handlers::bookings::list_bookings,
        handlers::bookings::my_bookings,
        handlers::bookings::provider_bookings,
        handlers::bookings::get_booking,
        handlers::bookings::update_booking,
        handlers::bookings::cancel_booking,
        handlers::bookings::delete_booking,
        handlers::payments::my_payments,
        handlers::payments::charge_mpesa,
        handlers::payments::charge_card,
        handlers::payments::submit_otp,
        handlers::payments::verify_payment,
        handlers::reviews::create_review,
        handlers::reviews::service_reviews,
        handlers::notifications::my_notifications,
        handlers::notifications::mark_read,
        handlers::notifications::mark_all_read,
        handlers::notifications::delete_notification,
        handlers::health::health_check,
        handlers::health::readiness_check,
        handlers::health::liveness_check,
    ),
    components(
        schemas(
            crate::api::dto::ErrorResponse,
            crate::api::dto::MessageResponse,
            crate::models::Role,
            crate::models::BookingStatus,
            crate::models::PaymentStatus,
            crate::models::PaymentMethod,
            crate::models::ServiceStatus,
            crate::models::ServiceType,
            crate::models::VehicleType,
            crate::models::NotificationKind,
            crate::models::NotificationStatus,
        )
    ),
    tags(
        (name = AUTH_TAG, description = "Authentication endpoints"),
        (name = USER_TAG, description = "User profile endpoints"),
        (name = BUSINESS_TAG, description = "Business management endpoints"),
        (name = SERVICE_TAG, description = "Service catalog endpoints"),
        (name = BOOKING_TAG, description = "Booking lifecycle endpoints"),
        (name = PAYMENT_TAG, description = "Payment gateway endpoints"),
        (name = REVIEW_TAG, description = "Review endpoints"),
        (name = NOTIFICATION_TAG, description = "Notification endpoints"),
        (name = HEALTH_TAG, description = "Health check endpoints"),
    )
)]
pub struct ApiDoc;

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearerAuth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer Token Authentication"))
                        .build(),
                ),
            )
        }
    }
}
