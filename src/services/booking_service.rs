//! Booking lifecycle and availability logic.
//!
//! The availability check is read-then-decide: fetch still-occupying
//! bookings for the slot's service/date, then test the one-hour windows for
//! overlap in memory. There is no row locking or transaction around the
//! check-then-insert sequence, so two concurrent creations for the same
//! slot can both pass the check.

use bigdecimal::BigDecimal;
use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde_json::{Value as JsonValue, json};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{
    Booking, BookingAddOn, BookingStatus, Business, NewBooking, NewNotification, NotificationKind,
    NotificationStatus, Role, Service, UpdateBooking, User,
};
use crate::repositories::{
    BookingFilter, BookingRepository, BusinessRepository, ServiceRepository, UserRepository,
};
use crate::services::notifications::{NotificationService, Recipient};
use crate::utils::id::generate_booking_number;

/// Every service occupies a fixed one-hour window
const SLOT_MINUTES: i64 = 60;

/// Computes the `[start, start + 60min)` window a booking occupies.
pub fn slot_window(date: NaiveDate, time: NaiveTime) -> (NaiveDateTime, NaiveDateTime) {
    let start = date.and_time(time);
    (start, start + Duration::minutes(SLOT_MINUTES))
}

/// Standard three-case interval overlap test: candidate starts inside
/// existing, candidate ends inside existing, or candidate contains existing.
pub fn slots_overlap(
    candidate: (NaiveDateTime, NaiveDateTime),
    existing: (NaiveDateTime, NaiveDateTime),
) -> bool {
    let (start, end) = candidate;
    let (existing_start, existing_end) = existing;

    (start >= existing_start && start < existing_end)
        || (end > existing_start && end <= existing_end)
        || (start <= existing_start && end >= existing_end)
}

/// Whether a booking in this status may still be edited.
pub fn can_update(status: BookingStatus) -> bool {
    !matches!(status, BookingStatus::Cancelled | BookingStatus::Completed)
}

/// Whether a booking in this status may be deleted.
pub fn can_delete(status: BookingStatus) -> bool {
    matches!(status, BookingStatus::Pending | BookingStatus::Cancelled)
}

/// Input for creating a booking
#[derive(Debug, Clone)]
pub struct CreateBookingInput {
    pub service_id: Uuid,
    pub service_date: NaiveDate,
    pub service_time: NaiveTime,
    pub total_amount: BigDecimal,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
    pub addons: Vec<(String, BigDecimal)>,
}

/// Input for updating a booking
#[derive(Debug, Clone, Default)]
pub struct UpdateBookingInput {
    pub service_date: Option<NaiveDate>,
    pub service_time: Option<NaiveTime>,
    pub status: Option<BookingStatus>,
    pub total_amount: Option<BigDecimal>,
    pub special_instructions: Option<String>,
    pub vehicle_info: Option<JsonValue>,
}

#[derive(Clone)]
pub struct BookingService {
    bookings: BookingRepository,
    services: ServiceRepository,
    businesses: BusinessRepository,
    users: UserRepository,
    notifications: NotificationService,
}

impl BookingService {
    pub fn new(
        bookings: BookingRepository,
        services: ServiceRepository,
        businesses: BusinessRepository,
        users: UserRepository,
        notifications: NotificationService,
    ) -> Self {
        Self {
            bookings,
            services,
            businesses,
            users,
            notifications,
        }
    }

    /// Checks whether a slot is free for a service.
    ///
    /// Fetches bookings in pending/confirmed/in_progress for the same
    /// service and date (minus `exclude_booking_id` when updating) and
    /// tests the candidate window against each.
    pub async fn check_availability(
        &self,
        service_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        exclude_booking_id: Option<Uuid>,
    ) -> AppResult<bool> {
        let candidate = slot_window(date, time);

        let existing = self
            .bookings
            .find_overlap_candidates(service_id, date, exclude_booking_id)
            .await?;

        for booking in &existing {
            let occupied = slot_window(booking.service_date, booking.service_time);
            if slots_overlap(candidate, occupied) {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Creates a booking after gating on slot availability.
    pub async fn create(
        &self,
        user_id: Uuid,
        input: CreateBookingInput,
    ) -> AppResult<(Booking, Vec<BookingAddOn>)> {
        tracing::info!(%user_id, service_id = %input.service_id, "Creating booking");

        let service = self.get_service(input.service_id).await?;

        let available = self
            .check_availability(input.service_id, input.service_date, input.service_time, None)
            .await?;
        if !available {
            return Err(AppError::BadRequest {
                message: "The selected time slot is not available".to_string(),
            });
        }

        let new_booking = NewBooking {
            booking_number: generate_booking_number(),
            user_id,
            service_id: input.service_id,
            service_date: input.service_date,
            service_time: input.service_time,
            status: BookingStatus::Pending,
            total_amount: input.total_amount,
            special_instructions: input.special_instructions,
            vehicle_info: input.vehicle_info,
        };

        let (booking, addons) = self
            .bookings
            .create_with_addons(new_booking, input.addons)
            .await?;
        tracing::info!(booking_id = %booking.id, "Booking created");

        if let Err(e) = self.services.increment_booking_count(service.id).await {
            tracing::warn!(service_id = %service.id, error = %e, "Failed to bump booking count");
        }

        // Best-effort provider notification; never fails the booking
        if let Err(e) = self.notify_provider_of_creation(&booking, &service).await {
            tracing::error!(booking_id = %booking.id, error = %e, "Failed to send notification");
        }

        Ok((booking, addons))
    }

    /// Loads a booking plus add-ons, enforcing visibility.
    ///
    /// A booking is visible to its customer, to the owner of the business
    /// providing the service, and to admins.
    pub async fn get(
        &self,
        id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
    ) -> AppResult<(Booking, Vec<BookingAddOn>)> {
        let booking = self.get_booking(id).await?;
        self.authorize_access(&booking, viewer_id, viewer_role).await?;

        let addons = self.bookings.find_addons(booking.id).await?;
        Ok((booking, addons))
    }

    /// Lists bookings matching the filter (admin surface).
    pub async fn list(
        &self,
        filter: &BookingFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Booking>, i64)> {
        self.bookings.list(filter, offset, limit).await
    }

    /// Lists bookings across all services of the viewer's business.
    pub async fn list_for_provider(
        &self,
        viewer_id: Uuid,
        filter: &BookingFilter,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Booking>, i64)> {
        let business = self
            .businesses
            .find_by_user_id(viewer_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "user_id".to_string(),
                value: viewer_id.to_string(),
            })?;

        self.bookings
            .list_for_business(business.id, filter, offset, limit)
            .await
    }

    /// Updates a booking, re-checking availability when the slot moves.
    pub async fn update(
        &self,
        id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
        input: UpdateBookingInput,
    ) -> AppResult<Booking> {
        tracing::info!(booking_id = %id, %viewer_id, "Updating booking");

        let booking = self.get_booking(id).await?;
        self.authorize_access(&booking, viewer_id, viewer_role).await?;

        if !can_update(booking.status) {
            return Err(AppError::BadRequest {
                message: format!(
                    "Cannot update a booking with status: {}",
                    booking.status.label()
                ),
            });
        }

        if input.service_date.is_some() || input.service_time.is_some() {
            let date = input.service_date.unwrap_or(booking.service_date);
            let time = input.service_time.unwrap_or(booking.service_time);

            let available = self
                .check_availability(booking.service_id, date, time, Some(booking.id))
                .await?;
            if !available {
                return Err(AppError::BadRequest {
                    message: "The selected time slot is not available".to_string(),
                });
            }
        }

        let old_status = booking.status;
        let new_status = input.status;

        let changeset = UpdateBooking {
            service_date: input.service_date,
            service_time: input.service_time,
            status: input.status,
            total_amount: input.total_amount,
            special_instructions: input.special_instructions,
            vehicle_info: input.vehicle_info,
        };

        let updated = self.bookings.update(booking.id, changeset).await?;

        if let Some(status) = new_status {
            if status != old_status {
                if let Err(e) = self
                    .notify_status_change(&updated, old_status, status, viewer_id)
                    .await
                {
                    tracing::error!(booking_id = %updated.id, error = %e, "Failed to send notification");
                }
            }
        }

        Ok(updated)
    }

    /// Cancels a booking and notifies the counterparty.
    pub async fn cancel(
        &self,
        id: Uuid,
        viewer_id: Uuid,
        viewer_role: Role,
        reason: Option<String>,
    ) -> AppResult<Booking> {
        tracing::info!(booking_id = %id, %viewer_id, "Cancelling booking");

        let booking = self.get_booking(id).await?;
        self.authorize_access(&booking, viewer_id, viewer_role).await?;

        if booking.status == BookingStatus::Cancelled {
            return Err(AppError::BadRequest {
                message: "Booking is already cancelled".to_string(),
            });
        }
        if booking.status == BookingStatus::Completed {
            return Err(AppError::BadRequest {
                message: "Cannot cancel a completed booking".to_string(),
            });
        }

        let special_instructions = reason.as_ref().map(|r| {
            format!(
                "{}\n\nCancellation reason: {}",
                booking.special_instructions.as_deref().unwrap_or(""),
                r
            )
        });

        let cancelled = self
            .bookings
            .update(
                booking.id,
                UpdateBooking {
                    status: Some(BookingStatus::Cancelled),
                    special_instructions,
                    ..UpdateBooking::default()
                },
            )
            .await?;

        if let Err(e) = self
            .notify_cancellation(&cancelled, viewer_id, reason.as_deref())
            .await
        {
            tracing::error!(booking_id = %cancelled.id, error = %e, "Failed to send cancellation notification");
        }

        Ok(cancelled)
    }

    /// Deletes a booking. Only pending or cancelled bookings may go.
    pub async fn delete(&self, id: Uuid, viewer_id: Uuid, viewer_role: Role) -> AppResult<()> {
        let booking = self.get_booking(id).await?;
        self.authorize_access(&booking, viewer_id, viewer_role).await?;

        if !can_delete(booking.status) {
            return Err(AppError::BadRequest {
                message: "Only pending or cancelled bookings can be deleted".to_string(),
            });
        }

        self.bookings.delete_with_addons(booking.id).await?;
        Ok(())
    }

    // ========================================================================
    // Private helpers
    // ========================================================================

    async fn get_booking(&self, id: Uuid) -> AppResult<Booking> {
        self.bookings
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "booking".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    async fn get_service(&self, id: Uuid) -> AppResult<Service> {
        self.services
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "service".to_string(),
                field: "id".to_string(),
                value: id.to_string(),
            })
    }

    async fn business_of(&self, booking: &Booking) -> AppResult<(Service, Business)> {
        let service = self.get_service(booking.service_id).await?;
        let business = self
            .businesses
            .find_by_id(service.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "id".to_string(),
                value: service.business_id.to_string(),
            })?;
        Ok((service, business))
    }

    async fn authorize_access(
        &self,
        booking: &Booking,
        viewer_id: Uuid,
        viewer_role: Role,
    ) -> AppResult<()> {
        if booking.user_id == viewer_id || viewer_role == Role::Admin {
            return Ok(());
        }

        let (_, business) = self.business_of(booking).await?;
        if business.user_id == viewer_id {
            return Ok(());
        }

        Err(AppError::Forbidden {
            message: "You do not have permission to access this booking".to_string(),
        })
    }

    fn recipient_for(user: &User) -> Recipient {
        Recipient {
            email: Some(user.email.clone()),
            phone: user.phone.clone(),
        }
    }

    async fn recipient_of(&self, user_id: Uuid) -> Recipient {
        match self.users.find_by_id(user_id).await {
            Ok(Some(user)) => Self::recipient_for(&user),
            _ => Recipient::default(),
        }
    }

    async fn notify_provider_of_creation(
        &self,
        booking: &Booking,
        service: &Service,
    ) -> AppResult<()> {
        let business = self
            .businesses
            .find_by_id(service.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound {
                entity: "business".to_string(),
                field: "id".to_string(),
                value: service.business_id.to_string(),
            })?;

        let recipient = self.recipient_of(business.user_id).await;

        self.notifications
            .push(
                NewNotification {
                    user_id: business.user_id,
                    kind: NotificationKind::BookingConfirmation,
                    title: "New Booking Request".to_string(),
                    message: format!(
                        "You have a new booking request for {} on {} at {}",
                        service.name, booking.service_date, booking.service_time
                    ),
                    data: Some(json!({
                        "booking_id": booking.id,
                        "booking_number": booking.booking_number,
                        "service_date": booking.service_date,
                        "service_time": booking.service_time,
                        "service_name": service.name,
                    })),
                    status: NotificationStatus::Unread,
                },
                recipient,
            )
            .await?;

        Ok(())
    }

    async fn notify_status_change(
        &self,
        booking: &Booking,
        old_status: BookingStatus,
        new_status: BookingStatus,
        changed_by: Uuid,
    ) -> AppResult<()> {
        let (service, business) = self.business_of(booking).await?;

        // The customer always hears about a status change
        let customer_recipient = self.recipient_of(booking.user_id).await;
        self.notifications
            .push(
                NewNotification {
                    user_id: booking.user_id,
                    kind: NotificationKind::System,
                    title: format!("Booking {}", new_status.label()),
                    message: format!(
                        "Your booking for {} on {} has been {}.",
                        service.name,
                        booking.service_date,
                        new_status.label().to_lowercase()
                    ),
                    data: Some(json!({
                        "booking_id": booking.id,
                        "booking_number": booking.booking_number,
                        "new_status": new_status,
                        "previous_status": old_status,
                        "service_date": booking.service_date,
                        "service_time": booking.service_time,
                    })),
                    status: NotificationStatus::Unread,
                },
                customer_recipient,
            )
            .await?;

        // The provider hears about it when the customer made the change
        if booking.user_id == changed_by {
            let provider_recipient = self.recipient_of(business.user_id).await;
            self.notifications
                .push(
                    NewNotification {
                        user_id: business.user_id,
                        kind: NotificationKind::System,
                        title: "Booking Updated".to_string(),
                        message: format!(
                            "A booking for {} on {} has been updated.",
                            service.name, booking.service_date
                        ),
                        data: Some(json!({
                            "booking_id": booking.id,
                            "booking_number": booking.booking_number,
                            "updated_by": "customer",
                            "service_date": booking.service_date,
                            "service_time": booking.service_time,
                        })),
                        status: NotificationStatus::Unread,
                    },
                    provider_recipient,
                )
                .await?;
        }

        Ok(())
    }

    async fn notify_cancellation(
        &self,
        booking: &Booking,
        cancelled_by: Uuid,
        reason: Option<&str>,
    ) -> AppResult<()> {
        let (service, business) = self.business_of(booking).await?;
        let reason_suffix = reason.map(|r| format!(" Reason: {}", r)).unwrap_or_default();

        if business.user_id == cancelled_by {
            // Provider cancelled: tell the customer
            let recipient = self.recipient_of(booking.user_id).await;
            self.notifications
                .push(
                    NewNotification {
                        user_id: booking.user_id,
                        kind: NotificationKind::BookingCancelled,
                        title: "Booking Cancelled by Provider".to_string(),
                        message: format!(
                            "Your booking for {} on {} has been cancelled by the provider.{}",
                            service.name, booking.service_date, reason_suffix
                        ),
                        data: Some(json!({
                            "booking_id": booking.id,
                            "booking_number": booking.booking_number,
                            "cancelled_by": "provider",
                            "reason": reason.unwrap_or("Not specified"),
                            "service_date": booking.service_date,
                            "service_time": booking.service_time,
                        })),
                        status: NotificationStatus::Unread,
                    },
                    recipient,
                )
                .await?;
        } else if booking.user_id == cancelled_by {
            // Customer cancelled: tell the provider
            let recipient = self.recipient_of(business.user_id).await;
            self.notifications
                .push(
                    NewNotification {
                        user_id: business.user_id,
                        kind: NotificationKind::BookingCancelled,
                        title: "Booking Cancelled by Customer".to_string(),
                        message: format!(
                            "A booking for {} on {} has been cancelled by the customer.{}",
                            service.name, booking.service_date, reason_suffix
                        ),
                        data: Some(json!({
                            "booking_id": booking.id,
                            "booking_number": booking.booking_number,
                            "cancelled_by": "customer",
                            "reason": reason.unwrap_or("Not specified"),
                            "service_date": booking.service_date,
                            "service_time": booking.service_time,
                        })),
                        status: NotificationStatus::Unread,
                    },
                    recipient,
                )
                .await?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    #[test]
    fn slot_window_is_one_hour() {
        let (start, end) = slot_window(date("2024-06-01"), time("10:00:00"));
        assert_eq!(end - start, Duration::minutes(60));
        assert_eq!(start, date("2024-06-01").and_time(time("10:00:00")));
    }

    #[test]
    fn booking_at_ten_blocks_ten_thirty_but_not_eleven() {
        // A 10:00 booking occupies 10:00-11:00: 10:30 must be rejected,
        // 11:00 must be accepted.
        let existing = slot_window(date("2024-06-01"), time("10:00:00"));

        let half_past = slot_window(date("2024-06-01"), time("10:30:00"));
        assert!(slots_overlap(half_past, existing));

        let on_the_hour = slot_window(date("2024-06-01"), time("11:00:00"));
        assert!(!slots_overlap(on_the_hour, existing));
    }

    #[test]
    fn candidate_start_inside_existing_overlaps() {
        let existing = slot_window(date("2024-06-01"), time("10:00:00"));
        let candidate = slot_window(date("2024-06-01"), time("10:59:00"));
        assert!(slots_overlap(candidate, existing));
    }

    #[test]
    fn candidate_end_inside_existing_overlaps() {
        let existing = slot_window(date("2024-06-01"), time("10:00:00"));
        let candidate = slot_window(date("2024-06-01"), time("09:30:00"));
        assert!(slots_overlap(candidate, existing));
    }

    #[test]
    fn candidate_containing_existing_overlaps() {
        // Containment case: a candidate window that spans the existing one.
        // With fixed one-hour slots this means identical windows.
        let existing = slot_window(date("2024-06-01"), time("10:00:00"));
        let candidate = slot_window(date("2024-06-01"), time("10:00:00"));
        assert!(slots_overlap(candidate, existing));
    }

    #[test]
    fn adjacent_windows_do_not_overlap() {
        let existing = slot_window(date("2024-06-01"), time("10:00:00"));

        let before = slot_window(date("2024-06-01"), time("09:00:00"));
        assert!(!slots_overlap(before, existing));

        let after = slot_window(date("2024-06-01"), time("11:00:00"));
        assert!(!slots_overlap(after, existing));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = slot_window(date("2024-06-01"), time("10:00:00"));
        let b = slot_window(date("2024-06-01"), time("10:30:00"));
        assert_eq!(slots_overlap(a, b), slots_overlap(b, a));
    }

    #[test]
    fn update_rejected_for_terminal_states() {
        assert!(!can_update(BookingStatus::Cancelled));
        assert!(!can_update(BookingStatus::Completed));

        assert!(can_update(BookingStatus::Pending));
        assert!(can_update(BookingStatus::Confirmed));
        assert!(can_update(BookingStatus::InProgress));
        assert!(can_update(BookingStatus::NoShow));
    }

    #[test]
    fn delete_allowed_only_from_pending_or_cancelled() {
        assert!(can_delete(BookingStatus::Pending));
        assert!(can_delete(BookingStatus::Cancelled));

        assert!(!can_delete(BookingStatus::Confirmed));
        assert!(!can_delete(BookingStatus::InProgress));
        assert!(!can_delete(BookingStatus::Completed));
        assert!(!can_delete(BookingStatus::NoShow));
    }

    #[test]
    fn status_labels() {
        assert_eq!(BookingStatus::InProgress.label(), "In Progress");
        assert_eq!(BookingStatus::NoShow.label(), "No Show");
    }
}
