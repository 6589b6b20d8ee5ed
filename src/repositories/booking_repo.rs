//! Booking repository for async database operations.
//!
//! Booking + add-on writes are transactional; the overlap-candidate fetch
//! backs the availability check and is deliberately a plain read (no row
//! locks), matching the documented read-then-decide design.

use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::{AsyncConnection, RunQueryDsl, scoped_futures::ScopedFutureExt};
use uuid::Uuid;

use crate::db::AsyncDbPool;
use crate::error::AppError;
use crate::models::{
    Booking, BookingAddOn, BookingStatus, NewBooking, NewBookingAddOn, UpdateBooking,
};
use crate::schema::{booking_addons, bookings, services};

/// Optional filters for booking listings
#[derive(Debug, Clone, Default)]
pub struct BookingFilter {
    pub user_id: Option<Uuid>,
    pub service_id: Option<Uuid>,
    pub status: Option<BookingStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Clone)]
pub struct BookingRepository {
    pool: AsyncDbPool,
}

impl BookingRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }

    /// Inserts a booking and its add-ons in one transaction.
    pub async fn create_with_addons(
        &self,
        new_booking: NewBooking,
        addons: Vec<(String, BigDecimal)>,
    ) -> Result<(Booking, Vec<BookingAddOn>), AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<(Booking, Vec<BookingAddOn>), AppError, _>(|conn| {
            async move {
                let booking: Booking = diesel::insert_into(bookings::table)
                    .values(&new_booking)
                    .returning(Booking::as_returning())
                    .get_result(conn)
                    .await?;

                let mut saved_addons = Vec::new();
                if !addons.is_empty() {
                    let rows: Vec<NewBookingAddOn> = addons
                        .into_iter()
                        .map(|(name, price)| NewBookingAddOn {
                            booking_id: booking.id,
                            name,
                            price,
                        })
                        .collect();

                    saved_addons = diesel::insert_into(booking_addons::table)
                        .values(&rows)
                        .returning(BookingAddOn::as_returning())
                        .get_results(conn)
                        .await?;
                }

                Ok((booking, saved_addons))
            }
            .scope_boxed()
        })
        .await
    }

    pub async fn find_by_id(&self, booking_id: Uuid) -> Result<Option<Booking>, AppError> {
        let mut conn = self.pool.get().await?;

        bookings::table
            .filter(bookings::id.eq(booking_id))
            .select(Booking::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(AppError::from)
    }

    pub async fn find_addons(&self, booking_id: Uuid) -> Result<Vec<BookingAddOn>, AppError> {
        let mut conn = self.pool.get().await?;

        booking_addons::table
            .filter(booking_addons::booking_id.eq(booking_id))
            .select(BookingAddOn::as_select())
            .load(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Fetches bookings that could overlap a candidate slot: same service,
    /// same date, still occupying (pending/confirmed/in_progress).
    pub async fn find_overlap_candidates(
        &self,
        service_id: Uuid,
        date: NaiveDate,
        exclude_booking_id: Option<Uuid>,
    ) -> Result<Vec<Booking>, AppError> {
        let mut conn = self.pool.get().await?;

        let mut query = bookings::table
            .select(Booking::as_select())
            .into_boxed();

        query = query
            .filter(bookings::service_id.eq(service_id))
            .filter(bookings::service_date.eq(date))
            .filter(bookings::status.eq_any(BookingStatus::OCCUPYING));

        if let Some(exclude) = exclude_booking_id {
            query = query.filter(bookings::id.ne(exclude));
        }

        query.load(&mut conn).await.map_err(AppError::from)
    }

    /// Lists bookings matching the filter, newest first.
    pub async fn list(
        &self,
        filter: &BookingFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Booking>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let mut query = bookings::table
            .select(Booking::as_select())
            .into_boxed();
        let mut count_query = bookings::table
            .select(diesel::dsl::count_star())
            .into_boxed();

        if let Some(user_id) = filter.user_id {
            query = query.filter(bookings::user_id.eq(user_id));
            count_query = count_query.filter(bookings::user_id.eq(user_id));
        }
        if let Some(service_id) = filter.service_id {
            query = query.filter(bookings::service_id.eq(service_id));
            count_query = count_query.filter(bookings::service_id.eq(service_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(bookings::status.eq(status));
            count_query = count_query.filter(bookings::status.eq(status));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(bookings::service_date.ge(from));
            count_query = count_query.filter(bookings::service_date.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(bookings::service_date.le(to));
            count_query = count_query.filter(bookings::service_date.le(to));
        }

        let items = query
            .order(bookings::created_at.desc())
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await?;

        let total = count_query.first::<i64>(&mut conn).await?;

        Ok((items, total))
    }

    /// Lists bookings for all services of a business, soonest slot first.
    pub async fn list_for_business(
        &self,
        business_id: Uuid,
        filter: &BookingFilter,
        offset: i64,
        limit: i64,
    ) -> Result<(Vec<Booking>, i64), AppError> {
        let mut conn = self.pool.get().await?;

        let mut query = bookings::table
            .inner_join(services::table)
            .filter(services::business_id.eq(business_id))
            .select(Booking::as_select())
            .into_boxed();
        let mut count_query = bookings::table
            .inner_join(services::table)
            .filter(services::business_id.eq(business_id))
            .select(diesel::dsl::count_star())
            .into_boxed();

        if let Some(status) = filter.status {
            query = query.filter(bookings::status.eq(status));
            count_query = count_query.filter(bookings::status.eq(status));
        }
        if let Some(from) = filter.date_from {
            query = query.filter(bookings::service_date.ge(from));
            count_query = count_query.filter(bookings::service_date.ge(from));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(bookings::service_date.le(to));
            count_query = count_query.filter(bookings::service_date.le(to));
        }

        let items = query
            .order((bookings::service_date.asc(), bookings::service_time.asc()))
            .offset(offset)
            .limit(limit)
            .load(&mut conn)
            .await?;

        let total = count_query.first::<i64>(&mut conn).await?;

        Ok((items, total))
    }

    pub async fn update(
        &self,
        booking_id: Uuid,
        update_data: UpdateBooking,
    ) -> Result<Booking, AppError> {
        let mut conn = self.pool.get().await?;

        diesel::update(bookings::table.filter(bookings::id.eq(booking_id)))
            .set((&update_data, bookings::updated_at.eq(diesel::dsl::now)))
            .returning(Booking::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(AppError::from)
    }

    /// Deletes a booking and its add-ons in one transaction.
    pub async fn delete_with_addons(&self, booking_id: Uuid) -> Result<usize, AppError> {
        let mut conn = self.pool.get().await?;

        conn.transaction::<usize, AppError, _>(|conn| {
            async move {
                diesel::delete(
                    booking_addons::table.filter(booking_addons::booking_id.eq(booking_id)),
                )
                .execute(conn)
                .await?;

                let affected =
                    diesel::delete(bookings::table.filter(bookings::id.eq(booking_id)))
                        .execute(conn)
                        .await?;

                Ok(affected)
            }
            .scope_boxed()
        })
        .await
    }
}
