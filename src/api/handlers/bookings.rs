//! Booking request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use chrono::Utc;
use uuid::Uuid;

use crate::api::doc::BOOKING_TAG;
use crate::api::dto::{
    AvailabilityQuery, AvailabilityResponse, BookingQueryParams, BookingResponse,
    CancelBookingRequest, CreateBookingRequest, MessageResponse, PagedResponse, PaginationParams,
    UpdateBookingRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::Role;
use crate::repositories::BookingFilter;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates booking routes.
///
/// Routes:
/// - GET /availability  - Check whether a slot is free (public)
/// - POST /             - Create a booking
/// - GET /              - List bookings (admins see all, others their own)
/// - GET /my            - Caller's bookings
/// - GET /provider      - Bookings for the caller's business
/// - GET /{id}          - Booking details
/// - PUT /{id}          - Update a booking
/// - POST /{id}/cancel  - Cancel a booking
/// - DELETE /{id}       - Delete a pending/cancelled booking
pub fn booking_routes() -> Router<AppState> {
    Router::new()
        .route("/availability", get(check_availability))
        .route("/", get(list_bookings).post(create_booking))
        .route("/my", get(my_bookings))
        .route("/provider", get(provider_bookings))
        .route(
            "/{id}",
            get(get_booking).put(update_booking).delete(delete_booking),
        )
        .route("/{id}/cancel", post(cancel_booking))
}

fn filter_from_params(params: &BookingQueryParams) -> BookingFilter {
    let date_from = if params.upcoming {
        Some(
            params
                .date_from
                .map_or_else(|| Utc::now().date_naive(), |d| d.max(Utc::now().date_naive())),
        )
    } else {
        params.date_from
    };

    BookingFilter {
        user_id: params.user_id,
        service_id: params.service_id,
        status: params.status,
        date_from,
        date_to: params.date_to,
    }
}

/// GET /api/bookings/availability - Check whether a slot is free
#[utoipa::path(
    get,
    path = "/availability",
    tag = BOOKING_TAG,
    params(AvailabilityQuery),
    responses(
        (status = 200, description = "Availability result", body = AvailabilityResponse)
    )
)]
pub async fn check_availability(
    State(state): State<AppState>,
    Query(query): Query<AvailabilityQuery>,
) -> AppResult<Json<AvailabilityResponse>> {
    let available = state
        .services
        .bookings
        .check_availability(
            query.service_id,
            query.date,
            query.time,
            query.exclude_booking_id,
        )
        .await?;

    Ok(Json(AvailabilityResponse { available }))
}

/// POST /api/bookings - Create a booking
#[utoipa::path(
    post,
    path = "/",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateBookingRequest,
    responses(
        (status = 201, description = "Booking created", body = BookingResponse),
        (status = 400, description = "Slot not available"),
        (status = 404, description = "Service not found")
    )
)]
pub async fn create_booking(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateBookingRequest>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let (booking, addons) = state
        .services
        .bookings
        .create(user.id, payload.into_input()?)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse::from_parts(booking, addons)),
    ))
}

/// GET /api/bookings - List bookings
///
/// Admins may filter across all users; everyone else is pinned to their
/// own bookings regardless of the user_id filter they pass.
#[utoipa::path(
    get,
    path = "/",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(BookingQueryParams, PaginationParams),
    responses(
        (status = 200, description = "Paged list of bookings")
    )
)]
pub async fn list_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<BookingQueryParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<BookingResponse>>> {
    let pagination = pagination.normalize();
    let mut filter = filter_from_params(&params);
    if user.role != Role::Admin {
        filter.user_id = Some(user.id);
    }

    let (bookings, total) = state
        .services
        .bookings
        .list(&filter, pagination.offset(), pagination.limit())
        .await?;

    let data = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// GET /api/bookings/my - Caller's bookings
#[utoipa::path(
    get,
    path = "/my",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Paged list of the caller's bookings")
    )
)]
pub async fn my_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<BookingResponse>>> {
    let pagination = pagination.normalize();
    let filter = BookingFilter {
        user_id: Some(user.id),
        ..BookingFilter::default()
    };

    let (bookings, total) = state
        .services
        .bookings
        .list(&filter, pagination.offset(), pagination.limit())
        .await?;

    let data = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// GET /api/bookings/provider - Bookings for the caller's business
#[utoipa::path(
    get,
    path = "/provider",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(BookingQueryParams, PaginationParams),
    responses(
        (status = 200, description = "Paged list of the business's bookings"),
        (status = 404, description = "Caller has no business")
    )
)]
pub async fn provider_bookings(
    State(state): State<AppState>,
    user: AuthUser,
    Query(params): Query<BookingQueryParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<BookingResponse>>> {
    let pagination = pagination.normalize();
    let filter = filter_from_params(&params);

    let (bookings, total) = state
        .services
        .bookings
        .list_for_provider(user.id, &filter, pagination.offset(), pagination.limit())
        .await?;

    let data = bookings.into_iter().map(BookingResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// GET /api/bookings/{id} - Booking details
#[utoipa::path(
    get,
    path = "/{id}",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 403, description = "Not the customer or provider"),
        (status = 404, description = "Booking not found")
    )
)]
pub async fn get_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BookingResponse>> {
    let (booking, addons) = state.services.bookings.get(id, user.id, user.role).await?;
    Ok(Json(BookingResponse::from_parts(booking, addons)))
}

/// PUT /api/bookings/{id} - Update a booking
#[utoipa::path(
    put,
    path = "/{id}",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = UpdateBookingRequest,
    responses(
        (status = 200, description = "Updated booking", body = BookingResponse),
        (status = 400, description = "Invalid state transition or slot taken"),
        (status = 403, description = "Not the customer or provider")
    )
)]
pub async fn update_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBookingRequest>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .services
        .bookings
        .update(id, user.id, user.role, payload.into_input()?)
        .await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// POST /api/bookings/{id}/cancel - Cancel a booking
#[utoipa::path(
    post,
    path = "/{id}/cancel",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    request_body = CancelBookingRequest,
    responses(
        (status = 200, description = "Cancelled booking", body = BookingResponse),
        (status = 400, description = "Already cancelled or completed")
    )
)]
pub async fn cancel_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    payload: Option<Json<CancelBookingRequest>>,
) -> AppResult<Json<BookingResponse>> {
    let reason = payload.and_then(|Json(body)| body.reason);
    let booking = state
        .services
        .bookings
        .cancel(id, user.id, user.role, reason)
        .await?;
    Ok(Json(BookingResponse::from(booking)))
}

/// DELETE /api/bookings/{id} - Delete a booking
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = BOOKING_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Booking id")),
    responses(
        (status = 200, description = "Booking deleted", body = MessageResponse),
        (status = 400, description = "Only pending or cancelled bookings can be deleted")
    )
)]
pub async fn delete_booking(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.bookings.delete(id, user.id, user.role).await?;
    Ok(Json(MessageResponse::new("Booking deleted successfully")))
}
