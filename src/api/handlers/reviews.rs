//! Review request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::api::doc::REVIEW_TAG;
use crate::api::dto::{CreateReviewRequest, PagedResponse, PaginationParams, ReviewResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates review routes.
///
/// Routes:
/// - POST /                       - Review a completed booking
/// - GET /service/{service_id}    - Reviews for a service (public)
pub fn review_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(create_review))
        .route("/service/{service_id}", get(service_reviews))
}

/// POST /api/reviews - Review a completed booking
#[utoipa::path(
    post,
    path = "/",
    tag = REVIEW_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Booking is not completed"),
        (status = 403, description = "Booking belongs to someone else"),
        (status = 409, description = "Booking already reviewed")
    )
)]
pub async fn create_review(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateReviewRequest>,
) -> AppResult<(StatusCode, Json<ReviewResponse>)> {
    let review = state
        .services
        .reviews
        .create(user.id, payload.booking_id, payload.rating, payload.comment)
        .await?;

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

/// GET /api/reviews/service/{service_id} - Reviews for a service
#[utoipa::path(
    get,
    path = "/service/{service_id}",
    tag = REVIEW_TAG,
    params(
        ("service_id" = Uuid, Path, description = "Service id"),
        PaginationParams
    ),
    responses(
        (status = 200, description = "Paged list of reviews")
    )
)]
pub async fn service_reviews(
    State(state): State<AppState>,
    Path(service_id): Path<Uuid>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<ReviewResponse>>> {
    let pagination = pagination.normalize();
    let (reviews, total) = state
        .services
        .reviews
        .list_for_service(service_id, pagination.offset(), pagination.limit())
        .await?;

    let data = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}
