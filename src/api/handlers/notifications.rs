//! Notification request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get, post},
};
use uuid::Uuid;

use crate::api::doc::NOTIFICATION_TAG;
use crate::api::dto::{
    MessageResponse, NotificationResponse, PagedResponse, PaginationParams,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;

/// Creates notification routes.
///
/// Routes:
/// - GET /my            - Caller's notifications
/// - POST /{id}/read    - Mark one as read
/// - POST /read-all     - Mark all as read
/// - DELETE /{id}       - Delete a notification
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/my", get(my_notifications))
        .route("/{id}/read", post(mark_read))
        .route("/read-all", post(mark_all_read))
        .route("/{id}", delete(delete_notification))
}

/// GET /api/notifications/my - Caller's notifications
#[utoipa::path(
    get,
    path = "/my",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Paged list of the caller's notifications")
    )
)]
pub async fn my_notifications(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<NotificationResponse>>> {
    let pagination = pagination.normalize();
    let (notifications, total) = state
        .services
        .notifications
        .list_for_user(user.id, pagination.offset(), pagination.limit())
        .await?;

    let data = notifications
        .into_iter()
        .map(NotificationResponse::from)
        .collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// POST /api/notifications/{id}/read - Mark one notification as read
#[utoipa::path(
    post,
    path = "/{id}/read",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification marked read", body = NotificationResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Notification not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NotificationResponse>> {
    let notification = state.services.notifications.mark_read(id, user.id).await?;
    Ok(Json(NotificationResponse::from(notification)))
}

/// POST /api/notifications/read-all - Mark all notifications as read
#[utoipa::path(
    post,
    path = "/read-all",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "All notifications marked read", body = MessageResponse)
    )
)]
pub async fn mark_all_read(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    let updated = state.services.notifications.mark_all_read(user.id).await?;
    Ok(Json(MessageResponse::new(&format!(
        "{} notifications marked as read",
        updated
    ))))
}

/// DELETE /api/notifications/{id} - Delete a notification
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = NOTIFICATION_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Notification id")),
    responses(
        (status = 200, description = "Notification deleted", body = MessageResponse),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn delete_notification(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<MessageResponse>> {
    state.services.notifications.delete(id, user.id).await?;
    Ok(Json(MessageResponse::new("Notification deleted")))
}
