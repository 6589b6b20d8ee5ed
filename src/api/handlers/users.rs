//! User profile request handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use crate::api::doc::USER_TAG;
use crate::api::dto::{PagedResponse, PaginationParams, UpdateProfileRequest, UserResponse};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates user-related routes.
///
/// Routes:
/// - GET /        - List users (admin)
/// - GET /me      - Current user's profile
/// - PUT /me      - Update current user's profile
/// - DELETE /me   - Deactivate current account
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users))
        .route("/me", get(me).put(update_me).delete(deactivate_me))
}

/// GET /api/users - List all users (admin only)
#[utoipa::path(
    get,
    path = "/",
    tag = USER_TAG,
    security(("bearerAuth" = [])),
    params(PaginationParams),
    responses(
        (status = 200, description = "Paged list of users"),
        (status = 403, description = "Administrator access required")
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<UserResponse>>> {
    user.require_admin()?;

    let pagination = pagination.normalize();
    let (users, total) = state
        .services
        .users
        .list_users(pagination.offset(), pagination.limit())
        .await?;

    let data = users.into_iter().map(UserResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// GET /api/users/me - Current user's profile
#[utoipa::path(
    get,
    path = "/me",
    tag = USER_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Current user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn me(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<UserResponse>> {
    let profile = state.services.users.get_user(user.id).await?;
    Ok(Json(UserResponse::from(profile)))
}

/// PUT /api/users/me - Update current user's profile
#[utoipa::path(
    put,
    path = "/me",
    tag = USER_TAG,
    security(("bearerAuth" = [])),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated user", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    let profile = state
        .services
        .users
        .update_profile(user.id, payload.into_update_user())
        .await?;
    Ok(Json(UserResponse::from(profile)))
}

/// DELETE /api/users/me - Deactivate current account
#[utoipa::path(
    delete,
    path = "/me",
    tag = USER_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Account deactivated", body = UserResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn deactivate_me(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let profile = state.services.users.deactivate(user.id).await?;
    Ok(Json(UserResponse::from(profile)))
}
