//! Service catalog request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::api::doc::SERVICE_TAG;
use crate::api::dto::{
    CreateServiceRequest, PagedResponse, PaginationParams, ServiceQueryParams, ServiceResponse,
    UpdateServiceRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::repositories::ServiceFilter;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates service catalog routes.
///
/// Routes:
/// - GET /        - List services with filters (public)
/// - POST /       - Create a service under the caller's business
/// - GET /{id}    - Service details (public)
/// - PUT /{id}    - Update (owner or admin)
/// - DELETE /{id} - Delete (owner or admin)
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_services).post(create_service))
        .route(
            "/{id}",
            get(get_service).put(update_service).delete(delete_service),
        )
}

/// GET /api/services - List services
#[utoipa::path(
    get,
    path = "/",
    tag = SERVICE_TAG,
    params(ServiceQueryParams, PaginationParams),
    responses(
        (status = 200, description = "Paged list of services")
    )
)]
pub async fn list_services(
    State(state): State<AppState>,
    Query(filters): Query<ServiceQueryParams>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<ServiceResponse>>> {
    let pagination = pagination.normalize();
    let filter = ServiceFilter {
        business_id: filters.business_id,
        status: filters.status,
        service_type: filters.service_type,
        vehicle_type: filters.vehicle_type,
    };

    let (services, total) = state
        .services
        .catalog
        .list(&filter, pagination.offset(), pagination.limit())
        .await?;

    let data = services.into_iter().map(ServiceResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// POST /api/services - Create a service
#[utoipa::path(
    post,
    path = "/",
    tag = SERVICE_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateServiceRequest,
    responses(
        (status = 201, description = "Service created", body = ServiceResponse),
        (status = 404, description = "Caller has no business")
    )
)]
pub async fn create_service(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateServiceRequest>,
) -> AppResult<(StatusCode, Json<ServiceResponse>)> {
    let service = state
        .services
        .catalog
        .create(user.id, payload.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(ServiceResponse::from(service))))
}

/// GET /api/services/{id} - Service details
#[utoipa::path(
    get,
    path = "/{id}",
    tag = SERVICE_TAG,
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service details", body = ServiceResponse),
        (status = 404, description = "Service not found")
    )
)]
pub async fn get_service(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ServiceResponse>> {
    let service = state.services.catalog.get(id).await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// PUT /api/services/{id} - Update a service
#[utoipa::path(
    put,
    path = "/{id}",
    tag = SERVICE_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Service id")),
    request_body = UpdateServiceRequest,
    responses(
        (status = 200, description = "Updated service", body = ServiceResponse),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn update_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateServiceRequest>,
) -> AppResult<Json<ServiceResponse>> {
    let service = state
        .services
        .catalog
        .update(id, user.id, user.role, payload.into_update_service()?)
        .await?;
    Ok(Json(ServiceResponse::from(service)))
}

/// DELETE /api/services/{id} - Delete a service
#[utoipa::path(
    delete,
    path = "/{id}",
    tag = SERVICE_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Service id")),
    responses(
        (status = 204, description = "Service deleted"),
        (status = 403, description = "Not the owner")
    )
)]
pub async fn delete_service(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    state
        .services
        .catalog
        .delete(id, user.id, user.role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
