//! Business request handlers.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::api::doc::BUSINESS_TAG;
use crate::api::dto::{
    BusinessResponse, CreateBusinessRequest, PagedResponse, PaginationParams,
    UpdateBusinessRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::models::NewBusiness;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates business-related routes.
///
/// Routes:
/// - GET /        - List businesses (public)
/// - POST /       - Create a business for the caller
/// - GET /my      - The caller's business
/// - GET /{id}    - Business details (public)
/// - PUT /{id}    - Update (owner or admin)
pub fn business_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_businesses).post(create_business))
        .route("/my", get(my_business))
        .route("/{id}", get(get_business).put(update_business))
}

/// GET /api/businesses - List businesses
#[utoipa::path(
    get,
    path = "/",
    tag = BUSINESS_TAG,
    params(PaginationParams),
    responses(
        (status = 200, description = "Paged list of businesses")
    )
)]
pub async fn list_businesses(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<BusinessResponse>>> {
    let pagination = pagination.normalize();
    let (businesses, total) = state
        .services
        .businesses
        .list(pagination.offset(), pagination.limit())
        .await?;

    let data = businesses.into_iter().map(BusinessResponse::from).collect();
    Ok(Json(PagedResponse::new(data, &pagination, total as u64)))
}

/// POST /api/businesses - Create a business owned by the caller
#[utoipa::path(
    post,
    path = "/",
    tag = BUSINESS_TAG,
    security(("bearerAuth" = [])),
    request_body = CreateBusinessRequest,
    responses(
        (status = 201, description = "Business created", body = BusinessResponse),
        (status = 409, description = "Caller already owns a business")
    )
)]
pub async fn create_business(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateBusinessRequest>,
) -> AppResult<(StatusCode, Json<BusinessResponse>)> {
    let business = state
        .services
        .businesses
        .create(NewBusiness {
            user_id: user.id,
            name: payload.name,
            kind: payload.kind,
            description: payload.description,
            address: payload.address,
            city: payload.city,
            state: payload.state,
            zip_code: payload.zip_code,
            phone: payload.phone,
            email: payload.email,
            image: payload.image,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(BusinessResponse::from(business))))
}

/// GET /api/businesses/my - The caller's business
#[utoipa::path(
    get,
    path = "/my",
    tag = BUSINESS_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The caller's business", body = BusinessResponse),
        (status = 404, description = "Caller has no business")
    )
)]
pub async fn my_business(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<BusinessResponse>> {
    let business = state.services.businesses.get_by_owner(user.id).await?;
    Ok(Json(BusinessResponse::from(business)))
}

/// GET /api/businesses/{id} - Business details
#[utoipa::path(
    get,
    path = "/{id}",
    tag = BUSINESS_TAG,
    params(("id" = Uuid, Path, description = "Business id")),
    responses(
        (status = 200, description = "Business details", body = BusinessResponse),
        (status = 404, description = "Business not found")
    )
)]
pub async fn get_business(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<Json<BusinessResponse>> {
    let business = state.services.businesses.get(id).await?;
    Ok(Json(BusinessResponse::from(business)))
}

/// PUT /api/businesses/{id} - Update a business
#[utoipa::path(
    put,
    path = "/{id}",
    tag = BUSINESS_TAG,
    security(("bearerAuth" = [])),
    params(("id" = Uuid, Path, description = "Business id")),
    request_body = UpdateBusinessRequest,
    responses(
        (status = 200, description = "Updated business", body = BusinessResponse),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Business not found")
    )
)]
pub async fn update_business(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    ValidatedJson(payload): ValidatedJson<UpdateBusinessRequest>,
) -> AppResult<Json<BusinessResponse>> {
    let business = state
        .services
        .businesses
        .update(id, user.id, user.role, payload.into_update_business())
        .await?;
    Ok(Json(BusinessResponse::from(business)))
}
