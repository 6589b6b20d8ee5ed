//! Authentication handlers: registration, login, token rotation, password
//! reset and email verification.

use axum::{Json, Router, extract::State, http::StatusCode, routing::post};

use crate::api::doc::AUTH_TAG;
use crate::api::dto::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, MessageResponse, ProviderAuthResponse,
    RefreshTokenRequest, RefreshTokenResponse, RegisterProviderRequest, RegisterRequest,
    ResendVerificationRequest, ResetPasswordRequest, VerifyEmailRequest,
};
use crate::api::middleware::AuthUser;
use crate::error::AppResult;
use crate::services::{RegisterCustomerInput, RegisterProviderInput};
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates the authentication routes.
///
/// # Routes
/// - `POST /register` - Register a customer account
/// - `POST /register/provider` - Register a provider and their business
/// - `POST /login` - Authenticate and get tokens
/// - `POST /refresh` - Rotate the refresh token
/// - `POST /logout` - Invalidate the stored refresh token
/// - `POST /forgot-password` / `POST /reset-password`
/// - `POST /verify-email` / `POST /resend-verification`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/register/provider", post(register_provider))
        .route("/login", post(login))
        .route("/refresh", post(refresh_token))
        .route("/logout", post(logout))
        .route("/forgot-password", post(forgot_password))
        .route("/reset-password", post(reset_password))
        .route("/verify-email", post(verify_email))
        .route("/resend-verification", post(resend_verification))
}

/// POST /api/auth/register - Register a customer account
#[utoipa::path(
    post,
    path = "/register",
    tag = AUTH_TAG,
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Customer registered", body = AuthResponse),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterRequest>,
) -> AppResult<(StatusCode, Json<AuthResponse>)> {
    let input = RegisterCustomerInput {
        email: payload.email,
        password: payload.password,
        first_name: payload.first_name,
        last_name: payload.last_name,
        phone: payload.phone,
    };

    let (user, tokens) = state
        .services
        .users
        .register_customer(input, &state.jwt_config)
        .await?;

    let response = AuthResponse {
        user: user.into(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        message: "Customer registered successfully. Please verify your email.".to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/register/provider - Register a service provider
#[utoipa::path(
    post,
    path = "/register/provider",
    tag = AUTH_TAG,
    request_body = RegisterProviderRequest,
    responses(
        (status = 201, description = "Provider registered", body = ProviderAuthResponse),
        (status = 409, description = "Email already in use")
    )
)]
pub async fn register_provider(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RegisterProviderRequest>,
) -> AppResult<(StatusCode, Json<ProviderAuthResponse>)> {
    let input = RegisterProviderInput {
        account: RegisterCustomerInput {
            email: payload.email,
            password: payload.password,
            first_name: payload.first_name,
            last_name: payload.last_name,
            phone: payload.phone,
        },
        business_name: payload.business_name,
        business_kind: payload.business_kind,
        business_description: payload.business_description,
        address: payload.business_address,
        city: payload.city,
        state: payload.state,
        zip_code: payload.zip_code,
    };

    let (user, business, tokens) = state
        .services
        .users
        .register_provider(input, &state.jwt_config)
        .await?;

    let response = ProviderAuthResponse {
        user: user.into(),
        business: business.into(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        message:
            "Service provider registered successfully. Please verify your email and await business verification."
                .to_string(),
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/login - Authenticate user
#[utoipa::path(
    post,
    path = "/login",
    tag = AUTH_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = AuthResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 403, description = "Account deactivated")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    let (user, tokens) = state
        .services
        .users
        .authenticate(&payload.email, &payload.password, &state.jwt_config)
        .await?;

    Ok(Json(AuthResponse {
        user: user.into(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        message: "User signed in successfully".to_string(),
    }))
}

/// POST /api/auth/refresh - Rotate tokens
#[utoipa::path(
    post,
    path = "/refresh",
    tag = AUTH_TAG,
    request_body = RefreshTokenRequest,
    responses(
        (status = 200, description = "Tokens refreshed", body = RefreshTokenResponse),
        (status = 401, description = "Invalid or expired refresh token"),
        (status = 403, description = "Refresh token does not match stored hash")
    )
)]
pub async fn refresh_token(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<RefreshTokenRequest>,
) -> AppResult<Json<RefreshTokenResponse>> {
    let tokens = state
        .services
        .users
        .refresh_tokens(&payload.refresh_token, &state.jwt_config)
        .await?;

    Ok(Json(RefreshTokenResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
    }))
}

/// POST /api/auth/logout - Sign out
#[utoipa::path(
    post,
    path = "/logout",
    tag = AUTH_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "Signed out", body = MessageResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<MessageResponse>> {
    state.services.users.logout(user.id).await?;
    Ok(Json(MessageResponse::new("Successfully signed out")))
}

/// POST /api/auth/forgot-password - Start a password reset
#[utoipa::path(
    post,
    path = "/forgot-password",
    tag = AUTH_TAG,
    request_body = ForgotPasswordRequest,
    responses(
        (status = 200, description = "Reset link sent if the email exists", body = MessageResponse)
    )
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ForgotPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users
        .forgot_password(&payload.email, &state.jwt_config)
        .await?;

    // Never reveal whether the email exists
    Ok(Json(MessageResponse::new(
        "If email exists, password reset link has been sent",
    )))
}

/// POST /api/auth/reset-password - Complete a password reset
#[utoipa::path(
    post,
    path = "/reset-password",
    tag = AUTH_TAG,
    request_body = ResetPasswordRequest,
    responses(
        (status = 200, description = "Password reset", body = MessageResponse),
        (status = 401, description = "Invalid or expired token")
    )
)]
pub async fn reset_password(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResetPasswordRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users
        .reset_password(&payload.token, &payload.new_password, &state.jwt_config)
        .await?;

    Ok(Json(MessageResponse::new("Password reset successfully")))
}

/// POST /api/auth/verify-email - Verify an email address
#[utoipa::path(
    post,
    path = "/verify-email",
    tag = AUTH_TAG,
    request_body = VerifyEmailRequest,
    responses(
        (status = 200, description = "Email verified", body = MessageResponse),
        (status = 401, description = "Invalid or expired verification token")
    )
)]
pub async fn verify_email(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<VerifyEmailRequest>,
) -> AppResult<Json<MessageResponse>> {
    let message = state
        .services
        .users
        .verify_email(&payload.token, &state.jwt_config)
        .await?;

    Ok(Json(MessageResponse::new(message)))
}

/// POST /api/auth/resend-verification - Resend the verification email
#[utoipa::path(
    post,
    path = "/resend-verification",
    tag = AUTH_TAG,
    request_body = ResendVerificationRequest,
    responses(
        (status = 200, description = "Verification link sent if applicable", body = MessageResponse)
    )
)]
pub async fn resend_verification(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ResendVerificationRequest>,
) -> AppResult<Json<MessageResponse>> {
    state
        .services
        .users
        .resend_verification(&payload.email, &state.jwt_config)
        .await?;

    Ok(Json(MessageResponse::new(
        "If the email exists, verification link has been sent",
    )))
}
