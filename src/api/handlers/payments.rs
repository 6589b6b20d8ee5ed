//! Payment request handlers.
//!
//! Charge initiation and OTP submission proxy the gateway; verification
//! additionally records a local payment row, idempotently per booking.

use axum::{Json, Router, extract::State, routing::{get, post}};

use crate::api::doc::PAYMENT_TAG;
use crate::api::dto::{
    CardChargeRequest, MpesaChargeRequest, PaymentResponse, SubmitOtpRequest,
    VerifyPaymentRequest, VerifyPaymentResponse,
};
use crate::api::dto::money_from_f64;
use crate::api::middleware::AuthUser;
use crate::error::{AppError, AppResult};
use crate::external::paystack::PaystackChargeResponse;
use crate::state::AppState;
use crate::utils::validate::ValidatedJson;

/// Creates payment routes.
///
/// Routes:
/// - GET /my     - Caller's payments
/// - POST /mpesa - Initiate an M-Pesa charge
/// - POST /card  - Initiate a card charge
/// - POST /otp   - Submit a charge OTP
/// - POST /verify - Verify by reference and record the payment
pub fn payment_routes() -> Router<AppState> {
    Router::new()
        .route("/my", get(my_payments))
        .route("/mpesa", post(charge_mpesa))
        .route("/card", post(charge_card))
        .route("/otp", post(submit_otp))
        .route("/verify", post(verify_payment))
}

/// GET /api/payments/my - Caller's payments
#[utoipa::path(
    get,
    path = "/my",
    tag = PAYMENT_TAG,
    security(("bearerAuth" = [])),
    responses(
        (status = 200, description = "The caller's payments", body = [PaymentResponse])
    )
)]
pub async fn my_payments(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<Vec<PaymentResponse>>> {
    let payments = state.services.payments.list_for_user(user.id).await?;
    Ok(Json(
        payments.into_iter().map(PaymentResponse::from).collect(),
    ))
}

/// POST /api/payments/mpesa - Initiate an M-Pesa charge
#[utoipa::path(
    post,
    path = "/mpesa",
    tag = PAYMENT_TAG,
    security(("bearerAuth" = [])),
    request_body = MpesaChargeRequest,
    responses(
        (status = 200, description = "Gateway charge response", body = PaystackChargeResponse),
        (status = 502, description = "Gateway failure")
    )
)]
pub async fn charge_mpesa(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<MpesaChargeRequest>,
) -> AppResult<Json<PaystackChargeResponse>> {
    tracing::info!(amount = payload.amount, "Initiating M-Pesa charge");

    let amount = money_from_f64(payload.amount, "amount")?;
    let response = state
        .paystack
        .charge_mpesa(&amount, &payload.phone, &payload.email)
        .await?;

    Ok(Json(response))
}

/// POST /api/payments/card - Initiate a card charge
#[utoipa::path(
    post,
    path = "/card",
    tag = PAYMENT_TAG,
    security(("bearerAuth" = [])),
    request_body = CardChargeRequest,
    responses(
        (status = 200, description = "Gateway charge response", body = PaystackChargeResponse),
        (status = 502, description = "Gateway failure")
    )
)]
pub async fn charge_card(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CardChargeRequest>,
) -> AppResult<Json<PaystackChargeResponse>> {
    let amount = money_from_f64(payload.amount, "amount")?;
    let response = state
        .paystack
        .charge_card(&amount, &payload.email, &payload.card)
        .await?;

    Ok(Json(response))
}

/// POST /api/payments/otp - Submit a charge OTP
#[utoipa::path(
    post,
    path = "/otp",
    tag = PAYMENT_TAG,
    security(("bearerAuth" = [])),
    request_body = SubmitOtpRequest,
    responses(
        (status = 200, description = "Gateway charge response", body = PaystackChargeResponse),
        (status = 502, description = "Gateway failure")
    )
)]
pub async fn submit_otp(
    State(state): State<AppState>,
    _user: AuthUser,
    ValidatedJson(payload): ValidatedJson<SubmitOtpRequest>,
) -> AppResult<Json<PaystackChargeResponse>> {
    let response = state
        .paystack
        .submit_otp(&payload.reference, &payload.otp)
        .await?;

    Ok(Json(response))
}

/// POST /api/payments/verify - Verify a payment and record it
///
/// Asks the gateway to verify the reference; on success records a local
/// payment for the booking. If a payment already exists for the booking
/// the existing row is returned with `already_processed = true`.
#[utoipa::path(
    post,
    path = "/verify",
    tag = PAYMENT_TAG,
    security(("bearerAuth" = [])),
    request_body = VerifyPaymentRequest,
    responses(
        (status = 200, description = "Payment verified and recorded", body = VerifyPaymentResponse),
        (status = 400, description = "Gateway did not confirm the payment, or booking id missing"),
        (status = 409, description = "Concurrent duplicate insert caught by the unique constraint"),
        (status = 502, description = "Gateway failure")
    )
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<VerifyPaymentRequest>,
) -> AppResult<Json<VerifyPaymentResponse>> {
    tracing::info!(reference = %payload.reference, user_id = %user.id, "Verifying payment");

    let gateway = state.paystack.verify(&payload.reference).await?;

    if !gateway.is_successful() {
        return Err(AppError::BadRequest {
            message: format!("Payment not confirmed by gateway: {}", gateway.message),
        });
    }

    let booking_id = payload.booking_id.ok_or_else(|| AppError::BadRequest {
        message: "Missing bookingId in payment verification request".to_string(),
    })?;

    let amount = money_from_f64(payload.amount, "amount")?;
    let currency = gateway
        .data
        .as_ref()
        .and_then(|d| d.currency.clone())
        .unwrap_or_else(|| "KES".to_string());

    let (payment, already_processed) = state
        .services
        .payments
        .record_verified(&payload.reference, booking_id, user.id, amount, &currency)
        .await?;

    let message = if already_processed {
        "Payment already verified and recorded"
    } else {
        "Payment verification successful"
    };

    Ok(Json(VerifyPaymentResponse {
        success: true,
        message: message.to_string(),
        data: PaymentResponse::from(payment),
        already_processed,
    }))
}
