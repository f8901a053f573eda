use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use hostelmate_db::models::{Payment, Permissions};
use hostelmate_services::dao::{base::DaoError, payment::PaymentReceipt};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::rfc3339;
use crate::{
    error::ApiError,
    extractors::{auth::AuthUser, permission::require_self_or},
    state::AppState,
};

// ---- Request types -------------------------------------------------------

/// Clients send the price either as a number or as a numeric string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    pub fn value(&self) -> Result<f64, ApiError> {
        match self {
            PriceInput::Number(n) => Ok(*n),
            PriceInput::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| ApiError::BadRequest(format!("Invalid price: {s}"))),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PaymentIntentRequest {
    pub price: PriceInput,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RecordPaymentRequest {
    pub user_email: Option<String>,
    #[validate(length(min = 1, message = "badge is required"))]
    pub badge: String,
    #[validate(range(exclusive_min = 0.0, message = "amount must be positive"))]
    pub amount: f64,
    #[validate(length(min = 1, message = "transactionId is required"))]
    pub transaction_id: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub id: String,
    pub user_email: String,
    pub badge: String,
    pub amount: f64,
    pub transaction_id: String,
    pub created_at: String,
}

// ---- POST /create-payment-intent (authenticated) -------------------------

pub async fn create_intent(
    State(state): State<AppState>,
    _auth: AuthUser,
    Json(body): Json<PaymentIntentRequest>,
) -> Result<Json<PaymentIntentResponse>, ApiError> {
    let price = body.price.value()?;
    let intent = state.stripe.create_payment_intent(price).await?;

    Ok(Json(PaymentIntentResponse {
        client_secret: intent.client_secret,
    }))
}

// ---- POST /payments (authenticated, payer only, Stripe-verified) ---------

pub async fn record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(body): Json<RecordPaymentRequest>,
) -> Result<(StatusCode, Json<PaymentReceipt>), ApiError> {
    body.validate()?;

    let user_email = body.user_email.unwrap_or_else(|| auth.email.clone());
    if user_email != auth.email {
        return Err(ApiError::Forbidden(
            "Payments can only be recorded for yourself".to_string(),
        ));
    }

    state
        .stripe
        .verify_payment(&body.transaction_id, body.amount)
        .await?;

    let receipt = state
        .payments
        .record(
            &state.users,
            user_email,
            body.badge,
            body.amount,
            body.transaction_id,
        )
        .await
        .map_err(|e| match e {
            DaoError::DuplicateKey(_) => {
                ApiError::Conflict("Transaction already recorded".to_string())
            }
            other => other.into(),
        })?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// ---- GET /payments/{email} (self or VIEW_PAYMENTS) -----------------------

pub async fn history(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(email): Path<String>,
) -> Result<Json<Vec<PaymentResponse>>, ApiError> {
    require_self_or(&state, &auth, &email, Permissions::VIEW_PAYMENTS).await?;
    let payments = state.payments.history(&email).await?;
    Ok(Json(payments.into_iter().map(to_response).collect()))
}

fn to_response(p: Payment) -> PaymentResponse {
    PaymentResponse {
        id: p.id.map(|id| id.to_hex()).unwrap_or_default(),
        user_email: p.user_email,
        badge: p.badge,
        amount: p.amount,
        transaction_id: p.transaction_id,
        created_at: rfc3339(p.created_at),
    }
}
