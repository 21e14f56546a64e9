//! # REST API for Payment Uploads
//!
//! Fills the in-memory payment store that the due endpoints read from.
//! `PUT` replaces the stored rows, `POST` adds to them.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::put,
    Router,
};
use shared::{PaymentPeriod, PaymentUploadResponse};
use tracing::{info, warn};

use crate::domain::{PaymentUploadError, UploadOutcome};
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::AppState;

/// Create a router for payment upload APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/payments", put(replace_payments).post(append_payments))
}

/// Replace every stored payment with the uploaded rows
pub async fn replace_payments(
    State(state): State<AppState>,
    Json(payments): Json<Vec<PaymentPeriod>>,
) -> impl IntoResponse {
    info!("PUT /api/dues/payments - {} rows", payments.len());

    let payments = payments.into_iter().map(PaymentMapper::to_domain).collect();
    upload_response(state.payment_service.replace_payments(payments))
}

/// Add the uploaded rows to the stored payments
pub async fn append_payments(
    State(state): State<AppState>,
    Json(payments): Json<Vec<PaymentPeriod>>,
) -> impl IntoResponse {
    info!("POST /api/dues/payments - {} rows", payments.len());

    let payments = payments.into_iter().map(PaymentMapper::to_domain).collect();
    upload_response(state.payment_service.append_payments(payments))
}

fn upload_response(result: Result<UploadOutcome, PaymentUploadError>) -> axum::response::Response {
    match result {
        Ok(outcome) => {
            let response = PaymentUploadResponse {
                accepted_count: outcome.accepted,
                stored_count: outcome.stored,
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            warn!("Payment upload refused: {}", e);
            (StatusCode::CONFLICT, e.to_string()).into_response()
        }
    }
}
