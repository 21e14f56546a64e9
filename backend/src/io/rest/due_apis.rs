//! # REST API for Maintenance Dues
//!
//! Endpoints returning due calculations and the formatted due table.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use shared::{CalculateDuesRequest, DueSeverity, DueSortField, DueTableResponse, SortDirection};
use tracing::{error, info, warn};

use crate::domain::commands::dues::{CalculateDuesCommand, DueTableQuery};
use crate::domain::DueCalculatorService;
use crate::io::rest::mappers::due_mapper::DueMapper;
use crate::io::rest::mappers::payment_mapper::PaymentMapper;
use crate::AppState;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid as_of date '{0}', expected YYYY-MM-DD")]
pub struct DateParseError(pub String);

/// Parse an optional `as_of` query value, defaulting to today
pub fn parse_as_of(as_of: Option<&str>) -> Result<NaiveDate, DateParseError> {
    match as_of.map(str::trim).filter(|s| !s.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| DateParseError(raw.to_string())),
        None => Ok(DueCalculatorService::today()),
    }
}

// Query parameters for the due summary API
#[derive(Debug, Deserialize)]
pub struct DueSummaryParams {
    pub as_of: Option<String>,
}

// Query parameters for the due table and export APIs
#[derive(Debug, Default, Deserialize)]
pub struct DueTableParams {
    pub search: Option<String>,
    pub min_severity: Option<DueSeverity>,
    pub sort_by: Option<DueSortField>,
    pub direction: Option<SortDirection>,
    pub as_of: Option<String>,
}

impl DueTableParams {
    pub fn to_query(&self) -> DueTableQuery {
        DueTableQuery {
            search: self.search.clone(),
            min_severity: self.min_severity,
            sort_by: self.sort_by.unwrap_or_default(),
            direction: self.direction.unwrap_or_default(),
        }
    }
}

/// Create a router for due related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_dues))
        .route("/calculate", post(calculate_dues))
        .route("/table", get(get_due_table))
}

/// Dues over the stored payments
pub async fn get_dues(
    State(state): State<AppState>,
    Query(params): Query<DueSummaryParams>,
) -> impl IntoResponse {
    info!("GET /api/dues - params: {:?}", params);

    let as_of = match parse_as_of(params.as_of.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected due request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.due_service.report_for_stored_payments(as_of).await {
        Ok(report) => (StatusCode::OK, Json(DueMapper::report_to_response(report))).into_response(),
        Err(e) => {
            error!("Failed to calculate dues: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error calculating dues").into_response()
        }
    }
}

/// Dues over the payments supplied in the request body
pub async fn calculate_dues(
    State(state): State<AppState>,
    Json(request): Json<CalculateDuesRequest>,
) -> impl IntoResponse {
    info!(
        "POST /api/dues/calculate - {} payments, as_of: {:?}",
        request.payments.len(),
        request.as_of
    );

    let as_of = match parse_as_of(request.as_of.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected due calculation: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let command = CalculateDuesCommand {
        payments: request.payments.into_iter().map(PaymentMapper::to_domain).collect(),
        as_of,
    };
    let report = state.due_service.calculate(command);

    (StatusCode::OK, Json(DueMapper::report_to_response(report))).into_response()
}

/// Formatted, filtered and sorted due table over the stored payments
pub async fn get_due_table(
    State(state): State<AppState>,
    Query(params): Query<DueTableParams>,
) -> impl IntoResponse {
    info!("GET /api/dues/table - params: {:?}", params);

    let as_of = match parse_as_of(params.as_of.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected due table request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    match state.due_service.report_for_stored_payments(as_of).await {
        Ok(report) => {
            let rows = state.due_table_service.build_table(&report.result, &params.to_query());
            let response = DueTableResponse {
                row_count: rows.len(),
                rows,
                total_overdue_users: report.result.total_overdue_users,
                average_overdue_days: report.result.average_overdue_days,
                as_of: as_of.format("%Y-%m-%d").to_string(),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            error!("Failed to build due table: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error building due table").into_response()
        }
    }
}
