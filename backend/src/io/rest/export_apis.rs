//! # REST API for Data Export
//!
//! Endpoint for exporting the due table as a CSV file. When an export
//! directory is configured the file is also saved on the server.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::{error, info, warn};

use crate::io::rest::due_apis::{parse_as_of, DueTableParams};
use crate::AppState;

/// Create a router for export related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/export", get(export_dues_csv))
}

/// Export the (filtered, sorted) due table as CSV data
pub async fn export_dues_csv(
    State(state): State<AppState>,
    Query(params): Query<DueTableParams>,
) -> impl IntoResponse {
    info!("GET /api/dues/export - params: {:?}", params);

    let as_of = match parse_as_of(params.as_of.as_deref()) {
        Ok(date) => date,
        Err(e) => {
            warn!("Rejected export request: {}", e);
            return (StatusCode::BAD_REQUEST, e.to_string()).into_response();
        }
    };

    let report = match state.due_service.report_for_stored_payments(as_of).await {
        Ok(report) => report,
        Err(e) => {
            error!("Failed to load dues for export: {:#}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting dues").into_response();
        }
    };

    let rows = state.due_table_service.build_table(&report.result, &params.to_query());

    match state.export_service.export_dues(&rows, as_of) {
        Ok(export) => (StatusCode::OK, Json(export)).into_response(),
        Err(e) => {
            error!("Failed to write due export: {:#}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Error exporting dues").into_response()
        }
    }
}
