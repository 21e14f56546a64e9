//! # Society Dues Backend
//!
//! Works out which residents of a housing society are behind on their
//! maintenance payments, and serves the result over a small REST API.
//!
//! ## Layers
//!
//! - **domain**: due calculation, table formatting and export
//! - **storage**: where payment rows come from (CSV file, or memory filled
//!   through the upload API)
//! - **io**: the axum REST interface
//! - **config**: YAML settings shared by all of the above

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use config::{AppConfig, ServerConfig};
use domain::{DueService, DueTableService, ExportService, PaymentService};
use io::rest::{due_apis, export_apis, payment_apis};
use storage::{CsvPaymentRepository, InMemoryPaymentRepository, PaymentStorage};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub due_service: DueService,
    pub due_table_service: DueTableService,
    pub export_service: ExportService,
    pub payment_service: PaymentService,
}

/// Wire up every service from the configuration
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    match &config.storage.payments_file {
        Some(path) => {
            info!("Reading payments from {}", path.display());
            build_app_state(
                config,
                Arc::new(CsvPaymentRepository::new(path)),
                PaymentService::read_only(path.display().to_string()),
            )
        }
        None => {
            info!("No payments file configured, payments are uploaded through the API");
            build_in_memory_state(config, InMemoryPaymentRepository::new())
        }
    }
}

/// Build the state over an in-memory store that accepts uploads
pub fn build_in_memory_state(config: &AppConfig, repository: InMemoryPaymentRepository) -> Result<AppState> {
    let payment_service = PaymentService::in_memory(repository.clone());
    build_app_state(config, Arc::new(repository), payment_service)
}

fn build_app_state(
    config: &AppConfig,
    payment_storage: Arc<dyn PaymentStorage>,
    payment_service: PaymentService,
) -> Result<AppState> {
    let due_table_service = DueTableService::with_config(config.due_table.clone())
        .context("Invalid due table configuration")?;

    if let Some(directory) = &config.export.directory {
        info!("Due exports will be saved to {}", directory.display());
    }

    Ok(AppState {
        due_service: DueService::new(payment_storage),
        due_table_service,
        export_service: ExportService::with_directory(config.export.directory.clone()),
        payment_service,
    })
}

/// Build the axum router with all API routes, CORS and request tracing
pub fn create_router(app_state: AppState, server: &ServerConfig) -> Result<Router> {
    let allowed_origin = server
        .allowed_origin
        .parse::<HeaderValue>()
        .with_context(|| format!("Invalid allowed origin '{}'", server.allowed_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let dues_routes = due_apis::router()
        .merge(export_apis::router())
        .merge(payment_apis::router());

    Ok(Router::new()
        .nest("/api/dues", dues_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state))
}
