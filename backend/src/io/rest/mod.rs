//! # REST API Interface Layer
//!
//! Provides HTTP endpoints for the dues dashboard.
//! This layer handles:
//! - HTTP request/response serialization and deserialization
//! - Payment uploads into the in-memory store
//! - Query parameter parsing (evaluation date, filters, sort order)
//! - Error translation from domain to HTTP status codes
//! - Request logging
//!
//! Handlers hold no business logic; they map DTOs to domain types and call
//! the services on `AppState`.

pub mod due_apis;
pub mod export_apis;
pub mod mappers;
pub mod payment_apis;
