//! # Domain Module
//!
//! Contains all business logic for maintenance due tracking.
//!
//! This module decides which residents are behind on maintenance, by how
//! long, and how that is presented. It operates independently of the HTTP
//! layer and of where payment rows are stored.
//!
//! ## Module Organization
//!
//! - **due_calculator**: Per-resident and batch due calculation
//! - **duration**: Human-readable overdue durations
//! - **due_table**: Severity classification, filtering, sorting and formatting
//! - **due_service**: Orchestrates storage and calculation for reports
//! - **export_service**: CSV export of the due table
//! - **payment_service**: Uploads into the in-memory payment store
//!
//! ## Business Rules
//!
//! - Only maintenance payments (category 1) count towards dues
//! - A payment period needs both dates, with the end not before the start
//! - The latest covered period end decides the overdue duration
//! - A period ending today is paid up; residents who are paid up, or who
//!   have never made a maintenance payment, are not listed
//! - Months are fixed 30-day buckets

pub mod commands;
pub mod due_calculator;
pub mod due_service;
pub mod due_table;
pub mod duration;
pub mod export_service;
pub mod models;
pub mod payment_service;

pub use due_calculator::*;
pub use due_service::*;
pub use due_table::*;
pub use duration::*;
pub use export_service::*;
pub use payment_service::*;
