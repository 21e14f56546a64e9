//! # Storage Module
//!
//! Handles reading payment rows for the due calculator.
//!
//! Payment records are owned by the society's accounting system; this
//! service only reads a snapshot of them. The storage layer hides where
//! that snapshot comes from so the domain layer only sees `PaymentPeriod`
//! values.
//!
//! ## Current Implementations
//!
//! - **CSV**: A payments export file, re-read on every request so a fresh
//!   export is picked up without a restart
//! - **In-memory**: Used when no payments file is configured, and in tests

pub mod csv;
pub mod memory;
pub mod traits;

pub use self::csv::CsvPaymentRepository;
pub use memory::InMemoryPaymentRepository;
pub use traits::PaymentStorage;
