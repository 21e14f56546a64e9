//! CSV-file based storage implementations.

pub mod payment_repository;

pub use payment_repository::CsvPaymentRepository;
