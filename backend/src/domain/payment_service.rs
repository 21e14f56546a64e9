//! Uploading payment rows into the server's own payment store.
//!
//! Only the in-memory store accepts uploads. When payments come from a CSV
//! export, that file is the source of record and uploads are refused.

use tracing::{info, warn};

use crate::domain::models::PaymentPeriod;
use crate::storage::InMemoryPaymentRepository;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaymentUploadError {
    #[error("Payments are read from {0}; uploads are disabled")]
    ReadOnlySource(String),
}

/// Counts reported back after an upload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UploadOutcome {
    pub accepted: usize,
    pub stored: usize,
}

#[derive(Clone)]
enum PaymentTarget {
    InMemory(InMemoryPaymentRepository),
    ReadOnly(String),
}

#[derive(Clone)]
pub struct PaymentService {
    target: PaymentTarget,
}

impl PaymentService {
    /// Uploads go into `repository`
    pub fn in_memory(repository: InMemoryPaymentRepository) -> Self {
        Self {
            target: PaymentTarget::InMemory(repository),
        }
    }

    /// Uploads are refused; `source` names where payments come from instead
    pub fn read_only(source: impl Into<String>) -> Self {
        Self {
            target: PaymentTarget::ReadOnly(source.into()),
        }
    }

    /// Swap the stored payments for `payments`
    pub fn replace_payments(&self, payments: Vec<PaymentPeriod>) -> Result<UploadOutcome, PaymentUploadError> {
        let repository = self.writable()?;
        let accepted = payments.len();
        let stored = repository.replace_all(payments);
        info!("Replaced stored payments with {} uploaded rows", accepted);
        Ok(UploadOutcome { accepted, stored })
    }

    /// Add `payments` after the stored ones
    pub fn append_payments(&self, payments: Vec<PaymentPeriod>) -> Result<UploadOutcome, PaymentUploadError> {
        let repository = self.writable()?;
        let accepted = payments.len();
        let stored = repository.extend(payments);
        info!("Appended {} uploaded payment rows ({} stored)", accepted, stored);
        Ok(UploadOutcome { accepted, stored })
    }

    fn writable(&self) -> Result<&InMemoryPaymentRepository, PaymentUploadError> {
        match &self.target {
            PaymentTarget::InMemory(repository) => Ok(repository),
            PaymentTarget::ReadOnly(source) => {
                warn!("Rejected payment upload, payments are read from {}", source);
                Err(PaymentUploadError::ReadOnlySource(source.clone()))
            }
        }
    }
}
