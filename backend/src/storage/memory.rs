//! In-memory payment store, used when no payments file is configured.

use anyhow::Result;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};
use tracing::debug;

use super::traits::PaymentStorage;
use crate::domain::models::PaymentPeriod;

#[derive(Clone, Default)]
pub struct InMemoryPaymentRepository {
    payments: Arc<RwLock<Vec<PaymentPeriod>>>,
}

impl InMemoryPaymentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_payments(payments: Vec<PaymentPeriod>) -> Self {
        Self {
            payments: Arc::new(RwLock::new(payments)),
        }
    }

    /// Replace the stored payments with a fresh snapshot, returning the new count
    pub fn replace_all(&self, payments: Vec<PaymentPeriod>) -> usize {
        let mut guard = self.payments.write().unwrap_or_else(|e| e.into_inner());
        debug!("Replacing {} stored payments with {}", guard.len(), payments.len());
        *guard = payments;
        guard.len()
    }

    /// Add payments after the stored ones, returning the new count
    pub fn extend(&self, payments: Vec<PaymentPeriod>) -> usize {
        let mut guard = self.payments.write().unwrap_or_else(|e| e.into_inner());
        guard.extend(payments);
        guard.len()
    }
}

#[async_trait]
impl PaymentStorage for InMemoryPaymentRepository {
    async fn list_payment_periods(&self) -> Result<Vec<PaymentPeriod>> {
        let guard = self.payments.read().unwrap_or_else(|e| e.into_inner());
        Ok(guard.clone())
    }
}
