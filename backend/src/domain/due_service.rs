//! Orchestration of due reports over stored payments.
//!
//! The REST layer talks to this service rather than wiring storage and the
//! calculator together itself.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::domain::commands::dues::{CalculateDuesCommand, DueReport};
use crate::domain::due_calculator::DueCalculatorService;
use crate::storage::PaymentStorage;
use chrono::NaiveDate;

#[derive(Clone)]
pub struct DueService {
    payment_storage: Arc<dyn PaymentStorage>,
    calculator: DueCalculatorService,
}

impl DueService {
    pub fn new(payment_storage: Arc<dyn PaymentStorage>) -> Self {
        Self {
            payment_storage,
            calculator: DueCalculatorService::new(),
        }
    }

    /// Due report over every stored payment, evaluated on `as_of`
    pub async fn report_for_stored_payments(&self, as_of: NaiveDate) -> Result<DueReport> {
        let payments = self.payment_storage.list_payment_periods().await?;
        info!("Loaded {} payment rows for due report as of {}", payments.len(), as_of);

        Ok(DueReport {
            result: self.calculator.calculate_dues(&payments, as_of),
            as_of,
        })
    }

    /// Due report over caller-supplied payments; storage is not touched
    pub fn calculate(&self, command: CalculateDuesCommand) -> DueReport {
        DueReport {
            result: self.calculator.calculate_dues(&command.payments, command.as_of),
            as_of: command.as_of,
        }
    }
}
