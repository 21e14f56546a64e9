//! # CSV Payment Repository
//!
//! Reads payment rows exported from the society's accounts into a single
//! CSV file.
//!
//! ## CSV Format
//!
//! ```csv
//! user_id,user_name,house_number,category_id,period_start,period_end,payment_date
//! u-17,Asha Rao,A-101,1,2025-04-01,2025-04-30,2025-04-03
//! u-17,Asha Rao,A-101,2,2025-04-01,2025-04-30,2025-04-03
//! u-22,Bilal Khan,B-204,1,,2025-03-31,
//! ```
//!
//! Dates may be plain `YYYY-MM-DD` or RFC 3339 timestamps. A date cell that
//! is empty or unreadable becomes `None`; the due calculator then treats
//! that period as invalid. A row that cannot be read at all is skipped with
//! a warning so one bad line never hides every other resident.

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use csv::{ReaderBuilder, Trim};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::domain::models::PaymentPeriod;
use crate::storage::traits::PaymentStorage;

/// CSV record structure for payment rows
#[derive(Debug, Clone, Deserialize)]
struct PaymentRecord {
    user_id: String,
    user_name: String,
    house_number: String,
    category_id: i32,
    period_start: Option<String>,
    period_end: Option<String>,
    payment_date: Option<String>,
}

impl PaymentRecord {
    fn into_domain(self, line: u64) -> PaymentPeriod {
        let period_start = Self::read_date(self.period_start.as_deref(), "period_start", line);
        let period_end = Self::read_date(self.period_end.as_deref(), "period_end", line);
        let payment_date = Self::read_date(self.payment_date.as_deref(), "payment_date", line);

        PaymentPeriod {
            user_id: self.user_id,
            user_name: self.user_name,
            house_number: self.house_number,
            category_id: self.category_id,
            period_start,
            period_end,
            payment_date,
        }
    }

    fn read_date(value: Option<&str>, column: &str, line: u64) -> Option<NaiveDate> {
        let raw = value?.trim();
        if raw.is_empty() {
            return None;
        }
        let parsed = PaymentPeriod::parse_date(raw);
        if parsed.is_none() {
            warn!("Unreadable {} '{}' on line {}, treating as missing", column, raw, line);
        }
        parsed
    }
}

/// CSV-based payment repository backed by a single file
#[derive(Debug, Clone)]
pub struct CsvPaymentRepository {
    file_path: PathBuf,
}

impl CsvPaymentRepository {
    pub fn new<P: AsRef<Path>>(file_path: P) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    fn read_payments(&self) -> Result<Vec<PaymentPeriod>> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(&self.file_path)
            .with_context(|| format!("Failed to open payments file {}", self.file_path.display()))?;

        let mut payments = Vec::new();
        let mut skipped = 0usize;

        // Line 1 is the header
        for (index, result) in reader.deserialize::<PaymentRecord>().enumerate() {
            match result {
                Ok(record) => payments.push(record.into_domain(index as u64 + 2)),
                Err(e) => {
                    skipped += 1;
                    warn!("Skipping unreadable payment row in {}: {}", self.file_path.display(), e);
                }
            }
        }

        info!(
            "Loaded {} payment rows from {} ({} skipped)",
            payments.len(),
            self.file_path.display(),
            skipped
        );

        Ok(payments)
    }
}

#[async_trait]
impl PaymentStorage for CsvPaymentRepository {
    async fn list_payment_periods(&self) -> Result<Vec<PaymentPeriod>> {
        // File reads stay off the async worker threads
        let repository = self.clone();
        tokio::task::spawn_blocking(move || repository.read_payments())
            .await
            .context("Payment reader task failed")?
    }
}
