//! Domain model for a payment row relevant to due tracking.
use chrono::{DateTime, NaiveDate};
use serde::{Deserialize, Serialize};

/// Category identifier reserved for maintenance payments.
///
/// Only payments in this category count towards due calculation.
pub const MAINTENANCE_CATEGORY_ID: i32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub user_id: String,
    pub user_name: String,
    pub house_number: String,
    pub category_id: i32,
    pub period_start: Option<NaiveDate>,
    pub period_end: Option<NaiveDate>,
    pub payment_date: Option<NaiveDate>, // informational only
}

impl PaymentPeriod {
    pub fn is_maintenance(&self) -> bool {
        self.category_id == MAINTENANCE_CATEGORY_ID
    }

    /// The covered period, if both ends are present and not inverted
    pub fn valid_period(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.period_start, self.period_end) {
            (Some(start), Some(end)) if end >= start => Some((start, end)),
            _ => None,
        }
    }

    /// Parse a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
    ///
    /// Timestamps keep the calendar date as written (the offset is ignored),
    /// so `2025-06-13T23:30:00-04:00` is June 13. Anything else yields `None`.
    pub fn parse_date(value: &str) -> Option<NaiveDate> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
            return Some(timestamp.naive_local().date());
        }
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
    }
}

/// Identity of a resident as first seen in the payment list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resident {
    pub user_id: String,
    pub user_name: String,
    pub house_number: String,
}

impl From<&PaymentPeriod> for Resident {
    fn from(payment: &PaymentPeriod) -> Self {
        Resident {
            user_id: payment.user_id.clone(),
            user_name: payment.user_name.clone(),
            house_number: payment.house_number.clone(),
        }
    }
}
