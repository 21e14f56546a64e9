//! Due table domain logic.
//!
//! This module turns a raw due calculation into rows ready for the dues
//! dashboard: it classifies each resident by severity, formats dates and
//! durations, and applies the search, severity filter and sort chosen by
//! the user. None of this affects the calculation itself; it is display
//! policy, which is why the severity thresholds are configurable.
//!
//! ## Core Components
//!
//! - **DueTableService**: Main service for table operations
//! - **DueTableConfig**: Severity thresholds and date display format
//! - **DueTableQuery**: Filter and sort options for a single request

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use shared::{DueSeverity, DueSortField, FormattedDue, SortDirection};
use std::cmp::Ordering;
use tracing::debug;

use crate::domain::commands::dues::DueTableQuery;
use crate::domain::models::{DueCalculationResult, MaintenanceDue};

/// Label shown when a resident has no covered period on record
pub const NO_PAYMENTS_LABEL: &str = "No payments";

/// Configuration for due table display
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DueTableConfig {
    /// Rows overdue by more than this many days are at least `Warning`
    pub warning_after_days: i64,
    /// Rows overdue by more than this many days are `Critical`
    pub critical_after_days: i64,
    pub date_format: DateFormat,
}

/// Date formatting options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum DateFormat {
    MonthDayYear, // "June 13, 2025"
    ShortDate,    // "13/06/2025"
    Iso,          // "2025-06-13"
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DueTableConfigError {
    #[error("Severity thresholds cannot be negative")]
    NegativeThreshold,
    #[error("Warning threshold ({warning}) must be lower than critical threshold ({critical})")]
    ThresholdsOutOfOrder { warning: i64, critical: i64 },
}

impl Default for DueTableConfig {
    fn default() -> Self {
        Self {
            warning_after_days: 30,
            critical_after_days: 90,
            date_format: DateFormat::MonthDayYear,
        }
    }
}

impl DueTableConfig {
    pub fn validate(&self) -> Result<(), DueTableConfigError> {
        if self.warning_after_days < 0 || self.critical_after_days < 0 {
            return Err(DueTableConfigError::NegativeThreshold);
        }
        if self.warning_after_days >= self.critical_after_days {
            return Err(DueTableConfigError::ThresholdsOutOfOrder {
                warning: self.warning_after_days,
                critical: self.critical_after_days,
            });
        }
        Ok(())
    }
}

/// Due table service that handles all table-related presentation logic
#[derive(Debug, Clone)]
pub struct DueTableService {
    config: DueTableConfig,
}

impl DueTableService {
    /// Create a new DueTableService with default configuration
    pub fn new() -> Self {
        Self {
            config: DueTableConfig::default(),
        }
    }

    /// Create a new DueTableService with custom configuration
    pub fn with_config(config: DueTableConfig) -> Result<Self, DueTableConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Filter, sort and format a due calculation for table display
    pub fn build_table(&self, result: &DueCalculationResult, query: &DueTableQuery) -> Vec<FormattedDue> {
        let search = query
            .search
            .as_deref()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty());

        let mut rows: Vec<&MaintenanceDue> = result
            .users_with_due
            .iter()
            .filter(|due| match &search {
                Some(needle) => Self::matches_search(due, needle),
                None => true,
            })
            .filter(|due| match query.min_severity {
                Some(min) => self.classify(due.overdue_days) >= min,
                None => true,
            })
            .collect();

        rows.sort_by(|a, b| Self::compare(a, b, query.sort_by, query.direction));

        debug!(
            "Due table: {} of {} rows after filtering (sort {:?} {:?})",
            rows.len(),
            result.users_with_due.len(),
            query.sort_by,
            query.direction
        );

        rows.into_iter().map(|due| self.format_due(due)).collect()
    }

    /// Format a single due record for display
    pub fn format_due(&self, due: &MaintenanceDue) -> FormattedDue {
        FormattedDue {
            user_id: due.user_id.clone(),
            resident_name: due.user_name.clone(),
            house_number: due.house_number.clone(),
            last_paid_display: self.format_last_paid(due.last_paid_period_end),
            overdue_duration: due.formatted_duration.clone(),
            severity: self.classify(due.overdue_days),
            raw_overdue_days: due.overdue_days,
            raw_overdue_months: due.overdue_months,
            raw_last_paid_period_end: due.last_paid_period_end.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }

    /// Severity tier for a number of overdue days
    pub fn classify(&self, overdue_days: i64) -> DueSeverity {
        if overdue_days > self.config.critical_after_days {
            DueSeverity::Critical
        } else if overdue_days > self.config.warning_after_days {
            DueSeverity::Warning
        } else {
            DueSeverity::Recent
        }
    }

    pub fn format_last_paid(&self, last_paid: Option<NaiveDate>) -> String {
        match last_paid {
            Some(date) => self.format_date(date),
            None => NO_PAYMENTS_LABEL.to_string(),
        }
    }

    /// Format a date for display based on configuration
    pub fn format_date(&self, date: NaiveDate) -> String {
        match self.config.date_format {
            DateFormat::MonthDayYear => {
                format!("{} {}, {}", Self::month_name(date.month()), date.day(), date.year())
            }
            DateFormat::ShortDate => date.format("%d/%m/%Y").to_string(),
            DateFormat::Iso => date.format("%Y-%m-%d").to_string(),
        }
    }

    fn matches_search(due: &MaintenanceDue, needle: &str) -> bool {
        due.user_name.to_lowercase().contains(needle)
            || due.house_number.to_lowercase().contains(needle)
    }

    fn compare(
        a: &MaintenanceDue,
        b: &MaintenanceDue,
        sort_by: DueSortField,
        direction: SortDirection,
    ) -> Ordering {
        let primary = match sort_by {
            DueSortField::OverdueDays => a.overdue_days.cmp(&b.overdue_days),
            DueSortField::ResidentName => a.user_name.to_lowercase().cmp(&b.user_name.to_lowercase()),
            DueSortField::HouseNumber => a.house_number.cmp(&b.house_number),
            DueSortField::LastPaidPeriodEnd => a.last_paid_period_end.cmp(&b.last_paid_period_end),
        };
        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };

        // Ties always read alphabetically so the table is stable between requests
        primary
            .then_with(|| a.user_name.to_lowercase().cmp(&b.user_name.to_lowercase()))
            .then_with(|| a.user_id.cmp(&b.user_id))
    }

    fn month_name(month: u32) -> &'static str {
        match month {
            1 => "January", 2 => "February", 3 => "March", 4 => "April",
            5 => "May", 6 => "June", 7 => "July", 8 => "August",
            9 => "September", 10 => "October", 11 => "November", 12 => "December",
            _ => "Invalid Month",
        }
    }
}

impl Default for DueTableService {
    fn default() -> Self {
        Self::new()
    }
}
