//! Export service domain logic.
//!
//! Produces CSV exports of the due table so committee members can share or
//! archive the arrears list. The rows are exported exactly as filtered and
//! sorted for display.

use anyhow::Result;
use chrono::NaiveDate;
use shared::{ExportDuesResponse, FormattedDue};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const CSV_HEADER: [&str; 7] = [
    "resident_name",
    "house_number",
    "last_paid_period_end",
    "overdue_days",
    "overdue_months",
    "overdue_duration",
    "severity",
];

/// Export service that handles all export-related business logic
#[derive(Debug, Clone, Default)]
pub struct ExportService {
    /// Directory every export is also written to, if any
    export_directory: Option<PathBuf>,
}

impl ExportService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(export_directory: Option<PathBuf>) -> Self {
        Self { export_directory }
    }

    /// Build the CSV export and, when an export directory is configured,
    /// save a copy of it there
    pub fn export_dues(&self, rows: &[FormattedDue], as_of: NaiveDate) -> Result<ExportDuesResponse> {
        let mut export = self.export_dues_csv(rows, as_of)?;

        if let Some(directory) = &self.export_directory {
            let path = self.export_to_directory(&export, directory)?;
            export.saved_path = Some(path.display().to_string());
        }

        Ok(export)
    }

    /// Export due table rows as CSV data
    pub fn export_dues_csv(&self, rows: &[FormattedDue], as_of: NaiveDate) -> Result<ExportDuesResponse> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(CSV_HEADER)?;

        for row in rows {
            let overdue_days = row.raw_overdue_days.to_string();
            let overdue_months = row.raw_overdue_months.to_string();
            let severity = row.severity.to_string();
            writer.write_record([
                row.resident_name.as_str(),
                row.house_number.as_str(),
                row.raw_last_paid_period_end.as_deref().unwrap_or(""),
                overdue_days.as_str(),
                overdue_months.as_str(),
                row.overdue_duration.as_str(),
                severity.as_str(),
            ])?;
        }

        let bytes = writer.into_inner().map_err(|e| anyhow::anyhow!("Failed to flush CSV: {}", e))?;
        let csv_content = String::from_utf8(bytes)?;
        let filename = Self::filename_for(as_of);

        info!(
            "Exported {} overdue residents ({} bytes) as {}",
            rows.len(),
            csv_content.len(),
            filename
        );

        Ok(ExportDuesResponse {
            csv_content,
            filename,
            resident_count: rows.len(),
            saved_path: None,
        })
    }

    /// Write an export into `directory`, returning the full file path
    pub fn export_to_directory(&self, export: &ExportDuesResponse, directory: &Path) -> Result<PathBuf> {
        if !directory.exists() {
            fs::create_dir_all(directory)?;
            info!("Created export directory: {}", directory.display());
        }

        let file_path = directory.join(&export.filename);

        // Write to a temp file first so readers never see a partial export
        let temp_path = file_path.with_extension("tmp");
        fs::write(&temp_path, &export.csv_content)?;
        fs::rename(&temp_path, &file_path)?;

        info!("Wrote due export to {}", file_path.display());
        Ok(file_path)
    }

    pub fn filename_for(as_of: NaiveDate) -> String {
        format!("maintenance_dues_{}.csv", as_of.format("%Y%m%d"))
    }
}
