//! JSON report generation.
//!
//! The report is the only contract with the web application that consumes
//! it: a `files` array followed by a `metadata` object, pretty-printed with
//! two-space indentation and non-ASCII text written as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::ReportError;
use crate::scanner::FileRecord;
use crate::timestamp;

/// Output file name used when the user does not provide one.
pub const DEFAULT_REPORT_NAME: &str = "storage_report.json";

/// Extension every report file name ends with.
pub const REPORT_EXTENSION: &str = ".json";

/// Summary block of a report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub scanned_path: String,
    /// When the report was built, not when the scan started
    #[serde(with = "timestamp")]
    pub scanned_at: DateTime<Utc>,
    pub total_files: usize,
    pub total_size: u64,
}

/// A complete storage report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub files: Vec<FileRecord>,
    pub metadata: ReportMetadata,
}

impl Report {
    /// Builds a report stamped with the current time.
    pub fn new(files: Vec<FileRecord>, scanned_path: &Path) -> Self {
        Self::with_timestamp(files, scanned_path, timestamp::now())
    }

    /// Builds a report with an explicit `scannedAt` time.
    ///
    /// The totals are computed from `files`, so they always agree with the
    /// records that get written.
    pub fn with_timestamp(
        files: Vec<FileRecord>,
        scanned_path: &Path,
        scanned_at: DateTime<Utc>,
    ) -> Self {
        let metadata = ReportMetadata {
            scanned_path: scanned_path.display().to_string(),
            scanned_at,
            total_files: files.len(),
            total_size: files.iter().map(|f| f.size).sum(),
        };

        Self { files, metadata }
    }

    /// Serializes the report as indented JSON.
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, ReportError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Normalizes a user-supplied output file name.
///
/// Blank input falls back to `default`; the `.json` extension is appended when
/// missing.
///
/// # Examples
///
/// ```
/// use storage_report::report::{normalize_output_name, DEFAULT_REPORT_NAME};
///
/// assert_eq!(normalize_output_name("  ", DEFAULT_REPORT_NAME), "storage_report.json");
/// assert_eq!(normalize_output_name("photos", DEFAULT_REPORT_NAME), "photos.json");
/// assert_eq!(normalize_output_name("x.json", DEFAULT_REPORT_NAME), "x.json");
/// ```
pub fn normalize_output_name(input: &str, default: &str) -> String {
    let name = match input.trim() {
        "" => default.trim(),
        name => name,
    };

    if name.ends_with(REPORT_EXTENSION) {
        name.to_string()
    } else {
        format!("{name}{REPORT_EXTENSION}")
    }
}

/// Writes the report to `path` in a single write.
///
/// Returns the number of bytes written. Nothing is cleaned up if the write
/// fails part way.
pub async fn write_report(report: &Report, path: &Path) -> Result<u64, ReportError> {
    let json = report.to_json()?;

    tokio::fs::write(path, json.as_bytes())
        .await
        .map_err(|source| ReportError::Io {
            path: path.to_path_buf(),
            source,
        })?;

    Ok(json.len() as u64)
}

/// Resolves the report path against the current directory for display.
pub fn display_path(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
