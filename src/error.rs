//! Error types for scanning and report generation.
//!
//! Only fatal conditions are represented here. Per-file problems during a
//! scan are recorded as skips or sentinel hashes and never surface as errors.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal errors that abort a scan before any report is produced.
#[derive(Debug, Error)]
pub enum ScanError {
    /// Root path does not exist.
    #[error("Path does not exist: {path}")]
    NotFound { path: PathBuf },

    /// Root path exists but is not a directory.
    #[error("Path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    /// The root could not be read.
    #[error("Error scanning directory {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The blocking scan task panicked or was cancelled.
    #[error("Scan task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl ScanError {
    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            _ => Self::Io { path, source },
        }
    }
}

/// Errors raised while writing a report to disk.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Error saving file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_scan_error_io_maps_not_found() {
        let err = ScanError::io("/missing", io::Error::from(io::ErrorKind::NotFound));
        assert!(matches!(err, ScanError::NotFound { .. }));
        assert_eq!(err.to_string(), "Path does not exist: /missing");
    }

    #[test]
    fn test_scan_error_io_keeps_other_kinds() {
        let err = ScanError::io("/root", io::Error::from(io::ErrorKind::PermissionDenied));
        assert!(matches!(err, ScanError::Io { .. }));
        assert!(err.to_string().starts_with("Error scanning directory /root"));
    }
}
