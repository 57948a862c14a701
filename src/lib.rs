//! # storage-report - Local Storage Report Generator
//!
//! Scans a local directory and writes a JSON report describing every file in
//! it: name, size, modification time, type and a content hash. The report is
//! meant to be uploaded to the Cloud Storage Optimizer web application, which
//! turns it into optimization recommendations. This crate performs no
//! analysis of its own.
//!
//! ## Command Line Usage
//!
//! ```bash
//! # Fully interactive: prompts for the directory and the report name
//! storage-report
//!
//! # Scan a directory and write photos.json, plus a text log of the scan
//! storage-report ~/Pictures --output photos --log
//! ```
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use storage_report::report::{write_report, Report};
//! use storage_report::scanner::Scanner;
//!
//! #[tokio::main]
//! async fn main() -> color_eyre::Result<()> {
//!     let root = Path::new("/home/user/Documents");
//!     let result = Scanner::new(root).scan(|_| {})?;
//!     println!("Skipped {} files", result.skipped_count());
//!
//!     let report = Report::new(result.files, root);
//!     write_report(&report, Path::new("storage_report.json")).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Report Format
//!
//! ```json
//! {
//!   "files": [
//!     {
//!       "name": "a.txt",
//!       "size": 10,
//!       "lastModified": "2024-05-01T10:20:30.123Z",
//!       "type": "document",
//!       "storageClass": "standard",
//!       "hash": "781e5e245d69b566979b86e28d23f2c7"
//!     }
//!   ],
//!   "metadata": {
//!     "scannedPath": "/home/user/Documents",
//!     "scannedAt": "2024-05-01T10:21:00.000Z",
//!     "totalFiles": 1,
//!     "totalSize": 10
//!   }
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`categories`]: File type classification by extension
//! - [`hasher`]: MD5 fingerprints and sentinel values
//! - [`scanner`]: Directory walking and per-file records
//! - [`report`]: Report structure and JSON output
//! - [`generate`]: The interactive report workflow
//! - [`prompt`]: Interactive input
//! - [`tui`]: Terminal output helpers
//! - [`log`]: Optional text log of a scan
//! - [`config`]: Configuration management
//! - [`cli`]: Command-line argument parsing
//! - [`error`]: Error types

pub mod categories;
pub mod cli;
pub mod config;
pub mod error;
pub mod generate;
pub mod hasher;
pub mod log;
pub mod prompt;
pub mod report;
pub mod scanner;
pub mod timestamp;
pub mod tui;

// Re-export commonly used types
pub use categories::Category;
pub use config::Config;
pub use error::{ReportError, ScanError};
pub use hasher::{Fingerprint, Hasher};
pub use report::Report;
pub use scanner::{FileRecord, ScanResult, Scanner};
