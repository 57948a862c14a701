//! Scan log generation.
//!
//! Writes a plain-text companion to the JSON report: totals, the category
//! breakdown and every skipped entry, including the ones that were only
//! counted on screen.

use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

use crate::scanner::ScanResult;
use crate::tui::{format_count, format_size};

/// Renders the log text for a finished scan.
pub fn render_scan_log(source: &Path, result: &ScanResult, report_path: Option<&Path>) -> String {
    let mut content = String::new();
    content.push_str("STORAGE REPORT SCAN LOG\n");
    content.push_str(&"═".repeat(70));
    content.push_str("\n\n");

    content.push_str(&format!("Source: {}\n", source.display()));
    content.push_str(&format!(
        "Timestamp: {}\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    if let Some(report_path) = report_path {
        content.push_str(&format!("Report: {}\n", report_path.display()));
    }
    content.push('\n');

    content.push_str(&format!(
        "Total files scanned: {}\n",
        format_count(result.total_files())
    ));
    content.push_str(&format!("Total size: {}\n", format_size(result.total_size)));
    content.push_str(&format!(
        "Files skipped: {}\n\n",
        format_count(result.skipped_count())
    ));

    content.push_str("FILES BY TYPE\n");
    content.push_str(&"─".repeat(70));
    content.push('\n');

    for (category, count, size) in result.get_summary() {
        content.push_str(&format!(
            "{}: {} files ({})\n",
            category,
            count,
            format_size(size)
        ));
    }

    if !result.skipped.is_empty() {
        content.push_str("\nSKIPPED ENTRIES\n");
        content.push_str(&"─".repeat(70));
        content.push('\n');
        for entry in &result.skipped {
            content.push_str(&format!("{}: {}\n", entry.path.display(), entry.reason));
        }
    }

    content.push('\n');
    content.push_str(&"═".repeat(70));
    content.push_str("\nEnd of log\n");
    content
}

/// Writes a log file for a scan into the current directory.
///
/// # Returns
///
/// The path where the log file was written
pub async fn write_scan_log(
    source: &Path,
    result: &ScanResult,
    report_path: Option<&Path>,
) -> color_eyre::Result<PathBuf> {
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let source_name = source
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("root");
    let log_path = PathBuf::from(format!(
        "storage_report_scan_{}_{}.txt",
        source_name, timestamp
    ));

    let mut file = tokio::fs::File::create(&log_path).await?;
    file.write_all(render_scan_log(source, result, report_path).as_bytes())
        .await?;
    file.flush().await?;

    Ok(log_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::categories::Category;
    use crate::hasher::Fingerprint;
    use crate::scanner::{FileRecord, StorageClass};
    use crate::timestamp;

    #[test]
    fn test_render_scan_log() {
        let mut result = ScanResult::new();
        result.add_file(FileRecord {
            name: "movie.mp4".to_string(),
            size: 2048,
            last_modified: timestamp::now(),
            file_type: Category::Video,
            storage_class: StorageClass::Standard,
            hash: Fingerprint::LargeFile(2048),
        });
        result.add_skip(
            PathBuf::from("/data/locked.txt"),
            "Permission denied (os error 13)".to_string(),
        );

        let log = render_scan_log(
            Path::new("/data"),
            &result,
            Some(Path::new("storage_report.json")),
        );

        assert!(log.contains("Source: /data"));
        assert!(log.contains("Report: storage_report.json"));
        assert!(log.contains("Total files scanned: 1"));
        assert!(log.contains("Total size: 2.00 KB"));
        assert!(log.contains("Files skipped: 1"));
        assert!(log.contains("video: 1 files (2.00 KB)"));
        assert!(log.contains("/data/locked.txt: Permission denied (os error 13)"));
    }

    #[test]
    fn test_render_scan_log_without_skips() {
        let log = render_scan_log(Path::new("/empty"), &ScanResult::new(), None);
        assert!(!log.contains("SKIPPED ENTRIES"));
        assert!(!log.contains("Report:"));
        assert!(log.ends_with("End of log\n"));
    }
}
