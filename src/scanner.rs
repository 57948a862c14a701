//! File system scanning.
//!
//! Walks a directory tree in pre-order, pruning hidden entries before they
//! are descended into, and builds one [`FileRecord`] per regular file. Files
//! that cannot be stat'ed or opened are counted as skipped and the walk
//! carries on; only a failure on the root itself aborts the scan.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tokio::task;
use walkdir::{DirEntry, WalkDir};

use crate::categories::{Category, classify};
use crate::error::ScanError;
use crate::hasher::{Fingerprint, Hasher};
use crate::timestamp;

/// Emit a progress event after this many processed files.
pub const DEFAULT_PROGRESS_INTERVAL: usize = 50;

/// Only the first few skip causes are reported as events.
pub const DEFAULT_MAX_REPORTED_SKIPS: usize = 5;

/// Storage tier of a file. Local files are always `standard`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageClass {
    #[default]
    Standard,
}

/// One scanned file, serialized verbatim into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// File name without its directory
    pub name: String,
    /// Size of the file in bytes
    pub size: u64,
    #[serde(with = "timestamp")]
    pub last_modified: DateTime<Utc>,
    #[serde(rename = "type")]
    pub file_type: Category,
    pub storage_class: StorageClass,
    pub hash: Fingerprint,
}

/// An entry left out of the results because of a per-file failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedEntry {
    pub path: PathBuf,
    pub reason: String,
}

/// Progress notifications delivered while a scan runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanEvent {
    /// Cumulative totals, sent every `progress_interval` files
    Progress { files: usize, total_size: u64 },
    /// A skipped entry; only the first `max_reported_skips` are sent
    Skipped { path: PathBuf, reason: String },
}

/// Everything collected by one scan.
#[derive(Debug, Default)]
pub struct ScanResult {
    /// Records in traversal order
    pub files: Vec<FileRecord>,
    pub total_size: u64,
    pub skipped: Vec<SkippedEntry>,
}

impl ScanResult {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record and updates the running size.
    pub fn add_file(&mut self, record: FileRecord) {
        self.total_size += record.size;
        self.files.push(record);
    }

    pub fn add_skip(&mut self, path: PathBuf, reason: String) {
        self.skipped.push(SkippedEntry { path, reason });
    }

    pub fn total_files(&self) -> usize {
        self.files.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }

    /// Generates a summary of files by category.
    ///
    /// Returns `(category, file_count, total_size)` tuples sorted by file count
    /// in descending order. Categories with no files are left out.
    pub fn get_summary(&self) -> Vec<(Category, usize, u64)> {
        let mut by_category: HashMap<Category, (usize, u64)> = HashMap::new();
        for file in &self.files {
            let entry = by_category.entry(file.file_type).or_default();
            entry.0 += 1;
            entry.1 += file.size;
        }

        let mut summary: Vec<_> = Category::ALL
            .iter()
            .filter_map(|category| {
                by_category
                    .get(category)
                    .map(|(count, size)| (*category, *count, *size))
            })
            .collect();

        summary.sort_by(|a, b| b.1.cmp(&a.1)); // Sort by count descending, stable on ties
        summary
    }
}

/// Sequential directory scanner.
///
/// # Examples
///
/// ```no_run
/// use storage_report::scanner::{ScanEvent, Scanner};
///
/// # fn main() -> Result<(), storage_report::error::ScanError> {
/// let result = Scanner::new("/home/user/Documents").scan(|event| {
///     if let ScanEvent::Progress { files, total_size } = event {
///         println!("{files} files, {total_size} bytes");
///     }
/// })?;
/// println!("Found {} files", result.total_files());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Scanner {
    root: PathBuf,
    hasher: Hasher,
    progress_interval: usize,
    max_reported_skips: usize,
}

impl Scanner {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            hasher: Hasher::default(),
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_reported_skips: DEFAULT_MAX_REPORTED_SKIPS,
        }
    }

    pub fn with_hasher(mut self, hasher: Hasher) -> Self {
        self.hasher = hasher;
        self
    }

    /// Sets how often progress events fire. Zero disables them.
    pub fn with_progress_interval(mut self, interval: usize) -> Self {
        self.progress_interval = interval;
        self
    }

    pub fn with_max_reported_skips(mut self, max: usize) -> Self {
        self.max_reported_skips = max;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Runs the scan, calling `on_event` with progress and skip notifications.
    ///
    /// # Errors
    ///
    /// Returns an error if the root does not exist, is not a directory, or
    /// cannot be read. Failures below the root are recorded in
    /// [`ScanResult::skipped`] instead.
    pub fn scan<F>(&self, mut on_event: F) -> Result<ScanResult, ScanError>
    where
        F: FnMut(ScanEvent),
    {
        let root_metadata = fs::metadata(&self.root).map_err(|e| ScanError::io(&self.root, e))?;
        if !root_metadata.is_dir() {
            return Err(ScanError::NotADirectory {
                path: self.root.clone(),
            });
        }

        let mut result = ScanResult::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e
                        .path()
                        .map(Path::to_path_buf)
                        .unwrap_or_else(|| self.root.clone());
                    if e.depth() == 0 {
                        return Err(ScanError::Io {
                            path,
                            source: e.into(),
                        });
                    }
                    self.record_skip(&mut result, path, e.to_string(), &mut on_event);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            match self.process_entry(&entry) {
                Ok(Some(record)) => {
                    result.add_file(record);

                    let files = result.total_files();
                    if self.progress_interval > 0 && files % self.progress_interval == 0 {
                        on_event(ScanEvent::Progress {
                            files,
                            total_size: result.total_size,
                        });
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    self.record_skip(&mut result, entry.into_path(), e.to_string(), &mut on_event);
                }
            }
        }

        Ok(result)
    }

    /// Builds the record for a non-directory entry.
    ///
    /// Symlinks are resolved: links to directories are not descended and
    /// yield `None`, as do special files such as sockets and fifos.
    fn process_entry(&self, entry: &DirEntry) -> io::Result<Option<FileRecord>> {
        let path = entry.path();
        let metadata = fs::metadata(path)?;
        if !metadata.is_file() {
            return Ok(None);
        }

        let last_modified = timestamp::from_system_time(metadata.modified()?);
        let file = File::open(path)?;
        let name = entry.file_name().to_string_lossy().into_owned();

        Ok(Some(FileRecord {
            file_type: classify(&name),
            name,
            size: metadata.len(),
            last_modified,
            storage_class: StorageClass::Standard,
            hash: self.hasher.fingerprint(file, metadata.len()),
        }))
    }

    fn record_skip<F>(&self, result: &mut ScanResult, path: PathBuf, reason: String, on_event: &mut F)
    where
        F: FnMut(ScanEvent),
    {
        if result.skipped_count() < self.max_reported_skips {
            on_event(ScanEvent::Skipped {
                path: path.clone(),
                reason: reason.clone(),
            });
        }
        result.add_skip(path, reason);
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_string_lossy().starts_with('.')
}

/// Scans a directory on the blocking thread pool.
///
/// The walk itself stays sequential; this only keeps the async driver free
/// while it runs.
///
/// # Errors
///
/// Same as [`Scanner::scan`], plus [`ScanError::Task`] if the blocking task
/// panics.
pub async fn scan_directory<F>(scanner: Scanner, on_event: F) -> Result<ScanResult, ScanError>
where
    F: FnMut(ScanEvent) + Send + 'static,
{
    task::spawn_blocking(move || scanner.scan(on_event)).await?
}
