//! File categorization and extension mapping.
//!
//! Every scanned file is assigned exactly one [`Category`] based on its
//! extension. The table is fixed because the web application that consumes the
//! report only understands these eight labels.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Type classification of a scanned file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Image,
    Video,
    Document,
    Backup,
    Log,
    Code,
    Audio,
    Other,
}

impl Category {
    /// All categories, in report order.
    pub const ALL: [Category; 8] = [
        Category::Image,
        Category::Video,
        Category::Document,
        Category::Backup,
        Category::Log,
        Category::Code,
        Category::Audio,
        Category::Other,
    ];

    /// The label written to the report.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Image => "image",
            Category::Video => "video",
            Category::Document => "document",
            Category::Backup => "backup",
            Category::Log => "log",
            Category::Code => "code",
            Category::Audio => "audio",
            Category::Other => "other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const CATEGORY_TABLE: &[(Category, &[&str])] = &[
    (
        Category::Image,
        &[".jpg", ".jpeg", ".png", ".gif", ".bmp", ".svg", ".heic", ".webp"],
    ),
    (
        Category::Video,
        &[".mp4", ".avi", ".mov", ".mkv", ".flv", ".wmv", ".webm", ".m4v"],
    ),
    (
        Category::Document,
        &[
            ".pdf", ".docx", ".doc", ".txt", ".rtf", ".odt", ".xlsx", ".xls", ".pptx",
        ],
    ),
    (
        Category::Backup,
        &[".zip", ".tar", ".gz", ".rar", ".7z", ".bz2"],
    ),
    (Category::Log, &[".csv", ".log", ".json"]),
    (
        Category::Code,
        &[".py", ".js", ".html", ".css", ".java", ".cpp"],
    ),
    (Category::Audio, &[".mp3", ".wav", ".flac", ".m4a", ".aac"]),
];

/// Returns the static mapping of categories to their extensions.
///
/// Extensions carry the leading dot and are lowercase. [`Category::Other`] has
/// no entry; it is the fallback for everything not listed here.
///
/// # Examples
///
/// ```
/// use storage_report::categories::{get_categories, Category};
///
/// let categories = get_categories();
/// let (_, images) = categories
///     .iter()
///     .find(|(category, _)| *category == Category::Image)
///     .unwrap();
/// assert!(images.contains(&".png"));
/// ```
pub fn get_categories() -> &'static [(Category, &'static [&'static str])] {
    CATEGORY_TABLE
}

/// Determines the category for a file based on its extension.
///
/// # Arguments
///
/// * `extension` - The file extension including the leading dot (e.g., ".txt", ".JPG")
///
/// # Examples
///
/// ```
/// use storage_report::categories::{get_category, Category};
///
/// assert_eq!(get_category(".pdf"), Category::Document);
/// assert_eq!(get_category(".JPG"), Category::Image);
/// assert_eq!(get_category(".unknown"), Category::Other);
/// ```
pub fn get_category(extension: &str) -> Category {
    let ext = extension.to_lowercase();

    get_categories()
        .iter()
        .find(|(_, extensions)| extensions.contains(&ext.as_str()))
        .map(|(category, _)| *category)
        .unwrap_or(Category::Other)
}

/// Extracts the file extension from a path.
///
/// Returns the extension in lowercase with a leading dot, or an empty string
/// if the path has none. A name such as `.bashrc` has no extension.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use storage_report::categories::get_extension;
///
/// assert_eq!(get_extension(Path::new("/home/user/document.PDF")), ".pdf");
/// assert_eq!(get_extension(Path::new("/home/user/README")), "");
/// ```
pub fn get_extension(path: &Path) -> String {
    path.extension()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .map(|s| format!(".{}", s.to_lowercase()))
        .unwrap_or_default()
}

/// Classifies a file by name.
pub fn classify(name: impl AsRef<Path>) -> Category {
    get_category(&get_extension(name.as_ref()))
}
