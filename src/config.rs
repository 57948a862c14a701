//! Configuration management.
//!
//! Settings are read from `~/.config/storage-report/config.toml`. On first
//! run a default configuration is written there. The defaults reproduce the
//! reference report format exactly, so the file only needs editing to change
//! the color theme or tune the scan.

use color_eyre::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::hasher::{CHUNK_SIZE, Hasher, MAX_FILE_SIZE_FOR_HASH};
use crate::report::DEFAULT_REPORT_NAME;
use crate::scanner::{DEFAULT_MAX_REPORTED_SKIPS, DEFAULT_PROGRESS_INTERVAL, Scanner};

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub ui: UIConfig,
    pub scan: ScanConfig,
    pub hash: HashConfig,
    pub report: ReportConfig,
}

/// User interface configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UIConfig {
    pub color: ColorConfig,
}

/// Color theme configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorConfig {
    /// Theme name: "default", "cyan", "magenta", "yellow", "green", "red", "blue", "white"
    pub theme: String,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            theme: "default".to_string(),
        }
    }
}

/// Directory scanning configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Print a progress line every this many files
    pub progress_interval: usize,
    /// Number of skipped files whose cause is printed
    pub max_reported_skips: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            max_reported_skips: DEFAULT_MAX_REPORTED_SKIPS,
        }
    }
}

/// Content hashing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashConfig {
    /// Files larger than this (bytes) get a `large_file_<size>` hash
    pub max_file_size: u64,
    /// Read buffer size in bytes
    pub chunk_size: usize,
}

impl Default for HashConfig {
    fn default() -> Self {
        Self {
            max_file_size: MAX_FILE_SIZE_FOR_HASH,
            chunk_size: CHUNK_SIZE,
        }
    }
}

/// Report output configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub default_filename: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            default_filename: DEFAULT_REPORT_NAME.to_string(),
        }
    }
}

impl Config {
    /// Returns the configuration directory path.
    ///
    /// Typically `~/.config/storage-report` on Unix systems or
    /// `%USERPROFILE%/.config/storage-report` on Windows.
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    fn get_config_dir() -> Result<PathBuf> {
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| color_eyre::eyre::eyre!("Could not determine home directory"))?;

        Ok(PathBuf::from(home).join(".config").join("storage-report"))
    }

    fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    /// Loads configuration from file, creating default if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if file I/O fails or if the TOML is malformed.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use storage_report::config::Config;
    ///
    /// # fn main() -> color_eyre::Result<()> {
    /// let config = Config::load()?;
    /// println!("Using theme: {}", config.ui.color.theme);
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            println!("INFO: Config file not found, creating default config...");
            let config = Self::default();
            config.save()?;
            println!("INFO: Default config created at: {}", config_path.display());
            return Ok(config);
        }

        let contents = fs::read_to_string(&config_path)?;
        Self::from_toml(&contents)
    }

    /// Parses configuration from TOML text. Missing keys take their defaults.
    pub fn from_toml(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Saves the configuration to file.
    ///
    /// Creates the configuration directory if it doesn't exist.
    pub fn save(&self) -> Result<()> {
        let config_dir = Self::get_config_dir()?;
        fs::create_dir_all(&config_dir)?;

        let config_path = Self::get_config_path()?;
        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// Builds a [`Scanner`] for `root` using the scan and hash settings.
    pub fn scanner(&self, root: impl Into<PathBuf>) -> Scanner {
        Scanner::new(root)
            .with_hasher(Hasher::new(self.hash.max_file_size, self.hash.chunk_size))
            .with_progress_interval(self.scan.progress_interval)
            .with_max_reported_skips(self.scan.max_reported_skips)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.ui.color.theme, "default");
        assert_eq!(config.scan.progress_interval, 50);
        assert_eq!(config.scan.max_reported_skips, 5);
        assert_eq!(config.hash.max_file_size, 100 * 1024 * 1024);
        assert_eq!(config.hash.chunk_size, 8192);
        assert_eq!(config.report.default_filename, "storage_report.json");
    }

    #[test]
    fn test_config_toml_round_trip() {
        let mut config = Config::default();
        config.ui.color.theme = "cyan".to_string();
        config.scan.progress_interval = 100;

        let contents = toml::to_string_pretty(&config).unwrap();
        let parsed = Config::from_toml(&contents).unwrap();

        assert_eq!(parsed, config);
    }

    #[test]
    fn test_config_partial_file_uses_defaults() {
        let parsed = Config::from_toml(
            r#"
            [ui.color]
            theme = "magenta"

            [hash]
            max_file_size = 1024
            "#,
        )
        .unwrap();

        assert_eq!(parsed.ui.color.theme, "magenta");
        assert_eq!(parsed.hash.max_file_size, 1024);
        assert_eq!(parsed.hash.chunk_size, CHUNK_SIZE);
        assert_eq!(parsed.scan, ScanConfig::default());
        assert_eq!(parsed.report, ReportConfig::default());
    }

    #[test]
    fn test_config_malformed_toml() {
        assert!(Config::from_toml("[scan]\nprogress_interval = \"fast\"").is_err());
    }

    #[test]
    fn test_config_scanner_uses_settings() {
        let mut config = Config::default();
        config.hash.max_file_size = 3;

        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join("a.log"), b"four").unwrap();

        let result = config.scanner(dir.path()).scan(|_| {}).unwrap();
        assert_eq!(result.files[0].hash.to_string(), "large_file_4");
    }
}
