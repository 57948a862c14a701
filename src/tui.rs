//! Terminal user interface components.
//!
//! Themed status lines, the banner, a scan spinner and the category
//! breakdown printed after a scan.

use console::{Style, Term};
use dialoguer::theme::ColorfulTheme;
use indicatif::{ProgressBar, ProgressStyle};
use std::io;

use crate::categories::Category;

pub const BANNER: &str = r#"
 ╔═══════════════════════════════════════════════════════════╗
 ║                                                           ║
 ║      Cloud Storage Optimizer                              ║
 ║      Storage Report Generator                             ║
 ║                                                           ║
 ║      Scan your local storage and find optimization        ║
 ║      opportunities!                                       ║
 ║                                                           ║
 ╚═══════════════════════════════════════════════════════════╝"#;

const RULE_WIDTH: usize = 70;

pub struct UI {
    pub term: Term,
    pub color_theme: String,
}

impl UI {
    pub fn new() -> io::Result<Self> {
        let term = Term::stdout();
        Ok(Self {
            term,
            color_theme: "default".to_string(),
        })
    }

    pub fn with_color_theme(mut self, theme: String) -> Self {
        self.color_theme = theme;
        self
    }

    /// Get the console::Style for the configured theme
    fn get_style(&self) -> Style {
        match self.color_theme.as_str() {
            "cyan" => Style::new().cyan(),
            "magenta" => Style::new().magenta(),
            "yellow" => Style::new().yellow(),
            "green" => Style::new().green(),
            "red" => Style::new().red(),
            "blue" => Style::new().blue(),
            _ => Style::new().white(),
        }
    }

    /// Get spinner color string for progress templates
    fn get_spinner_color(&self) -> &str {
        match self.color_theme.as_str() {
            "cyan" => ".cyan",
            "magenta" => ".magenta",
            "yellow" => ".yellow",
            "green" => ".green",
            "red" => ".red",
            "blue" => ".blue",
            _ => ".white",
        }
    }

    /// Themed prompt style for dialoguer
    pub fn colorful_theme(&self) -> ColorfulTheme {
        Self::get_colorful_theme(&self.color_theme)
    }

    /// Get a ColorfulTheme based on theme string
    pub fn get_colorful_theme(theme: &str) -> ColorfulTheme {
        let base = match theme {
            "cyan" => Style::new().cyan(),
            "magenta" => Style::new().magenta(),
            "yellow" => Style::new().yellow(),
            "green" => Style::new().green(),
            "red" => Style::new().red(),
            "blue" => Style::new().blue(),
            "white" => Style::new().white(),
            _ => return ColorfulTheme::default(),
        };

        ColorfulTheme {
            values_style: base.clone(),
            active_item_style: base.clone().bold(),
            active_item_prefix: base.apply_to("❯".to_string()).bold(),
            ..ColorfulTheme::default()
        }
    }

    /// Status styles for the theme.
    /// Returns (info_style, warning_style, error_style, success_style)
    pub fn get_static_status_styles(theme: &str) -> (Style, Style, Style, Style) {
        match theme {
            "cyan" => (
                Style::new().cyan(),        // info - base
                Style::new().color256(51),  // warning - bright cyan
                Style::new().color256(87),  // error - darker cyan
                Style::new().color256(123), // success - lighter cyan
            ),
            "magenta" => (
                Style::new().magenta(),
                Style::new().color256(201),
                Style::new().color256(126),
                Style::new().color256(213),
            ),
            "yellow" => (
                Style::new().yellow(),
                Style::new().color256(226),
                Style::new().color256(178),
                Style::new().color256(227),
            ),
            "green" => (
                Style::new().green(),
                Style::new().color256(46),
                Style::new().color256(28),
                Style::new().color256(120),
            ),
            "red" => (
                Style::new().red(),
                Style::new().color256(196),
                Style::new().color256(124),
                Style::new().color256(210),
            ),
            "blue" => (
                Style::new().blue(),
                Style::new().color256(39),
                Style::new().color256(25),
                Style::new().color256(117),
            ),
            _ => (
                Style::new().white(),
                Style::new().yellow(),
                Style::new().red(),
                Style::new().green(),
            ),
        }
    }

    fn get_status_styles(&self) -> (Style, Style, Style, Style) {
        Self::get_static_status_styles(&self.color_theme)
    }

    /// Print the banner
    pub fn print_banner(&self) -> io::Result<()> {
        let style = self.get_style();
        self.term.write_line(&style.apply_to(BANNER).bold().to_string())?;
        self.term.write_line("")?;
        Ok(())
    }

    /// Print a horizontal rule
    pub fn print_rule(&self) -> io::Result<()> {
        let white_bold = Style::new().white().bold();
        self.term
            .write_line(&white_bold.apply_to("=".repeat(RULE_WIDTH)).to_string())
    }

    /// Print a themed section heading
    pub fn print_heading(&self, title: &str) -> io::Result<()> {
        let style = self.get_style();
        self.term.write_line("")?;
        self.term
            .write_line(&style.apply_to(title).bold().to_string())
    }

    /// Plain bold line, indented
    pub fn print_line(&self, message: &str) -> io::Result<()> {
        let white_bold = Style::new().white().bold();
        self.term
            .write_line(&format!("   {}", white_bold.apply_to(message)))
    }

    /// Create a spinner for the scan phase
    pub fn create_spinner(&self, message: &str) -> ProgressBar {
        let pb = ProgressBar::new_spinner();
        let spinner_color = self.get_spinner_color();
        if let Ok(style) = ProgressStyle::default_spinner()
            .template(&format!("{{spinner:{}}} {{msg}}", spinner_color))
        {
            pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Print the per-category breakdown
    pub fn print_category_breakdown(
        &self,
        summary: &[(Category, usize, u64)],
        total_size: u64,
    ) -> io::Result<()> {
        for line in create_category_bars(summary, total_size) {
            self.term.write_line(&format!("  {}", line))?;
        }
        Ok(())
    }

    /// Print an info message
    pub fn print_info(&self, message: &str) -> io::Result<()> {
        let (info_style, _, _, _) = self.get_status_styles();
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            info_style.apply_to("[*]").bold(),
            white_bold.apply_to(message)
        ))
    }

    /// Print an error message
    pub fn print_error(&self, message: &str) -> io::Result<()> {
        let (_, _, error_style, _) = self.get_status_styles();
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            error_style.apply_to("[!] ERROR:").bold(),
            white_bold.apply_to(message)
        ))
    }

    /// Print a success message
    pub fn print_success(&self, message: &str) -> io::Result<()> {
        let (_, _, _, success_style) = self.get_status_styles();
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            success_style.apply_to("[✓]").bold(),
            white_bold.apply_to(message)
        ))
    }

    /// Print a warning message
    pub fn print_warning(&self, message: &str) -> io::Result<()> {
        let (_, warning_style, _, _) = self.get_status_styles();
        let white_bold = Style::new().white().bold();
        self.term.write_line(&format!(
            "{} {}",
            warning_style.apply_to("[!] WARNING:").bold(),
            white_bold.apply_to(message)
        ))
    }

    /// Cleanup the terminal (show cursor, etc.)
    pub fn cleanup(&self) -> io::Result<()> {
        self.term.show_cursor()
    }
}

impl Drop for UI {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Formats a scan progress line, for use with `ProgressBar::println`
pub fn progress_line(theme: &str, files: usize, total_size: u64) -> String {
    let (info_style, _, _, _) = UI::get_static_status_styles(theme);
    format!(
        "  {} Found {} files... ({})",
        info_style.apply_to("[*]").bold(),
        format_count(files),
        format_size(total_size)
    )
}

/// Formats a skipped-file warning, keeping the first 50 characters of the cause
pub fn skip_line(theme: &str, name: &str, reason: &str) -> String {
    let (_, warning_style, _, _) = UI::get_static_status_styles(theme);
    let reason: String = reason.chars().take(50).collect();
    format!(
        "  {} Skipping {}: {}",
        warning_style.apply_to("[!]").bold(),
        name,
        reason
    )
}

// One bar per category, largest first, scaled against the scanned total
fn create_category_bars(summary: &[(Category, usize, u64)], total_size: u64) -> Vec<String> {
    const BAR_WIDTH: usize = 30;

    if summary.is_empty() {
        return vec!["No files to display".to_string()];
    }

    let mut sorted: Vec<_> = summary.iter().collect();
    sorted.sort_by(|a, b| b.2.cmp(&a.2));

    sorted
        .into_iter()
        .map(|(category, count, size)| {
            let fraction = if total_size == 0 {
                0.0
            } else {
                *size as f64 / total_size as f64
            };
            let bar_length = (fraction * BAR_WIDTH as f64).round() as usize;

            format!(
                "{:<10} {}{} {:>6.2}% {:>12} ({} files)",
                format!("{}:", category),
                "█".repeat(bar_length),
                " ".repeat(BAR_WIDTH.saturating_sub(bar_length)),
                fraction * 100.0,
                format_size(*size),
                format_count(*count)
            )
        })
        .collect()
}

/// Formats a byte count with two decimals and a binary unit, e.g. `1.50 KB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB", "PB"];
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    format!("{:.2} {}", size, UNITS[unit_index])
}

/// Formats a count with thousands separators, e.g. `12,345`.
pub fn format_count(count: usize) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
