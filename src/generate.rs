//! Report generation workflow.
//!
//! Ties the pieces together for the command line: pick a directory, scan it
//! while printing progress, summarize, pick an output name, write the report
//! and point the user at the web application.

use color_eyre::eyre::eyre;
use std::path::{Path, PathBuf};

use crate::cli::Args;
use crate::config::Config;
use crate::log::write_scan_log;
use crate::prompt::{PathCheck, check_scan_path, prompt_output_name, prompt_scan_path};
use crate::report::{Report, display_path, normalize_output_name, write_report};
use crate::scanner::{ScanEvent, scan_directory};
use crate::tui::{UI, format_count, format_size, progress_line, skip_line};

/// How a run ended, when it did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Completed { report_path: PathBuf },
    Cancelled,
}

/// Resolves the scan root from the command line or by prompting.
fn resolve_root(args: &Args, ui: &UI) -> color_eyre::Result<Option<PathBuf>> {
    let Some(path) = &args.path else {
        return prompt_scan_path(ui);
    };

    match check_scan_path(&path.to_string_lossy()) {
        PathCheck::Valid => Ok(Some(path.clone())),
        PathCheck::Empty => Err(eyre!("Please enter a path")),
        PathCheck::Missing => Err(eyre!("Path does not exist: {}", path.display())),
        PathCheck::NotADirectory => Err(eyre!("Path is not a directory: {}", path.display())),
    }
}

pub async fn handle_scan(args: &Args, config: &Config) -> color_eyre::Result<Outcome> {
    let theme = config.ui.color.theme.clone();
    let ui = UI::new()?.with_color_theme(theme.clone());
    ui.print_banner()?;

    let Some(root) = resolve_root(args, &ui)? else {
        ui.print_info("Goodbye!")?;
        return Ok(Outcome::Cancelled);
    };

    // Scan
    ui.print_info("Starting scan... (this may take a while for large directories)")?;
    ui.print_heading(&format!("Scanning directory: {}", root.display()))?;
    ui.print_rule()?;

    let pb = ui.create_spinner("Walking directory tree...");
    let scan = scan_directory(config.scanner(&root), {
        let pb = pb.clone();
        move |event| match event {
            ScanEvent::Progress { files, total_size } => {
                pb.println(progress_line(&theme, files, total_size));
                pb.set_message(format!(
                    "{} files ({})",
                    format_count(files),
                    format_size(total_size)
                ));
            }
            ScanEvent::Skipped { path, reason } => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                pb.println(skip_line(&theme, &name, &reason));
            }
        }
    })
    .await;
    pb.finish_and_clear();
    let mut result = scan?;

    let max_reported = config.scan.max_reported_skips;
    if result.skipped_count() > max_reported {
        ui.print_warning(&format!(
            "... and {} more files skipped",
            result.skipped_count() - max_reported
        ))?;
    }

    // Summary
    ui.term.write_line("")?;
    ui.print_rule()?;
    ui.print_success("Scan complete!")?;
    ui.print_line(&format!("Files found: {}", format_count(result.total_files())))?;
    ui.print_line(&format!("Total size:  {}", format_size(result.total_size)))?;
    if result.skipped_count() > 0 {
        ui.print_line(&format!(
            "Skipped:     {}",
            format_count(result.skipped_count())
        ))?;
    }
    ui.print_heading("FILES BY TYPE")?;
    ui.print_category_breakdown(&result.get_summary(), result.total_size)?;

    // Output name
    let default_name = config.report.default_filename.as_str();
    let output_name = match &args.output {
        Some(name) => normalize_output_name(name, default_name),
        None => match prompt_output_name(&ui, default_name)? {
            Some(name) => name,
            None => {
                ui.print_info("Cancelled by user. Goodbye!")?;
                return Ok(Outcome::Cancelled);
            }
        },
    };
    let report_path = PathBuf::from(output_name);

    // The log needs the records after the report is written
    let files = if args.log {
        result.files.clone()
    } else {
        std::mem::take(&mut result.files)
    };
    let report = Report::new(files, &root);
    let written = write_report(&report, &report_path).await?;

    ui.term.write_line("")?;
    ui.print_success("Report saved successfully!")?;
    ui.print_line(&format!("File: {}", display_path(&report_path).display()))?;
    ui.print_line(&format!("Size: {}", format_size(written)))?;

    if args.log {
        ui.print_info("Writing log file...")?;
        match write_scan_log(&root, &result, Some(&report_path)).await {
            Ok(log_path) => {
                ui.print_success(&format!("Log written to: {}", log_path.display()))?
            }
            Err(e) => ui.print_warning(&format!("Failed to write log file: {}", e))?,
        }
    }

    print_next_steps(&ui, &report_path)?;
    ui.cleanup()?;

    Ok(Outcome::Completed { report_path })
}

fn print_next_steps(ui: &UI, report_path: &Path) -> std::io::Result<()> {
    ui.term.write_line("")?;
    ui.print_rule()?;
    ui.print_heading("Next Steps:")?;
    ui.print_line("1. Go to your Cloud Storage Optimizer web app")?;
    ui.print_line("2. Click 'Upload JSON File'")?;
    ui.print_line(&format!("3. Select: {}", report_path.display()))?;
    ui.print_line("4. Get your optimization recommendations!")?;
    ui.term.write_line("")?;
    ui.print_rule()?;
    ui.term.write_line("")?;
    ui.print_info("Thank you for using Cloud Storage Optimizer!")?;
    ui.term.write_line("")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn args(path: Option<PathBuf>, output: Option<&str>, log: bool) -> Args {
        Args {
            path,
            output: output.map(str::to_string),
            log,
        }
    }

    #[test]
    fn test_resolve_root_from_args() {
        let dir = TempDir::new().unwrap();
        let ui = UI::new().unwrap();

        let root = resolve_root(&args(Some(dir.path().to_path_buf()), None, false), &ui).unwrap();
        assert_eq!(root, Some(dir.path().to_path_buf()));

        let missing = dir.path().join("missing");
        let err = resolve_root(&args(Some(missing), None, false), &ui).unwrap_err();
        assert!(err.to_string().starts_with("Path does not exist"));

        let file = dir.path().join("file.txt");
        fs::write(&file, b"x").unwrap();
        let err = resolve_root(&args(Some(file), None, false), &ui).unwrap_err();
        assert!(err.to_string().starts_with("Path is not a directory"));
    }

    #[tokio::test]
    async fn test_handle_scan_non_interactive() {
        let src = TempDir::new().unwrap();
        fs::write(src.path().join("a.txt"), b"0123456789").unwrap();
        fs::write(src.path().join(".secret"), b"hidden").unwrap();
        fs::create_dir(src.path().join("music")).unwrap();
        fs::write(src.path().join("music/track.mp3"), b"id3").unwrap();

        let out = TempDir::new().unwrap();
        let output = out.path().join("scan");

        let outcome = handle_scan(
            &args(
                Some(src.path().to_path_buf()),
                Some(output.to_str().unwrap()),
                false,
            ),
            &Config::default(),
        )
        .await
        .unwrap();

        let expected = out.path().join("scan.json");
        assert_eq!(
            outcome,
            Outcome::Completed {
                report_path: expected.clone()
            }
        );

        let report = Report::from_json(&fs::read_to_string(&expected).unwrap()).unwrap();
        assert_eq!(report.metadata.total_files, 2);
        assert_eq!(report.metadata.total_size, 13);
        assert_eq!(report.metadata.scanned_path, src.path().display().to_string());
        assert!(report.files.iter().all(|f| f.name != ".secret"));
    }
}
