//! Interactive prompts for the scan root and the report file name.

use dialoguer::{Confirm, Input};
use std::io;
use std::path::{Path, PathBuf};

use crate::report::normalize_output_name;
use crate::tui::UI;

/// Outcome of checking a candidate scan root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathCheck {
    Valid,
    Empty,
    Missing,
    NotADirectory,
}

/// Strips surrounding whitespace and quotes, as left behind by drag-and-drop
/// into a terminal or copy-paste from a file manager.
pub fn clean_path_input(input: &str) -> String {
    input
        .trim()
        .trim_matches('"')
        .trim_matches('\'')
        .to_string()
}

pub fn check_scan_path(path: &str) -> PathCheck {
    if path.is_empty() {
        return PathCheck::Empty;
    }

    let path = Path::new(path);
    if !path.exists() {
        PathCheck::Missing
    } else if !path.is_dir() {
        PathCheck::NotADirectory
    } else {
        PathCheck::Valid
    }
}

/// Maps a Ctrl-C during a prompt to `None` so it ends the run cleanly.
fn cancellable<T>(result: Result<T, dialoguer::Error>) -> color_eyre::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Asks for the directory to scan until a valid one is given.
///
/// Returns `None` when the user declines to try again after entering a path
/// that does not exist, or interrupts the prompt.
pub fn prompt_scan_path(ui: &UI) -> color_eyre::Result<Option<PathBuf>> {
    let theme = ui.colorful_theme();

    loop {
        ui.print_heading("Enter the directory path you want to scan:")?;
        ui.print_line("Examples:")?;
        ui.print_line("  Windows: C:\\Users\\YourName\\Documents")?;
        ui.print_line("  Mac:     /Users/YourName/Documents")?;
        ui.print_line("  Linux:   /home/yourname/documents")?;
        ui.term.write_line("")?;

        let Some(input) = cancellable(
            Input::<String>::with_theme(&theme)
                .with_prompt("Path")
                .allow_empty(true)
                .interact_text(),
        )?
        else {
            return Ok(None);
        };
        let directory = clean_path_input(&input);

        match check_scan_path(&directory) {
            PathCheck::Valid => return Ok(Some(PathBuf::from(directory))),
            PathCheck::Empty => ui.print_error("Please enter a path")?,
            PathCheck::NotADirectory => {
                ui.print_error(&format!("Path is not a directory: {}", directory))?
            }
            PathCheck::Missing => {
                ui.print_error(&format!("Path does not exist: {}", directory))?;
                let retry = cancellable(
                    Confirm::with_theme(&theme)
                        .with_prompt("Try again?")
                        .default(true)
                        .interact(),
                )?;
                if retry != Some(true) {
                    return Ok(None);
                }
            }
        }
    }
}

/// Asks for the report file name, falling back to `default` on empty input.
///
/// Returns `None` if the prompt is interrupted.
pub fn prompt_output_name(ui: &UI, default: &str) -> color_eyre::Result<Option<String>> {
    let theme = ui.colorful_theme();

    ui.print_heading("Save report as:")?;
    let input = cancellable(
        Input::<String>::with_theme(&theme)
            .with_prompt(format!("Filename (default: {})", default))
            .allow_empty(true)
            .interact_text(),
    )?;

    Ok(input.map(|name| normalize_output_name(&name, default)))
}
