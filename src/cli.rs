//! Command-line interface definitions.
//!
//! Every argument is optional: with none given the tool asks for the scan
//! root and the report name interactively.

use crate::tui::BANNER;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "storage-report")]
#[command(about = "Scan a directory and generate a storage report for the Cloud Storage Optimizer")]
#[command(before_help = BANNER)]
#[command(version)]
pub struct Args {
    /// Directory to scan (prompted for when omitted)
    pub path: Option<PathBuf>,

    /// Report file name; `.json` is appended when missing (prompted for when omitted)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write a text log file summarizing the scan, including every skipped file
    #[arg(long)]
    pub log: bool,
}
