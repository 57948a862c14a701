use clap::Parser;

use storage_report::cli::Args;
use storage_report::config::Config;
use storage_report::generate::handle_scan;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    // Load configuration
    let config = Config::load()?;

    tokio::select! {
        outcome = handle_scan(&args, &config) => {
            outcome?;
        }
        _ = tokio::signal::ctrl_c() => {
            // The scan runs on a blocking thread; exit instead of waiting for it
            let _ = console::Term::stdout().show_cursor();
            println!("\n\nCancelled by user. Goodbye!");
            std::process::exit(0);
        }
    }

    Ok(())
}
