// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Set up logging
// 2. Parse command-line arguments using clap and build the Config
// 3. Walk the tree, download images, rewrite documents
// 4. Log a summary (and print it as JSON with --json)
//
// Per-file and per-image failures are only logged: the exit code is 0 even
// if some downloads failed. Exit code 2 means the run couldn't start at all.
//
// Rust concepts used:
// - async/await: Network requests and file I/O
// - Result<T, E>: For error handling (T = success type, E = error type)
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli; // src/cli.rs - command-line parsing
mod config; // src/config.rs - immutable run configuration
mod driver; // src/driver.rs - per-file pipeline and run summary
mod extract; // src/extract/ - finding ![alt](url) references
mod fetch; // src/fetch/ - downloading images
mod logging; // src/logging.rs - tracing setup
mod rewrite; // src/rewrite/ - naming and replacing references
mod walk; // src/walk/ - finding markup files

#[cfg(test)]
mod test_server;

use clap::Parser; // Parser trait enables the parse() method
use cli::Cli;
use config::Config;
use driver::RunSummary;
use tracing::{error, info};

#[tokio::main]
async fn main() {
    logging::init_logging();

    let config = Config::from_cli(Cli::parse());
    let exit_code = run(&config).await;

    std::process::exit(exit_code);
}

// Runs the whole tree and returns the process exit code
//
// The summary line is logged on every path, even when the run could not
// start (then all counts are zero and the exit code is 2).
async fn run(config: &Config) -> i32 {
    info!(
        "scanning {} for *.{} files, images go to {}{}",
        config.root.display(),
        config.extension,
        config.image_dir().display(),
        if config.rewrite { "" } else { " (dry run)" }
    );

    let (summary, exit_code) = match driver::run(config).await {
        Ok(summary) => (summary, 0),
        Err(e) => {
            error!("{:#}", e);
            (RunSummary::default(), 2)
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => error!("could not serialize summary: {}", e),
        }
    }

    info!("{}", summary_line(&summary));

    exit_code
}

fn summary_line(summary: &RunSummary) -> String {
    format!(
        "download complete: {} file(s) scanned, {} rewritten, {} failed; {} image(s) downloaded, {} failed",
        summary.files_scanned,
        summary.files_rewritten,
        summary.files_failed,
        summary.images_downloaded,
        summary.downloads_failed
    )
}
