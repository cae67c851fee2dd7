// src/config.rs
// =============================================================================
// The run configuration.
//
// Config is built once from the parsed command line and never changes during
// a run. It's passed down explicitly (no global state), so the rewrite engine
// and the driver can be tested without touching process-wide flags.
// =============================================================================

use crate::cli::Cli;
use clap::ValueEnum;
use std::path::PathBuf;
use std::time::Duration;

/// How a downloaded image is named, and which references are fetched at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum NamingPolicy {
    /// Use the last path segment of the URL. Every reference is attempted.
    Simple,
    /// `<document stem>_<reference ordinal>.<ext>`. Only http(s) URLs are fetched.
    Enhanced,
}

/// How the remote URL is replaced by the local path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReplaceMode {
    /// Replace every literal occurrence of the URL in the document,
    /// even outside image syntax.
    Literal,
    /// Replace only the URL inside matched `![alt](url)` references.
    Spans,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Directory that is scanned recursively
    pub root: PathBuf,
    /// Image directory relative to `root`, also the prefix written into documents
    pub image_path: String,
    /// Persist rewritten documents (false = dry run)
    pub rewrite: bool,
    pub policy: NamingPolicy,
    pub replace: ReplaceMode,
    /// Markup file extension without the leading dot
    pub extension: String,
    pub user_agent: String,
    pub timeout: Option<Duration>,
    pub sniff_content_type: bool,
    pub json: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Self {
        let root = cli.markdown_path.unwrap_or_else(default_root);

        Self {
            root,
            image_path: cli.image_path,
            rewrite: cli.rewrite == "y",
            policy: cli.policy,
            replace: cli.replace,
            extension: cli.extension.trim_start_matches('.').to_string(),
            user_agent: cli.user_agent,
            timeout: cli.timeout.map(Duration::from_secs),
            sniff_content_type: !cli.no_sniff,
            json: cli.json,
        }
    }

    /// Absolute (or root-relative) directory the images are downloaded into.
    pub fn image_dir(&self) -> PathBuf {
        self.root.join(&self.image_path)
    }
}

// Falls back to "." when the working directory can't be determined
// (deleted, no permission), rather than aborting the run.
fn default_root() -> PathBuf {
    std::env::current_dir().unwrap_or_else(|e| {
        tracing::warn!("could not determine current directory ({}), using '.'", e);
        PathBuf::from(".")
    })
}
