// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// We use the "derive" API which lets us define the CLI structure using
// Rust structs and attributes (the #[...] things).
//
// The parsed Cli is turned into an immutable Config (see config.rs) right
// after parsing, and only the Config is handed to the rest of the program.
//
// Rust concepts:
// - Structs: Custom data types that group related data
// - Derive macros: Automatically generate code for our types
// - Option<T>: For flags that have no default value
// =============================================================================

use crate::config::{NamingPolicy, ReplaceMode};
use crate::fetch::DEFAULT_USER_AGENT;
use clap::Parser;
use std::path::PathBuf;

// This struct represents our entire CLI application
//
// There are no subcommands: the tool does one thing.
#[derive(Parser, Debug)]
#[command(
    name = "md-image-localizer",
    version,
    about = "Download remote images referenced in Markdown files and point the files at the local copies",
    long_about = "md-image-localizer walks a directory tree, finds ![alt](url) image references in \
                  Markdown files, downloads every remote image into a local directory and rewrites \
                  the references. Without --rewrite y it only downloads and reports (dry run)."
)]
pub struct Cli {
    /// Directory containing the Markdown files
    ///
    /// Defaults to the current working directory
    #[arg(long, value_name = "DIR")]
    pub markdown_path: Option<PathBuf>,

    /// Where downloaded images go, relative to --markdown-path
    ///
    /// The same relative path is written into the rewritten documents
    #[arg(long, value_name = "DIR", default_value = "source/image")]
    pub image_path: String,

    /// y: write the rewritten Markdown back to disk; anything else is a dry run
    #[arg(long, value_name = "y|n", default_value = "n")]
    pub rewrite: String,

    /// How downloaded images are named
    ///
    /// simple: keep the file name from the URL
    /// enhanced: <document>_<n>.<ext>, and only http(s) references are fetched
    #[arg(long, value_enum, default_value_t = NamingPolicy::Enhanced)]
    pub policy: NamingPolicy,

    /// How the old URL is swapped for the local path
    ///
    /// literal: replace the URL everywhere it appears in the document
    /// spans: replace it only inside the ![alt](url) references
    #[arg(long, value_enum, default_value_t = ReplaceMode::Literal)]
    pub replace: ReplaceMode,

    /// File extension of the Markdown files to process
    #[arg(long, value_name = "EXT", default_value = "md")]
    pub extension: String,

    /// User-Agent header sent with every image request
    #[arg(long, value_name = "UA", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Give up on a single image after this many seconds (no limit by default)
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Don't use the Content-Type header to pick the image file extension
    #[arg(long)]
    pub no_sniff: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    pub json: bool,
}
