// src/driver.rs
// =============================================================================
// This module runs the whole pipeline over a directory tree.
//
// For every Markdown file the walker finds:
// 1. Make sure the image directory exists
// 2. Read the file
// 3. Let the rewrite engine download images and rewrite the text
// 4. Write the new text back (only with --rewrite y, and only if it changed)
//
// Everything is best-effort. A file that fails is logged and counted, and the
// walk goes on with the next one. Images that were downloaded stay on disk
// even if writing the document back fails.
//
// Rust concepts:
// - anyhow::Context: Attach "what were we doing" to an error
// - &mut parameters: process_file updates the caller's summary in place
// - Serialize: The summary can be printed as JSON
// =============================================================================

use crate::config::Config;
use crate::fetch::Fetcher;
use crate::rewrite::{Document, RewriteEngine, RewriteOutcome};
use crate::walk;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;
use tracing::{error, info};

/// Totals for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Markup files found by the walker
    pub files_scanned: usize,
    /// Files written back to disk
    pub files_rewritten: usize,
    /// Files that could not be processed (image dir, read or write error)
    pub files_failed: usize,
    pub images_downloaded: usize,
    pub downloads_failed: usize,
    /// Local references left alone by the enhanced policy
    pub references_skipped: usize,
}

impl RunSummary {
    fn record(&mut self, outcome: &RewriteOutcome) {
        self.images_downloaded += outcome.downloaded;
        self.downloads_failed += outcome.failed;
        self.references_skipped += outcome.skipped;
    }
}

// Processes every markup file under config.root
//
// Only fails if the HTTP client can't be built. Per-file problems end up in
// the summary, never in the returned error.
pub async fn run(config: &Config) -> Result<RunSummary> {
    let fetcher = Fetcher::new(&config.user_agent, config.timeout)
        .context("failed to create HTTP client")?;
    let engine = RewriteEngine::new(
        &fetcher,
        config.policy,
        config.replace,
        config.sniff_content_type,
    );
    let image_dir = config.image_dir();

    let mut summary = RunSummary::default();

    for path in walk::markup_files(&config.root, &config.extension) {
        info!("processing {}", path.display());
        summary.files_scanned += 1;

        if let Err(e) = process_file(
            &engine,
            &path,
            &image_dir,
            &config.image_path,
            config.rewrite,
            &mut summary,
        )
        .await
        {
            error!("{:#}", e);
            summary.files_failed += 1;
        }
    }

    Ok(summary)
}

// Runs the pipeline for one file
//
// Parameters:
//   engine: the rewrite engine (shared across files)
//   path: the markup file
//   image_dir: where images are downloaded to
//   image_prefix: what the rewritten references point at
//   persist: write the result back (false = dry run)
//   summary: updated with the download counts, even if persisting fails
async fn process_file(
    engine: &RewriteEngine<'_>,
    path: &Path,
    image_dir: &Path,
    image_prefix: &str,
    persist: bool,
    summary: &mut RunSummary,
) -> Result<()> {
    tokio::fs::create_dir_all(image_dir)
        .await
        .with_context(|| format!("failed to create image directory {}", image_dir.display()))?;

    let document = Document::load(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;

    let outcome = engine.rewrite(&document, image_dir, image_prefix).await;
    summary.record(&outcome);

    if outcome.content == document.content {
        return Ok(());
    }

    if !persist {
        info!(
            "dry run: {} not modified ({} image(s) would be relinked)",
            path.display(),
            outcome.downloaded
        );
        return Ok(());
    }

    tokio::fs::write(path, &outcome.content)
        .await
        .with_context(|| format!("failed to write {}", path.display()))?;
    summary.files_rewritten += 1;
    info!("rewrote {}", path.display());

    Ok(())
}
