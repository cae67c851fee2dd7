// src/rewrite/engine.rs
// =============================================================================
// This module rewrites the image references of one document.
//
// How it works:
// 1. Extract every ![alt](url) reference, in document order
// 2. For each reference:
//    a. (enhanced policy) skip it unless it's an http(s) URL
//    b. skip it if the same URL already came up earlier in this document
//    c. pick a local file name (see naming.rs)
//    d. download it into the image directory
//    e. on success, swap the URL for "<image prefix>/<file name>"
// 3. Return the new text
//
// A failed download only affects its own reference: it's logged, counted,
// and the URL stays as it was.
//
// Rust concepts:
// - Lifetimes: RewriteEngine<'a> borrows the Fetcher instead of owning it
// - HashSet / HashMap: Remember which URLs we've seen and where they went
// - String building: Rebuild the text piece by piece in "spans" mode
// =============================================================================

use crate::config::{NamingPolicy, ReplaceMode};
use crate::extract::{extract_image_references, ImageReference};
use crate::fetch::{FetchError, Fetcher};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

use super::naming;
use super::Document;

/// Rewrites documents using one shared Fetcher.
pub struct RewriteEngine<'a> {
    fetcher: &'a Fetcher,
    policy: NamingPolicy,
    replace: ReplaceMode,
    sniff_content_type: bool,
}

/// The rewritten text plus what happened along the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOutcome {
    pub content: String,
    /// Images downloaded successfully
    pub downloaded: usize,
    /// Downloads that failed (URL left untouched)
    pub failed: usize,
    /// References that were not remote (enhanced policy only)
    pub skipped: usize,
    /// References whose URL was already handled earlier in the document
    pub duplicates: usize,
}

impl<'a> RewriteEngine<'a> {
    pub fn new(
        fetcher: &'a Fetcher,
        policy: NamingPolicy,
        replace: ReplaceMode,
        sniff_content_type: bool,
    ) -> Self {
        Self {
            fetcher,
            policy,
            replace,
            sniff_content_type,
        }
    }

    // Downloads the images of `document` and returns the rewritten text
    //
    // Parameters:
    //   document: the document as read from disk (not modified)
    //   image_dir: where image files are written (must already exist)
    //   image_prefix: what goes in front of the file name in the new reference
    pub async fn rewrite(
        &self,
        document: &Document,
        image_dir: &Path,
        image_prefix: &str,
    ) -> RewriteOutcome {
        let references = extract_image_references(&document.content);

        let mut outcome = RewriteOutcome {
            content: document.content.clone(),
            ..RewriteOutcome::default()
        };
        let mut seen: HashSet<&str> = HashSet::new();
        let mut resolved: HashMap<&str, String> = HashMap::new();

        for reference in &references {
            if self.policy == NamingPolicy::Enhanced && !naming::is_remote(&reference.url) {
                debug!("skipping local reference {}", reference.url);
                outcome.skipped += 1;
                continue;
            }

            // The first occurrence decides the local name for all later ones
            if !seen.insert(reference.url.as_str()) {
                outcome.duplicates += 1;
                continue;
            }

            let filename = match self.localize(document, reference, image_dir).await {
                Ok(filename) => filename,
                Err(e) => {
                    warn!(
                        "failed to download {} (referenced in {}): {}",
                        reference.url,
                        document.path.display(),
                        e
                    );
                    outcome.failed += 1;
                    continue;
                }
            };

            let local = local_reference(image_prefix, &filename);
            info!("downloaded {} -> {}", reference.url, image_dir.join(&filename).display());
            outcome.downloaded += 1;

            match self.replace {
                ReplaceMode::Literal => {
                    outcome.content = outcome.content.replace(reference.url.as_str(), &local);
                }
                ReplaceMode::Spans => {
                    resolved.insert(reference.url.as_str(), local);
                }
            }
        }

        if self.replace == ReplaceMode::Spans && !resolved.is_empty() {
            outcome.content = replace_spans(&document.content, &references, &resolved);
        }

        outcome
    }

    // Names the file and downloads it; returns the file name on success
    async fn localize(
        &self,
        document: &Document,
        reference: &ImageReference,
        image_dir: &Path,
    ) -> Result<String, FetchError> {
        match self.policy {
            NamingPolicy::Simple => {
                let filename = naming::url_basename(&reference.url);
                self.fetcher
                    .fetch(&reference.url, &image_dir.join(&filename))
                    .await?;
                Ok(filename)
            }
            NamingPolicy::Enhanced => {
                // The name may depend on the Content-Type, so look at the
                // response before creating the file
                let download = self.fetcher.get(&reference.url).await?;
                let content_type = if self.sniff_content_type {
                    download.content_type()
                } else {
                    None
                };
                let extension = naming::image_extension(&reference.url, content_type);
                let filename = naming::enhanced_name(&document.stem(), reference.index, extension);
                download.save_to(&image_dir.join(&filename)).await?;
                Ok(filename)
            }
        }
    }
}

// The path written into the document. Always '/'-separated, so the Markdown
// looks the same no matter which OS rewrote it.
fn local_reference(image_prefix: &str, filename: &str) -> String {
    let prefix = image_prefix.replace('\\', "/");
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{}/{}", prefix, filename)
    }
}

// Rebuilds `text`, replacing only the URL spans of references that resolved
fn replace_spans(
    text: &str,
    references: &[ImageReference],
    resolved: &HashMap<&str, String>,
) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;

    for reference in references {
        if let Some(local) = resolved.get(reference.url.as_str()) {
            out.push_str(&text[last..reference.span.start]);
            out.push_str(local);
            last = reference.span.end;
        }
    }

    out.push_str(&text[last..]);
    out
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why HashSet<&str> and not HashSet<String>?
//    - The URLs already live in `references`, which outlives the loop
//    - Borrowing them avoids copying every URL
//
// 2. Literal vs spans replacement
//    - Literal: String::replace swaps the URL everywhere, even in plain text
//      like "source: https://example.com/a.png"
//    - Spans: only the bytes between ( and ) of each matched reference change
//
// 3. Why is `continue` used so much?
//    - Each early `continue` is one reason to leave a reference alone
//    - Keeps the "happy path" at the bottom of the loop, not nested deep inside
// -----------------------------------------------------------------------------
