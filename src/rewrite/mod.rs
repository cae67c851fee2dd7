// src/rewrite/mod.rs
// =============================================================================
// This module turns remote image references into local ones.
//
// Submodules:
// - document: A Markdown file loaded into memory
// - naming: Picks the local file name for a downloaded image
// - engine: Walks the references of one document, downloads, and rewrites
//
// Nothing here touches the document on disk. The engine only returns the new
// text; the driver decides whether to write it back.
// =============================================================================

mod document;
mod engine;
mod naming;

pub use document::Document;
pub use engine::{RewriteEngine, RewriteOutcome};
