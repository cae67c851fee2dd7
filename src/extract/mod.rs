// src/extract/mod.rs
// =============================================================================
// This module finds image references inside Markdown text.
//
// Submodules:
// - markdown: Matches the ![alt](url) pattern and records where each URL sits
//
// Only one syntax is recognized on purpose. Reference-style images, HTML <img>
// tags and autolinks are left alone.
// =============================================================================

mod markdown;

pub use markdown::{extract_image_references, ImageReference};
