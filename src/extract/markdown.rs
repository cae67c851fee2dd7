// src/extract/markdown.rs
// =============================================================================
// This module extracts image references from Markdown text.
//
// We do NOT use a full Markdown parser here. A reference is any textual match
// of the pattern:
//
//     ![<anything up to the first ]>](<anything up to the first )>)
//
// so an image inside a code block is found too, and the captured URL is never
// validated. That keeps the matching predictable: what you see in the file is
// what gets rewritten.
//
// Rust concepts:
// - LazyLock: Compile the regex once, the first time it's used
// - Ranges: Remember the byte position of each URL in the text
// - Iterators: enumerate() gives every match its ordinal
// =============================================================================

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

// `.` does not match a newline, so a reference never spans two lines.
static IMAGE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"!\[.*?\]\((.+?)\)").expect("image reference pattern is valid")
});

/// One `![alt](url)` occurrence in a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageReference {
    /// Ordinal of this match among all matches in the document (0-based)
    pub index: usize,
    /// The raw captured target, exactly as written
    pub url: String,
    /// Byte range of `url` inside the document text
    pub span: Range<usize>,
}

// Extracts every image reference from Markdown text, in document order
//
// Parameters:
//   text: the document content (borrowed, never modified)
//
// Returns: Vec<ImageReference>, first occurrence first
//
// Example input:
//   "Logo: ![logo](https://example.com/logo.png)"
//
// Example output:
//   [ImageReference { index: 0, url: "https://example.com/logo.png", span: 14..42 }]
pub fn extract_image_references(text: &str) -> Vec<ImageReference> {
    IMAGE_PATTERN
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .enumerate()
        .map(|(index, capture)| ImageReference {
            index,
            url: capture.as_str().to_string(),
            span: capture.range(),
        })
        .collect()
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why a regex instead of pulldown-cmark?
//    - A Markdown parser would resolve escapes and skip code blocks
//    - We want a plain textual match so the URL we replace is byte-for-byte
//      the URL that's in the file
//
// 2. What does .*? mean?
//    - The ? makes the match "non-greedy" (as short as possible)
//    - So ![a](x) ![b](y) gives two matches instead of one giant one
//
// 3. What is capture.range()?
//    - The start..end byte offsets of group 1 (the URL) in the text
//    - We keep it so a rewrite can touch only the URL and nothing else
// -----------------------------------------------------------------------------
