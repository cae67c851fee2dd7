// src/walk/mod.rs
// =============================================================================
// This module finds the Markdown files under the root directory.
//
// Features:
// - Depth-first walk with the walkdir crate
// - Deterministic order (entries sorted by name inside each directory)
// - Symlinks are not followed, so a link loop can't trap the walk
// - Unreadable directories are logged and skipped
// =============================================================================

mod files;

pub use files::markup_files;
