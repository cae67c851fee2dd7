// src/walk/files.rs
// =============================================================================
// This module collects the markup files under a directory.
//
// How it works:
// 1. walkdir visits the tree depth-first, entries sorted by file name
// 2. Symlinks are reported as symlinks, never followed
// 3. Regular files with the right extension go into the result
// 4. Anything walkdir can't read is logged and skipped
//
// Rust concepts:
// - Iterators: WalkDir is an iterator of Result<DirEntry, Error>
// - OsStr: File names aren't guaranteed to be UTF-8
// =============================================================================

use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::WalkDir;

// Collects every regular file under `root` whose extension is `extension`
//
// Parameters:
//   root: directory to walk (a single file is also accepted)
//   extension: file extension without the dot, e.g. "md"
//
// Returns: matching file paths in walk order
pub fn markup_files(root: &Path, extension: &str) -> Vec<PathBuf> {
    let mut results = Vec::new();

    let walker = WalkDir::new(root).follow_links(false).sort_by_file_name();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("skipping unreadable path: {}", e);
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            results.push(entry.into_path());
        }
    }

    results
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension().is_some_and(|ext| ext == extension)
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why sort_by_file_name()?
//    - The filesystem returns directory entries in no particular order
//    - Sorting makes every run (and every test) process files in the same order
//
// 2. Why follow_links(false)?
//    - A symlink pointing back up the tree would make the walk loop forever
//    - With it off, a symlink is neither a file nor a directory to us, so it's skipped
//
// 3. What is is_some_and?
//    - Option::is_some_and(f) = "is there a value AND does f say yes?"
//    - ext == extension compares an &OsStr with a &str directly
// -----------------------------------------------------------------------------
