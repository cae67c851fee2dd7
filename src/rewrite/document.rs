// src/rewrite/document.rs
// =============================================================================
// A Markdown file loaded into memory.
// =============================================================================

use std::path::{Path, PathBuf};

/// A Markdown file and its text.
///
/// Loaded once per visit, rewritten in memory, then either written back or
/// thrown away.
#[derive(Debug, Clone)]
pub struct Document {
    pub path: PathBuf,
    pub content: String,
}

impl Document {
    pub fn new(path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            content: content.into(),
        }
    }

    pub async fn load(path: &Path) -> std::io::Result<Self> {
        let content = tokio::fs::read_to_string(path).await?;
        Ok(Self::new(path, content))
    }

    /// File name without its extension ("docs/intro.md" -> "intro").
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}
