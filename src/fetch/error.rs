// src/fetch/error.rs
// =============================================================================
// Errors for a single image download.
//
// We use `thiserror` here instead of `anyhow` because the caller sometimes
// wants to know WHICH thing went wrong (the server said no vs. the network
// broke vs. the disk refused the file).
// =============================================================================

use reqwest::StatusCode;
use std::path::PathBuf;
use thiserror::Error;

/// Why a download did not produce a file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Connecting, sending, or reading the body failed (also covers URLs
    /// reqwest can't make sense of, like relative paths).
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with anything other than 200 OK.
    #[error("unexpected HTTP status {0}")]
    Status(StatusCode),

    /// The image file could not be created or written.
    #[error("could not write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FetchError::Io {
            path: path.into(),
            source,
        }
    }
}
