// src/fetch/http.rs
// =============================================================================
// This module downloads a single image and saves it to disk.
//
// Key functionality:
// - Sends a GET request with a browser-like User-Agent
//   (some image hosts reject the default client identifier)
// - Only 200 OK counts as success, anything else is an error
// - Streams the body to the destination file chunk by chunk
// - Leaves nothing on disk when the download fails
//
// The download is split into two steps, get() and save_to(), so the caller
// can look at the Content-Type header before deciding on a file name.
//
// Rust concepts:
// - async/await: For network and file I/O
// - Streams: The response body arrives as a stream of byte chunks
// - cfg(unix): Platform-specific code (file permission bits)
// =============================================================================

use super::FetchError;
use futures::StreamExt; // StreamExt gives us .next() on the body stream
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Response, StatusCode};
use std::path::Path;
use std::time::Duration;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;

/// User-Agent sent with every request unless overridden on the command line.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

#[cfg(unix)]
const IMAGE_FILE_MODE: u32 = 0o644;

/// Downloads images with one shared HTTP client.
///
/// The client is built once and reused for every request (connection pooling).
pub struct Fetcher {
    client: Client,
}

/// A response that passed the status check but whose body hasn't been read yet.
pub struct Download {
    response: Response,
}

impl Fetcher {
    // Creates a Fetcher
    //
    // Parameters:
    //   user_agent: value for the User-Agent header
    //   timeout: optional per-request timeout; None keeps the transport default
    //            (which means a hung host stalls the run on that one image)
    pub fn new(user_agent: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }

    // Sends the GET request and checks the status
    //
    // On a non-200 status the response is dropped here, so the body is
    // never read and no file is created.
    pub async fn get(&self, url: &str) -> Result<Download, FetchError> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status));
        }

        Ok(Download { response })
    }

    // Downloads `url` into `dest`, overwriting whatever is there
    //
    // Returns: number of bytes written
    pub async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, FetchError> {
        self.get(url).await?.save_to(dest).await
    }
}

impl Download {
    /// The `Content-Type` header, if the server sent a readable one.
    pub fn content_type(&self) -> Option<&str> {
        self.response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
    }

    // Streams the body into a freshly created (or truncated) file at `dest`
    //
    // If anything goes wrong halfway, the partial file is removed again.
    pub async fn save_to(self, dest: &Path) -> Result<u64, FetchError> {
        let mut file = create_image_file(dest)
            .await
            .map_err(|e| FetchError::io(dest, e))?;

        let result = stream_body(self.response, &mut file, dest).await;
        drop(file);

        if result.is_err() {
            if let Err(e) = tokio::fs::remove_file(dest).await {
                tracing::debug!("could not remove partial file {}: {}", dest.display(), e);
            }
        }

        result
    }
}

async fn stream_body(response: Response, file: &mut File, dest: &Path) -> Result<u64, FetchError> {
    let mut body = response.bytes_stream();
    let mut written = 0u64;

    while let Some(chunk) = body.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| FetchError::io(dest, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| FetchError::io(dest, e))?;
    Ok(written)
}

async fn create_image_file(dest: &Path) -> std::io::Result<File> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    options.mode(IMAGE_FILE_MODE);
    options.open(dest).await
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why bytes_stream() instead of bytes()?
//    - bytes() loads the whole image into memory first
//    - bytes_stream() hands us chunks as they arrive from the network
//    - We write each chunk straight to disk
//
// 2. Why does save_to() take `self` (not `&self`)?
//    - Reading the body consumes the response
//    - Taking ownership means a Download can only be saved once
//
// 3. What is drop(file)?
//    - Closes the file handle right now instead of at the end of the function
//    - We want it closed before we try to delete the partial file
//
// 4. What does #[cfg(unix)] do?
//    - The line below it only exists when compiling for Unix-like systems
//    - File permission bits (0o644 = rw-r--r--) are a Unix concept
// -----------------------------------------------------------------------------
