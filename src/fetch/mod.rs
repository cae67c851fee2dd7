// src/fetch/mod.rs
// =============================================================================
// This module downloads images over HTTP.
//
// Submodules:
// - http: The Fetcher (GET request, status check, streaming to disk)
// - error: FetchError, the ways a single download can fail
//
// A failed download is never fatal: the caller logs it and moves on to the
// next image reference.
// =============================================================================

mod error;
mod http;

pub use error::FetchError;
pub use http::{Fetcher, DEFAULT_USER_AGENT};
