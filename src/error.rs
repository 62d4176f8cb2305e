//! Error types.
//!
//! Fetch errors are recoverable and end up as a printed verdict. The
//! [`Error`] enum covers what can go wrong while setting the run up
//! (opening the cache, building the HTTP client, reading stdin).

use thiserror::Error;

/// The ways fetching a page can fail.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The server answered with an HTTP error status (404 most of the time).
    #[error("{url} answered with HTTP status {status}")]
    NotFound { url: String, status: u16 },
    /// The request never got a proper answer: DNS, connection, invalid URL
    /// or unreadable body.
    #[error("unable to fetch {url}: {reason}")]
    Transport { url: String, reason: String },
}

/// Errors aborting the whole run.
#[derive(Debug, Error)]
pub enum Error {
    #[error("cache error: {0}")]
    Store(#[from] rusqlite::Error),
    #[error("invalid regex: {0}")]
    Regex(#[from] regex::Error),
    #[error("unable to build the HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
