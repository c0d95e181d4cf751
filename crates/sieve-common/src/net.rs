//! HTTP fetch utilities.
//!
//! Provides the blocking HTTP GET wrapper the command-line tool uses to load
//! documents given by URL. The extraction core never touches the network.
use std::time::Duration;

use thiserror::Error;

/// User-Agent header sent with all requests.
///
/// Mimics a common desktop browser to avoid basic bot detection.
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Default request timeout.
const TIMEOUT: Duration = Duration::from_secs(30);

/// Failure to load a document over HTTP.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    /// The request could not be sent or no response arrived.
    #[error("request to {url} failed: {source}")]
    Request {
        /// The URL that was requested.
        url: String,
        /// Underlying transport error.
        #[source]
        source: reqwest::Error,
    },
    /// The server answered with a non-success status.
    #[error("HTTP error {status} for {url}")]
    Status {
        /// The URL that was requested.
        url: String,
        /// Status code returned by the server.
        status: reqwest::StatusCode,
    },
    /// The response body could not be read.
    #[error("failed to read response body: {0}")]
    Body(#[source] reqwest::Error),
}

/// Whether `location` should be fetched over the network rather than read from disk.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Fetch a URL and return its body as raw bytes.
///
/// The bytes are returned undecoded so that the caller can sniff the
/// document's declared charset first.
///
/// # Errors
///
/// Returns a [`FetchError`] if the HTTP client cannot be created, the request
/// fails, the response has a non-success status, or the body cannot be read.
pub fn fetch_bytes(url: &str) -> Result<Vec<u8>, FetchError> {
    let client = reqwest::blocking::Client::builder()
        .timeout(TIMEOUT)
        .build()
        .map_err(FetchError::Client)?;

    let response = client
        .get(url)
        .header("User-Agent", USER_AGENT)
        .send()
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }

    response
        .bytes()
        .map(|b| b.to_vec())
        .map_err(FetchError::Body)
}
