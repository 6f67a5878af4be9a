//! Content API error types.

use thiserror::Error;

/// Errors from talking to the MediaWiki API.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to build HTTP client")]
    Build(#[source] reqwest::Error),

    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("malformed response from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("API error [{code}]: {info}")]
    Api { code: String, info: String },
}
