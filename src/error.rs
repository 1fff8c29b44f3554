// Error types shared by the API client and the credential store.
//
// A `ClientError` means the request did not succeed against the server.
// A `CredentialsError` means something is wrong with the local setup.

use std::path::PathBuf;
use thiserror::Error;

/// Failures from a single API round-trip.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Connection refused, DNS failure, timeout, TLS, ...
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a status other than 200. `message` is the
    /// `error` field of the response envelope, or empty if the body
    /// could not be decoded.
    #[error("error ({status}): {message}")]
    Api { status: u16, message: String },

    /// A 200 response whose body did not match the expected shape.
    #[error("error decoding response: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("error encoding request body: {0}")]
    Encode(#[source] serde_json::Error),

    /// A bearer endpoint was called without a token.
    #[error("a valid token must be provided either via the credentials file or HBD_TOKEN")]
    MissingToken,

    #[error("invalid value for header {0}")]
    InvalidHeader(&'static str),
}

impl ClientError {
    /// The server-supplied message of an API error, if this is one.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}

/// Failures reading or writing the local credentials file.
#[derive(Error, Debug)]
pub enum CredentialsError {
    #[error("credentials file not found at {}", .0.display())]
    NotFound(PathBuf),

    #[error("cannot access credentials file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed credentials file {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Input that is missing or inconsistent, caught before any network call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct UsageError(pub String);

impl UsageError {
    pub fn new(msg: impl Into<String>) -> Self {
        UsageError(msg.into())
    }
}
