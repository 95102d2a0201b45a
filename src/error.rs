//! Unified error type for removebg.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while removing a background.
#[derive(Debug, Error)]
pub enum RemoveBgError {
    /// The input image does not exist. Raised before any network activity.
    #[error("Input file {} not found", path.display())]
    NotFound {
        /// The missing input path.
        path: PathBuf,
    },

    /// No usable API key was configured.
    #[error("API key is required. Set {env_var} or add it to the config file.")]
    MissingApiKey {
        /// The environment variable consulted first.
        env_var: String,
    },

    /// The remote service answered with something other than 200.
    #[error("remove.bg rejected the request ({status}): {body}")]
    RemoteRejected {
        /// HTTP status code.
        status: u16,
        /// Response body text.
        body: String,
    },

    /// The request did not complete within the client-side timeout.
    #[error("Request timed out after {timeout:?}")]
    Timeout {
        /// The configured client-side timeout.
        timeout: Duration,
    },

    /// A transport-level failure (connection, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// A local I/O failure reading the input or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A recorded payload could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// An error recorded in a replayed cassette.
    #[error("{0}")]
    Replayed(String),
}
