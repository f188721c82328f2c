//! Error type for the MinuteDock client.
//!
//! Non-2xx responses land in `Http` with the raw status code and body; the
//! client never retries and never panics, the embedding application decides
//! what a failed call means.

use thiserror::Error;

/// Errors returned by every fallible client operation.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A request was built without an endpoint path.
    #[error("request path must be provided")]
    MissingPath,

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },

    /// The request never produced a response (connect, DNS, IO).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The request payload could not be encoded to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be decoded into the expected record type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),
}
