//! Error types for the handle client.
//!
//! # Design
//! Non-2xx responses are not errors here: the server's verdict is returned
//! to the caller inside `HttpResponse`. `ClientError` only covers failures
//! that prevent a request from being sent or a response from being read,
//! plus configuration problems at construction time.

/// Errors returned by `HandleClient` operations and constructors.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The transport failed before a complete response was received
    /// (connection refused, TLS verification, I/O).
    #[error("HTTP transport failed: {0}")]
    Transport(#[from] ureq::Error),

    /// The handle document could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A configuration key is missing or has an unusable value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// `upsert` was called with a document that has no handle.
    #[error("handle document has no handle")]
    MissingHandle,
}

pub type Result<T> = std::result::Result<T, ClientError>;
