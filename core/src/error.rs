//! Error types for the RajaOngkir client.
//!
//! # Design
//! Each variant marks the stage a call failed at: building the request,
//! moving bytes over the wire, reading the body, decoding JSON, or the API
//! itself reporting a failure through the envelope status. Payloads are
//! plain strings so custom `Transport` implementations can construct them.

use thiserror::Error;

/// Errors returned by `Client` operations.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The method token or request parts were rejected before sending.
    #[error("invalid request: {0}")]
    RequestConstructionError(String),

    /// The request could not be delivered (connection, TLS, timeout).
    #[error("transport failed: {0}")]
    TransportError(String),

    /// The response body stream failed mid-read.
    #[error("failed to read response body: {0}")]
    ReadError(String),

    /// The response body is not a valid envelope.
    #[error("failed to decode response: {0}")]
    DecodeError(String),

    /// The envelope status code fell outside `200..300`.
    #[error("{description}")]
    ApiError { code: i64, description: String },

    /// A cost lookup succeeded but listed no carrier entries.
    #[error("cost lookup returned no carrier entries")]
    EmptyResultError,
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::DecodeError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_description_only() {
        let err = ClientError::ApiError {
            code: 400,
            description: "Invalid key.".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid key.");
    }

    #[test]
    fn serde_errors_become_decode_errors() {
        let err: ClientError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, ClientError::DecodeError(_)));
    }
}
