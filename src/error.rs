//! Failure taxonomy for streamed exchanges.
//!
//! Only fatal conditions become errors: a rejected status line or a broken
//! transport. Malformed individual records are skipped inside the decode
//! loop, and caller-initiated cancellation is an outcome, not an error.

use thiserror::Error;

/// A fatal stream failure, delivered to `StreamHandler::on_error` at most
/// once per exchange.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The server rejected the request with a non-2xx status.
    #[error("server returned {status}: {message}")]
    Status {
        status: u16,
        /// Response body text, as far as it could be read.
        message: String,
    },

    /// The request could not be sent or the body stream broke mid-read.
    #[error("transport failure: {0}")]
    Http(#[from] reqwest::Error),

    /// The request body could not be serialized; nothing was sent.
    #[error("failed to encode request body: {0}")]
    Encode(#[from] serde_json::Error),
}

impl StreamError {
    /// HTTP status code, when the failure carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            StreamError::Status { status, .. } => Some(*status),
            StreamError::Http(err) => err.status().map(|s| s.as_u16()),
            StreamError::Encode(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = StreamError::Status {
            status: 503,
            message: "overloaded".to_string(),
        };
        assert_eq!(err.to_string(), "server returned 503: overloaded");
        assert_eq!(err.status(), Some(503));
    }
}
