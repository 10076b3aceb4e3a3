//! Error types for the YouTube Data API client.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong with one API request.
///
/// A query that succeeds but matches nothing is *not* represented here: the
/// client operations return `Ok(None)` for that, so callers can tell "not
/// found" from a broken transport or a corrupt document by matching.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Connect, write, or read failure on the underlying transport.
    ///
    /// A read that stalls past the configured timeout surfaces here with
    /// [`std::io::ErrorKind::TimedOut`]. The client never retries; retry
    /// policy belongs to the embedding application.
    #[error("transport error: {0}")]
    Transport(#[from] std::io::Error),

    /// The API answered with a non-2xx status code.
    #[error("YouTube API responded with status {code}")]
    Status {
        /// The raw code from the response's status line.
        code: u16,
    },

    /// The response's header block could not be understood.
    #[error("malformed HTTP response: {reason}")]
    MalformedResponse { reason: String },

    /// The supplied API key exceeds the fixed credential bound.
    #[error("API key is {len} bytes, limit is {max}")]
    KeyTooLong { len: usize, max: usize },

    /// The composed request path would exceed the fixed path bound.
    #[error("request path would be {len} bytes, limit is {max}")]
    RequestTooLong { len: usize, max: usize },

    /// The response body was present but is not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A well-formed document carried a text field that violates its fixed
    /// format.
    #[error(transparent)]
    Field(#[from] FieldError),
}

/// Failure modes of the fixed-format field parsers in [`crate::fields`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum FieldError {
    /// The token does not have the rigid `YYYY-MM-DDTHH:MM:SSZ` shape.
    #[error("timestamp {text:?} is not of the form YYYY-MM-DDTHH:MM:SSZ")]
    Timestamp { text: String },

    /// The token has the right shape, but a component is out of range.
    #[error("timestamp {text:?} has an out-of-range {component}")]
    TimestampRange {
        text: String,
        component: &'static str,
    },

    /// The token is not an ISO 8601 `PT#H#M#S` duration.
    #[error("duration {text:?} is not an ISO 8601 PT#H#M#S duration")]
    Duration { text: String },

    /// A counter the API encodes as a JSON string is not a decimal number.
    #[error("counter {text:?} is not an unsigned decimal count")]
    Counter { text: String },
}
