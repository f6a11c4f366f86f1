//! HTTP clients for the order service.
//!
//! Gated behind the `client` cargo feature so downstream crates that
//! only need the shared types do not pull in `reqwest`.

mod orders;
mod sse;
mod stream;

pub use orders::OrderClient;
pub use sse::SseDecoder;
pub use stream::NotificationStream;

pub use reqwest::StatusCode;

/// Failure of a status read.
///
/// Every variant is transient from the pipeline's point of view: the
/// poller drops the tick and retries on the next one, so none of these
/// are ever surfaced to the user.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server returned a non-2xx status code.
    #[error("status endpoint returned {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// Failure of a status update or a location report.
///
/// Distinct from [`FetchError`]: a rejected write is user-visible and
/// surfaced as a notification, while read failures stay in the logs.
#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// Transport-level failure (DNS, TLS, connection reset, …).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server rejected the update.
    #[error("update rejected with {status}: {body}")]
    Rejected { status: StatusCode, body: String },

    /// Response body could not be deserialized.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),

    /// No CSRF token was available from the page context.
    #[error("csrf token unavailable")]
    MissingCsrfToken,
}

/// Failure of the notification stream.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// Transport failure while connecting or reading the stream.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The stream endpoint refused the subscription.
    #[error("stream endpoint returned {status}")]
    Refused { status: StatusCode },

    /// A frame carried a payload that does not decode to a notification.
    /// The frame is dropped; the subscription stays open.
    #[error("undecodable stream payload {payload:?}: {source}")]
    Decode {
        payload: String,
        source: serde_json::Error,
    },

    /// The base URL could not be joined with the endpoint path.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}
