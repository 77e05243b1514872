use thiserror::Error;

use crate::path::PathError;

/// Errors from [`Geocoder`](super::Geocoder) and
/// [`VenueSource`](super::VenueSource) implementations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeoSourceError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL, without credentials.
        url: String,
        /// Timeout that elapsed, in seconds.
        timeout_secs: u64,
    },
    /// The connection failed before a response arrived.
    #[error("request to {url} failed: {message}")]
    Network {
        /// Requested URL, without credentials.
        url: String,
        /// Transport error description.
        message: String,
    },
    /// The service answered with a non-success HTTP status.
    #[error("request to {url} returned HTTP {status}: {message}")]
    Http {
        /// Requested URL, without credentials.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error description.
        message: String,
    },
    /// The response body was not valid JSON.
    #[error("failed to parse response: {message}")]
    Parse {
        /// Decoder error description.
        message: String,
    },
    /// The response was JSON but lacked an expected member.
    #[error("unexpected response shape: {0}")]
    Response(#[from] PathError),
    /// The service reported an application-level error.
    #[error("service error {code}: {message}")]
    Service {
        /// Service-specific error code.
        code: String,
        /// Error description.
        message: String,
    },
}
