use http::HeaderName;
use http::header::{InvalidHeaderName, InvalidHeaderValue};
use http::uri::InvalidUri;
use http_buildr_headers::specifier::InvalidQuality;
use http_buildr_headers::{InvalidCredentials, InvalidRange};

/// The error returned when a request cannot be originated,
/// or one of its headers cannot be composed.
///
/// A request is never modified by a call which fails.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum BuildError {
    /// A target or referrer which is not a valid URI.
    #[error("invalid uri {input:?}")]
    InvalidUri {
        input: String,
        #[source]
        source: InvalidUri,
    },
    #[error("invalid header name")]
    InvalidHeaderName {
        #[from]
        source: InvalidHeaderName,
    },
    #[error("invalid header value")]
    InvalidHeaderValue {
        #[from]
        source: InvalidHeaderValue,
    },
    #[error(transparent)]
    InvalidCredentials(#[from] InvalidCredentials),
    /// A media type which could not be parsed,
    /// or which carries its own `q` parameter.
    #[error("invalid media type {input:?}")]
    InvalidMediaType {
        input: String,
        #[source]
        source: Option<mime::FromStrError>,
    },
    #[error(transparent)]
    InvalidQuality(#[from] InvalidQuality),
    #[error(transparent)]
    InvalidRange(#[from] InvalidRange),
    /// A custom header was given no values at all.
    #[error("no values given for header {name}")]
    MissingHeaderValues { name: HeaderName },
}
