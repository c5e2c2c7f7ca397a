use std::str::FromStr;

use http::{HeaderName, HeaderValue, Uri};

use crate::util::IterExt as _;
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `Referer` header, defined in
/// [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.5.2)
///
/// The `Referer` \[sic\] header field allows the user agent to specify a
/// URI reference for the resource from which the target URI was obtained
/// (i.e., the "referrer", though the field name is misspelled).
///
/// # ABNF
///
/// ```text
/// Referer = absolute-URI / partial-URI
/// ```
///
/// # Example values
///
/// * `http://www.example.org/hypertext/Overview.html`
///
/// # Examples
///
/// ```
/// use http_buildr_headers::Referer;
///
/// let r = "/People.html#tim".parse::<Referer>().unwrap();
/// assert_eq!(r.uri().path(), "/People.html");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Referer(Uri);

/// Error returned for a string which is not a valid URI reference.
#[derive(Debug, thiserror::Error)]
#[error("invalid referer uri")]
pub struct InvalidReferer(#[source] http::uri::InvalidUri);

impl Referer {
    #[must_use]
    pub fn new(uri: Uri) -> Self {
        Self(uri)
    }

    /// The referring URI.
    #[must_use]
    pub fn uri(&self) -> &Uri {
        &self.0
    }
}

impl From<Uri> for Referer {
    fn from(uri: Uri) -> Self {
        Self(uri)
    }
}

impl FromStr for Referer {
    type Err = InvalidReferer;

    fn from_str(src: &str) -> Result<Self, Self::Err> {
        src.parse().map(Self).map_err(InvalidReferer)
    }
}

impl TypedHeader for Referer {
    fn name() -> &'static HeaderName {
        &::http::header::REFERER
    }
}

impl HeaderDecode for Referer {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let value = values.just_one().ok_or_else(Error::invalid)?;
        Uri::try_from(value.as_bytes())
            .map(Self)
            .map_err(Error::invalid_from)
    }
}

impl HeaderEncode for Referer {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match HeaderValue::try_from(self.0.to_string()) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!(uri = %self.0, "failed to encode referer as header value: {err}");
            }
        }
    }
}
