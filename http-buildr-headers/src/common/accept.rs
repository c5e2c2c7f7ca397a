use std::fmt;

use http::{HeaderName, HeaderValue};
use mime::Mime;

use crate::specifier::QualityValue;
use crate::util::{self, csv};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `Accept` header, defined in [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.3.2)
///
/// The `Accept` header field can be used by user agents to specify
/// response media types that are acceptable.  Accept header fields can
/// be used to indicate that the request is specifically limited to a
/// small set of desired types, as in the case of a request for an
/// in-line image
///
/// # ABNF
///
/// ```text
/// Accept = #( media-range [ accept-params ] )
///
/// media-range    = ( "*/*"
///                  / ( type "/" "*" )
///                  / ( type "/" subtype )
///                  ) *( OWS ";" OWS parameter )
/// accept-params  = weight *( accept-ext )
/// accept-ext = OWS ";" OWS token [ "=" ( token / quoted-string ) ]
/// ```
///
/// # Example values
/// * `audio/*; q=0.2, audio/basic`
/// * `text/plain; q=0.5, text/html, text/x-dvi; q=0.8, text/x-c`
///
/// # Examples
/// ```
/// use http_buildr_headers::{Accept, HeaderMapExt, specifier::{Quality, QualityValue}};
///
/// let mut headers = http::HeaderMap::new();
///
/// headers.typed_insert(
///     Accept::new(QualityValue::new_value(mime::TEXT_HTML))
///         .with_value(QualityValue::new(mime::STAR_STAR, Quality::from_thousandths(800))),
/// );
/// assert_eq!(headers["accept"], "text/html, */*; q=0.8");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accept(Vec<QualityValue<Mime>>);

impl Accept {
    /// Create an [`Accept`] header with a single media range.
    #[must_use]
    pub fn new(value: QualityValue<Mime>) -> Self {
        Self(vec![value])
    }

    #[inline(always)]
    #[must_use]
    pub fn new_from_mime(mime: Mime) -> Self {
        Self::new(QualityValue::new_value(mime))
    }

    /// A constructor to easily create `Accept: */*`.
    #[must_use]
    #[inline(always)]
    pub fn star() -> Self {
        Self::new_from_mime(mime::STAR_STAR)
    }

    /// A constructor to easily create `Accept: application/json`.
    #[must_use]
    #[inline(always)]
    pub fn json() -> Self {
        Self::new_from_mime(mime::APPLICATION_JSON)
    }

    /// Append a media range to this header.
    #[must_use]
    pub fn with_value(mut self, value: QualityValue<Mime>) -> Self {
        self.0.push(value);
        self
    }

    /// The media ranges in the order they were given.
    pub fn values(&self) -> &[QualityValue<Mime>] {
        &self.0
    }

    /// Iterate over the media ranges in the order they were given.
    pub fn iter(&self) -> impl Iterator<Item = &QualityValue<Mime>> {
        self.0.iter()
    }
}

impl TypedHeader for Accept {
    fn name() -> &'static HeaderName {
        &::http::header::ACCEPT
    }
}

impl HeaderDecode for Accept {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let values: Vec<QualityValue<Mime>> = csv::from_comma_delimited(values)?;
        if values.is_empty() {
            return Err(Error::invalid());
        }
        Ok(Self(values))
    }
}

impl HeaderEncode for Accept {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match util::fmt(Fmt(self)) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!("failed to encode accept media ranges as header value: {err}");
            }
        }
    }
}

struct Fmt<'a>(&'a Accept);

impl fmt::Display for Fmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        csv::fmt_comma_delimited(f, self.0.0.iter())
    }
}
