use std::fmt;
use std::str::FromStr;

use http::{HeaderName, HeaderValue};

use crate::util::{self, csv};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `Transfer-Encoding` header, defined in
/// [RFC7230](https://datatracker.ietf.org/doc/html/rfc7230#section-3.3.1)
///
/// The `Transfer-Encoding` header field lists the transfer coding names
/// corresponding to the sequence of transfer codings that have been (or
/// will be) applied to the payload body in order to form the message
/// body.
///
/// `chunked`, when present, is the final coding.
///
/// # ABNF
///
/// ```text
/// Transfer-Encoding = 1#transfer-coding
/// ```
///
/// # Example values
///
/// * `chunked`
/// * `gzip, chunked`
///
/// # Example
///
/// ```
/// use http_buildr_headers::TransferEncoding;
///
/// let transfer = TransferEncoding::chunked();
/// assert!(transfer.is_chunked());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TransferEncoding(Vec<TransferCoding>);

/// A single transfer coding, compared case-insensitively.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TransferCoding {
    Chunked,
    Compress,
    Deflate,
    /// `gzip`, also parsed from its `x-gzip` alias.
    Gzip,
    /// Any other coding, kept lowercased.
    Other(String),
}

impl TransferCoding {
    fn as_str(&self) -> &str {
        match self {
            Self::Chunked => "chunked",
            Self::Compress => "compress",
            Self::Deflate => "deflate",
            Self::Gzip => "gzip",
            Self::Other(s) => s,
        }
    }
}

impl fmt::Display for TransferCoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransferCoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || HeaderValue::from_str(s).is_err() {
            return Err(Error::invalid());
        }
        Ok(match s.to_ascii_lowercase().as_str() {
            "chunked" => Self::Chunked,
            "compress" => Self::Compress,
            "deflate" => Self::Deflate,
            "gzip" | "x-gzip" => Self::Gzip,
            other => Self::Other(other.to_owned()),
        })
    }
}

impl TransferEncoding {
    /// Constructor for the most common Transfer-Encoding, `chunked`.
    #[must_use]
    pub fn chunked() -> Self {
        Self(vec![TransferCoding::Chunked])
    }

    /// Returns whether this ends with the `chunked` encoding.
    #[must_use]
    pub fn is_chunked(&self) -> bool {
        self.0.last() == Some(&TransferCoding::Chunked)
    }

    /// Mark the encoding as `chunked`.
    ///
    /// `chunked` is always the final coding, so an existing `chunked`
    /// is moved to the end.
    #[must_use]
    pub fn with_chunked(mut self) -> Self {
        self.0.retain(|coding| *coding != TransferCoding::Chunked);
        self.0.push(TransferCoding::Chunked);
        self
    }

    /// Remove the `chunked` encoding.
    ///
    /// Returns `None` if no coding remains.
    #[must_use]
    pub fn without_chunked(mut self) -> Option<Self> {
        self.0.retain(|coding| *coding != TransferCoding::Chunked);
        (!self.0.is_empty()).then_some(self)
    }

    /// Iterate over the codings, in the order they were applied.
    pub fn iter(&self) -> impl Iterator<Item = &TransferCoding> {
        self.0.iter()
    }
}

impl TypedHeader for TransferEncoding {
    fn name() -> &'static HeaderName {
        &::http::header::TRANSFER_ENCODING
    }
}

impl HeaderDecode for TransferEncoding {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let codings: Vec<TransferCoding> = csv::from_comma_delimited(values)?;
        if codings.is_empty() {
            return Err(Error::invalid());
        }
        Ok(Self(codings))
    }
}

impl HeaderEncode for TransferEncoding {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match util::fmt(Fmt(self)) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!("failed to encode transfer codings as header value: {err}");
            }
        }
    }
}

struct Fmt<'a>(&'a TransferEncoding);

impl fmt::Display for Fmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        csv::fmt_comma_delimited(f, self.0.0.iter())
    }
}
