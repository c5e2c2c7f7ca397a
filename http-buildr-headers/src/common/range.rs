use std::fmt;

use http::{HeaderName, HeaderValue};

use crate::util::{self, IterExt as _};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

const BYTES_UNIT: &str = "bytes";

/// `Range` header, defined in [RFC7233](https://datatracker.ietf.org/doc/html/rfc7233#section-3.1)
///
/// The "Range" header field on a GET request modifies the method
/// semantics to request transfer of only one or more subranges of the
/// selected representation data, rather than the entire selected
/// representation data.
///
/// Only the `bytes` range unit is supported.
///
/// # ABNF
///
/// ```text
/// Range = byte-ranges-specifier / other-ranges-specifier
/// other-ranges-specifier = other-range-unit "=" other-range-set
/// other-range-set = 1*VCHAR
///
/// bytes-unit = "bytes"
///
/// byte-ranges-specifier = bytes-unit "=" byte-range-set
/// byte-range-set = 1#(byte-range-spec / suffix-byte-range-spec)
/// byte-range-spec = first-byte-pos "-" [last-byte-pos]
/// first-byte-pos = 1*DIGIT
/// last-byte-pos = 1*DIGIT
/// ```
///
/// # Example values
///
/// * `bytes=1000-`
/// * `bytes=-2000`
/// * `bytes=0-1,30-40`
/// * `bytes=0-10,20-90,-100`
///
/// # Examples
///
/// ```
/// use http_buildr_headers::Range;
///
/// let range = Range::bytes(0, 1234).unwrap();
/// assert_eq!(range.to_string(), "bytes=0-1234");
///
/// assert!(Range::bytes(50, 20).is_err());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Range(Vec<ByteRangeSpec>);

/// A single `byte-range-spec` of a [`Range`] header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ByteRangeSpec {
    /// `first-last`, both positions inclusive.
    FromTo(u64, u64),
    /// `first-`, from a position until the end.
    From(u64),
    /// `-length`, the final bytes of the representation.
    Last(u64),
}

/// Error returned for a byte range whose last position
/// precedes its first position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid byte range: last position precedes first position")]
pub struct InvalidRange;

impl Range {
    /// Get the bytes range from `start` to `end`, both inclusive.
    pub fn bytes(start: u64, end: u64) -> Result<Self, InvalidRange> {
        if end < start {
            return Err(InvalidRange);
        }
        Ok(Self(vec![ByteRangeSpec::FromTo(start, end)]))
    }

    /// Get the bytes range starting at `start` until the end.
    #[must_use]
    pub fn bytes_from(start: u64) -> Self {
        Self(vec![ByteRangeSpec::From(start)])
    }

    /// Get the final `length` bytes.
    #[must_use]
    pub fn suffix(length: u64) -> Self {
        Self(vec![ByteRangeSpec::Last(length)])
    }

    /// The requested byte ranges.
    #[must_use]
    pub fn byte_ranges(&self) -> &[ByteRangeSpec] {
        &self.0
    }
}

impl fmt::Display for ByteRangeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FromTo(first, last) => write!(f, "{first}-{last}"),
            Self::From(first) => write!(f, "{first}-"),
            Self::Last(length) => write!(f, "-{length}"),
        }
    }
}

impl std::str::FromStr for ByteRangeSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (first, last) = s.trim().split_once('-').ok_or_else(Error::invalid)?;
        match (parse_pos(first), parse_pos(last)) {
            (Some(first), Some(last)) if first <= last => Ok(Self::FromTo(first, last)),
            (Some(first), None) if last.is_empty() => Ok(Self::From(first)),
            (None, Some(length)) if first.is_empty() => Ok(Self::Last(length)),
            _ => Err(Error::invalid()),
        }
    }
}

fn parse_pos(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{BYTES_UNIT}=")?;
        for (i, spec) in self.0.iter().enumerate() {
            if i != 0 {
                f.write_str(",")?;
            }
            fmt::Display::fmt(spec, f)?;
        }
        Ok(())
    }
}

impl TypedHeader for Range {
    fn name() -> &'static HeaderName {
        &::http::header::RANGE
    }
}

impl HeaderDecode for Range {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let value = values.just_one().ok_or_else(Error::invalid)?;
        let s = value.to_str().map_err(Error::invalid_from)?;
        let (unit, set) = s.split_once('=').ok_or_else(Error::invalid)?;
        if !unit.trim().eq_ignore_ascii_case(BYTES_UNIT) {
            return Err(Error::invalid());
        }
        let specs = set
            .split(',')
            .filter(|spec| !spec.trim().is_empty())
            .map(str::parse::<ByteRangeSpec>)
            .collect::<Result<Vec<ByteRangeSpec>, _>>()?;
        if specs.is_empty() {
            return Err(Error::invalid());
        }
        Ok(Self(specs))
    }
}

impl HeaderEncode for Range {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match util::fmt(self) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!("failed to encode byte ranges as header value: {err}");
            }
        }
    }
}
