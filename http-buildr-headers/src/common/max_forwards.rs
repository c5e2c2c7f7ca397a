use http::{HeaderName, HeaderValue};

use crate::util::IterExt as _;
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `Max-Forwards` header, defined in [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-5.1.2)
///
/// The `Max-Forwards` header field provides a mechanism with the TRACE
/// and OPTIONS request methods to limit the number of times that the
/// request is forwarded by proxies.
///
/// # ABNF
///
/// ```text
/// Max-Forwards = 1*DIGIT
/// ```
///
/// # Example values
///
/// * `0`
/// * `10`
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MaxForwards(u32);

impl MaxForwards {
    #[must_use]
    pub const fn new(hops: u32) -> Self {
        Self(hops)
    }

    /// The number of remaining hops.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for MaxForwards {
    fn from(hops: u32) -> Self {
        Self(hops)
    }
}

impl TypedHeader for MaxForwards {
    fn name() -> &'static HeaderName {
        &::http::header::MAX_FORWARDS
    }
}

impl HeaderDecode for MaxForwards {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let value = values.just_one().ok_or_else(Error::invalid)?;
        let digits = value.to_str().map_err(Error::invalid_from)?.trim();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::invalid());
        }
        digits.parse().map(Self).map_err(Error::invalid_from)
    }
}

impl HeaderEncode for MaxForwards {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        values.extend(::std::iter::once(HeaderValue::from(self.0)));
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;

    #[test]
    fn decode_digits() {
        assert_eq!(test_decode::<MaxForwards>(&["3"]), Some(MaxForwards(3)));
        assert_eq!(test_decode::<MaxForwards>(&["0"]), Some(MaxForwards(0)));
    }

    #[test]
    fn decode_rejects_signs_and_garbage() {
        for invalid in ["-1", "+1", "", "three", "1.5"] {
            assert_eq!(test_decode::<MaxForwards>(&[invalid]), None, "{invalid}");
        }
    }

    #[test]
    fn encode() {
        assert_eq!(test_encode(MaxForwards::new(3))["max-forwards"], "3");
    }
}
