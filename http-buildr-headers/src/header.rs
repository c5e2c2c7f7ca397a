use http::{HeaderName, HeaderValue};

/// A header with a well-known name.
pub trait TypedHeader {
    /// The name this header is stored under in a [`HeaderMap`](http::HeaderMap).
    fn name() -> &'static HeaderName;
}

/// A header which can be read back from the raw values stored under its name.
pub trait HeaderDecode: TypedHeader {
    /// Decode the header from all values stored under [`TypedHeader::name`],
    /// in the order they appear.
    fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
    where
        Self: Sized,
        I: Iterator<Item = &'i HeaderValue>;
}

/// A header which can be written as raw values.
pub trait HeaderEncode: TypedHeader {
    /// Encode the header, extending `values` with each produced value.
    ///
    /// Typed headers validate their content on construction,
    /// so encoding does not fail. A value which still cannot be
    /// represented is skipped.
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E);

    /// Encode the header into its first value, if any.
    fn encode_to_value(&self) -> Option<HeaderValue> {
        let mut first = FirstValue(None);
        self.encode(&mut first);
        first.0
    }
}

struct FirstValue(Option<HeaderValue>);

impl Extend<HeaderValue> for FirstValue {
    fn extend<T: IntoIterator<Item = HeaderValue>>(&mut self, iter: T) {
        if self.0.is_none() {
            self.0 = iter.into_iter().next();
        }
    }
}

/// The error returned when stored header values cannot be decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("invalid HTTP header")]
pub struct Error(());

impl Error {
    /// Create an 'invalid' Error.
    #[must_use]
    pub fn invalid() -> Self {
        Self(())
    }

    /// Create an 'invalid' Error in place of the failure causing it.
    pub(crate) fn invalid_from<E>(_cause: E) -> Self {
        Self::invalid()
    }
}
