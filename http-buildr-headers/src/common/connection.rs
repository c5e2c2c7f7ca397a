use std::fmt;

use http::{HeaderName, HeaderValue};

use crate::util::{self, csv};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

const CLOSE: &str = "close";
const KEEP_ALIVE: &str = "keep-alive";

/// `Connection` header, defined in
/// [RFC7230](https://datatracker.ietf.org/doc/html/rfc7230#section-6.1)
///
/// The `Connection` header field allows the sender to indicate desired
/// control options for the current connection.  In order to avoid
/// confusing downstream recipients, a proxy or gateway MUST remove or
/// replace any received connection options before forwarding the
/// message.
///
/// # ABNF
///
/// ```text
/// Connection        = 1#connection-option
/// connection-option = token
/// ```
///
/// # Example values
/// * `close`
/// * `keep-alive`
/// * `upgrade`
///
/// # Examples
///
/// ```
/// use http_buildr_headers::Connection;
///
/// let keep_alive = Connection::keep_alive();
/// assert!(!keep_alive.is_close());
/// assert!(keep_alive.with_close().is_close());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Connection(Vec<HeaderName>);

impl Connection {
    /// A constructor to easily create a `Connection: close` header.
    #[must_use]
    pub fn close() -> Self {
        Self(vec![HeaderName::from_static(CLOSE)])
    }

    /// A constructor to easily create a `Connection: keep-alive` header.
    #[must_use]
    pub fn keep_alive() -> Self {
        Self(vec![HeaderName::from_static(KEEP_ALIVE)])
    }

    /// Create a `Connection` header with a single option.
    #[must_use]
    pub fn new(option: HeaderName) -> Self {
        Self(vec![option])
    }

    /// Check if this header contains the given option,
    /// compared case-insensitively.
    #[must_use]
    pub fn contains(&self, option: &str) -> bool {
        self.0
            .iter()
            .any(|name| name.as_str().eq_ignore_ascii_case(option))
    }

    /// Check if this header contains the `close` option.
    #[must_use]
    pub fn is_close(&self) -> bool {
        self.contains(CLOSE)
    }

    /// Add an option, unless already present.
    #[must_use]
    pub fn with_option(mut self, option: HeaderName) -> Self {
        if !self.0.contains(&option) {
            self.0.push(option);
        }
        self
    }

    /// Add the `close` option, unless already present.
    #[must_use]
    pub fn with_close(self) -> Self {
        self.with_option(HeaderName::from_static(CLOSE))
    }

    /// Remove the `close` option.
    ///
    /// Returns `None` if no connection option remains,
    /// as a `Connection` header holds at least one option.
    #[must_use]
    pub fn without_close(mut self) -> Option<Self> {
        self.0.retain(|name| name != CLOSE);
        (!self.0.is_empty()).then_some(self)
    }

    /// Iterate over the connection options.
    pub fn iter(&self) -> impl Iterator<Item = &HeaderName> {
        self.0.iter()
    }
}

impl TypedHeader for Connection {
    fn name() -> &'static HeaderName {
        &::http::header::CONNECTION
    }
}

impl HeaderDecode for Connection {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let options: Vec<HeaderName> = csv::from_comma_delimited(values)?;
        if options.is_empty() {
            return Err(Error::invalid());
        }
        Ok(Self(options))
    }
}

impl HeaderEncode for Connection {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match util::fmt(Fmt(self)) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!("failed to encode connection options as header value: {err}");
            }
        }
    }
}

struct Fmt<'a>(&'a Connection);

impl fmt::Display for Fmt<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        csv::fmt_comma_delimited(f, self.0.0.iter())
    }
}
