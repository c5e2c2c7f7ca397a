//! Authorization header and types.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as ENGINE;
use http::{HeaderName, HeaderValue};

use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

const BASIC_SCHEME: &str = "Basic";
const BEARER_SCHEME: &str = "Bearer";

/// Credentials to be used in the `Authorization`
/// and `Proxy-Authorization` headers.
///
/// Credentials consist of an authentication scheme,
/// optionally followed by a parameter (e.g. a token) which is
/// kept verbatim: no encoding is applied to it.
///
/// # ABNF
///
/// ```text
/// credentials = auth-scheme [ 1*SP ( token68 / #auth-param ) ]
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Credentials {
    scheme: String,
    parameter: Option<String>,
}

/// Error returned for credentials which cannot form
/// a valid authorization header value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("credentials are not a valid authorization header value")]
pub struct InvalidCredentials;

impl Credentials {
    /// Create credentials from a scheme and its parameter.
    ///
    /// The scheme has to be a valid token, and scheme and parameter combined
    /// have to form a valid header value. An empty parameter results in
    /// credentials consisting of only the scheme.
    pub fn new(scheme: &str, parameter: &str) -> Result<Self, InvalidCredentials> {
        if !is_token(scheme) {
            return Err(InvalidCredentials);
        }
        let parameter = if parameter.is_empty() {
            None
        } else {
            if HeaderValue::from_str(parameter).is_err() {
                return Err(InvalidCredentials);
            }
            Some(parameter.to_owned())
        };
        Ok(Self {
            scheme: scheme.to_owned(),
            parameter,
        })
    }

    /// Create `Basic` credentials from an already encoded token.
    pub fn basic(token: &str) -> Result<Self, InvalidCredentials> {
        Self::new(BASIC_SCHEME, token)
    }

    /// Create `Basic` credentials by encoding `username:password`.
    pub fn basic_from_user_pass(
        username: &str,
        password: &str,
    ) -> Result<Self, InvalidCredentials> {
        Self::basic(&ENGINE.encode(format!("{username}:{password}")))
    }

    /// Create `Bearer` credentials from a token.
    pub fn bearer(token: &str) -> Result<Self, InvalidCredentials> {
        Self::new(BEARER_SCHEME, token)
    }

    /// The authentication scheme, e.g. `Basic`.
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    /// The parameter following the scheme, if any.
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        self.parameter.as_deref()
    }

    /// Returns true if the scheme equals, case-insensitively, the given one.
    #[must_use]
    pub fn is_scheme(&self, scheme: &str) -> bool {
        self.scheme.eq_ignore_ascii_case(scheme)
    }

    /// Decode the `username` and `password` of `Basic` credentials.
    ///
    /// Returns `None` for other schemes or a parameter which is
    /// not base64 encoded `username:password`.
    #[must_use]
    pub fn basic_user_pass(&self) -> Option<(String, String)> {
        if !self.is_scheme(BASIC_SCHEME) {
            return None;
        }
        let decoded = ENGINE.decode(self.parameter.as_deref()?).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (username, password) = decoded.split_once(':')?;
        Some((username.to_owned(), password.to_owned()))
    }

    fn decode(value: &HeaderValue) -> Option<Self> {
        let value = value.to_str().ok()?;
        let (scheme, parameter) = match value.split_once(' ') {
            Some((scheme, parameter)) => (scheme, parameter.trim_start()),
            None => (value, ""),
        };
        Self::new(scheme, parameter).ok()
    }

    fn encode(&self) -> Result<HeaderValue, http::header::InvalidHeaderValue> {
        let mut value = match &self.parameter {
            Some(parameter) => HeaderValue::try_from(format!("{} {parameter}", self.scheme))?,
            None => HeaderValue::try_from(self.scheme.as_str())?,
        };
        value.set_sensitive(true);
        Ok(value)
    }
}

fn is_token(s: &str) -> bool {
    !s.is_empty()
        && s.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

macro_rules! credentials_header {
    ($(#[$m:meta])* $type:ident, name: $name:ident) => {
        $(#[$m])*
        #[derive(Clone, PartialEq, Eq, Debug)]
        pub struct $type(Credentials);

        impl $type {
            /// Create the header from [`Credentials`].
            #[must_use]
            pub fn new(credentials: Credentials) -> Self {
                Self(credentials)
            }

            /// Create the header with `Basic` credentials
            /// from an already encoded token.
            pub fn basic_token(token: &str) -> Result<Self, InvalidCredentials> {
                Credentials::basic(token).map(Self)
            }

            /// Create the header with `Basic` credentials
            /// by encoding `username:password`.
            pub fn basic(username: &str, password: &str) -> Result<Self, InvalidCredentials> {
                Credentials::basic_from_user_pass(username, password).map(Self)
            }

            /// Create the header with `Bearer` credentials.
            pub fn bearer(token: &str) -> Result<Self, InvalidCredentials> {
                Credentials::bearer(token).map(Self)
            }

            /// View the credentials.
            #[must_use]
            pub fn credentials(&self) -> &Credentials {
                &self.0
            }

            /// Consume the header into its credentials.
            #[must_use]
            pub fn into_credentials(self) -> Credentials {
                self.0
            }

            /// The authentication scheme.
            #[must_use]
            pub fn scheme(&self) -> &str {
                self.0.scheme()
            }

            /// The parameter following the scheme, if any.
            #[must_use]
            pub fn parameter(&self) -> Option<&str> {
                self.0.parameter()
            }
        }

        impl From<Credentials> for $type {
            fn from(credentials: Credentials) -> Self {
                Self(credentials)
            }
        }

        impl TypedHeader for $type {
            fn name() -> &'static HeaderName {
                &::http::header::$name
            }
        }

        impl HeaderDecode for $type {
            fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(
                values: &mut I,
            ) -> Result<Self, Error> {
                values
                    .next()
                    .and_then(Credentials::decode)
                    .map(Self)
                    .ok_or_else(Error::invalid)
            }
        }

        impl HeaderEncode for $type {
            fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
                match self.0.encode() {
                    Ok(value) => values.extend(::std::iter::once(value)),
                    Err(err) => {
                        tracing::debug!(
                            header = %::http::header::$name,
                            "failed to encode credentials as header value: {err}"
                        );
                    }
                }
            }
        }
    };
}

credentials_header! {
    /// `Authorization` header, defined in [RFC7235](https://tools.ietf.org/html/rfc7235#section-4.2)
    ///
    /// The `Authorization` header field allows a user agent to authenticate
    /// itself with an origin server -- usually, but not necessarily, after
    /// receiving a 401 (Unauthorized) response.  Its value consists of
    /// credentials containing the authentication information of the user
    /// agent for the realm of the resource being requested.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Authorization = credentials
    /// ```
    ///
    /// # Example values
    /// * `Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==`
    /// * `Bearer fpKL54jvWmEGVoRdCNjG`
    ///
    /// # Examples
    ///
    /// ```
    /// use http_buildr_headers::Authorization;
    ///
    /// let basic = Authorization::basic("Aladdin", "open sesame").unwrap();
    /// let bearer = Authorization::bearer("some-opaque-token").unwrap();
    /// ```
    Authorization,
    name: AUTHORIZATION
}

credentials_header! {
    /// `Proxy-Authorization` header, defined in [RFC7235](https://tools.ietf.org/html/rfc7235#section-4.4)
    ///
    /// The `Proxy-Authorization` header field allows the client to
    /// identify itself (or its user) to a proxy that requires
    /// authentication.  Its value consists of credentials containing the
    /// authentication information of the client for the proxy and/or realm
    /// of the resource being requested.
    ///
    /// # ABNF
    ///
    /// ```text
    /// Proxy-Authorization = credentials
    /// ```
    ///
    /// # Example values
    /// * `Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ==`
    /// * `Bearer fpKL54jvWmEGVoRdCNjG`
    ProxyAuthorization,
    name: PROXY_AUTHORIZATION
}
