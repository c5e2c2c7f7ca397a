use std::time::SystemTime;

use http::{HeaderMap, HeaderValue, Request, header};
use http_buildr_headers::specifier::{Quality, QualityValue};
use http_buildr_headers::{
    Authorization, CacheControl, Connection, Credentials, Date, EntityTag, HeaderDecode,
    HeaderEncode, HeaderMapExt, IfModifiedSince, IfRange, IfUnmodifiedSince, MaxForwards, Mime,
    ProxyAuthorization, Range, Referer, TransferEncoding,
};

use crate::BuildError;
use crate::target::private::IntoHeaderValueSealed as _;
use crate::target::{IntoHeaderName, IntoHeaderValue, IntoTarget};

/// Extends a [`Request`] with chainable methods composing its headers.
///
/// Each method sets a single header and returns the same request,
/// leaving method and uri untouched. Single-valued headers are replaced,
/// `Accept` values accumulate.
///
/// A method which fails leaves the request as it was.
pub trait RequestExt: sealed::Sealed {
    /// Insert a typed header, replacing any previous values of that header.
    fn with_typed_header<H>(&mut self, header: H) -> &mut Self
    where
        H: HeaderEncode;

    /// Set `Authorization: Basic <token>`, using the token verbatim.
    ///
    /// # Errors
    ///
    /// Fails if the token is not a valid header value.
    fn with_basic_token(&mut self, token: &str) -> Result<&mut Self, BuildError>;

    /// Set `Authorization: Basic` with the base64 encoded `username:password`.
    ///
    /// # Errors
    ///
    /// Fails if the credentials cannot form a valid header value.
    fn with_basic_auth(&mut self, username: &str, password: &str)
    -> Result<&mut Self, BuildError>;

    /// Set `Authorization: Bearer <token>`, using the token verbatim.
    ///
    /// # Errors
    ///
    /// Fails if the token is not a valid header value.
    fn with_bearer_token(&mut self, token: &str) -> Result<&mut Self, BuildError>;

    /// Replace all values of the named header with exactly `value`.
    ///
    /// # Errors
    ///
    /// Fails on an invalid header name or value.
    fn with_header(
        &mut self,
        name: impl IntoHeaderName,
        value: impl IntoHeaderValue,
    ) -> Result<&mut Self, BuildError>;

    /// Replace all values of the named header with exactly
    /// the given values, in order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid header name or value,
    /// or when no values are given at all.
    fn with_header_values<I>(
        &mut self,
        name: impl IntoHeaderName,
        values: I,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item: IntoHeaderValue>;

    /// Set `Proxy-Authorization: <scheme> <token>`.
    ///
    /// # Errors
    ///
    /// Fails if the scheme is not a valid token,
    /// or the token is not a valid header value.
    fn with_proxy_authorization(
        &mut self,
        scheme: &str,
        token: &str,
    ) -> Result<&mut Self, BuildError>;

    fn with_cache_control(&mut self, cache_control: CacheControl) -> &mut Self;

    /// Add (`true`) or remove (`false`) the `close` connection option.
    ///
    /// Other connection options are kept. The `Connection` header is
    /// removed once no option remains. A `Connection` header which cannot
    /// be decoded is replaced by `close`, or kept as is when removing.
    fn with_connection_close(&mut self, close: bool) -> &mut Self;

    /// Set the `Date` header, truncated to whole seconds.
    fn with_date(&mut self, date: SystemTime) -> &mut Self;

    /// Append a media range without quality to the `Accept` header.
    ///
    /// # Errors
    ///
    /// Fails if the media type cannot be parsed.
    fn with_accept(&mut self, media_type: &str) -> Result<&mut Self, BuildError>;

    /// Append a media range with the given quality to the `Accept` header.
    ///
    /// # Errors
    ///
    /// Fails if the media type cannot be parsed,
    /// or the quality is not within `[0, 1]`.
    fn with_accept_quality(
        &mut self,
        media_type: &str,
        quality: f64,
    ) -> Result<&mut Self, BuildError>;

    fn with_if_modified_since(&mut self, date: SystemTime) -> &mut Self;

    /// Set `Range: bytes=<start>-<end>`, both inclusive.
    ///
    /// # Errors
    ///
    /// Fails if `start` is greater than `end`.
    fn with_range(&mut self, start: u64, end: u64) -> Result<&mut Self, BuildError>;

    /// Set `If-Range` to its date form, replacing an entity tag if present.
    fn with_if_range_date(&mut self, date: SystemTime) -> &mut Self;

    /// Set `If-Range` to its entity tag form, replacing a date if present.
    fn with_if_range_etag(&mut self, etag: EntityTag) -> &mut Self;

    fn with_if_unmodified_since(&mut self, date: SystemTime) -> &mut Self;

    fn with_max_forwards(&mut self, hops: u32) -> &mut Self;

    /// Set the `Referer` header to the given uri.
    ///
    /// # Errors
    ///
    /// Fails if the referrer cannot be parsed as a uri.
    fn with_referrer(&mut self, referrer: impl IntoTarget) -> Result<&mut Self, BuildError>;

    /// Add (`true`) or remove (`false`) the final `chunked` transfer coding.
    ///
    /// Other codings are kept. The `Transfer-Encoding` header is
    /// removed once no coding remains. A `Transfer-Encoding` header which
    /// cannot be decoded is replaced by `chunked`, or kept as is when removing.
    fn with_transfer_encoding_chunked(&mut self, chunked: bool) -> &mut Self;
}

impl<B> RequestExt for Request<B> {
    fn with_typed_header<H>(&mut self, header: H) -> &mut Self
    where
        H: HeaderEncode,
    {
        self.headers_mut().typed_insert(header);
        self
    }

    fn with_basic_token(&mut self, token: &str) -> Result<&mut Self, BuildError> {
        let header = Authorization::basic_token(token)?;
        Ok(self.with_typed_header(header))
    }

    fn with_basic_auth(
        &mut self,
        username: &str,
        password: &str,
    ) -> Result<&mut Self, BuildError> {
        let header = Authorization::basic(username, password)?;
        Ok(self.with_typed_header(header))
    }

    fn with_bearer_token(&mut self, token: &str) -> Result<&mut Self, BuildError> {
        let header = Authorization::bearer(token)?;
        Ok(self.with_typed_header(header))
    }

    fn with_header(
        &mut self,
        name: impl IntoHeaderName,
        value: impl IntoHeaderValue,
    ) -> Result<&mut Self, BuildError> {
        let name = name.into_header_name()?;
        let value = value.into_header_value()?;
        self.headers_mut().insert(name, value);
        Ok(self)
    }

    fn with_header_values<I>(
        &mut self,
        name: impl IntoHeaderName,
        values: I,
    ) -> Result<&mut Self, BuildError>
    where
        I: IntoIterator<Item: IntoHeaderValue>,
    {
        let name = name.into_header_name()?;
        let values = values
            .into_iter()
            .map(|value| value.into_header_value())
            .collect::<Result<Vec<_>, _>>()?;
        if values.is_empty() {
            return Err(BuildError::MissingHeaderValues { name });
        }

        let headers = self.headers_mut();
        headers.remove(&name);
        for value in values {
            headers.append(&name, value);
        }
        Ok(self)
    }

    fn with_proxy_authorization(
        &mut self,
        scheme: &str,
        token: &str,
    ) -> Result<&mut Self, BuildError> {
        let header = ProxyAuthorization::new(Credentials::new(scheme, token)?);
        Ok(self.with_typed_header(header))
    }

    fn with_cache_control(&mut self, cache_control: CacheControl) -> &mut Self {
        self.with_typed_header(cache_control)
    }

    fn with_connection_close(&mut self, close: bool) -> &mut Self {
        update_typed_header(self.headers_mut(), |current: Option<Connection>| {
            match (current, close) {
                (Some(conn), true) => Some(conn.with_close()),
                (None, true) => Some(Connection::close()),
                (Some(conn), false) => conn.without_close(),
                (None, false) => None,
            }
        });
        self
    }

    fn with_date(&mut self, date: SystemTime) -> &mut Self {
        self.with_typed_header(Date::from(date))
    }

    fn with_accept(&mut self, media_type: &str) -> Result<&mut Self, BuildError> {
        let value = accept_value(QualityValue::new_value(parse_media_type(media_type)?))?;
        self.headers_mut().append(header::ACCEPT, value);
        Ok(self)
    }

    fn with_accept_quality(
        &mut self,
        media_type: &str,
        quality: f64,
    ) -> Result<&mut Self, BuildError> {
        let quality = Quality::try_from(quality)?;
        let value = accept_value(QualityValue::new(parse_media_type(media_type)?, quality))?;
        self.headers_mut().append(header::ACCEPT, value);
        Ok(self)
    }

    fn with_if_modified_since(&mut self, date: SystemTime) -> &mut Self {
        self.with_typed_header(IfModifiedSince::from(date))
    }

    fn with_range(&mut self, start: u64, end: u64) -> Result<&mut Self, BuildError> {
        let range = Range::bytes(start, end)?;
        Ok(self.with_typed_header(range))
    }

    fn with_if_range_date(&mut self, date: SystemTime) -> &mut Self {
        self.with_typed_header(IfRange::date(date))
    }

    fn with_if_range_etag(&mut self, etag: EntityTag) -> &mut Self {
        self.with_typed_header(IfRange::etag(etag))
    }

    fn with_if_unmodified_since(&mut self, date: SystemTime) -> &mut Self {
        self.with_typed_header(IfUnmodifiedSince::from(date))
    }

    fn with_max_forwards(&mut self, hops: u32) -> &mut Self {
        self.with_typed_header(MaxForwards::new(hops))
    }

    fn with_referrer(&mut self, referrer: impl IntoTarget) -> Result<&mut Self, BuildError> {
        let uri = referrer.into_target()?;
        Ok(self.with_typed_header(Referer::new(uri)))
    }

    fn with_transfer_encoding_chunked(&mut self, chunked: bool) -> &mut Self {
        update_typed_header(self.headers_mut(), |current: Option<TransferEncoding>| {
            match (current, chunked) {
                (Some(te), true) => Some(te.with_chunked()),
                (None, true) => Some(TransferEncoding::chunked()),
                (Some(te), false) => te.without_chunked(),
                (None, false) => None,
            }
        });
        self
    }
}

/// Decode the current header, update it and store the result,
/// removing the header when the update yields `None`.
///
/// A current header which cannot be decoded is updated as if absent.
/// It is only replaced when the update yields a header.
fn update_typed_header<H, F>(headers: &mut HeaderMap, update: F)
where
    H: HeaderDecode + HeaderEncode,
    F: FnOnce(Option<H>) -> Option<H>,
{
    match headers.typed_try_get::<H>() {
        Ok(current) => match update(current) {
            Some(header) => headers.typed_insert(header),
            None => {
                headers.typed_remove::<H>();
            }
        },
        Err(err) => match update(None) {
            Some(header) => {
                tracing::debug!(header = %H::name(), "replacing undecodable header: {err}");
                headers.typed_insert(header);
            }
            None => {
                tracing::debug!(header = %H::name(), "keeping undecodable header: {err}");
            }
        },
    }
}

/// Parse a media type for the `Accept` header.
///
/// The quality is not part of the media type, a `q` parameter is refused.
fn parse_media_type(media_type: &str) -> Result<Mime, BuildError> {
    let invalid = |source| BuildError::InvalidMediaType {
        input: media_type.to_owned(),
        source,
    };
    let mime: Mime = media_type.parse().map_err(|err| invalid(Some(err)))?;
    if mime
        .params()
        .any(|(name, _)| name.as_str().eq_ignore_ascii_case("q"))
    {
        return Err(invalid(None));
    }
    Ok(mime)
}

fn accept_value(value: QualityValue<Mime>) -> Result<HeaderValue, BuildError> {
    let value = HeaderValue::try_from(value.to_string())?;
    Ok(value)
}

mod sealed {
    pub trait Sealed {}
    impl<B> Sealed for ::http::Request<B> {}
}
