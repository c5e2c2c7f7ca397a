use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use http::{HeaderName, HeaderValue};

use crate::util::{self, Seconds, csv};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `Cache-Control` header, defined in [RFC7234](https://tools.ietf.org/html/rfc7234#section-5.2)
///
/// The `Cache-Control` header field is used to specify directives for
/// caches along the request/response chain.  Such cache directives are
/// unidirectional in that the presence of a directive in a request does
/// not imply that the same directive is to be given in the response.
///
/// Only the request directives are supported. Any other directive
/// is ignored when decoding.
///
/// ## ABNF
///
/// ```text
/// Cache-Control   = 1#cache-directive
/// cache-directive = token [ "=" ( token / quoted-string ) ]
/// ```
///
/// ## Example values
///
/// * `no-cache`
/// * `max-age=30`
/// * `max-stale`
/// * `no-store, max-age=20`
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use http_buildr_headers::CacheControl;
///
/// let cc = CacheControl::new()
///     .with_max_age(Duration::from_secs(20))
///     .with_no_store();
/// assert!(cc.no_store());
/// ```
#[derive(PartialEq, Eq, Clone, Debug, Default)]
pub struct CacheControl {
    no_cache: bool,
    no_store: bool,
    no_transform: bool,
    only_if_cached: bool,
    max_age: Option<Seconds>,
    max_stale: Option<Seconds>,
    max_stale_any: bool,
    min_fresh: Option<Seconds>,
}

impl CacheControl {
    /// Construct a new empty `CacheControl` header.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the `no-cache` directive is set.
    #[must_use]
    pub fn no_cache(&self) -> bool {
        self.no_cache
    }

    /// Check if the `no-store` directive is set.
    #[must_use]
    pub fn no_store(&self) -> bool {
        self.no_store
    }

    /// Check if the `no-transform` directive is set.
    #[must_use]
    pub fn no_transform(&self) -> bool {
        self.no_transform
    }

    /// Check if the `only-if-cached` directive is set.
    #[must_use]
    pub fn only_if_cached(&self) -> bool {
        self.only_if_cached
    }

    #[must_use]
    pub fn max_age(&self) -> Option<Duration> {
        self.max_age.map(Into::into)
    }

    /// The staleness limit of the `max-stale` directive, if it has one.
    #[must_use]
    pub fn max_stale(&self) -> Option<Duration> {
        self.max_stale.map(Into::into)
    }

    /// Check if `max-stale` is set without a limit,
    /// accepting a response of any staleness.
    #[must_use]
    pub fn max_stale_any(&self) -> bool {
        self.max_stale_any
    }

    #[must_use]
    pub fn min_fresh(&self) -> Option<Duration> {
        self.min_fresh.map(Into::into)
    }

    /// Set the `no-cache` directive.
    #[must_use]
    pub fn with_no_cache(mut self) -> Self {
        self.no_cache = true;
        self
    }

    /// Set the `no-store` directive.
    #[must_use]
    pub fn with_no_store(mut self) -> Self {
        self.no_store = true;
        self
    }

    /// Set the `no-transform` directive.
    #[must_use]
    pub fn with_no_transform(mut self) -> Self {
        self.no_transform = true;
        self
    }

    /// Set the `only-if-cached` directive.
    #[must_use]
    pub fn with_only_if_cached(mut self) -> Self {
        self.only_if_cached = true;
        self
    }

    /// Set the `max-age` directive, rounded to the nearest second.
    #[must_use]
    pub fn with_max_age(mut self, dur: Duration) -> Self {
        self.max_age = Some(Seconds::from_duration_rounded(dur));
        self
    }

    /// Set the `max-age` directive in whole seconds.
    #[must_use]
    pub fn with_max_age_seconds(mut self, seconds: u64) -> Self {
        self.max_age = Some(Seconds::new(seconds));
        self
    }

    /// Set the `max-stale` directive, rounded to the nearest second.
    #[must_use]
    pub fn with_max_stale(mut self, dur: Duration) -> Self {
        self.max_stale = Some(Seconds::from_duration_rounded(dur));
        self.max_stale_any = false;
        self
    }

    /// Set the `max-stale` directive without a limit.
    #[must_use]
    pub fn with_max_stale_any(mut self) -> Self {
        self.max_stale = None;
        self.max_stale_any = true;
        self
    }

    /// Set the `min-fresh` directive, rounded to the nearest second.
    #[must_use]
    pub fn with_min_fresh(mut self, dur: Duration) -> Self {
        self.min_fresh = Some(Seconds::from_duration_rounded(dur));
        self
    }

    fn apply(&mut self, directive: Directive) {
        match directive {
            Directive::NoCache => self.no_cache = true,
            Directive::NoStore => self.no_store = true,
            Directive::NoTransform => self.no_transform = true,
            Directive::OnlyIfCached => self.only_if_cached = true,
            Directive::MaxAge(secs) => self.max_age = Some(Seconds::new(secs)),
            Directive::MaxStale(Some(secs)) => {
                self.max_stale = Some(Seconds::new(secs));
                self.max_stale_any = false;
            }
            Directive::MaxStale(None) => {
                self.max_stale = None;
                self.max_stale_any = true;
            }
            Directive::MinFresh(secs) => self.min_fresh = Some(Seconds::new(secs)),
        }
    }

    fn directives(&self) -> impl Iterator<Item = Directive> + use<> {
        let flag = |set: bool, directive: Directive| set.then_some(directive);
        [
            flag(self.no_cache, Directive::NoCache),
            flag(self.no_store, Directive::NoStore),
            flag(self.no_transform, Directive::NoTransform),
            flag(self.only_if_cached, Directive::OnlyIfCached),
            self.max_age.map(|s| Directive::MaxAge(s.as_u64())),
            self.max_stale
                .map(|s| Directive::MaxStale(Some(s.as_u64())))
                .or_else(|| flag(self.max_stale_any, Directive::MaxStale(None))),
            self.min_fresh.map(|s| Directive::MinFresh(s.as_u64())),
        ]
        .into_iter()
        .flatten()
    }
}

impl TypedHeader for CacheControl {
    fn name() -> &'static HeaderName {
        &::http::header::CACHE_CONTROL
    }
}

impl HeaderDecode for CacheControl {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let parsed: Vec<MaybeDirective> = csv::from_comma_delimited(values)?;
        let mut cc = Self::new();
        for directive in parsed.into_iter().filter_map(|MaybeDirective(d)| d) {
            cc.apply(directive);
        }
        Ok(cc)
    }
}

impl HeaderEncode for CacheControl {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        match util::fmt(self) {
            Ok(value) => values.extend(::std::iter::once(value)),
            Err(err) => {
                tracing::debug!("failed to encode cache-control directives as header value: {err}");
            }
        }
    }
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        csv::fmt_comma_delimited(f, self.directives())
    }
}

#[derive(Clone, Copy)]
enum Directive {
    NoCache,
    NoStore,
    NoTransform,
    OnlyIfCached,
    MaxAge(u64),
    MaxStale(Option<u64>),
    MinFresh(u64),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCache => f.write_str("no-cache"),
            Self::NoStore => f.write_str("no-store"),
            Self::NoTransform => f.write_str("no-transform"),
            Self::OnlyIfCached => f.write_str("only-if-cached"),
            Self::MaxAge(secs) => write!(f, "max-age={secs}"),
            Self::MaxStale(Some(secs)) => write!(f, "max-stale={secs}"),
            Self::MaxStale(None) => f.write_str("max-stale"),
            Self::MinFresh(secs) => write!(f, "min-fresh={secs}"),
        }
    }
}

/// A directive as found in a header value, `None` for extensions
/// and response directives, which are skipped.
struct MaybeDirective(Option<Directive>);

impl FromStr for MaybeDirective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once('=') {
            Some((name, arg)) => (name.trim(), Some(arg.trim().trim_matches('"'))),
            None => (s.trim(), None),
        };
        let name = name.to_ascii_lowercase();
        let seconds = |arg: Option<&str>| -> Result<u64, Error> {
            arg.filter(|a| !a.is_empty() && a.bytes().all(|b| b.is_ascii_digit()))
                .and_then(|a| a.parse().ok())
                .ok_or_else(Error::invalid)
        };

        let directive = match (name.as_str(), arg) {
            ("no-cache", None) => Directive::NoCache,
            ("no-store", None) => Directive::NoStore,
            ("no-transform", None) => Directive::NoTransform,
            ("only-if-cached", None) => Directive::OnlyIfCached,
            ("max-age", arg) => Directive::MaxAge(seconds(arg)?),
            ("max-stale", None) => Directive::MaxStale(None),
            ("max-stale", arg) => Directive::MaxStale(Some(seconds(arg)?)),
            ("min-fresh", arg) => Directive::MinFresh(seconds(arg)?),
            _ => return Ok(Self(None)),
        };
        Ok(Self(Some(directive)))
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;

    #[test]
    fn test_parse_multiple_headers() {
        assert_eq!(
            test_decode::<CacheControl>(&["no-cache", "no-store"]).unwrap(),
            CacheControl::new().with_no_cache().with_no_store(),
        );
    }

    #[test]
    fn test_parse_argument() {
        assert_eq!(
            test_decode::<CacheControl>(&["max-age=100, no-transform"]).unwrap(),
            CacheControl::new()
                .with_max_age_seconds(100)
                .with_no_transform(),
        );
    }

    #[test]
    fn test_parse_quote_form() {
        assert_eq!(
            test_decode::<CacheControl>(&["max-age=\"200\""]).unwrap(),
            CacheControl::new().with_max_age_seconds(200),
        );
    }

    #[test]
    fn test_parse_quoted_comma() {
        assert_eq!(
            test_decode::<CacheControl>(&["foo=\"a, no-store, b\", no-cache"]).unwrap(),
            CacheControl::new().with_no_cache(),
            "unknown extensions are ignored but shouldn't fail parsing",
        )
    }

    #[test]
    fn test_parse_extension() {
        assert_eq!(
            test_decode::<CacheControl>(&["foo, no-cache, bar=baz, private"]).unwrap(),
            CacheControl::new().with_no_cache(),
            "unknown extensions are ignored but shouldn't fail parsing",
        );
    }

    #[test]
    fn test_parse_bad_syntax() {
        assert_eq!(test_decode::<CacheControl>(&["max-age=lolz"]), None);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!(
            test_decode::<CacheControl>(&["No-Store, MAX-AGE=5"]).unwrap(),
            CacheControl::new().with_no_store().with_max_age_seconds(5),
        );
    }

    #[test]
    fn test_parse_missing_argument() {
        assert_eq!(test_decode::<CacheControl>(&["max-age"]), None);
        assert_eq!(test_decode::<CacheControl>(&["min-fresh="]), None);
    }

    #[test]
    fn test_parse_max_stale_without_limit() {
        let cc = test_decode::<CacheControl>(&["max-stale, no-store"]).unwrap();
        assert_eq!(cc, CacheControl::new().with_max_stale_any().with_no_store());
        assert!(cc.max_stale_any());
        assert_eq!(cc.max_stale(), None);
    }

    #[test]
    fn test_parse_max_stale_empty_limit() {
        assert_eq!(test_decode::<CacheControl>(&["max-stale="]), None);
    }

    #[test]
    fn encode_max_stale_without_limit() {
        let headers = test_encode(CacheControl::new().with_no_cache().with_max_stale_any());
        assert_eq!(headers["cache-control"], "no-cache, max-stale");
    }

    #[test]
    fn max_stale_limit_replaces_any() {
        let cc = CacheControl::new()
            .with_max_stale_any()
            .with_max_stale(Duration::from_secs(5));
        assert!(!cc.max_stale_any());
        assert_eq!(test_encode(cc)["cache-control"], "max-stale=5");
    }

    #[test]
    fn encode_one_flag_directive() {
        let headers = test_encode(CacheControl::new().with_only_if_cached());
        assert_eq!(headers["cache-control"], "only-if-cached");
    }

    #[test]
    fn encode_max_age_and_no_store() {
        let cc = CacheControl::new()
            .with_max_age(Duration::from_secs(20))
            .with_no_store();
        assert_eq!(cc.max_age(), Some(Duration::from_secs(20)));
        assert!(cc.no_store());

        let headers = test_encode(cc);
        assert_eq!(headers["cache-control"], "no-store, max-age=20");
    }

    #[test]
    fn encode_stale_and_fresh() {
        let headers = test_encode(
            CacheControl::new()
                .with_max_stale(Duration::from_secs(60))
                .with_min_fresh(Duration::from_millis(9_600)),
        );
        assert_eq!(headers["cache-control"], "max-stale=60, min-fresh=10");
    }
}
