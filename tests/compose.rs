use std::time::{Duration, SystemTime};

use http::{Method, Request, Uri};
use http_buildr::headers::specifier::Quality;
use http_buildr::headers::{
    Accept, Authorization, ByteRangeSpec, CacheControl, Connection, Date, EntityTag,
    HeaderMapExt, IfModifiedSince, IfRange, IfUnmodifiedSince, MaxForwards, ProxyAuthorization,
    Range, Referer, TransferEncoding,
};
use http_buildr::{BuildError, MethodExt, RequestExt};

fn req() -> Request<()> {
    let mut req = Request::new(());
    *req.uri_mut() = Uri::from_static("http://some-host");
    req
}

fn assert_close_to_now(time: SystemTime) {
    let now = SystemTime::now();
    let diff = now
        .duration_since(time)
        .unwrap_or_else(|err| err.duration());
    assert!(diff <= Duration::from_secs(1), "{time:?} not close to {now:?}");
}

#[test]
fn basic_token_is_kept_verbatim() {
    let mut req = req();
    req.with_basic_token("abcd").unwrap();

    let auth: Authorization = req.headers().typed_get().unwrap();
    assert_eq!(auth.scheme(), "Basic");
    assert_eq!(auth.parameter(), Some("abcd"));
    assert_eq!(req.headers()["authorization"], "Basic abcd");
}

#[test]
fn basic_auth_encodes_user_pass() {
    let mut req = req();
    req.with_basic_auth("Aladdin", "open sesame").unwrap();
    assert_eq!(
        req.headers()["authorization"],
        "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
    );
}

#[test]
fn bearer_token() {
    let mut req = req();
    req.with_bearer_token("abcde").unwrap();

    let auth: Authorization = req.headers().typed_get().unwrap();
    assert_eq!(auth.scheme(), "Bearer");
    assert_eq!(auth.parameter(), Some("abcde"));
}

#[test]
fn authorization_is_sensitive() {
    let mut req = req();
    req.with_bearer_token("abcde").unwrap();
    assert!(req.headers()["authorization"].is_sensitive());
}

#[test]
fn custom_header_single_value() {
    let mut req = req();
    req.with_header("a", "1").unwrap();

    let values: Vec<_> = req.headers().get_all("a").iter().collect();
    assert_eq!(values, vec!["1"]);
}

#[test]
fn custom_header_multiple_values() {
    let mut req = req();
    req.with_header_values("a", ["1", "2", "3"]).unwrap();

    let values: Vec<_> = req.headers().get_all("a").iter().collect();
    assert_eq!(values, vec!["1", "2", "3"]);
}

#[test]
fn custom_header_replaces_previous_values() {
    let mut req = req();
    req.with_header_values("a", ["1", "2", "3"])
        .unwrap()
        .with_header("a", "4")
        .unwrap();

    let values: Vec<_> = req.headers().get_all("a").iter().collect();
    assert_eq!(values, vec!["4"]);
}

#[test]
fn custom_header_invalid_name() {
    let mut req = req();
    let err = req.with_header("in valid", "1").unwrap_err();
    assert!(matches!(err, BuildError::InvalidHeaderName { .. }));
    assert!(req.headers().is_empty());
}

#[test]
fn proxy_authorization() {
    let mut req = req();
    req.with_proxy_authorization("Test", "abcdef").unwrap();

    let auth: ProxyAuthorization = req.headers().typed_get().unwrap();
    assert_eq!(auth.scheme(), "Test");
    assert_eq!(auth.parameter(), Some("abcdef"));
    assert!(!req.headers().contains_key("authorization"));
}

#[test]
fn proxy_authorization_invalid_scheme() {
    let mut req = req();
    let err = req.with_proxy_authorization("Te st", "abcdef").unwrap_err();
    assert!(matches!(err, BuildError::InvalidCredentials(_)));
    assert!(req.headers().is_empty());
}

#[test]
fn cache_control() {
    let mut req = req();
    req.with_cache_control(
        CacheControl::new()
            .with_max_age(Duration::from_secs(20))
            .with_no_store(),
    );

    let cc: CacheControl = req.headers().typed_get().unwrap();
    assert_eq!(cc.max_age(), Some(Duration::from_secs(20)));
    assert!(cc.no_store());
    assert!(!cc.no_cache());
}

#[test]
fn cache_control_max_stale_without_limit() {
    let mut req = req();
    req.with_header("cache-control", "max-stale, no-store").unwrap();

    let cc: CacheControl = req.headers().typed_get().unwrap();
    assert!(cc.max_stale_any());
    assert!(cc.no_store());

    req.with_cache_control(CacheControl::new().with_max_stale_any());
    assert_eq!(req.headers()["cache-control"], "max-stale");
}

#[test]
fn connection_close() {
    let mut req = req();
    req.with_connection_close(true);

    let conn: Connection = req.headers().typed_get().unwrap();
    assert!(conn.is_close());

    req.with_connection_close(false);
    assert!(req.headers().typed_get::<Connection>().is_none());
}

#[test]
fn date() {
    let mut req = req();
    req.with_date(SystemTime::now());

    let date: Date = req.headers().typed_get().unwrap();
    assert_close_to_now(date.into());
}

#[test]
fn accept_with_quality() {
    let mut req = req();
    req.with_accept_quality("text/json", 0.20).unwrap();

    let accept: Accept = req.headers().typed_get().unwrap();
    let value = &accept.values()[0];
    assert_eq!(value.value().essence_str(), "text/json");
    assert_eq!(value.quality(), Some(Quality::from_thousandths(200)));
}

#[test]
fn accept_without_quality() {
    let mut req = req();
    req.with_accept("text/json2").unwrap();

    let accept: Accept = req.headers().typed_get().unwrap();
    let value = &accept.values()[0];
    assert_eq!(value.value().essence_str(), "text/json2");
    assert_eq!(value.quality(), None);
}

#[test]
fn accept_refuses_quality_inside_media_type() {
    let mut req = req();
    let err = req.with_accept("text/json; q=0.5").unwrap_err();
    assert!(matches!(err, BuildError::InvalidMediaType { input, .. } if input == "text/json; q=0.5"));

    assert!(req.with_accept_quality("text/json; q=0.9", 0.2).is_err());
    assert!(req.headers().is_empty());
}

#[test]
fn accept_accumulates() {
    let mut req = req();
    req.with_accept_quality("text/json", 0.2)
        .unwrap()
        .with_accept("text/json2")
        .unwrap();

    let accept: Accept = req.headers().typed_get().unwrap();
    let media_types: Vec<_> = accept.iter().map(|v| v.value().essence_str()).collect();
    assert_eq!(media_types, vec!["text/json", "text/json2"]);
}

#[test]
fn if_modified_since() {
    let mut req = req();
    req.with_if_modified_since(SystemTime::now());

    let ims: IfModifiedSince = req.headers().typed_get().unwrap();
    assert_close_to_now(ims.into());
}

#[test]
fn range() {
    let mut req = req();
    req.with_range(20, 50).unwrap();

    let range: Range = req.headers().typed_get().unwrap();
    assert_eq!(range, Range::bytes(20, 50).unwrap());
    assert_eq!(range.byte_ranges(), &[ByteRangeSpec::FromTo(20, 50)]);
}

#[test]
fn range_reversed_is_rejected() {
    let mut req = req();
    let err = req.with_range(50, 20).unwrap_err();
    assert!(matches!(err, BuildError::InvalidRange(_)));
    assert!(req.headers().typed_get::<Range>().is_none());
}

#[test]
fn if_range_date() {
    let mut req = req();
    req.with_if_range_date(SystemTime::now());

    let if_range: IfRange = req.headers().typed_get().unwrap();
    assert_close_to_now(if_range.date_value().unwrap());
}

#[test]
fn if_range_etag() {
    let mut req = req();
    req.with_if_range_etag("\"a\"".parse().unwrap());

    let if_range: IfRange = req.headers().typed_get().unwrap();
    assert_eq!(if_range.entity_tag(), Some(&EntityTag::strong("a").unwrap()));
}

#[test]
fn if_range_last_form_wins() {
    let mut req = req();
    req.with_if_range_date(SystemTime::now())
        .with_if_range_etag(EntityTag::strong("a").unwrap());

    let if_range: IfRange = req.headers().typed_get().unwrap();
    assert!(if_range.date_value().is_none());
    assert!(if_range.entity_tag().is_some());
    assert_eq!(req.headers().get_all("if-range").iter().count(), 1);
}

#[test]
fn if_unmodified_since() {
    let mut req = req();
    req.with_if_unmodified_since(SystemTime::now());

    let ius: IfUnmodifiedSince = req.headers().typed_get().unwrap();
    assert_close_to_now(ius.into());
}

#[test]
fn max_forwards() {
    let mut req = req();
    req.with_max_forwards(3);

    assert_eq!(req.headers().typed_get(), Some(MaxForwards::new(3)));
}

#[test]
fn referrer() {
    let mut req = req();
    req.with_referrer("https://some-domain").unwrap();

    let referer: Referer = req.headers().typed_get().unwrap();
    assert_eq!(referer.uri(), &Uri::from_static("https://some-domain"));
}

#[test]
fn referrer_from_uri() {
    let uri = Uri::from_static("https://some-domain/page?x=1");

    let mut req = req();
    req.with_referrer(&uri).unwrap();
    assert_eq!(req.headers()["referer"], "https://some-domain/page?x=1");

    let mut req = self::req();
    req.with_referrer(uri.clone()).unwrap();
    let referer: Referer = req.headers().typed_get().unwrap();
    assert_eq!(referer.uri(), &uri);
}

#[test]
fn referrer_from_string() {
    let mut req = req();
    req.with_referrer(String::from("/relative")).unwrap();
    assert_eq!(req.headers()["referer"], "/relative");
}

#[test]
fn referrer_invalid() {
    let mut req = req();
    let err = req.with_referrer("https://some domain").unwrap_err();
    assert!(matches!(err, BuildError::InvalidUri { .. }));
    assert!(req.headers().is_empty());
}

#[test]
fn transfer_encoding_chunked() {
    let mut req = req();
    req.with_transfer_encoding_chunked(true);

    let te: TransferEncoding = req.headers().typed_get().unwrap();
    assert!(te.is_chunked());

    req.with_transfer_encoding_chunked(false);
    assert!(req.headers().typed_get::<TransferEncoding>().is_none());
}

#[test]
fn composition_keeps_method_and_uri() {
    let mut req = Method::POST.to("https://some-host/upload?id=1").unwrap();
    req.with_bearer_token("t")
        .unwrap()
        .with_max_forwards(1)
        .with_connection_close(true)
        .with_transfer_encoding_chunked(true);

    assert_eq!(req.method(), Method::POST);
    assert_eq!(req.uri(), &Uri::from_static("https://some-host/upload?id=1"));
    assert_eq!(req.headers().len(), 4);
}

#[test]
fn body_can_be_attached_after_composition() {
    let mut req = Method::PUT.to("/resource").unwrap();
    req.with_header("content-type", "text/plain").unwrap();

    let req = req.map(|()| "hello");
    assert_eq!(*req.body(), "hello");
    assert_eq!(req.headers()["content-type"], "text/plain");
}
