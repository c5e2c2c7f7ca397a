use http::{Method, Uri};
use http_buildr::headers::{Authorization, HeaderMapExt, Range};
use http_buildr::{MethodExt, RequestExt};
use quickcheck_macros::quickcheck;

fn token(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

#[quickcheck]
fn origination_preserves_path(segment: String) -> bool {
    let target = format!("http://some-host/{}", token(&segment));
    let req = Method::GET.to(target.as_str()).unwrap();
    req.method() == Method::GET && *req.uri() == target.parse::<Uri>().unwrap()
}

#[quickcheck]
fn range_accepts_exactly_ordered_bounds(start: u64, end: u64) -> bool {
    let mut req = Method::GET.to("http://some-host").unwrap();
    let result = req.with_range(start, end).is_ok();
    let stored = req.headers().typed_get::<Range>();
    if start <= end {
        result && stored == Range::bytes(start, end).ok()
    } else {
        !result && stored.is_none()
    }
}

#[quickcheck]
fn basic_token_is_idempotent(raw: String) -> bool {
    let token = token(&raw);

    let mut once = Method::GET.to("http://some-host").unwrap();
    once.with_basic_token(&token).unwrap();

    let mut twice = Method::GET.to("http://some-host").unwrap();
    twice
        .with_basic_token(&token)
        .unwrap()
        .with_basic_token(&token)
        .unwrap();

    once.headers() == twice.headers()
        && once.headers().typed_get::<Authorization>()
            == Authorization::basic_token(&token).ok()
}

#[quickcheck]
fn max_forwards_round_trips_any_count(hops: u32) -> bool {
    let mut req = Method::GET.to("http://some-host").unwrap();
    req.with_max_forwards(hops);
    req.headers()["max-forwards"] == hops.to_string().as_str()
}
