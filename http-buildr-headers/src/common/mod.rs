//! A collection of common request headers,
//! as composed by `http-buildr`.

pub use self::accept::Accept;
pub use self::authorization::{Authorization, Credentials, InvalidCredentials, ProxyAuthorization};
pub use self::cache_control::CacheControl;
pub use self::connection::Connection;
pub use self::dates::{Date, IfModifiedSince, IfUnmodifiedSince};
pub use self::if_range::IfRange;
pub use self::max_forwards::MaxForwards;
pub use self::range::{ByteRangeSpec, InvalidRange, Range};
pub use self::referer::{InvalidReferer, Referer};
pub use self::transfer_encoding::{TransferCoding, TransferEncoding};

#[cfg(test)]
fn test_decode<T: crate::HeaderDecode>(values: &[&str]) -> Option<T> {
    use crate::HeaderMapExt;
    let mut map = ::http::HeaderMap::new();
    for val in values {
        map.append(T::name(), val.parse().unwrap());
    }
    map.typed_get()
}

#[cfg(test)]
fn test_encode<T: crate::HeaderEncode>(header: T) -> ::http::HeaderMap {
    use crate::HeaderMapExt;
    let mut map = ::http::HeaderMap::new();
    map.typed_insert(header);
    map
}

mod accept;
mod authorization;
mod cache_control;
mod connection;
mod dates;
mod if_range;
mod max_forwards;
mod range;
mod referer;
mod transfer_encoding;
