//! Typed HTTP request headers.
//!
//! Every header is a Rust type which knows its own name ([`TypedHeader`]),
//! how to be written as raw [`HeaderValue`](http::HeaderValue)s
//! ([`HeaderEncode`]) and how to be read back from them ([`HeaderDecode`]).
//! Typed values validate on construction, so a header which exists as a
//! value can always be encoded.
//!
//! The headers provided are the ones `http-buildr` composes on requests:
//! credentials ([`Authorization`], [`ProxyAuthorization`]), caching
//! ([`CacheControl`]), content negotiation ([`Accept`]), conditionals
//! ([`IfModifiedSince`], [`IfUnmodifiedSince`], [`IfRange`]), ranges
//! ([`Range`]) and connection management ([`Connection`],
//! [`TransferEncoding`], [`MaxForwards`]).
//!
//! Reading and writing them on a [`HeaderMap`](http::HeaderMap) goes
//! through [`HeaderMapExt`]:
//!
//! ```
//! use http::HeaderMap;
//! use http_buildr_headers::{HeaderMapExt, Range};
//!
//! let mut headers = HeaderMap::new();
//! headers.typed_insert(Range::bytes(0, 499).unwrap());
//!
//! assert_eq!(headers["range"], "bytes=0-499");
//! assert_eq!(headers.typed_get(), Range::bytes(0, 499).ok());
//! ```
//!
//! # Custom Headers
//!
//! A header which is not provided can be defined by implementing the
//! three traits. `Save-Data` is either `on` or absent:
//!
//! ```
//! use http::{HeaderName, HeaderValue};
//! use http_buildr_headers::{Error, HeaderDecode, HeaderEncode, HeaderMapExt, TypedHeader};
//!
//! static SAVE_DATA: HeaderName = HeaderName::from_static("save-data");
//!
//! struct SaveData;
//!
//! impl TypedHeader for SaveData {
//!     fn name() -> &'static HeaderName {
//!         &SAVE_DATA
//!     }
//! }
//!
//! impl HeaderDecode for SaveData {
//!     fn decode<'i, I>(values: &mut I) -> Result<Self, Error>
//!     where
//!         I: Iterator<Item = &'i HeaderValue>,
//!     {
//!         match values.next() {
//!             Some(value) if value.as_bytes().eq_ignore_ascii_case(b"on") => Ok(SaveData),
//!             _ => Err(Error::invalid()),
//!         }
//!     }
//! }
//!
//! impl HeaderEncode for SaveData {
//!     fn encode<E>(&self, values: &mut E)
//!     where
//!         E: Extend<HeaderValue>,
//!     {
//!         values.extend(std::iter::once(HeaderValue::from_static("on")));
//!     }
//! }
//!
//! let mut headers = http::HeaderMap::new();
//! headers.typed_insert(SaveData);
//! assert_eq!(headers["save-data"], "on");
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]
#![cfg_attr(test, allow(clippy::float_cmp))]

mod header;
#[doc(inline)]
pub use header::{Error, HeaderDecode, HeaderEncode, TypedHeader};

pub use mime::Mime;

#[macro_use]
mod util;
pub use util::{EntityTag, HttpDate, InvalidEntityTag, Seconds};

mod common;
mod map_ext;

pub mod specifier;

pub use self::common::*;
pub use self::map_ext::HeaderMapExt;

pub mod dep {
    //! dependencies http-buildr-headers

    pub use http;
    pub use mime;
}
