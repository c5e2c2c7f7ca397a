//! Fluent builders for outbound HTTP requests.
//!
//! A request is started from a [`Method`] and a target, after which its
//! headers are composed through chained calls, each of which sets one
//! correctly named and typed header and hands the same request back.
//!
//! ```
//! use http::Method;
//! use http_buildr::{MethodExt, RequestExt};
//! use http_buildr::headers::{CacheControl, HeaderMapExt, MaxForwards};
//! use std::time::Duration;
//!
//! # fn main() -> Result<(), http_buildr::BuildError> {
//! let mut req = Method::GET.to("http://some-host/resource")?;
//! req.with_bearer_token("abcde")?
//!     .with_cache_control(
//!         CacheControl::new()
//!             .with_no_store()
//!             .with_max_age(Duration::from_secs(20)),
//!     )
//!     .with_accept_quality("text/json", 0.2)?
//!     .with_range(20, 50)?
//!     .with_max_forwards(3);
//!
//! assert_eq!(req.headers()["authorization"], "Bearer abcde");
//! assert_eq!(req.headers()["cache-control"], "no-store, max-age=20");
//! assert_eq!(req.headers()["range"], "bytes=20-50");
//! assert_eq!(req.headers().typed_get(), Some(MaxForwards::new(3)));
//! # Ok(())
//! # }
//! ```
//!
//! Headers can be read back as typed values using [`headers::HeaderMapExt`].
//!
//! [`Method`]: http::Method

#![cfg_attr(docsrs, feature(doc_auto_cfg, doc_cfg))]

mod error;
#[doc(inline)]
pub use error::BuildError;

mod target;
#[doc(inline)]
pub use target::{IntoHeaderName, IntoHeaderValue, IntoTarget};

mod origin;
#[doc(inline)]
pub use origin::{MethodExt, request};

mod compose;
#[doc(inline)]
pub use compose::RequestExt;

pub use http_buildr_headers as headers;

pub mod dep {
    //! dependencies of http-buildr

    pub use http;
    pub use mime;
}
