use http::HeaderValue;

use crate::Error;

pub use self::entity::{EntityTag, InvalidEntityTag};
pub(crate) use self::fmt::fmt;
pub use self::http_date::HttpDate;
pub(crate) use self::iter::IterExt;
pub use self::seconds::Seconds;

pub(crate) mod csv;
mod entity;
mod fmt;
mod http_date;
mod iter;
mod seconds;

/// Defines a header holding a single [`HttpDate`],
/// convertible from and into a [`SystemTime`](std::time::SystemTime).
macro_rules! http_date_header {
    ($(#[$docs:meta])* $type:ident, name: $name:ident) => {
        $(#[$docs])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $type($crate::util::HttpDate);

        impl $crate::TypedHeader for $type {
            fn name() -> &'static ::http::HeaderName {
                &::http::header::$name
            }
        }

        impl $crate::HeaderDecode for $type {
            fn decode<'i, I>(values: &mut I) -> Result<Self, $crate::Error>
            where
                I: Iterator<Item = &'i ::http::HeaderValue>,
            {
                $crate::util::decode_single(values, $crate::util::HttpDate::from_val).map(Self)
            }
        }

        impl $crate::HeaderEncode for $type {
            fn encode<E: Extend<::http::HeaderValue>>(&self, values: &mut E) {
                match ::http::HeaderValue::try_from(&self.0) {
                    Ok(value) => values.extend(::std::iter::once(value)),
                    Err(err) => {
                        ::tracing::debug!(
                            header = %::http::header::$name,
                            "failed to encode http date as header value: {err}"
                        );
                    }
                }
            }
        }

        impl From<::std::time::SystemTime> for $type {
            fn from(time: ::std::time::SystemTime) -> Self {
                Self(time.into())
            }
        }

        impl From<$type> for ::std::time::SystemTime {
            fn from(header: $type) -> Self {
                header.0.into()
            }
        }
    };
}

/// Decode a header which holds exactly one value.
pub(crate) fn decode_single<'i, I, T>(
    values: &mut I,
    decode: impl FnOnce(&'i HeaderValue) -> Option<T>,
) -> Result<T, Error>
where
    I: Iterator<Item = &'i HeaderValue>,
{
    values.just_one().and_then(decode).ok_or_else(Error::invalid)
}
