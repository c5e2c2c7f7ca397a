use std::fmt::Display;

use http::HeaderValue;
use http::header::InvalidHeaderValue;

/// Render a [`Display`] value as a [`HeaderValue`].
pub(crate) fn fmt<T: Display>(fmt: T) -> Result<HeaderValue, InvalidHeaderValue> {
    HeaderValue::from_str(&fmt.to_string())
}
