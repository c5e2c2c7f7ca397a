use http::{HeaderName, HeaderValue, Uri};

use crate::BuildError;

/// A trait to try to convert some type into a request target [`Uri`].
///
/// Strings are parsed using the [`Uri`] parser: authority, path and
/// query are kept as given. Relative targets are allowed.
///
/// This trait is “sealed”, such that only types within http-buildr can implement it.
pub trait IntoTarget: private::IntoTargetSealed {}

impl IntoTarget for Uri {}
impl IntoTarget for &Uri {}
impl IntoTarget for &str {}
impl IntoTarget for String {}
impl IntoTarget for &String {}

/// A trait to try to convert some type into a [`HeaderName`].
///
/// This trait is “sealed”, such that only types within http-buildr can implement it.
pub trait IntoHeaderName: private::IntoHeaderNameSealed {}

impl IntoHeaderName for HeaderName {}
impl IntoHeaderName for &HeaderName {}
impl IntoHeaderName for &str {}
impl IntoHeaderName for String {}
impl IntoHeaderName for &String {}
impl IntoHeaderName for &[u8] {}

/// A trait to try to convert some type into a [`HeaderValue`].
///
/// This trait is “sealed”, such that only types within http-buildr can implement it.
pub trait IntoHeaderValue: private::IntoHeaderValueSealed {}

impl IntoHeaderValue for HeaderValue {}
impl IntoHeaderValue for &HeaderValue {}
impl IntoHeaderValue for &str {}
impl IntoHeaderValue for String {}
impl IntoHeaderValue for &String {}
impl IntoHeaderValue for &[u8] {}

pub(crate) mod private {
    use super::*;

    pub trait IntoTargetSealed {
        fn into_target(self) -> Result<Uri, BuildError>;
    }

    impl IntoTargetSealed for Uri {
        fn into_target(self) -> Result<Uri, BuildError> {
            Ok(self)
        }
    }

    impl IntoTargetSealed for &Uri {
        fn into_target(self) -> Result<Uri, BuildError> {
            Ok(self.clone())
        }
    }

    impl IntoTargetSealed for &str {
        fn into_target(self) -> Result<Uri, BuildError> {
            self.parse().map_err(|source| BuildError::InvalidUri {
                input: self.to_owned(),
                source,
            })
        }
    }

    impl IntoTargetSealed for String {
        fn into_target(self) -> Result<Uri, BuildError> {
            match Uri::try_from(self.as_str()) {
                Ok(uri) => Ok(uri),
                Err(source) => Err(BuildError::InvalidUri {
                    input: self,
                    source,
                }),
            }
        }
    }

    impl IntoTargetSealed for &String {
        fn into_target(self) -> Result<Uri, BuildError> {
            self.as_str().into_target()
        }
    }

    pub trait IntoHeaderNameSealed {
        fn into_header_name(self) -> Result<HeaderName, BuildError>;
    }

    impl IntoHeaderNameSealed for HeaderName {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            Ok(self)
        }
    }

    impl IntoHeaderNameSealed for &HeaderName {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            Ok(self.clone())
        }
    }

    impl IntoHeaderNameSealed for &str {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            let name = self.parse::<HeaderName>()?;
            Ok(name)
        }
    }

    impl IntoHeaderNameSealed for String {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            self.as_str().into_header_name()
        }
    }

    impl IntoHeaderNameSealed for &String {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            self.as_str().into_header_name()
        }
    }

    impl IntoHeaderNameSealed for &[u8] {
        fn into_header_name(self) -> Result<HeaderName, BuildError> {
            let name = HeaderName::from_bytes(self)?;
            Ok(name)
        }
    }

    pub trait IntoHeaderValueSealed {
        fn into_header_value(self) -> Result<HeaderValue, BuildError>;
    }

    impl IntoHeaderValueSealed for HeaderValue {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            Ok(self)
        }
    }

    impl IntoHeaderValueSealed for &HeaderValue {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            Ok(self.clone())
        }
    }

    impl IntoHeaderValueSealed for &str {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            let value = self.parse::<HeaderValue>()?;
            Ok(value)
        }
    }

    impl IntoHeaderValueSealed for String {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            let value = HeaderValue::try_from(self)?;
            Ok(value)
        }
    }

    impl IntoHeaderValueSealed for &String {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            self.as_str().into_header_value()
        }
    }

    impl IntoHeaderValueSealed for &[u8] {
        fn into_header_value(self) -> Result<HeaderValue, BuildError> {
            let value = HeaderValue::from_bytes(self)?;
            Ok(value)
        }
    }
}
