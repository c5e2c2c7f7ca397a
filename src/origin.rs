use http::{Method, Request};

use crate::BuildError;
use crate::target::IntoTarget;

/// Extends a [`Method`] with the ability to start a [`Request`].
pub trait MethodExt: sealed::Sealed {
    /// Start a [`Request`] using this method and the given target.
    ///
    /// The request has an empty header map and a unit body,
    /// which can be replaced using [`Request::map`].
    ///
    /// # Errors
    ///
    /// This method fails whenever the supplied target cannot be parsed as a [`Uri`].
    ///
    /// [`Uri`]: http::Uri
    fn to(self, target: impl IntoTarget) -> Result<Request<()>, BuildError>;
}

impl MethodExt for Method {
    fn to(self, target: impl IntoTarget) -> Result<Request<()>, BuildError> {
        request(self, target)
    }
}

/// Start a [`Request`] using the given method and target.
///
/// # Errors
///
/// This function fails whenever the supplied target cannot be parsed as a [`Uri`].
///
/// [`Uri`]: http::Uri
pub fn request(method: Method, target: impl IntoTarget) -> Result<Request<()>, BuildError> {
    let uri = target.into_target()?;
    tracing::trace!(%method, %uri, "originate request");

    let mut req = Request::new(());
    *req.method_mut() = method;
    *req.uri_mut() = uri;
    Ok(req)
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for ::http::Method {}
}
