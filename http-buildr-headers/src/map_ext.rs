use http::{HeaderMap, HeaderName, HeaderValue};

use crate::{HeaderDecode, HeaderEncode, TypedHeader};

use super::Error;

/// An extension trait adding "typed" methods to `http::HeaderMap`.
pub trait HeaderMapExt: self::sealed::Sealed {
    /// Inserts the typed header into this `HeaderMap`.
    ///
    /// Any values previously stored under the same name are replaced,
    /// as soon as the header produced at least one value.
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode;

    /// Tries to find the header by name, and then decode it into `H`.
    fn typed_try_get<H>(&self) -> Result<Option<H>, Error>
    where
        H: HeaderDecode;

    /// Removes all values stored under the name of `H`,
    /// returning `true` if anything was removed.
    fn typed_remove<H>(&mut self) -> bool
    where
        H: TypedHeader;
}

impl HeaderMapExt for HeaderMap {
    fn typed_insert<H>(&mut self, header: H)
    where
        H: HeaderEncode,
    {
        let mut values = ToValues {
            map: self,
            name: H::name(),
            first: true,
        };
        header.encode(&mut values);
    }

    fn typed_get<H>(&self) -> Option<H>
    where
        H: HeaderDecode,
    {
        HeaderMapExt::typed_try_get(self).unwrap_or(None)
    }

    fn typed_try_get<H>(&self) -> Result<Option<H>, Error>
    where
        H: HeaderDecode,
    {
        let mut values = self.get_all(H::name()).iter();
        if values.size_hint() == (0, Some(0)) {
            Ok(None)
        } else {
            H::decode(&mut values).map(Some)
        }
    }

    fn typed_remove<H>(&mut self) -> bool
    where
        H: TypedHeader,
    {
        self.remove(H::name()).is_some()
    }
}

struct ToValues<'a> {
    map: &'a mut HeaderMap,
    name: &'static HeaderName,
    first: bool,
}

impl Extend<HeaderValue> for ToValues<'_> {
    fn extend<T: IntoIterator<Item = HeaderValue>>(&mut self, iter: T) {
        for value in iter {
            if std::mem::take(&mut self.first) {
                self.map.insert(self.name, value);
            } else {
                self.map.append(self.name, value);
            }
        }
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for ::http::HeaderMap {}
}
