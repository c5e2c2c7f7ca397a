use std::fmt;
use std::str::FromStr;

use http::HeaderValue;
use http::header::InvalidHeaderValue;

const WEAK_PREFIX: &[u8] = b"W/";

/// An entity tag, defined in [RFC7232](https://tools.ietf.org/html/rfc7232#section-2.3)
///
/// An opaque validator, quoted, optionally marked weak with a
/// case-sensitive `W/` prefix: `"xyzzy"` is strong, `W/"xyzzy"` is weak.
///
/// # ABNF
///
/// ```text
/// entity-tag = [ weak ] opaque-tag
/// weak       = %x57.2F ; "W/", case-sensitive
/// opaque-tag = DQUOTE *etagc DQUOTE
/// etagc      = %x21 / %x23-7E / obs-text
///            ; VCHAR except double quotes, plus obs-text
/// ```
///
/// # Comparison
///
/// `==` compares tags as written, weakness included. Use
/// [`EntityTag::strong_eq`] or [`EntityTag::weak_eq`] for the
/// comparison functions of RFC7232 section 2.3.2.
///
/// # Examples
///
/// ```
/// use http_buildr_headers::EntityTag;
///
/// let strong: EntityTag = "\"a\"".parse().unwrap();
/// assert_eq!(strong, EntityTag::strong("a").unwrap());
///
/// let weak = EntityTag::weak("a").unwrap();
/// assert!(weak.weak_eq(&strong));
/// assert!(!weak.strong_eq(&strong));
/// ```
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct EntityTag {
    weak: bool,
    raw: HeaderValue,
}

/// Error returned for a string which is not a valid entity tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("entity tag is not valid")]
pub struct InvalidEntityTag;

impl From<InvalidHeaderValue> for InvalidEntityTag {
    fn from(err: InvalidHeaderValue) -> Self {
        tracing::trace!("entity tag is not a valid header value: {err}");
        Self
    }
}

impl EntityTag {
    /// Create a strong entity tag `"<tag>"` from its opaque tag.
    pub fn strong(tag: &str) -> Result<Self, InvalidEntityTag> {
        Self::parse(HeaderValue::try_from(format!("\"{tag}\""))?)
    }

    /// Create a weak entity tag `W/"<tag>"` from its opaque tag.
    pub fn weak(tag: &str) -> Result<Self, InvalidEntityTag> {
        Self::parse(HeaderValue::try_from(format!("W/\"{tag}\""))?)
    }

    /// The opaque tag, without quotes and weakness indicator.
    #[must_use]
    pub fn tag(&self) -> &[u8] {
        opaque_tag(self.raw.as_bytes()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_weak(&self) -> bool {
        self.weak
    }

    /// Strong comparison: neither tag is weak and the opaque tags are equal.
    #[must_use]
    pub fn strong_eq(&self, other: &Self) -> bool {
        !self.weak && !other.weak && self.tag() == other.tag()
    }

    /// Weak comparison: the opaque tags are equal, weakness ignored.
    #[must_use]
    pub fn weak_eq(&self, other: &Self) -> bool {
        self.tag() == other.tag()
    }

    pub(crate) fn from_val(val: &HeaderValue) -> Option<Self> {
        Self::parse(val.clone()).ok()
    }

    fn parse(raw: HeaderValue) -> Result<Self, InvalidEntityTag> {
        let bytes = raw.as_bytes();
        let weak = bytes.starts_with(WEAK_PREFIX);
        match opaque_tag(bytes) {
            Some(tag) if tag.iter().copied().all(is_etagc) => Ok(Self { weak, raw }),
            _ => Err(InvalidEntityTag),
        }
    }
}

/// The bytes between the quotes of a (weak) opaque-tag.
fn opaque_tag(bytes: &[u8]) -> Option<&[u8]> {
    let quoted = bytes.strip_prefix(WEAK_PREFIX).unwrap_or(bytes);
    quoted.strip_prefix(b"\"")?.strip_suffix(b"\"")
}

fn is_etagc(c: u8) -> bool {
    c == 0x21 || (0x23..=0x7e).contains(&c) || c >= 0x80
}

impl FromStr for EntityTag {
    type Err = InvalidEntityTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(HeaderValue::from_str(s)?)
    }
}

impl fmt::Debug for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.raw, f)
    }
}

impl fmt::Display for EntityTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(self.raw.as_bytes()))
    }
}

impl From<EntityTag> for HeaderValue {
    fn from(tag: EntityTag) -> Self {
        tag.raw
    }
}

impl From<&EntityTag> for HeaderValue {
    fn from(tag: &EntityTag) -> Self {
        tag.raw.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(slice: &[u8]) -> Option<EntityTag> {
        EntityTag::from_val(&HeaderValue::from_bytes(slice).ok()?)
    }

    #[test]
    fn parse_strong_weak_and_empty() {
        let strong = parse(b"\"foobar\"").unwrap();
        assert!(!strong.is_weak());
        assert_eq!(strong.tag(), b"foobar");

        let weak = parse(b"W/\"weaktag\"").unwrap();
        assert!(weak.is_weak());
        assert_eq!(weak.tag(), b"weaktag");

        assert_eq!(parse(b"\"\"").unwrap().tag(), b"");
        assert_eq!(parse(b"\"caf\xc3\xa9\"").unwrap().tag(), "café".as_bytes());
    }

    #[test]
    fn parse_failures() {
        for invalid in [
            &b"no-dquote"[..],
            b"w/\"lowercase-weak\"",
            b"W/\"",
            b"\"",
            b"",
            b"\"unmatched",
            b"unmatched\"",
            b"\"inner\"quote\"",
            b"\"space inside\"",
        ] {
            assert_eq!(parse(invalid), None, "{}", String::from_utf8_lossy(invalid));
        }
    }

    #[test]
    fn constructors() {
        assert_eq!(EntityTag::strong("a").unwrap().to_string(), "\"a\"");
        assert_eq!(EntityTag::weak("a").unwrap().to_string(), "W/\"a\"");
        assert_eq!(EntityTag::strong("in\"valid"), Err(InvalidEntityTag));
        assert_eq!(EntityTag::weak("new\nline"), Err(InvalidEntityTag));
        assert_eq!("a".parse::<EntityTag>(), Err(InvalidEntityTag));
    }

    #[test]
    fn strong_and_weak_comparison() {
        let weak_1 = EntityTag::weak("1").unwrap();
        let weak_2 = EntityTag::weak("2").unwrap();
        let strong_1 = EntityTag::strong("1").unwrap();

        let cases = [
            (&weak_1, &weak_1, false, true),
            (&weak_1, &weak_2, false, false),
            (&weak_1, &strong_1, false, true),
            (&strong_1, &strong_1, true, true),
        ];
        for (a, b, strong, weak) in cases {
            assert_eq!(a.strong_eq(b), strong, "{a} {b}");
            assert_eq!(a.weak_eq(b), weak, "{a} {b}");
        }
    }
}
