use std::time::SystemTime;

use http::{HeaderName, HeaderValue};

use crate::util::{EntityTag, HttpDate, IterExt as _};
use crate::{Error, HeaderDecode, HeaderEncode, TypedHeader};

/// `If-Range` header, defined in [RFC7233](https://datatracker.ietf.org/doc/html/rfc7233#section-3.2)
///
/// If a client has a partial copy of a representation and wishes to have
/// an up-to-date copy of the entire representation, it could use the
/// Range header field with a conditional GET (using either or both of
/// If-Unmodified-Since and If-Match.)  However, if the precondition
/// fails because the representation has been modified, the client would
/// then have to make a second request to obtain the entire current
/// representation.
///
/// The `If-Range` header field allows a client to \"short-circuit\" the
/// second request.  Informally, its meaning is as follows: if the
/// representation is unchanged, send me the part(s) that I am requesting
/// in Range; otherwise, send me the entire representation.
///
/// The header holds either a date or an entity tag, never both.
///
/// # ABNF
///
/// ```text
/// If-Range = entity-tag / HTTP-date
/// ```
///
/// # Example values
///
/// * `Sat, 29 Oct 1994 19:43:31 GMT`
/// * `\"xyzzy\"`
///
/// # Examples
///
/// ```
/// use http_buildr_headers::{EntityTag, IfRange};
/// use std::time::{SystemTime, Duration};
///
/// let fetched = SystemTime::now() - Duration::from_secs(60 * 60 * 24);
/// let if_range = IfRange::date(fetched);
/// assert!(if_range.entity_tag().is_none());
///
/// let if_range = IfRange::etag(EntityTag::strong("a").unwrap());
/// assert!(if_range.date_value().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IfRange(IfRangeValue);

#[derive(Clone, Debug, PartialEq, Eq)]
enum IfRangeValue {
    Date(HttpDate),
    EntityTag(EntityTag),
}

impl IfRange {
    /// Create an `IfRange` header with an entity tag.
    #[must_use]
    pub fn etag(tag: EntityTag) -> Self {
        Self(IfRangeValue::EntityTag(tag))
    }

    /// Create an `IfRange` header with a date value.
    #[must_use]
    pub fn date(time: SystemTime) -> Self {
        Self(IfRangeValue::Date(time.into()))
    }

    /// The date value, if this header holds the date form.
    #[must_use]
    pub fn date_value(&self) -> Option<SystemTime> {
        match &self.0 {
            IfRangeValue::Date(date) => Some((*date).into()),
            IfRangeValue::EntityTag(_) => None,
        }
    }

    /// The entity tag, if this header holds the entity-tag form.
    #[must_use]
    pub fn entity_tag(&self) -> Option<&EntityTag> {
        match &self.0 {
            IfRangeValue::EntityTag(tag) => Some(tag),
            IfRangeValue::Date(_) => None,
        }
    }
}

impl TypedHeader for IfRange {
    fn name() -> &'static HeaderName {
        &::http::header::IF_RANGE
    }
}

impl HeaderDecode for IfRange {
    fn decode<'i, I: Iterator<Item = &'i HeaderValue>>(values: &mut I) -> Result<Self, Error> {
        let value = values.just_one().ok_or_else(Error::invalid)?;
        if let Some(tag) = EntityTag::from_val(value) {
            return Ok(Self(IfRangeValue::EntityTag(tag)));
        }
        HttpDate::from_val(value)
            .map(|date| Self(IfRangeValue::Date(date)))
            .ok_or_else(Error::invalid)
    }
}

impl HeaderEncode for IfRange {
    fn encode<E: Extend<HeaderValue>>(&self, values: &mut E) {
        let value = match &self.0 {
            IfRangeValue::Date(date) => match HeaderValue::try_from(date) {
                Ok(value) => value,
                Err(err) => {
                    tracing::debug!("failed to encode if-range date as header value: {err}");
                    return;
                }
            },
            IfRangeValue::EntityTag(tag) => tag.into(),
        };
        values.extend(::std::iter::once(value));
    }
}
