use std::fmt;
use std::str::FromStr;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use http::HeaderValue;
use http::header::InvalidHeaderValue;

use crate::Error;

/// A timestamp with HTTP formatting and parsing.
///
/// The value has a precision of whole seconds, which is all the
/// HTTP-date format (RFC 7231, section 7.1.1.1) can express.
///
/// Times before the unix epoch are clamped to the epoch,
/// times after the year 9999 are clamped to its last second,
/// as those cannot be represented as an HTTP-date.
//
//   Prior to 1995, there were three different formats commonly used by
//   servers to communicate timestamps.  For compatibility with old
//   implementations, all three are defined here.  The preferred format is
//   a fixed-length and single-zone subset of the date and time
//   specification used by the Internet Message Format [RFC5322].
//
//     HTTP-date    = IMF-fixdate / obs-date
//
//   An example of the preferred format is
//
//     Sun, 06 Nov 1994 08:49:37 GMT    ; IMF-fixdate
//
//   Examples of the two obsolete formats are
//
//     Sunday, 06-Nov-94 08:49:37 GMT   ; obsolete RFC 850 format
//     Sun Nov  6 08:49:37 1994         ; ANSI C's asctime() format
//
//   A recipient that parses a timestamp value in an HTTP header field
//   MUST accept all three HTTP-date formats.  When a sender generates a
//   header field that contains one or more timestamps defined as
//   HTTP-date, the sender MUST generate those timestamps in the
//   IMF-fixdate format.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HttpDate(httpdate::HttpDate);

// 9999-12-31T23:59:59Z
const MAX_SECS_SINCE_EPOCH: u64 = 253_402_300_799;

impl HttpDate {
    pub(crate) fn from_val(val: &HeaderValue) -> Option<Self> {
        val.to_str().ok()?.parse().ok()
    }
}

impl fmt::Debug for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl fmt::Display for HttpDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl TryFrom<&HttpDate> for HeaderValue {
    type Error = InvalidHeaderValue;

    fn try_from(date: &HttpDate) -> Result<Self, Self::Error> {
        super::fmt(date)
    }
}

impl FromStr for HttpDate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        httpdate::HttpDate::from_str(s)
            .map(HttpDate)
            .map_err(Error::invalid_from)
    }
}

impl From<SystemTime> for HttpDate {
    fn from(sys: SystemTime) -> Self {
        let clamped = match sys.duration_since(UNIX_EPOCH) {
            Ok(dur) if dur.as_secs() > MAX_SECS_SINCE_EPOCH => {
                UNIX_EPOCH + Duration::from_secs(MAX_SECS_SINCE_EPOCH)
            }
            Ok(_) => sys,
            Err(_) => UNIX_EPOCH,
        };
        Self(clamped.into())
    }
}

impl From<HttpDate> for SystemTime {
    fn from(date: HttpDate) -> Self {
        Self::from(date.0)
    }
}
