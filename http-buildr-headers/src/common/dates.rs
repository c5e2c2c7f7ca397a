//! Headers holding a single HTTP-date.

use std::time::SystemTime;

http_date_header! {
    /// `Date` header, defined in [RFC7231](https://datatracker.ietf.org/doc/html/rfc7231#section-7.1.1.2)
    ///
    /// The `Date` header field represents the date and time at which the
    /// message was originated.
    ///
    /// ## ABNF
    ///
    /// ```text
    /// Date = HTTP-date
    /// ```
    ///
    /// ## Example values
    ///
    /// * `Tue, 15 Nov 1994 08:12:31 GMT`
    ///
    /// # Example
    ///
    /// ```
    /// use http_buildr_headers::Date;
    /// use std::time::SystemTime;
    ///
    /// let date = Date::from(SystemTime::now());
    /// ```
    Date,
    name: DATE
}

http_date_header! {
    /// `If-Modified-Since` header, defined in
    /// [RFC7232](https://datatracker.ietf.org/doc/html/rfc7232#section-3.3)
    ///
    /// The `If-Modified-Since` header field makes a GET or HEAD request
    /// method conditional on the selected representation's modification
    /// date being more recent than the date provided in the field-value.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Modified-Since = HTTP-date
    /// ```
    ///
    /// # Example values
    ///
    /// * `Sat, 29 Oct 1994 19:43:31 GMT`
    IfModifiedSince,
    name: IF_MODIFIED_SINCE
}

http_date_header! {
    /// `If-Unmodified-Since` header, defined in
    /// [RFC7232](https://datatracker.ietf.org/doc/html/rfc7232#section-3.4)
    ///
    /// The `If-Unmodified-Since` header field makes the request method
    /// conditional on the selected representation's last modification date
    /// being earlier than or equal to the date provided in the field-value.
    ///
    /// # ABNF
    ///
    /// ```text
    /// If-Unmodified-Since = HTTP-date
    /// ```
    ///
    /// # Example
    ///
    /// ```
    /// use http_buildr_headers::IfUnmodifiedSince;
    /// use std::time::{SystemTime, Duration};
    ///
    /// let fetched = SystemTime::now() - Duration::from_secs(60 * 60 * 24);
    /// let header = IfUnmodifiedSince::from(fetched);
    /// assert!(header.precondition_passes(fetched));
    /// ```
    IfUnmodifiedSince,
    name: IF_UNMODIFIED_SINCE
}

impl IfModifiedSince {
    /// Whether a resource last modified at `last_modified`
    /// is newer than this date, compared in whole seconds.
    #[must_use]
    pub fn is_modified(&self, last_modified: SystemTime) -> bool {
        self.0 < last_modified.into()
    }
}

impl IfUnmodifiedSince {
    /// Whether a resource last modified at `last_modified`
    /// is not newer than this date, compared in whole seconds.
    #[must_use]
    pub fn precondition_passes(&self, last_modified: SystemTime) -> bool {
        self.0 >= last_modified.into()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{test_decode, test_encode};
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    // 784887151 = Tue, 15 Nov 1994 08:12:31 GMT
    const NOV_15: u64 = 784_887_151;

    #[test]
    fn encode_imf_fixdate() {
        let date = Date::from(UNIX_EPOCH + Duration::from_secs(NOV_15));
        assert_eq!(test_encode(date)["date"], "Tue, 15 Nov 1994 08:12:31 GMT");
    }

    #[test]
    fn decode_obsolete_formats() {
        let expected = IfModifiedSince::from(UNIX_EPOCH + Duration::from_secs(NOV_15));
        for value in [
            "Tuesday, 15-Nov-94 08:12:31 GMT",
            "Tue Nov 15 08:12:31 1994",
        ] {
            assert_eq!(test_decode::<IfModifiedSince>(&[value]), Some(expected), "{value}");
        }
    }

    #[test]
    fn decode_multiple_values_is_invalid() {
        assert_eq!(
            test_decode::<Date>(&[
                "Tue, 15 Nov 1994 08:12:31 GMT",
                "Tue, 15 Nov 1994 08:12:31 GMT"
            ]),
            None
        );
    }

    #[test]
    fn sub_second_precision_is_dropped() {
        let time = UNIX_EPOCH + Duration::from_millis(NOV_15 * 1000 + 999);
        let header = IfUnmodifiedSince::from(time);
        assert_eq!(
            SystemTime::from(header),
            UNIX_EPOCH + Duration::from_secs(NOV_15)
        );
    }

    #[test]
    fn is_modified() {
        let newer = SystemTime::now();
        let exact = newer - Duration::from_secs(2);
        let older = newer - Duration::from_secs(4);

        let if_mod = IfModifiedSince::from(exact);
        assert!(if_mod.is_modified(newer));
        assert!(!if_mod.is_modified(exact));
        assert!(!if_mod.is_modified(older));
    }

    #[test]
    fn precondition_passes() {
        let newer = SystemTime::now();
        let exact = newer - Duration::from_secs(2);
        let older = newer - Duration::from_secs(4);

        let if_unmod = IfUnmodifiedSince::from(exact);
        assert!(!if_unmod.precondition_passes(newer));
        assert!(if_unmod.precondition_passes(exact));
        assert!(if_unmod.precondition_passes(older));
    }
}
