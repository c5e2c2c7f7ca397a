use std::fmt;
use std::str::FromStr;

use crate::Error;

/// A quality value, as used in content negotiation.
///
/// Quality values are rendered as floats in `[0, 1]` with at most three
/// decimals, so internally they are stored as thousandths.
///
/// # ABNF
///
/// ```text
/// weight = OWS ";" OWS "q=" qvalue
/// qvalue = ( "0" [ "." 0*3DIGIT ] )
///        / ( "1" [ "." 0*3("0") ] )
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Quality(u16);

/// Error returned for a quality outside of `[0, 1]`,
/// or a string which is not a valid `qvalue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("quality value must be within [0, 1] with at most three decimals")]
pub struct InvalidQuality;

impl Quality {
    /// The highest quality, `q=1`.
    pub const ONE: Self = Self(1000);
    /// The lowest quality, `q=0`, meaning "not acceptable".
    pub const ZERO: Self = Self(0);

    /// Create a [`Quality`] from thousandths, clamped to `1000`.
    #[must_use]
    pub fn from_thousandths(thousandths: u16) -> Self {
        Self(thousandths.min(1000))
    }

    /// The quality in thousandths, within `[0, 1000]`.
    #[must_use]
    pub fn as_thousandths(self) -> u16 {
        self.0
    }

    /// The quality as a float within `[0, 1]`.
    #[must_use]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 1000.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::ONE
    }
}

impl TryFrom<f64> for Quality {
    type Error = InvalidQuality;

    /// Converts a float within `[0, 1]`, rounded to three decimals.
    fn try_from(value: f64) -> Result<Self, Self::Error> {
        if !(0.0..=1.0).contains(&value) {
            return Err(InvalidQuality);
        }
        Ok(Self((value * 1000.0).round() as u16))
    }
}

impl FromStr for Quality {
    type Err = InvalidQuality;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        if frac.len() > 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
            return Err(InvalidQuality);
        }

        let mut digits = [b'0'; 3];
        digits[..frac.len()].copy_from_slice(frac.as_bytes());
        let thousandths = digits
            .iter()
            .fold(0u16, |acc, d| acc * 10 + u16::from(d - b'0'));

        match int {
            "0" => Ok(Self(thousandths)),
            "1" if thousandths == 0 => Ok(Self::ONE),
            _ => Err(InvalidQuality),
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            1000 => f.write_str("1"),
            0 => f.write_str("0"),
            n => {
                let decimals = format!("{n:03}");
                write!(f, "0.{}", decimals.trim_end_matches('0'))
            }
        }
    }
}

/// A value paired with an optional [`Quality`].
///
/// A missing quality is not the same as `q=1`: it means no `q`
/// parameter is present at all, even though recipients weigh it as `1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct QualityValue<V> {
    value: V,
    quality: Option<Quality>,
}

impl<V> QualityValue<V> {
    /// Create a new [`QualityValue`] with an explicit quality.
    pub const fn new(value: V, quality: Quality) -> Self {
        Self {
            value,
            quality: Some(quality),
        }
    }

    /// Create a new [`QualityValue`] without a quality parameter.
    pub const fn new_value(value: V) -> Self {
        Self {
            value,
            quality: None,
        }
    }

    /// Set the quality of this [`QualityValue`].
    #[must_use]
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.quality = Some(quality);
        self
    }

    /// The value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// Consume self into its value.
    pub fn into_value(self) -> V {
        self.value
    }

    /// The explicit quality, `None` if no `q` parameter was given.
    pub fn quality(&self) -> Option<Quality> {
        self.quality
    }

    /// The quality recipients weigh this value with,
    /// which defaults to [`Quality::ONE`] when not explicitly given.
    pub fn effective_quality(&self) -> Quality {
        self.quality.unwrap_or_default()
    }
}

impl<V> From<V> for QualityValue<V> {
    fn from(value: V) -> Self {
        Self::new_value(value)
    }
}

impl<V: fmt::Display> fmt::Display for QualityValue<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.value, f)?;
        match self.quality {
            Some(quality) => write!(f, "; q={quality}"),
            None => Ok(()),
        }
    }
}

impl<V: FromStr> FromStr for QualityValue<V> {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut raw = s.trim();
        let mut quality = None;

        if let Some((head, param)) = raw.rsplit_once(';') {
            let param = param.trim();
            if let Some(q) = param.strip_prefix("q=").or_else(|| param.strip_prefix("Q=")) {
                quality = Some(q.trim().parse().map_err(Error::invalid_from)?);
                raw = head.trim_end();
            }
        }

        let value = raw.parse().map_err(Error::invalid_from)?;
        Ok(Self { value, quality })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quality_from_f64() {
        assert_eq!(Quality::try_from(0.2).unwrap().as_thousandths(), 200);
        assert_eq!(Quality::try_from(1.0).unwrap(), Quality::ONE);
        assert_eq!(Quality::try_from(0.0).unwrap(), Quality::ZERO);
        assert_eq!(Quality::try_from(0.12345).unwrap().as_thousandths(), 123);
        assert_eq!(Quality::try_from(1.5), Err(InvalidQuality));
        assert_eq!(Quality::try_from(-0.1), Err(InvalidQuality));
        assert_eq!(Quality::try_from(f64::NAN), Err(InvalidQuality));
    }

    #[test]
    fn quality_parse() {
        assert_eq!("1".parse::<Quality>().unwrap(), Quality::ONE);
        assert_eq!("1.000".parse::<Quality>().unwrap(), Quality::ONE);
        assert_eq!("0".parse::<Quality>().unwrap(), Quality::ZERO);
        assert_eq!("0.5".parse::<Quality>().unwrap().as_thousandths(), 500);
        assert_eq!("0.25".parse::<Quality>().unwrap().as_thousandths(), 250);
        assert_eq!("0.001".parse::<Quality>().unwrap().as_thousandths(), 1);

        for invalid in ["1.1", "0.1234", "2", "", ".5", "0.x", "-0"] {
            assert_eq!(invalid.parse::<Quality>(), Err(InvalidQuality), "{invalid}");
        }
    }

    #[test]
    fn quality_display() {
        assert_eq!(Quality::ONE.to_string(), "1");
        assert_eq!(Quality::ZERO.to_string(), "0");
        assert_eq!(Quality::from_thousandths(200).to_string(), "0.2");
        assert_eq!(Quality::from_thousandths(125).to_string(), "0.125");
        assert_eq!(Quality::from_thousandths(5000), Quality::ONE);
    }

    #[quickcheck_macros::quickcheck]
    fn quality_display_parses_back(thousandths: u16) -> bool {
        let quality = Quality::from_thousandths(thousandths);
        quality.to_string().parse::<Quality>() == Ok(quality)
    }

    #[test]
    fn quality_value_parse() {
        let qv: QualityValue<String> = "gzip; q=0.8".parse().unwrap();
        assert_eq!(qv.value(), "gzip");
        assert_eq!(qv.quality(), Some(Quality::from_thousandths(800)));

        let qv: QualityValue<String> = "gzip".parse().unwrap();
        assert_eq!(qv.quality(), None);
        assert_eq!(qv.effective_quality(), Quality::ONE);

        assert!("gzip; q=2".parse::<QualityValue<String>>().is_err());
    }

    #[test]
    fn quality_value_display() {
        let qv = QualityValue::new("br", Quality::from_thousandths(500));
        assert_eq!(qv.to_string(), "br; q=0.5");
        assert_eq!(QualityValue::new_value("br").to_string(), "br");
    }
}
