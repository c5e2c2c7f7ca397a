use std::fmt;
use std::time::Duration;

/// A non-negative amount of whole seconds,
/// as used by delta-seconds header directives such as `max-age`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Seconds(u64);

impl Seconds {
    /// Create a new [`Seconds`] from whole seconds.
    #[must_use]
    pub const fn new(seconds: u64) -> Self {
        Self(seconds)
    }

    /// Create [`Seconds`] from a [`Duration`],
    /// rounding sub-second precision to the nearest second.
    #[must_use]
    pub fn from_duration_rounded(dur: Duration) -> Self {
        let round_up = dur.subsec_nanos() >= 500_000_000;
        Self(dur.as_secs().saturating_add(u64::from(round_up)))
    }

    /// Amount of seconds as a `u64`.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl From<Seconds> for Duration {
    fn from(secs: Seconds) -> Self {
        Self::from_secs(secs.0)
    }
}

impl fmt::Display for Seconds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_to_nearest_second() {
        assert_eq!(
            Seconds::from_duration_rounded(Duration::from_millis(1499)).as_u64(),
            1
        );
        assert_eq!(
            Seconds::from_duration_rounded(Duration::from_millis(1500)).as_u64(),
            2
        );
        assert_eq!(
            Seconds::from_duration_rounded(Duration::from_secs(20)).as_u64(),
            20
        );
    }
}
