//! Polling granularity inference.

use chrono::Duration;

/// Polling resolution implied by a template's placeholders.
///
/// Ordered by resolution: `Minute < Hour < Day`. Walking a query window at
/// anything coarser than the template's finest token would skip partitions;
/// anything finer would double-count them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Granularity {
    Minute,
    Hour,
    Day,
}

impl Granularity {
    /// Step duration when walking a query window.
    pub fn step(&self) -> Duration {
        Duration::minutes(self.minutes())
    }

    /// Step length in minutes.
    pub fn minutes(&self) -> i64 {
        match self {
            Granularity::Minute => 1,
            Granularity::Hour => 60,
            Granularity::Day => 60 * 24,
        }
    }

    /// Monotonic refinement: keep whichever resolution is finer.
    pub(super) fn refine(self, other: Granularity) -> Granularity {
        self.min(other)
    }
}

/// Finest resolution a single format spec asks for.
///
/// `mm` means minutes; any `h` or `H` means hours; everything else is
/// day-resolution. A spec with both (`hh-mm`) resolves to minutes.
pub(super) fn of_spec(spec: &str) -> Granularity {
    if spec.contains("mm") {
        Granularity::Minute
    } else if spec.contains('h') || spec.contains('H') {
        Granularity::Hour
    } else {
        Granularity::Day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_of_spec() {
        assert_eq!(of_spec("yyyy-MM-dd"), Granularity::Day);
        assert_eq!(of_spec("HH"), Granularity::Hour);
        assert_eq!(of_spec("hh"), Granularity::Hour);
        assert_eq!(of_spec("hh-mm"), Granularity::Minute);
        assert_eq!(of_spec("mm"), Granularity::Minute);
    }

    #[test]
    fn test_minutes() {
        assert_eq!(Granularity::Minute.minutes(), 1);
        assert_eq!(Granularity::Hour.minutes(), 60);
        assert_eq!(Granularity::Day.minutes(), 1440);
    }

    #[test]
    fn test_refine_keeps_finest() {
        assert_eq!(
            Granularity::Day.refine(Granularity::Hour),
            Granularity::Hour
        );
        assert_eq!(
            Granularity::Minute.refine(Granularity::Day),
            Granularity::Minute
        );
        assert_eq!(
            Granularity::Hour.refine(Granularity::Hour),
            Granularity::Hour
        );
    }

    #[test]
    fn test_step() {
        assert_eq!(Granularity::Day.step(), Duration::days(1));
        assert_eq!(Granularity::Hour.step(), Duration::hours(1));
        assert_eq!(Granularity::Minute.step(), Duration::minutes(1));
    }
}
