//! Relative time-window filtering.

use chrono::{DateTime, Duration, Months, Utc};

use crate::record::IntensityRecord;

/// Named relative windows offered by the range selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeRange {
    Last72Hours,
    Last3Months,
    Last12Months,
    All,
}

impl TimeRange {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "72h" => Some(TimeRange::Last72Hours),
            "3mo" => Some(TimeRange::Last3Months),
            "12mo" => Some(TimeRange::Last12Months),
            "all" => Some(TimeRange::All),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Last72Hours => "72h",
            TimeRange::Last3Months => "3mo",
            TimeRange::Last12Months => "12mo",
            TimeRange::All => "all",
        }
    }

    /// Lower bound of the window, `None` for `All`. Month-based windows use
    /// calendar offsets, not fixed-length approximations.
    pub fn start_from(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            TimeRange::Last72Hours => Some(now - Duration::hours(72)),
            TimeRange::Last3Months => Some(
                now.checked_sub_months(Months::new(3))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            TimeRange::Last12Months => Some(
                now.checked_sub_months(Months::new(12))
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            ),
            TimeRange::All => None,
        }
    }
}

/// Stable pure filter: keeps records with `instant >= start` in their
/// original relative order. Callable repeatedly as the user switches ranges
/// or as `now` advances under live mode.
pub fn filter_by_range<'a>(
    records: &'a [IntensityRecord],
    range: TimeRange,
    now: DateTime<Utc>,
) -> Vec<&'a IntensityRecord> {
    match range.start_from(now) {
        Some(start) => records.iter().filter(|r| r.instant >= start).collect(),
        None => records.iter().collect(),
    }
}
