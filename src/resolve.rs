//! Nearest-instant resolution against the availability index.
//!
//! Pure functions over the loaded record set; no hidden dataset handle. The
//! discrepancy between the requested instant and the resolved day is part of
//! the contract so consumers can disclose "this is approximate".

use chrono::{DateTime, Timelike, Utc};

use crate::index::day_floor;
use crate::record::IntensityRecord;

/// Nearest available day plus how far it sits from the requested instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayMatch {
    pub day: DateTime<Utc>,
    pub diff_minutes: i64,
}

/// Finds the indexed day closest to `target`, or `None` on an empty index.
///
/// The scan is linear; the index holds distinct calendar days, far too few
/// for sublinear search to matter. Exact ties resolve to the earlier day, so
/// the result does not depend on the ordering of `days`.
pub fn nearest_day(target: DateTime<Utc>, days: &[DateTime<Utc>]) -> Option<DayMatch> {
    let mut best: Option<DayMatch> = None;
    for &day in days {
        let diff_minutes = (target - day).num_minutes().abs();
        let better = match best {
            None => true,
            Some(b) => {
                diff_minutes < b.diff_minutes || (diff_minutes == b.diff_minutes && day < b.day)
            }
        };
        if better {
            best = Some(DayMatch { day, diff_minutes });
        }
    }
    best
}

/// Picks the record for `country` on the calendar day of `day` whose
/// hour-of-day is closest to `target_hour`. Ties keep the first candidate in
/// record order. `None` when no record matches country and day.
pub fn nearest_hour_record<'a>(
    records: &'a [IntensityRecord],
    country: &str,
    day: DateTime<Utc>,
    target_hour: u32,
) -> Option<&'a IntensityRecord> {
    let day = day_floor(day);
    let mut best: Option<(&IntensityRecord, i64)> = None;
    for rec in records {
        if rec.country != country || rec.day() != day {
            continue;
        }
        let diff = (rec.hour() as i64 - target_hour as i64).abs();
        match best {
            Some((_, best_diff)) if diff >= best_diff => {}
            _ => best = Some((rec, diff)),
        }
    }
    best.map(|(rec, _)| rec)
}

/// A fully resolved "what does the map show for this region at this instant"
/// query.
#[derive(Debug)]
pub struct Resolution<'a> {
    pub day: DateTime<Utc>,
    pub diff_minutes: i64,
    /// `None` when the resolved day has no readings for the country.
    pub record: Option<&'a IntensityRecord>,
}

/// Resolves the nearest indexed day for `target`, then the nearest hour for
/// `country` within that day. The two steps are always composed this way by
/// consumers.
pub fn resolve_instant<'a>(
    records: &'a [IntensityRecord],
    days: &[DateTime<Utc>],
    country: &str,
    target: DateTime<Utc>,
) -> Option<Resolution<'a>> {
    let matched = nearest_day(target, days)?;
    let record = nearest_hour_record(records, country, matched.day, target.hour());
    Some(Resolution {
        day: matched.day,
        diff_minutes: matched.diff_minutes,
        record,
    })
}
