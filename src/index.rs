//! Availability index: which UTC calendar days carry data.

use std::collections::BTreeSet;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::record::IntensityRecord;

/// Truncates an instant to midnight of its UTC calendar day.
pub fn day_floor(instant: DateTime<Utc>) -> DateTime<Utc> {
    instant.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// Sorted, deduplicated UTC calendar days present in the dataset, plus the
/// true (untruncated) min/max instant bounds used to validate manual
/// selections.
///
/// Built once per load, read-only afterward. On empty input the bounds are
/// inverted (`earliest > latest`); `has_data` is the check callers use.
#[derive(Debug, Clone)]
pub struct AvailabilityIndex {
    pub days: Vec<DateTime<Utc>>,
    pub earliest: DateTime<Utc>,
    pub latest: DateTime<Utc>,
}

impl AvailabilityIndex {
    pub fn build(records: &[IntensityRecord]) -> Self {
        let mut days = BTreeSet::new();
        let mut earliest: Option<DateTime<Utc>> = None;
        let mut latest: Option<DateTime<Utc>> = None;
        for rec in records {
            days.insert(rec.instant.date_naive());
            earliest = Some(earliest.map_or(rec.instant, |cur| cur.min(rec.instant)));
            latest = Some(latest.map_or(rec.instant, |cur| cur.max(rec.instant)));
        }
        Self::from_parts(days, earliest, latest)
    }

    /// Assembles the index from accumulators the parse pass already gathered.
    pub fn from_parts(
        days: BTreeSet<NaiveDate>,
        earliest: Option<DateTime<Utc>>,
        latest: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            days: days
                .into_iter()
                .map(|d| d.and_time(NaiveTime::MIN).and_utc())
                .collect(),
            earliest: earliest.unwrap_or(DateTime::<Utc>::MAX_UTC),
            latest: latest.unwrap_or(DateTime::<Utc>::MIN_UTC),
        }
    }

    pub fn has_data(&self) -> bool {
        self.earliest <= self.latest
    }

    /// Clamps a manual selection into the valid bounds. Out-of-range targets
    /// are redirected to the nearest bound rather than rejected; with no data
    /// the target passes through untouched.
    pub fn clamp(&self, target: DateTime<Utc>) -> DateTime<Utc> {
        if !self.has_data() {
            return target;
        }
        target.max(self.earliest).min(self.latest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn record(instant: DateTime<Utc>) -> IntensityRecord {
        IntensityRecord {
            country: "Belgium".to_string(),
            zone_name: "Belgium".to_string(),
            zone_id: None,
            instant,
            direct_intensity: 100.0,
            lca_intensity: 140.0,
            low_carbon_pct: 0.0,
            renewable_pct: 0.0,
        }
    }

    fn at(y: i32, mo: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_days_sorted_and_deduped() {
        let records = vec![
            record(at(2023, 2, 21, 5)),
            record(at(2023, 2, 20, 2)),
            record(at(2023, 2, 20, 14)),
            record(at(2023, 2, 25, 9)),
        ];
        let index = AvailabilityIndex::build(&records);
        assert_eq!(
            index.days,
            vec![at(2023, 2, 20, 0), at(2023, 2, 21, 0), at(2023, 2, 25, 0)]
        );
    }

    #[test]
    fn test_bounds_are_true_min_max_not_truncated() {
        let records = vec![record(at(2023, 2, 20, 14)), record(at(2023, 2, 21, 5))];
        let index = AvailabilityIndex::build(&records);
        assert_eq!(index.earliest, at(2023, 2, 20, 14));
        assert_eq!(index.latest, at(2023, 2, 21, 5));
        assert!(index.has_data());
    }

    #[test]
    fn test_empty_input_inverts_bounds() {
        let index = AvailabilityIndex::build(&[]);
        assert!(index.days.is_empty());
        assert!(index.earliest > index.latest);
        assert!(!index.has_data());
    }

    #[test]
    fn test_clamp_redirects_out_of_range() {
        let records = vec![record(at(2023, 2, 20, 14)), record(at(2023, 2, 21, 5))];
        let index = AvailabilityIndex::build(&records);
        assert_eq!(index.clamp(at(2020, 1, 1, 0)), index.earliest);
        assert_eq!(index.clamp(at(2024, 1, 1, 0)), index.latest);
        assert_eq!(index.clamp(at(2023, 2, 20, 20)), at(2023, 2, 20, 20));
    }

    #[test]
    fn test_day_floor() {
        assert_eq!(day_floor(at(2023, 2, 20, 14)), at(2023, 2, 20, 0));
    }
}
