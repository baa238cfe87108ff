//! Typed dataset rows and the positional normalizer.

use chrono::{DateTime, NaiveTime, Timelike, Utc};

use crate::schema::DatasetSchema;
use crate::timeparse;

/// One normalized carbon-intensity reading.
///
/// `direct_intensity` and `lca_intensity` keep `NaN` as the missing-value
/// sentinel; a record with unknown intensity is still temporally valid and
/// contributes to the availability index. Percentages default to zero.
#[derive(Debug, Clone, PartialEq)]
pub struct IntensityRecord {
    pub country: String,
    pub zone_name: String,
    pub zone_id: Option<String>,
    pub instant: DateTime<Utc>,
    pub direct_intensity: f64,
    pub lca_intensity: f64,
    pub low_carbon_pct: f64,
    pub renewable_pct: f64,
}

impl IntensityRecord {
    /// The record's instant truncated to its UTC calendar day.
    pub fn day(&self) -> DateTime<Utc> {
        self.instant.date_naive().and_time(NaiveTime::MIN).and_utc()
    }

    pub fn hour(&self) -> u32 {
        self.instant.hour()
    }
}

/// Normalizes one split row against the resolved schema.
///
/// Returns `None` when the field count does not match the header width or
/// the timestamp fails to parse; those rows are dropped. Unparseable
/// intensity values become `NaN`, never a rejection.
pub fn normalize(schema: &DatasetSchema, fields: &[&str]) -> Option<IntensityRecord> {
    if fields.len() != schema.width {
        return None;
    }

    let instant = timeparse::parse_instant(fields[schema.datetime])?;
    let country = fields[schema.country].trim().to_string();
    let zone_raw = fields[schema.zone_name].trim();
    let zone_name = if zone_raw.is_empty() {
        country.clone()
    } else {
        zone_raw.to_string()
    };
    let zone_id = schema.zone_id.and_then(|i| {
        let v = fields[i].trim();
        (!v.is_empty()).then(|| v.to_string())
    });

    Some(IntensityRecord {
        country,
        zone_name,
        zone_id,
        instant,
        direct_intensity: float_or_nan(fields[schema.direct_intensity]),
        lca_intensity: float_or_nan(fields[schema.lca_intensity]),
        low_carbon_pct: schema.low_carbon.map(|i| float_or_zero(fields[i])).unwrap_or(0.0),
        renewable_pct: schema.renewable.map(|i| float_or_zero(fields[i])).unwrap_or(0.0),
    })
}

fn float_or_nan(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(f64::NAN)
}

fn float_or_zero(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::REQUIRED_COLUMNS;
    use chrono::TimeZone;

    fn minimal_schema() -> DatasetSchema {
        let header: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        DatasetSchema::resolve(&header).unwrap()
    }

    #[test]
    fn test_normalizes_well_formed_row() {
        let schema = minimal_schema();
        let rec = normalize(
            &schema,
            &["20/02/2023 2:00", "Belgium", "Belgium", "106.61", "147.72"],
        )
        .unwrap();
        assert_eq!(rec.country, "Belgium");
        assert_eq!(rec.direct_intensity, 106.61);
        assert_eq!(rec.lca_intensity, 147.72);
        assert_eq!(rec.instant, Utc.with_ymd_and_hms(2023, 2, 20, 2, 0, 0).unwrap());
        assert_eq!(rec.low_carbon_pct, 0.0);
        assert_eq!(rec.renewable_pct, 0.0);
    }

    #[test]
    fn test_column_count_mismatch_drops_row() {
        let schema = minimal_schema();
        assert!(normalize(&schema, &["20/02/2023 2:00", "Belgium", "Belgium", "106.61"]).is_none());
        assert!(normalize(
            &schema,
            &["20/02/2023 2:00", "Belgium", "Belgium", "106.61", "147.72", "extra"]
        )
        .is_none());
    }

    #[test]
    fn test_bad_timestamp_drops_row() {
        let schema = minimal_schema();
        assert!(normalize(&schema, &["soon", "Belgium", "Belgium", "106.61", "147.72"]).is_none());
    }

    #[test]
    fn test_bad_intensity_becomes_nan_not_rejection() {
        let schema = minimal_schema();
        let rec = normalize(
            &schema,
            &["20/02/2023 2:00", "Belgium", "Belgium", "n/a", "147.72"],
        )
        .unwrap();
        assert!(rec.direct_intensity.is_nan());
        assert_eq!(rec.lca_intensity, 147.72);
    }

    #[test]
    fn test_empty_zone_name_defaults_to_country() {
        let schema = minimal_schema();
        let rec = normalize(
            &schema,
            &["20/02/2023 2:00", "Belgium", "", "106.61", "147.72"],
        )
        .unwrap();
        assert_eq!(rec.zone_name, "Belgium");
    }

    #[test]
    fn test_day_truncation_and_hour() {
        let schema = minimal_schema();
        let rec = normalize(
            &schema,
            &["20/02/2023 14:45", "Belgium", "Belgium", "106.61", "147.72"],
        )
        .unwrap();
        assert_eq!(rec.day(), Utc.with_ymd_and_hms(2023, 2, 20, 0, 0, 0).unwrap());
        assert_eq!(rec.hour(), 14);
    }
}
