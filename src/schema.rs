//! Dataset header schema: exact column names and one-shot resolution.
//!
//! Column positions are resolved once from the header row; rows are then
//! addressed positionally. Missing required columns are a dataset-level
//! failure discovered here, never row-by-row.

pub const DATETIME_COLUMN: &str = "Datetime (UTC)";
pub const COUNTRY_COLUMN: &str = "Country";
pub const ZONE_NAME_COLUMN: &str = "Zone Name";
pub const ZONE_ID_COLUMN: &str = "Zone Id";
pub const DIRECT_INTENSITY_COLUMN: &str = "Carbon Intensity gCO₂eq/kWh (direct)";
pub const LCA_INTENSITY_COLUMN: &str = "Carbon Intensity gCO₂eq/kWh (LCA)";
pub const LOW_CARBON_COLUMN: &str = "Low Carbon Percentage";
pub const RENEWABLE_COLUMN: &str = "Renewable Percentage";

pub const REQUIRED_COLUMNS: [&str; 5] = [
    DATETIME_COLUMN,
    COUNTRY_COLUMN,
    ZONE_NAME_COLUMN,
    DIRECT_INTENSITY_COLUMN,
    LCA_INTENSITY_COLUMN,
];

/// Resolved column positions for one dataset.
///
/// `width` is the full header width; data rows must match it exactly. Extra
/// columns beyond the known set widen `width` but are otherwise ignored.
#[derive(Debug, Clone)]
pub struct DatasetSchema {
    pub width: usize,
    pub datetime: usize,
    pub country: usize,
    pub zone_name: usize,
    pub zone_id: Option<usize>,
    pub direct_intensity: usize,
    pub lca_intensity: usize,
    pub low_carbon: Option<usize>,
    pub renewable: Option<usize>,
}

impl DatasetSchema {
    /// Splits a raw header line into trimmed column names.
    pub fn parse_header(line: &str) -> Vec<String> {
        line.trim_start_matches('\u{feff}')
            .split(',')
            .map(|s| s.trim().to_string())
            .collect()
    }

    /// Resolves column positions from header names. On failure returns every
    /// missing required column so the diagnostic can name them all at once.
    pub fn resolve(header: &[String]) -> Result<Self, Vec<String>> {
        let find = |name: &str| header.iter().position(|h| h == name);

        let mut missing = Vec::new();
        for required in REQUIRED_COLUMNS {
            if find(required).is_none() {
                missing.push(required.to_string());
            }
        }
        if !missing.is_empty() {
            return Err(missing);
        }

        Ok(Self {
            width: header.len(),
            datetime: find(DATETIME_COLUMN).unwrap_or(0),
            country: find(COUNTRY_COLUMN).unwrap_or(0),
            zone_name: find(ZONE_NAME_COLUMN).unwrap_or(0),
            zone_id: find(ZONE_ID_COLUMN),
            direct_intensity: find(DIRECT_INTENSITY_COLUMN).unwrap_or(0),
            lca_intensity: find(LCA_INTENSITY_COLUMN).unwrap_or(0),
            low_carbon: find(LOW_CARBON_COLUMN),
            renewable: find(RENEWABLE_COLUMN),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_resolves_minimal_header() {
        let schema = DatasetSchema::resolve(&header(&REQUIRED_COLUMNS)).unwrap();
        assert_eq!(schema.width, 5);
        assert_eq!(schema.datetime, 0);
        assert_eq!(schema.lca_intensity, 4);
        assert!(schema.zone_id.is_none());
        assert!(schema.low_carbon.is_none());
    }

    #[test]
    fn test_resolves_optional_columns() {
        let schema = DatasetSchema::resolve(&header(&[
            DATETIME_COLUMN,
            COUNTRY_COLUMN,
            ZONE_NAME_COLUMN,
            ZONE_ID_COLUMN,
            DIRECT_INTENSITY_COLUMN,
            LCA_INTENSITY_COLUMN,
            LOW_CARBON_COLUMN,
            RENEWABLE_COLUMN,
        ]))
        .unwrap();
        assert_eq!(schema.width, 8);
        assert_eq!(schema.zone_id, Some(3));
        assert_eq!(schema.low_carbon, Some(6));
        assert_eq!(schema.renewable, Some(7));
    }

    #[test]
    fn test_names_every_missing_column() {
        let err = DatasetSchema::resolve(&header(&[DATETIME_COLUMN, ZONE_NAME_COLUMN]))
            .unwrap_err();
        assert_eq!(
            err,
            vec![
                COUNTRY_COLUMN.to_string(),
                DIRECT_INTENSITY_COLUMN.to_string(),
                LCA_INTENSITY_COLUMN.to_string(),
            ]
        );
    }

    #[test]
    fn test_unknown_extra_columns_widen_width() {
        let mut names: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        names.push("Data Source".to_string());
        let schema = DatasetSchema::resolve(&names).unwrap();
        assert_eq!(schema.width, 6);
    }

    #[test]
    fn test_parse_header_trims_and_strips_bom() {
        let names = DatasetSchema::parse_header("\u{feff}Datetime (UTC), Country ,Zone Name");
        assert_eq!(names, vec!["Datetime (UTC)", "Country", "Zone Name"]);
    }
}
