//! Geographic narrowing of the enriched record set.

use gencf_core::{CensusRegion, EnrichedPlantRecord};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Which plants to keep, by state abbreviation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GeoFilter {
    #[default]
    All,
    States(BTreeSet<String>),
    Region(CensusRegion),
}

impl GeoFilter {
    /// Filter on a comma-separated list such as `"AL, ca"`.
    pub fn states_from_list(list: &str) -> Result<Self, String> {
        let states: BTreeSet<String> = list
            .split(',')
            .map(|s| s.trim().to_uppercase())
            .filter(|s| !s.is_empty())
            .collect();
        if states.is_empty() {
            return Err("state list is empty".to_string());
        }
        if let Some(bad) = states.iter().find(|s| s.len() != 2) {
            return Err(format!("'{bad}' is not a two-letter state code"));
        }
        Ok(GeoFilter::States(states))
    }

    pub fn allows(&self, state_abbreviation: Option<&str>) -> bool {
        match self {
            GeoFilter::All => true,
            GeoFilter::States(states) => state_abbreviation.is_some_and(|s| states.contains(s)),
            GeoFilter::Region(region) => {
                state_abbreviation.is_some_and(|s| region.states().iter().any(|r| *r == s))
            }
        }
    }
}

impl fmt::Display for GeoFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeoFilter::All => f.write_str("all states"),
            GeoFilter::States(states) => {
                let list: Vec<&str> = states.iter().map(String::as_str).collect();
                write!(f, "states {}", list.join(","))
            }
            GeoFilter::Region(region) => write!(f, "{region} region"),
        }
    }
}

impl FromStr for GeoFilter {
    type Err = String;

    /// `all`, `region:<name>`, or a state list.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            Ok(GeoFilter::All)
        } else if let Some(region) = trimmed.strip_prefix("region:") {
            region.parse().map(GeoFilter::Region)
        } else {
            GeoFilter::states_from_list(trimmed)
        }
    }
}

/// Keep records whose state (derived from `stateDescription`) passes `filter`.
pub fn apply_geo_filter(
    records: Vec<EnrichedPlantRecord>,
    filter: &GeoFilter,
) -> Vec<EnrichedPlantRecord> {
    if *filter == GeoFilter::All {
        return records;
    }
    records
        .into_iter()
        .filter(|record| filter.allows(record.state_abbreviation()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use gencf_core::DataSource;
    use indexmap::IndexMap;

    fn record(code: &str, state_description: Option<&str>) -> EnrichedPlantRecord {
        EnrichedPlantRecord {
            plant_code: code.into(),
            plant_name: None,
            utility_name: None,
            address: None,
            longitude: None,
            latitude: None,
            state: None,
            state_description: state_description.map(String::from),
            period: None,
            gross_generation: Some(1.0),
            gross_generation_units: None,
            fuel_type_description: None,
            fuel_types: vec![],
            total_capacity_mw: None,
            capacity_by_type: IndexMap::new(),
            capacity_factor_percent: None,
            primary_source: None,
            source_description: None,
            tech_description: None,
            sector_name: None,
            data_source: DataSource::ApiOnly,
        }
    }

    fn codes(records: &[EnrichedPlantRecord]) -> Vec<&str> {
        records.iter().map(|r| r.plant_code.as_str()).collect()
    }

    fn sample() -> Vec<EnrichedPlantRecord> {
        vec![
            record("1", Some("Alabama")),
            record("2", Some("California")),
            record("3", Some("Vermont")),
            record("4", None),
            record("5", Some("Puerto Rico")),
        ]
    }

    #[test]
    fn all_keeps_everything() {
        assert_eq!(apply_geo_filter(sample(), &GeoFilter::All).len(), 5);
    }

    #[test]
    fn state_list_is_case_insensitive() {
        let filter = GeoFilter::states_from_list("al, ca").unwrap();
        assert_eq!(codes(&apply_geo_filter(sample(), &filter)), vec!["1", "2"]);
    }

    #[test]
    fn region_uses_census_membership_and_drops_unmapped() {
        let filter = GeoFilter::Region(CensusRegion::Northeast);
        assert_eq!(codes(&apply_geo_filter(sample(), &filter)), vec!["3"]);
    }

    #[test]
    fn parses_filter_strings() {
        assert_eq!("ALL".parse::<GeoFilter>().unwrap(), GeoFilter::All);
        assert_eq!(
            "region:West".parse::<GeoFilter>().unwrap(),
            GeoFilter::Region(CensusRegion::West)
        );
        assert!("region:Atlantis".parse::<GeoFilter>().is_err());
        assert!(GeoFilter::states_from_list(" , ").is_err());
        assert!(GeoFilter::states_from_list("Texas").is_err());
    }
}
