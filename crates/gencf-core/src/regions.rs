//! U.S. state abbreviations and census regions used by the geographic filter.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Full state name → postal abbreviation (50 states plus DC).
pub const STATE_ABBREVIATIONS: [(&str, &str); 51] = [
    ("Alabama", "AL"),
    ("Alaska", "AK"),
    ("Arizona", "AZ"),
    ("Arkansas", "AR"),
    ("California", "CA"),
    ("Colorado", "CO"),
    ("Connecticut", "CT"),
    ("Delaware", "DE"),
    ("Florida", "FL"),
    ("Georgia", "GA"),
    ("Hawaii", "HI"),
    ("Idaho", "ID"),
    ("Illinois", "IL"),
    ("Indiana", "IN"),
    ("Iowa", "IA"),
    ("Kansas", "KS"),
    ("Kentucky", "KY"),
    ("Louisiana", "LA"),
    ("Maine", "ME"),
    ("Maryland", "MD"),
    ("Massachusetts", "MA"),
    ("Michigan", "MI"),
    ("Minnesota", "MN"),
    ("Mississippi", "MS"),
    ("Missouri", "MO"),
    ("Montana", "MT"),
    ("Nebraska", "NE"),
    ("Nevada", "NV"),
    ("New Hampshire", "NH"),
    ("New Jersey", "NJ"),
    ("New Mexico", "NM"),
    ("New York", "NY"),
    ("North Carolina", "NC"),
    ("North Dakota", "ND"),
    ("Ohio", "OH"),
    ("Oklahoma", "OK"),
    ("Oregon", "OR"),
    ("Pennsylvania", "PA"),
    ("Rhode Island", "RI"),
    ("South Carolina", "SC"),
    ("South Dakota", "SD"),
    ("Tennessee", "TN"),
    ("Texas", "TX"),
    ("Utah", "UT"),
    ("Vermont", "VT"),
    ("Virginia", "VA"),
    ("Washington", "WA"),
    ("West Virginia", "WV"),
    ("Wisconsin", "WI"),
    ("Wyoming", "WY"),
    ("District of Columbia", "DC"),
];

/// Look up the abbreviation for a full state name (exact match).
pub fn state_abbreviation(state_name: &str) -> Option<&'static str> {
    STATE_ABBREVIATIONS
        .iter()
        .find(|(name, _)| *name == state_name)
        .map(|(_, abbr)| *abbr)
}

/// The four U.S. census regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CensusRegion {
    Northeast,
    Midwest,
    South,
    West,
}

impl CensusRegion {
    pub const ALL: [CensusRegion; 4] = [
        CensusRegion::Northeast,
        CensusRegion::Midwest,
        CensusRegion::South,
        CensusRegion::West,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CensusRegion::Northeast => "Northeast",
            CensusRegion::Midwest => "Midwest",
            CensusRegion::South => "South",
            CensusRegion::West => "West",
        }
    }

    pub fn states(&self) -> &'static [&'static str] {
        match self {
            CensusRegion::Northeast => &["CT", "ME", "MA", "NH", "NJ", "NY", "PA", "RI", "VT"],
            CensusRegion::Midwest => &[
                "IL", "IN", "IA", "KS", "MI", "MN", "MO", "NE", "ND", "OH", "SD", "WI",
            ],
            CensusRegion::South => &[
                "AL", "AR", "DE", "FL", "GA", "KY", "LA", "MD", "MS", "NC", "OK", "SC", "TN",
                "TX", "VA", "WV",
            ],
            CensusRegion::West => &[
                "AK", "AZ", "CA", "CO", "HI", "ID", "MT", "NV", "NM", "OR", "UT", "WA", "WY",
            ],
        }
    }
}

impl fmt::Display for CensusRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CensusRegion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "northeast" => Ok(CensusRegion::Northeast),
            "midwest" => Ok(CensusRegion::Midwest),
            "south" => Ok(CensusRegion::South),
            "west" => Ok(CensusRegion::West),
            other => Err(format!(
                "unknown census region '{other}' (expected northeast, midwest, south or west)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_lookup() {
        assert_eq!(state_abbreviation("Texas"), Some("TX"));
        assert_eq!(state_abbreviation("District of Columbia"), Some("DC"));
        assert_eq!(state_abbreviation("texas"), None);
        assert_eq!(state_abbreviation("Puerto Rico"), None);
    }

    #[test]
    fn regions_parse_case_insensitively() {
        assert_eq!("South".parse::<CensusRegion>().unwrap(), CensusRegion::South);
        assert_eq!(" WEST ".parse::<CensusRegion>().unwrap(), CensusRegion::West);
        assert!("pacific".parse::<CensusRegion>().is_err());
    }

    #[test]
    fn regions_cover_fifty_states_without_overlap() {
        let mut all: Vec<&str> = CensusRegion::ALL
            .iter()
            .flat_map(|region| region.states().iter().copied())
            .collect();
        let count = all.len();
        all.sort_unstable();
        all.dedup();
        assert_eq!(count, 50);
        assert_eq!(all.len(), 50);
    }
}
