//! Deterministic capacity-factor flags from fuel-type expected ranges.
//!
//! | Category | Keywords (case-insensitive) | Expected CF % |
//! |----------|-----------------------------|---------------|
//! | Nuclear | `nuclear` | 70 ..= 110 |
//! | Fossil | `natural gas`, `gas`, `coal` | 20 ..= 90 |
//! | Hydro | `hydro`, `water` | 10 ..= 80 |
//! | Wind | `wind` | 5 ..= 60 |
//! | Solar | `solar`, `sun` | 5 ..= 50 |
//!
//! Rules are tried top to bottom and the first keyword hit decides the
//! category. Descriptions matching no rule are `Normal`.

use gencf_core::{CapacityFactorFlag, EnrichedPlantRecord, FlaggedPlantRecord, FuelCategory};
use std::collections::BTreeMap;
use std::ops::RangeInclusive;

/// One fuel category with its keywords and inclusive expected range.
#[derive(Debug, Clone)]
pub struct FuelRule {
    pub category: FuelCategory,
    pub keywords: &'static [&'static str],
    pub expected: RangeInclusive<f64>,
}

/// Rules in evaluation order.
pub fn fuel_rules() -> [FuelRule; 5] {
    [
        FuelRule {
            category: FuelCategory::Nuclear,
            keywords: &["nuclear"],
            expected: 70.0..=110.0,
        },
        FuelRule {
            category: FuelCategory::Fossil,
            keywords: &["natural gas", "gas", "coal"],
            expected: 20.0..=90.0,
        },
        FuelRule {
            category: FuelCategory::Hydro,
            keywords: &["hydro", "water"],
            expected: 10.0..=80.0,
        },
        FuelRule {
            category: FuelCategory::Wind,
            keywords: &["wind"],
            expected: 5.0..=60.0,
        },
        FuelRule {
            category: FuelCategory::Solar,
            keywords: &["solar", "sun"],
            expected: 5.0..=50.0,
        },
    ]
}

/// First rule whose keyword occurs in `fuel_description`.
pub fn match_rule(fuel_description: &str) -> Option<FuelRule> {
    let lowered = fuel_description.to_lowercase();
    fuel_rules()
        .into_iter()
        .find(|rule| rule.keywords.iter().any(|kw| lowered.contains(kw)))
}

pub fn deterministic_flag(
    capacity_factor: Option<f64>,
    fuel_description: Option<&str>,
) -> CapacityFactorFlag {
    let Some(cf) = capacity_factor else {
        return CapacityFactorFlag::NoData;
    };
    match fuel_description.and_then(match_rule) {
        Some(rule) if !rule.expected.contains(&cf) => CapacityFactorFlag::Unusual(rule.category),
        _ => CapacityFactorFlag::Normal,
    }
}

/// Attach the deterministic flag to every record, preserving order.
pub fn flag_records(records: Vec<EnrichedPlantRecord>) -> Vec<FlaggedPlantRecord> {
    records
        .into_iter()
        .map(|record| {
            let flag = deterministic_flag(
                record.capacity_factor_percent,
                record.fuel_type_description.as_deref(),
            );
            FlaggedPlantRecord::new(record, flag)
        })
        .collect()
}

/// Records per flag string, sorted by flag.
pub fn flag_counts(records: &[FlaggedPlantRecord]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts
            .entry(record.capacity_factor_flag.to_string())
            .or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nuclear_flag_tracks_the_expected_range() {
        for (cf, unusual) in [
            (69.99, true),
            (70.0, false),
            (93.0, false),
            (110.0, false),
            (110.01, true),
            (0.5, true),
        ] {
            let flag = deterministic_flag(Some(cf), Some("Nuclear"));
            let expected = if unusual {
                CapacityFactorFlag::Unusual(FuelCategory::Nuclear)
            } else {
                CapacityFactorFlag::Normal
            };
            assert_eq!(flag, expected, "cf = {cf}");
        }
    }

    #[test]
    fn absent_capacity_factor_is_no_data_for_any_fuel() {
        for fuel in [Some("Nuclear"), Some("Wind"), Some("Mixed"), None] {
            assert_eq!(deterministic_flag(None, fuel), CapacityFactorFlag::NoData);
        }
    }

    #[test]
    fn first_matching_category_wins() {
        // "Coal, Nuclear" hits the nuclear rule before the fossil one
        assert_eq!(
            deterministic_flag(Some(50.0), Some("Coal, Nuclear")),
            CapacityFactorFlag::Unusual(FuelCategory::Nuclear)
        );
        assert_eq!(
            deterministic_flag(Some(95.0), Some("NATURAL GAS")),
            CapacityFactorFlag::Unusual(FuelCategory::Fossil)
        );
        assert_eq!(
            deterministic_flag(Some(2.0), Some("Conventional Hydroelectric")),
            CapacityFactorFlag::Unusual(FuelCategory::Hydro)
        );
        assert_eq!(
            deterministic_flag(Some(61.0), Some("Wind")),
            CapacityFactorFlag::Unusual(FuelCategory::Wind)
        );
        assert_eq!(
            deterministic_flag(Some(51.0), Some("Solar")),
            CapacityFactorFlag::Unusual(FuelCategory::Solar)
        );
    }

    #[test]
    fn unmatched_fuel_is_normal() {
        assert_eq!(
            deterministic_flag(Some(400.0), Some("Petroleum Liquids")),
            CapacityFactorFlag::Normal
        );
        assert_eq!(deterministic_flag(Some(400.0), None), CapacityFactorFlag::Normal);
    }
}
