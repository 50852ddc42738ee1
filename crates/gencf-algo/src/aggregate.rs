//! Fold cleaned fuel rows into one record per plant.
//!
//! Rows are grouped by plant code in first-encounter order. The first row of a
//! group supplies the identifying fields (name, state, period, units); rows of
//! one plant are assumed to agree on them and this is not checked.

use gencf_core::{AggregatedPlantRecord, FuelBreakdownEntry, RawGenerationRow};
use indexmap::IndexMap;
use std::collections::BTreeSet;

/// Combined description used when no row of a plant names its fuel.
pub const MIXED_FUEL_DESCRIPTION: &str = "Mixed";

/// Group rows by plant code and sum their generation.
///
/// Output is sorted by total generation, largest first. Ties keep the order in
/// which plants were first seen.
pub fn aggregate_plants(rows: &[RawGenerationRow]) -> Vec<AggregatedPlantRecord> {
    let mut groups: IndexMap<&str, Vec<&RawGenerationRow>> = IndexMap::new();
    for row in rows {
        groups.entry(row.plant_code.as_str()).or_default().push(row);
    }

    let mut plants: Vec<AggregatedPlantRecord> = groups
        .into_iter()
        .filter_map(|(code, group)| fold_group(code, &group))
        .collect();

    sort_by_generation_desc(&mut plants, |p| Some(p.gross_generation));
    plants
}

fn fold_group(plant_code: &str, group: &[&RawGenerationRow]) -> Option<AggregatedPlantRecord> {
    let first = group.first()?;

    let fuel_types: Vec<FuelBreakdownEntry> = group
        .iter()
        .map(|row| FuelBreakdownEntry {
            fuel_code: row.fuel_code.clone(),
            fuel_type_description: row.fuel_type_description.clone(),
            prime_mover: row.prime_mover.clone(),
            generation: row.generation_mwh().unwrap_or(0.0),
        })
        .collect();

    let gross_generation = fuel_types.iter().map(|entry| entry.generation).sum();

    Some(AggregatedPlantRecord {
        period: first.period.clone(),
        plant_code: plant_code.to_string(),
        plant_name: first.plant_name.clone(),
        state: first.state.clone(),
        state_description: first.state_description.clone(),
        fuel_type_description: combined_fuel_description(group),
        gross_generation,
        gross_generation_units: first.gross_generation_units.clone(),
        fuel_types,
    })
}

/// Distinct fuel descriptions, sorted and comma-joined, or `"Mixed"`.
pub fn combined_fuel_description(group: &[&RawGenerationRow]) -> String {
    let distinct: BTreeSet<&str> = group
        .iter()
        .filter_map(|row| row.fuel_type_description.as_deref())
        .filter(|desc| !desc.trim().is_empty())
        .collect();

    if distinct.is_empty() {
        MIXED_FUEL_DESCRIPTION.to_string()
    } else {
        distinct.into_iter().collect::<Vec<_>>().join(", ")
    }
}

/// Stable descending sort on a generation key; absent values sort last.
pub(crate) fn sort_by_generation_desc<T>(items: &mut [T], key: impl Fn(&T) -> Option<f64>) {
    items.sort_by(|a, b| match (key(a), key(b)) {
        (Some(x), Some(y)) => y.total_cmp(&x),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
