//! Left join of aggregated plants against the reference attribute table.
//!
//! Every aggregated plant yields exactly one enriched record. When both sides
//! carry a value for the same field, [`precedence`] decides which one is kept;
//! the table is explicit so the result does not depend on how the join is
//! executed.

use crate::aggregate::sort_by_generation_desc;
use crate::capacity_factor::capacity_factor_percent;
use gencf_core::{
    AggregatedPlantRecord, DataSource, EnrichedPlantRecord, ReferenceAttributes, ReferenceTable,
    ReportingPeriod,
};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::debug;

/// Output fields that can be sourced from either side of the join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MergedField {
    PlantName,
    State,
    StateDescription,
    Period,
    GrossGeneration,
    GrossGenerationUnits,
    FuelTypeDescription,
    UtilityName,
    Address,
    Coordinates,
    TotalCapacity,
    CapacityByType,
    PrimarySource,
    SourceDescription,
    TechDescription,
    SectorName,
}

/// Where a merged field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precedence {
    /// Reference value when present, otherwise the generation-side value
    ReferenceFirst,
    /// Always the generation-side value
    GenerationOnly,
    /// Only the reference table supplies it
    ReferenceOnly,
}

/// Field-by-field precedence for the join.
pub fn precedence(field: MergedField) -> Precedence {
    use MergedField::*;
    match field {
        PlantName | State => Precedence::ReferenceFirst,
        StateDescription | Period | GrossGeneration | GrossGenerationUnits
        | FuelTypeDescription => Precedence::GenerationOnly,
        UtilityName | Address | Coordinates | TotalCapacity | CapacityByType
        | PrimarySource | SourceDescription | TechDescription | SectorName => {
            Precedence::ReferenceOnly
        }
    }
}

fn resolve<T>(field: MergedField, generation: Option<T>, reference: Option<T>) -> Option<T> {
    match precedence(field) {
        Precedence::ReferenceFirst => reference.or(generation),
        Precedence::GenerationOnly => generation,
        Precedence::ReferenceOnly => reference,
    }
}

/// Counts reported after a merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub plants: usize,
    pub matched: usize,
    pub api_only: usize,
    pub with_capacity_factor: usize,
}

/// Street, city, state and zip joined with `", "`, skipping blanks.
pub fn compose_address(reference: &ReferenceAttributes) -> Option<String> {
    let parts: Vec<&str> = [
        &reference.street_address,
        &reference.city,
        &reference.state,
        &reference.zip,
    ]
    .into_iter()
    .filter_map(|part| part.as_deref())
    .map(str::trim)
    .filter(|part| !part.is_empty())
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(", "))
    }
}

/// Join one aggregated plant with its (optional) reference row.
pub fn merge_plant(
    plant: AggregatedPlantRecord,
    reference: Option<&ReferenceAttributes>,
    period: &ReportingPeriod,
) -> EnrichedPlantRecord {
    let r = reference;
    let reference_name = r.and_then(|a| a.plant_name.clone());
    let data_source = if reference_name.is_some() {
        DataSource::ApiCsvMerged
    } else {
        DataSource::ApiOnly
    };

    let total_capacity_mw = resolve(
        MergedField::TotalCapacity,
        None,
        r.and_then(|a| a.total_capacity_mw),
    );
    let gross_generation = resolve(
        MergedField::GrossGeneration,
        Some(plant.gross_generation),
        None,
    );
    let (longitude, latitude) = resolve(
        MergedField::Coordinates,
        None,
        r.map(|a| (a.longitude, a.latitude)),
    )
    .unwrap_or((None, None));

    EnrichedPlantRecord {
        capacity_factor_percent: capacity_factor_percent(total_capacity_mw, gross_generation, period),
        plant_name: resolve(MergedField::PlantName, plant.plant_name, reference_name),
        utility_name: resolve(MergedField::UtilityName, None, r.and_then(|a| a.utility_name.clone())),
        address: resolve(MergedField::Address, None, r.and_then(compose_address)),
        longitude,
        latitude,
        state: resolve(MergedField::State, plant.state, r.and_then(|a| a.state.clone())),
        state_description: resolve(MergedField::StateDescription, plant.state_description, None),
        period: resolve(MergedField::Period, plant.period, None),
        gross_generation,
        gross_generation_units: resolve(
            MergedField::GrossGenerationUnits,
            plant.gross_generation_units,
            None,
        ),
        fuel_type_description: resolve(
            MergedField::FuelTypeDescription,
            Some(plant.fuel_type_description),
            None,
        ),
        fuel_types: plant.fuel_types,
        total_capacity_mw,
        capacity_by_type: resolve(
            MergedField::CapacityByType,
            None,
            r.map(ReferenceAttributes::sparse_capacity),
        )
        .unwrap_or_else(IndexMap::new),
        primary_source: resolve(MergedField::PrimarySource, None, r.and_then(|a| a.primary_source.clone())),
        source_description: resolve(
            MergedField::SourceDescription,
            None,
            r.and_then(|a| a.source_description.clone()),
        ),
        tech_description: resolve(
            MergedField::TechDescription,
            None,
            r.and_then(|a| a.tech_description.clone()),
        ),
        sector_name: resolve(MergedField::SectorName, None, r.and_then(|a| a.sector_name.clone())),
        data_source,
        plant_code: plant.plant_code,
    }
}

/// Left-join every plant against `reference`, re-sorted by generation.
pub fn merge_reference(
    plants: Vec<AggregatedPlantRecord>,
    reference: &ReferenceTable,
    period: &ReportingPeriod,
) -> (Vec<EnrichedPlantRecord>, MergeStats) {
    let mut merged: Vec<EnrichedPlantRecord> = plants
        .into_iter()
        .map(|plant| {
            let attrs = reference.get(&plant.plant_code);
            merge_plant(plant, attrs, period)
        })
        .collect();

    sort_by_generation_desc(&mut merged, |record| record.gross_generation);

    let matched = merged
        .iter()
        .filter(|record| record.data_source == DataSource::ApiCsvMerged)
        .count();
    let stats = MergeStats {
        plants: merged.len(),
        matched,
        api_only: merged.len() - matched,
        with_capacity_factor: merged
            .iter()
            .filter(|record| record.capacity_factor_percent.is_some())
            .count(),
    };
    debug!(?stats, "merged plants with reference table");
    (merged, stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gencf_core::FuelBreakdownEntry;

    fn plant(code: &str, generation: f64) -> AggregatedPlantRecord {
        AggregatedPlantRecord {
            period: Some("2025-02".into()),
            plant_code: code.into(),
            plant_name: Some("API NAME".into()),
            state: Some("AL".into()),
            state_description: Some("Alabama".into()),
            fuel_type_description: "Natural Gas".into(),
            gross_generation: generation,
            gross_generation_units: Some("megawatthours".into()),
            fuel_types: vec![FuelBreakdownEntry {
                fuel_code: Some("NG".into()),
                fuel_type_description: Some("Natural Gas".into()),
                prime_mover: Some("CT".into()),
                generation,
            }],
        }
    }

    fn reference(code: &str) -> ReferenceAttributes {
        let mut capacity = IndexMap::new();
        capacity.insert("Coal_MW".to_string(), 0.0);
        capacity.insert("NG_MW".to_string(), 100.0);
        ReferenceAttributes {
            plant_code: code.into(),
            plant_name: Some("Reference Name".into()),
            utility_name: Some("Alabama Power Co".into()),
            street_address: Some("North Highway 43".into()),
            city: Some("Bucks".into()),
            state: Some("AL".into()),
            zip: None,
            longitude: Some(-88.0),
            latitude: Some(31.0),
            total_capacity_mw: Some(100.0),
            capacity_by_type: capacity,
            primary_source: Some("natural gas".into()),
            source_description: Some("Natural Gas = 100 MW".into()),
            tech_description: Some("Natural Gas Fired Combined Cycle".into()),
            sector_name: Some("Electric Utility".into()),
        }
    }

    #[test]
    fn precedence_table_prefers_reference_name_and_state() {
        assert_eq!(precedence(MergedField::PlantName), Precedence::ReferenceFirst);
        assert_eq!(precedence(MergedField::State), Precedence::ReferenceFirst);
        assert_eq!(precedence(MergedField::Period), Precedence::GenerationOnly);
        assert_eq!(precedence(MergedField::UtilityName), Precedence::ReferenceOnly);
    }

    #[test]
    fn matched_plant_takes_reference_fields() {
        let period: ReportingPeriod = "2025-02".parse().unwrap();
        let attrs = reference("3");
        let record = merge_plant(plant("3", 33_600.0), Some(&attrs), &period);

        assert_eq!(record.data_source, DataSource::ApiCsvMerged);
        assert_eq!(record.plant_name.as_deref(), Some("Reference Name"));
        assert_eq!(record.address.as_deref(), Some("North Highway 43, Bucks, AL"));
        assert_eq!(record.capacity_by_type.len(), 1);
        assert_eq!(record.capacity_by_type["NG_MW"], 100.0);
        assert_eq!(record.capacity_factor_percent, Some(50.0));
        assert_eq!(record.state_description.as_deref(), Some("Alabama"));
        assert_eq!(record.fuel_types.len(), 1);
    }

    #[test]
    fn unmatched_plant_is_api_only() {
        let period: ReportingPeriod = "2025-02".parse().unwrap();
        let record = merge_plant(plant("42", 10.0), None, &period);

        assert_eq!(record.data_source, DataSource::ApiOnly);
        assert_eq!(record.plant_name.as_deref(), Some("API NAME"));
        assert_eq!(record.state.as_deref(), Some("AL"));
        assert!(record.address.is_none());
        assert!(record.utility_name.is_none());
        assert!(record.longitude.is_none());
        assert!(record.total_capacity_mw.is_none());
        assert!(record.capacity_by_type.is_empty());
        assert!(record.capacity_factor_percent.is_none());
    }

    #[test]
    fn reference_row_without_name_is_not_merged() {
        let period: ReportingPeriod = "2025-02".parse().unwrap();
        let mut attrs = reference("3");
        attrs.plant_name = None;
        let record = merge_plant(plant("3", 10.0), Some(&attrs), &period);

        assert_eq!(record.data_source, DataSource::ApiOnly);
        assert_eq!(record.plant_name.as_deref(), Some("API NAME"));
        assert_eq!(record.total_capacity_mw, Some(100.0));
    }

    #[test]
    fn address_is_omitted_when_no_component_present() {
        let attrs = ReferenceAttributes {
            street_address: Some("  ".into()),
            ..Default::default()
        };
        assert_eq!(compose_address(&attrs), None);
    }

    #[test]
    fn merge_keeps_every_plant_once_sorted_by_generation() {
        let period: ReportingPeriod = "2025-02".parse().unwrap();
        let (table, _) = ReferenceTable::from_rows(vec![reference("2")]);
        let plants = vec![plant("1", 5.0), plant("2", 50.0), plant("3", 5.0)];

        let (merged, stats) = merge_reference(plants, &table, &period);
        let codes: Vec<_> = merged.iter().map(|r| r.plant_code.as_str()).collect();

        assert_eq!(codes, vec!["2", "1", "3"]);
        assert_eq!(stats.matched, 1);
        assert_eq!(stats.api_only, 2);
        assert_eq!(stats.with_capacity_factor, 1);
    }
}
