//! Plant records at each pipeline stage.
//!
//! Serialized field names are part of the output contract: the raw dump keeps
//! the generation API's own names (`fuel2002`, `gross-generation`, ...), and
//! the merged/enriched dumps use the camelCase names listed on
//! [`EnrichedPlantRecord`].

use crate::flags::CapacityFactorFlag;
use crate::regions::state_abbreviation;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Canonical form of a plant identifier used on both sides of the join.
///
/// Trims whitespace and collapses integral numbers written as floats
/// (`" 3.0 "` and `"3"` both become `"3"`).
pub fn normalize_plant_code(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
            format!("{}", value as i64)
        }
        _ => trimmed.to_string(),
    }
}

fn de_plant_code<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Text(text) => normalize_plant_code(&text),
        Code::Int(value) => value.to_string(),
        Code::Float(value) => normalize_plant_code(&value.to_string()),
    })
}

/// Generation volume as delivered by the API: a number, or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum GenerationValue {
    Number(f64),
    Text(String),
}

impl GenerationValue {
    /// Numeric MWh value; unparsable text and non-finite numbers are absent.
    pub fn as_mwh(&self) -> Option<f64> {
        let value = match self {
            GenerationValue::Number(value) => Some(*value),
            GenerationValue::Text(text) => text.trim().parse::<f64>().ok(),
        };
        value.filter(|v| v.is_finite())
    }
}

/// One fuel/prime-mover measurement for one plant in one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGenerationRow {
    #[serde(default)]
    pub period: Option<String>,
    #[serde(deserialize_with = "de_plant_code")]
    pub plant_code: String,
    #[serde(default)]
    pub plant_name: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub state_description: Option<String>,
    #[serde(rename = "fuel2002", default)]
    pub fuel_code: Option<String>,
    #[serde(default)]
    pub fuel_type_description: Option<String>,
    #[serde(default)]
    pub prime_mover: Option<String>,
    #[serde(rename = "gross-generation", default)]
    pub gross_generation: Option<GenerationValue>,
    #[serde(rename = "gross-generation-units", default)]
    pub gross_generation_units: Option<String>,
}

impl RawGenerationRow {
    /// Generation coerced to MWh, absent when missing or unparsable.
    pub fn generation_mwh(&self) -> Option<f64> {
        self.gross_generation.as_ref().and_then(GenerationValue::as_mwh)
    }
}

/// Per-row detail retained inside an aggregated plant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FuelBreakdownEntry {
    #[serde(rename = "fuel2002")]
    pub fuel_code: Option<String>,
    pub fuel_type_description: Option<String>,
    pub prime_mover: Option<String>,
    pub generation: f64,
}

/// One record per plant identifier after folding its fuel rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregatedPlantRecord {
    pub period: Option<String>,
    pub plant_code: String,
    pub plant_name: Option<String>,
    pub state: Option<String>,
    pub state_description: Option<String>,
    pub fuel_type_description: String,
    pub gross_generation: f64,
    pub gross_generation_units: Option<String>,
    pub fuel_types: Vec<FuelBreakdownEntry>,
}

/// Per-fuel nameplate capacity columns of the reference table, in output order.
pub const CAPACITY_COLUMNS: [&str; 12] = [
    "Bat_MW",
    "Bio_MW",
    "Coal_MW",
    "Geo_MW",
    "Hydro_MW",
    "HydroPS_MW",
    "NG_MW",
    "Nuclear_MW",
    "Crude_MW",
    "Solar_MW",
    "Wind_MW",
    "Other_MW",
];

/// Static attributes for one plant from the reference table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReferenceAttributes {
    pub plant_code: String,
    pub plant_name: Option<String>,
    pub utility_name: Option<String>,
    pub street_address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub total_capacity_mw: Option<f64>,
    /// Parsed per-fuel capacity keyed by column name, in [`CAPACITY_COLUMNS`] order.
    /// Zero and negative values are kept here and dropped by [`Self::sparse_capacity`].
    pub capacity_by_type: IndexMap<String, f64>,
    pub primary_source: Option<String>,
    pub source_description: Option<String>,
    pub tech_description: Option<String>,
    pub sector_name: Option<String>,
}

impl ReferenceAttributes {
    /// Fuel capacities strictly greater than zero.
    pub fn sparse_capacity(&self) -> IndexMap<String, f64> {
        self.capacity_by_type
            .iter()
            .filter(|(_, mw)| mw.is_finite() && **mw > 0.0)
            .map(|(column, mw)| (column.clone(), *mw))
            .collect()
    }
}

/// Provenance of an enriched record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataSource {
    #[serde(rename = "API_CSV_Merged")]
    ApiCsvMerged,
    #[serde(rename = "API_Only")]
    ApiOnly,
}

/// Aggregated generation joined with (optional) reference attributes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPlantRecord {
    pub plant_code: String,
    pub plant_name: Option<String>,
    pub utility_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    pub state: Option<String>,
    pub state_description: Option<String>,
    pub period: Option<String>,
    pub gross_generation: Option<f64>,
    pub gross_generation_units: Option<String>,
    pub fuel_type_description: Option<String>,
    #[serde(default)]
    pub fuel_types: Vec<FuelBreakdownEntry>,
    #[serde(rename = "totalCapacityMW")]
    pub total_capacity_mw: Option<f64>,
    #[serde(default)]
    pub capacity_by_type: IndexMap<String, f64>,
    pub capacity_factor_percent: Option<f64>,
    pub primary_source: Option<String>,
    pub source_description: Option<String>,
    pub tech_description: Option<String>,
    pub sector_name: Option<String>,
    pub data_source: DataSource,
}

impl EnrichedPlantRecord {
    /// Two-letter state code derived from the full state name.
    pub fn state_abbreviation(&self) -> Option<&'static str> {
        self.state_description.as_deref().and_then(state_abbreviation)
    }
}

/// An enriched record plus its classification flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlaggedPlantRecord {
    #[serde(flatten)]
    pub record: EnrichedPlantRecord,
    pub capacity_factor_flag: CapacityFactorFlag,
}

impl FlaggedPlantRecord {
    pub fn new(record: EnrichedPlantRecord, flag: CapacityFactorFlag) -> Self {
        Self {
            record,
            capacity_factor_flag: flag,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn plant_codes_normalize_across_sources() {
        assert_eq!(normalize_plant_code(" 3 "), "3");
        assert_eq!(normalize_plant_code("3.0"), "3");
        assert_eq!(normalize_plant_code("55555"), "55555");
        assert_eq!(normalize_plant_code("A12"), "A12");
    }

    #[test]
    fn raw_row_accepts_api_field_names() {
        let row: RawGenerationRow = serde_json::from_value(json!({
            "period": "2025-02",
            "plantCode": 3,
            "plantName": "Barry",
            "fuel2002": "NG",
            "fuelTypeDescription": "Natural Gas",
            "state": "AL",
            "stateDescription": "Alabama",
            "primeMover": "CT",
            "gross-generation": "1234.5",
            "gross-generation-units": "megawatthours"
        }))
        .unwrap();

        assert_eq!(row.plant_code, "3");
        assert_eq!(row.fuel_code.as_deref(), Some("NG"));
        assert_eq!(row.generation_mwh(), Some(1234.5));
    }

    #[test]
    fn generation_coercion_treats_garbage_as_absent() {
        assert_eq!(GenerationValue::Number(12.0).as_mwh(), Some(12.0));
        assert_eq!(GenerationValue::Text(" 7 ".into()).as_mwh(), Some(7.0));
        assert_eq!(GenerationValue::Text("n/a".into()).as_mwh(), None);
        assert_eq!(GenerationValue::Text("NaN".into()).as_mwh(), None);
        assert_eq!(GenerationValue::Number(f64::INFINITY).as_mwh(), None);
    }

    #[test]
    fn sparse_capacity_keeps_positive_values_in_column_order() {
        let mut attrs = ReferenceAttributes::default();
        attrs.capacity_by_type.insert("NG_MW".into(), 120.0);
        attrs.capacity_by_type.insert("Nuclear_MW".into(), 0.0);
        attrs.capacity_by_type.insert("Solar_MW".into(), 5.5);
        attrs.capacity_by_type.insert("Wind_MW".into(), -1.0);

        let sparse = attrs.sparse_capacity();
        let keys: Vec<_> = sparse.keys().cloned().collect();
        assert_eq!(keys, vec!["NG_MW", "Solar_MW"]);
    }

    #[test]
    fn flagged_record_serializes_flat_with_contract_names() {
        let record = EnrichedPlantRecord {
            plant_code: "3".into(),
            plant_name: Some("Barry".into()),
            utility_name: None,
            address: None,
            longitude: None,
            latitude: None,
            state: Some("AL".into()),
            state_description: Some("Alabama".into()),
            period: Some("2025-02".into()),
            gross_generation: Some(500.0),
            gross_generation_units: Some("megawatthours".into()),
            fuel_type_description: Some("Natural Gas".into()),
            fuel_types: vec![],
            total_capacity_mw: None,
            capacity_by_type: IndexMap::new(),
            capacity_factor_percent: None,
            primary_source: None,
            source_description: None,
            tech_description: None,
            sector_name: None,
            data_source: DataSource::ApiOnly,
        };
        let flagged = FlaggedPlantRecord::new(record, CapacityFactorFlag::NoData);
        let value = serde_json::to_value(&flagged).unwrap();

        assert_eq!(value["plantCode"], "3");
        assert_eq!(value["grossGeneration"], 500.0);
        assert_eq!(value["dataSource"], "API_Only");
        assert_eq!(value["capacityFactorFlag"], "No_Data");
        assert!(value["totalCapacityMW"].is_null());
        assert!(value.get("address").is_none());

        let back: FlaggedPlantRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, flagged);
        assert_eq!(back.record.state_abbreviation(), Some("AL"));
    }
}
