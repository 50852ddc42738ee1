//! Plant-attributes reference table (`Power_Plants.csv`).
//!
//! Columns are looked up by header name, so extra columns are ignored and
//! missing ones read as absent. Blank cells are absent; numeric cells that do
//! not parse are absent and reported as warnings.

use csv::{ReaderBuilder, StringRecord};
use gencf_core::{
    Diagnostics, ReferenceAttributes, ReferenceLoadError, ReferenceTable, CAPACITY_COLUMNS,
};
use indexmap::IndexMap;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{info, warn};

pub const DEFAULT_REFERENCE_PATH: &str = "data/raw/Power_Plants.csv";

const PLANT_CODE: &str = "Plant_Code";

struct Columns(HashMap<String, usize>);

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        Self(
            headers
                .iter()
                .enumerate()
                .map(|(i, name)| (name.trim().trim_start_matches('\u{feff}').to_string(), i))
                .collect(),
        )
    }

    fn has(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    fn text(&self, record: &StringRecord, name: &str) -> Option<String> {
        let index = *self.0.get(name)?;
        let value = record.get(index)?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }
}

struct RowReader<'a> {
    columns: &'a Columns,
    record: &'a StringRecord,
    line: usize,
    diagnostics: &'a mut Diagnostics,
}

impl RowReader<'_> {
    fn text(&self, name: &str) -> Option<String> {
        self.columns.text(self.record, name)
    }

    fn number(&mut self, name: &str) -> Option<f64> {
        let raw = self.text(name)?;
        match raw.replace(',', "").parse::<f64>() {
            Ok(value) if value.is_finite() => Some(value),
            _ => {
                self.diagnostics.add_warning_at_line(
                    "reference",
                    &format!("{name} value '{raw}' is not numeric"),
                    self.line,
                );
                None
            }
        }
    }

    fn attributes(mut self) -> ReferenceAttributes {
        let mut capacity_by_type = IndexMap::new();
        for column in CAPACITY_COLUMNS {
            if let Some(mw) = self.number(column) {
                capacity_by_type.insert(column.to_string(), mw);
            }
        }

        ReferenceAttributes {
            plant_code: self.text(PLANT_CODE).unwrap_or_default(),
            plant_name: self.text("Plant_Name"),
            utility_name: self.text("Utility_Name"),
            street_address: self.text("Street_Address"),
            city: self.text("City"),
            state: self.text("State"),
            zip: self.text("Zip"),
            longitude: self.number("Longitude"),
            latitude: self.number("Latitude"),
            total_capacity_mw: self.number("Total_MW"),
            capacity_by_type,
            primary_source: self.text("PrimSource"),
            source_description: self.text("source_desc"),
            tech_description: self.text("tech_desc"),
            sector_name: self.text("sector_name"),
        }
    }
}

/// Parse reference rows from any CSV source.
pub fn read_reference_rows<R: Read>(
    reader: R,
) -> Result<(Vec<ReferenceAttributes>, Diagnostics), ReferenceLoadError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let headers = csv_reader
        .headers()
        .map_err(|err| ReferenceLoadError::Malformed(err.to_string()))?
        .clone();
    let columns = Columns::from_headers(&headers);
    if !columns.has(PLANT_CODE) {
        return Err(ReferenceLoadError::Malformed(format!(
            "missing {PLANT_CODE} column"
        )));
    }

    let mut diagnostics = Diagnostics::new();
    let mut rows = Vec::new();
    for (index, result) in csv_reader.records().enumerate() {
        // header is line 1
        let line = index + 2;
        let record = match result {
            Ok(record) => record,
            Err(err) => {
                diagnostics.add_error_at_line("reference", &err.to_string(), line);
                continue;
            }
        };
        let row = RowReader {
            columns: &columns,
            record: &record,
            line,
            diagnostics: &mut diagnostics,
        };
        rows.push(row.attributes());
    }
    Ok((rows, diagnostics))
}

/// Load and index the reference table at `path`.
pub fn load_reference_table(
    path: &Path,
) -> Result<(ReferenceTable, Diagnostics), ReferenceLoadError> {
    if !path.exists() {
        return Err(ReferenceLoadError::Missing(path.to_path_buf()));
    }
    let file = File::open(path).map_err(|err| ReferenceLoadError::Malformed(err.to_string()))?;
    let (rows, mut diagnostics) = read_reference_rows(file)?;
    let (table, index_diagnostics) = ReferenceTable::from_rows(rows);
    diagnostics.merge(index_diagnostics);

    info!(
        path = %path.display(),
        plants = table.len(),
        warnings = diagnostics.warning_count(),
        errors = diagnostics.error_count(),
        "loaded reference table"
    );
    Ok((table, diagnostics))
}

/// Like [`load_reference_table`], but a missing or unreadable table yields an
/// empty one so every plant merges as API-only.
pub fn load_reference_or_empty(path: &Path) -> (ReferenceTable, Diagnostics) {
    match load_reference_table(path) {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!(error = %err, "continuing without reference attributes");
            let mut diagnostics = Diagnostics::new();
            diagnostics.add_error("reference", &err.to_string());
            (ReferenceTable::empty(), diagnostics)
        }
    }
}
