//! In-memory plant-attributes table keyed by normalized plant code.

use crate::diagnostics::Diagnostics;
use crate::records::{normalize_plant_code, ReferenceAttributes};
use std::collections::HashMap;

/// Read-only lookup of reference attributes, loaded once per run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    rows: HashMap<String, ReferenceAttributes>,
}

impl ReferenceTable {
    /// An empty table: every plant merges as API-only.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Index rows by normalized plant code. The first row for a code wins;
    /// later duplicates are reported in the returned diagnostics.
    pub fn from_rows(rows: impl IntoIterator<Item = ReferenceAttributes>) -> (Self, Diagnostics) {
        let mut diagnostics = Diagnostics::new();
        let mut indexed: HashMap<String, ReferenceAttributes> = HashMap::new();
        for mut row in rows {
            let code = normalize_plant_code(&row.plant_code);
            if code.is_empty() {
                diagnostics.add_error("reference", "row without a plant code skipped");
                continue;
            }
            if indexed.contains_key(&code) {
                diagnostics.add_warning_with_entity(
                    "reference",
                    "duplicate plant code, keeping the first row",
                    &format!("Plant {code}"),
                );
                continue;
            }
            row.plant_code = code.clone();
            indexed.insert(code, row);
        }
        (Self { rows: indexed }, diagnostics)
    }

    pub fn get(&self, plant_code: &str) -> Option<&ReferenceAttributes> {
        self.rows.get(&normalize_plant_code(plant_code))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
