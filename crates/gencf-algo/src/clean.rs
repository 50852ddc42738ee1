//! Row cleaning for raw generation data.
//!
//! The API mixes per-fuel rows with roll-up rows (`fuel2002 == "ALL"` or
//! `primeMover == "ALL"`), reports idle units with zero or missing generation,
//! and carries a placeholder plant `99999`. None of those describe a specific
//! fuel at a specific plant, so they are dropped before aggregation.
//!
//! Cleaning coerces `gross-generation` to a number in place and is otherwise
//! order-preserving and non-mutating. Running it on its own output removes
//! nothing further.

use gencf_core::{GenerationValue, RawGenerationRow};
use serde::Serialize;
use tracing::debug;

/// Fuel or prime-mover code marking a roll-up row.
pub const AGGREGATE_SENTINEL: &str = "ALL";

/// Plant code used by the API for non-plant totals.
pub const PLACEHOLDER_PLANT_CODE: &str = "99999";

/// Why rows were dropped. A row matching several reasons is counted once,
/// under the first reason in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    pub input_rows: usize,
    pub aggregate_rows: usize,
    pub missing_generation_rows: usize,
    pub placeholder_rows: usize,
    pub retained_rows: usize,
}

impl CleanReport {
    pub fn dropped(&self) -> usize {
        self.input_rows - self.retained_rows
    }
}

enum Verdict {
    Keep(f64),
    Aggregate,
    MissingGeneration,
    Placeholder,
}

fn judge(row: &RawGenerationRow) -> Verdict {
    let is_sentinel = |code: &Option<String>| code.as_deref() == Some(AGGREGATE_SENTINEL);
    if is_sentinel(&row.fuel_code) || is_sentinel(&row.prime_mover) {
        return Verdict::Aggregate;
    }
    let generation = match row.generation_mwh() {
        Some(value) if value != 0.0 => value,
        _ => return Verdict::MissingGeneration,
    };
    if row.plant_code == PLACEHOLDER_PLANT_CODE {
        return Verdict::Placeholder;
    }
    Verdict::Keep(generation)
}

/// Drop roll-up, zero/missing-generation and placeholder rows.
pub fn clean_rows(rows: &[RawGenerationRow]) -> Vec<RawGenerationRow> {
    clean_rows_with_report(rows).0
}

/// Same as [`clean_rows`], also returning drop counts per reason.
pub fn clean_rows_with_report(rows: &[RawGenerationRow]) -> (Vec<RawGenerationRow>, CleanReport) {
    let mut report = CleanReport {
        input_rows: rows.len(),
        ..CleanReport::default()
    };
    let mut kept = Vec::with_capacity(rows.len());

    for row in rows {
        match judge(row) {
            Verdict::Keep(generation) => {
                let mut row = row.clone();
                row.gross_generation = Some(GenerationValue::Number(generation));
                kept.push(row);
            }
            Verdict::Aggregate => report.aggregate_rows += 1,
            Verdict::MissingGeneration => report.missing_generation_rows += 1,
            Verdict::Placeholder => report.placeholder_rows += 1,
        }
    }

    report.retained_rows = kept.len();
    debug!(
        input = report.input_rows,
        retained = report.retained_rows,
        aggregate = report.aggregate_rows,
        missing_generation = report.missing_generation_rows,
        placeholder = report.placeholder_rows,
        "cleaned generation rows"
    );
    (kept, report)
}
