//! Flat one-row-per-plant tables for spreadsheets and dataframe tools.

use anyhow::{Context, Result};
use gencf_core::FlaggedPlantRecord;
#[cfg(feature = "parquet")]
use polars::prelude::ParquetWriter;
use polars::prelude::{CsvWriter, DataFrame, NamedFrom, SerWriter, Series};
use std::fs::{self, File};
use std::path::Path;

/// Summary columns of the flagged records, in dump order.
pub fn flagged_to_dataframe(records: &[FlaggedPlantRecord]) -> Result<DataFrame> {
    let text = |f: fn(&FlaggedPlantRecord) -> Option<String>| -> Vec<Option<String>> {
        records.iter().map(f).collect()
    };
    let number = |f: fn(&FlaggedPlantRecord) -> Option<f64>| -> Vec<Option<f64>> {
        records.iter().map(f).collect()
    };

    let df = DataFrame::new(vec![
        Series::new("plant_code", text(|r| Some(r.record.plant_code.clone()))),
        Series::new("plant_name", text(|r| r.record.plant_name.clone())),
        Series::new("state", text(|r| r.record.state.clone())),
        Series::new("fuel_type", text(|r| r.record.fuel_type_description.clone())),
        Series::new("gross_generation_mwh", number(|r| r.record.gross_generation)),
        Series::new("total_capacity_mw", number(|r| r.record.total_capacity_mw)),
        Series::new(
            "capacity_factor_pct",
            number(|r| r.record.capacity_factor_percent),
        ),
        Series::new(
            "data_source",
            text(|r| {
                serde_json::to_value(r.record.data_source)
                    .ok()
                    .and_then(|v| v.as_str().map(String::from))
            }),
        ),
        Series::new(
            "capacity_factor_flag",
            text(|r| Some(r.capacity_factor_flag.to_string())),
        ),
    ])?;

    Ok(df)
}

/// Write to CSV or Parquet depending on the file extension.
pub fn write_table(df: &mut DataFrame, output: &Path) -> Result<()> {
    let extension = output
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    match extension.as_str() {
        #[cfg(feature = "parquet")]
        "parquet" => {
            let mut file = File::create(output)
                .with_context(|| format!("creating output file {}", output.display()))?;
            ParquetWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("writing Parquet to {}", output.display()))?;
        }
        #[cfg(not(feature = "parquet"))]
        "parquet" => {
            return Err(anyhow::anyhow!(
                "Parquet support requires the 'parquet' feature"
            ));
        }
        _ => {
            let mut file = File::create(output)
                .with_context(|| format!("creating output file {}", output.display()))?;
            CsvWriter::new(&mut file)
                .finish(df)
                .with_context(|| format!("writing CSV to {}", output.display()))?;
        }
    }

    Ok(())
}
