//! Flat JSON record dumps written between pipeline stages.
//!
//! Each dump is a pretty-printed JSON array of records. Parent directories are
//! created on write. Empty record sets are not written.

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tracing::{info, warn};

pub const RAW_DUMP_PATH: &str = "data/raw/eia_api_data.json";
pub const MERGED_DUMP_PATH: &str = "data/raw/merged_plant_data.json";
pub const ENRICHED_DUMP_PATH: &str = "data/enriched/merged_plant_data_enriched.json";

/// Write `records` to `path`. Returns `false` (and writes nothing) when empty.
pub fn write_records<T: Serialize>(path: &Path, records: &[T]) -> Result<bool> {
    if records.is_empty() {
        warn!(path = %path.display(), "no records to save, skipping");
        return Ok(false);
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating directory {}", parent.display()))?;
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, records)
        .with_context(|| format!("serializing records to {}", path.display()))?;
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;

    info!(path = %path.display(), records = records.len(), "saved records");
    Ok(true)
}

pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let records: Vec<T> = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parsing record array in {}", path.display()))?;
    info!(path = %path.display(), records = records.len(), "loaded records");
    Ok(records)
}
