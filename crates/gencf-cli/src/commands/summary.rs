use std::path::Path;

use anyhow::Result;
use gencf_algo::flag_counts;
use gencf_cli::common::print_flag_table;
use gencf_cli::manifest::record_manifest;
use gencf_core::FlaggedPlantRecord;
use gencf_io::{flagged_to_dataframe, read_records, write_table};

pub fn handle(file: &Path, export: Option<&Path>) -> Result<()> {
    let records: Vec<FlaggedPlantRecord> = read_records(file)?;
    print_flag_table(&flag_counts(&records))?;

    if let Some(export) = export {
        let mut df = flagged_to_dataframe(&records)?;
        write_table(&mut df, export)?;
        println!("Exported {} plants to {}", df.height(), export.display());
        record_manifest(&[export], "summary", &[], &[file])?;
    }
    Ok(())
}
