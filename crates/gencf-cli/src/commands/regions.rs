use std::io::{self, Write};

use anyhow::Result;
use gencf_core::CensusRegion;
use tabwriter::TabWriter;

pub fn handle() -> Result<()> {
    let mut writer = TabWriter::new(io::stdout());
    writeln!(writer, "REGION\tSTATES")?;
    for region in CensusRegion::ALL {
        writeln!(writer, "{}\t{}", region.name(), region.states().join(","))?;
    }
    writer.flush()?;
    Ok(())
}
