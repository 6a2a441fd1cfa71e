//! Lists the boots recorded in the journal.

use std::io::Write;

use anyhow::Result;

use crate::Config;
use crate::boots::{BootRecord, list_boots};

pub fn run<W: Write>(writer: &mut W, config: &Config) -> Result<()> {
    let boots = list_boots(&config.journalctl)?;
    write_boots(writer, &boots)
}

fn write_boots<W: Write>(writer: &mut W, boots: &[BootRecord]) -> Result<()> {
    if boots.is_empty() {
        writeln!(writer, "No boots recorded.")?;
        return Ok(());
    }

    for boot in boots {
        writeln!(writer, "{:>4}  {}  {}", boot.index, boot.boot_id, boot.span)?;
    }
    Ok(())
}
