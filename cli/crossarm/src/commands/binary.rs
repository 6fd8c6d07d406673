//! `crossarm binary` — print the ELF-to-image conversion command.

use std::path::Path;

use anyhow::Result;

use super::{adapter, print_commands};

pub fn run(target_path: &Path, root: &Path, elf: &Path, output: &Path) -> Result<()> {
    let tc = adapter(target_path, root)?;
    let commands = tc.binary(elf, output)?;
    print_commands(&commands);
    Ok(())
}
