//! `crossarm archive` — print the archive command for a set of objects.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{adapter, print_commands};

pub fn run(target_path: &Path, root: &Path, objects: &[PathBuf], output: &Path) -> Result<()> {
    let tc = adapter(target_path, root)?;
    let commands = tc.archive(objects, output)?;
    print_commands(&commands);
    Ok(())
}
