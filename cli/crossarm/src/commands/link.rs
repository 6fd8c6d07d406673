//! `crossarm link` — print the link command(s) for a set of objects.

use std::path::{Path, PathBuf};

use anyhow::Result;

use super::{adapter, print_commands};

#[allow(clippy::too_many_arguments)]
pub fn run(
    target_path: &Path,
    root: &Path,
    output: &Path,
    objects: &[PathBuf],
    libraries: &[PathBuf],
    library_dirs: &[PathBuf],
    memory_map: Option<&Path>,
) -> Result<()> {
    let tc = adapter(target_path, root)?;
    let commands = tc.link(output, objects, libraries, library_dirs, memory_map)?;
    print_commands(&commands);
    Ok(())
}
