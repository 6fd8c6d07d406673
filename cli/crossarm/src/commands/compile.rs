//! `crossarm compile` — print the compile command for one source file.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crossarm_gcc::Language;

use super::{adapter, print_commands};

pub fn run(
    target_path: &Path,
    root: &Path,
    source: &Path,
    object: &Path,
    includes: &[PathBuf],
    cxx: bool,
) -> Result<()> {
    let tc = adapter(target_path, root)?;
    let lang = if cxx { Language::Cpp } else { Language::C };
    let commands = tc.compile(lang, source, object, includes)?;
    print_commands(&commands);
    Ok(())
}
