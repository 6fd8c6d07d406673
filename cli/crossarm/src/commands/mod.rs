//! CLI command implementations.

pub mod archive;
pub mod binary;
pub mod compile;
pub mod flags;
pub mod link;
pub mod parse;
pub mod probe;

use std::path::Path;

use anyhow::{bail, Context, Result};

use crossarm_gcc::{BuildProfile, CommandLine, GccConfig, GccToolchain};
use crossarm_target::{load_descriptor, TargetDescriptor};

pub(crate) fn load_target(path: &Path) -> Result<TargetDescriptor> {
    load_descriptor(path)
        .with_context(|| format!("loading target descriptor {}", path.display()))
}

pub(crate) fn adapter(target_path: &Path, root: &Path) -> Result<GccToolchain> {
    let target = load_target(target_path)?;
    let mut config = GccConfig::new(target);
    config.toolchain_root = root.to_path_buf();
    Ok(GccToolchain::new(config))
}

pub(crate) fn profile_by_name(name: &str) -> Result<BuildProfile> {
    match name {
        "develop" => Ok(BuildProfile::develop()),
        "debug" => Ok(BuildProfile::debug()),
        "release" => Ok(BuildProfile::release()),
        other => bail!("unknown profile '{other}' (expected develop, debug, or release)"),
    }
}

/// Print each command shell-style, one per line.
pub(crate) fn print_commands(commands: &[CommandLine]) {
    for cmd in commands {
        println!("{}", cmd.join(" "));
    }
}
