//! `crossarm flags` — show the derived flag set for a target.

use std::path::Path;

use anyhow::Result;

use crossarm_gcc::FlagSet;
use crossarm_target::validate_descriptor;

use super::{load_target, profile_by_name};

pub fn run(target_path: &Path, profile_name: &str) -> Result<()> {
    let target = load_target(target_path)?;
    let profile = profile_by_name(profile_name)?;

    if let Err(issues) = validate_descriptor(&target) {
        for issue in issues {
            eprintln!("{}: {}", issue.severity, issue.message);
        }
    }

    let flags = FlagSet::derive(&profile, &target.core, target.resolved_default_lib());
    println!("target: {} ({})", target.name, target.core);
    for (phase, list) in [
        ("common", &flags.common),
        ("asm", &flags.asm),
        ("c", &flags.c),
        ("cxx", &flags.cxx),
        ("ld", &flags.ld),
    ] {
        println!("[{phase}]");
        for flag in list {
            println!("  {flag}");
        }
    }
    Ok(())
}
