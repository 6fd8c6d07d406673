//! `crossarm probe` — toolchain installation check.

use std::path::Path;

use anyhow::{bail, Result};

use crossarm_gcc::{is_toolchain_available, registry};

pub fn run(root: &Path) -> Result<()> {
    if is_toolchain_available(root) {
        match registry::default_root() {
            Some(recorded) if recorded.as_os_str().is_empty() => {
                println!("toolchain found on PATH");
            }
            _ => println!("toolchain found under {}", root.display()),
        }
        Ok(())
    } else {
        bail!("arm-none-eabi-gcc not found (root: '{}')", root.display());
    }
}
