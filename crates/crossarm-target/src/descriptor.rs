//! Target descriptor.
//!
//! The immutable description of one hardware build target, supplied to the
//! adapter at construction and never mutated afterward.

use serde::{Deserialize, Serialize};

use crate::cpu::Core;

/// C library size trade-off for a target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DefaultLib {
    /// Full standard library.
    #[default]
    Std,
    /// Reduced-footprint library (newlib-nano) with a single-thread runtime.
    Small,
}

/// Immutable description of a hardware build target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TargetDescriptor {
    /// Human-readable target name (e.g., "NUCLEO_F401RE"); attached to
    /// diagnostic records for attribution.
    pub name: String,
    /// CPU core of the device.
    pub core: Core,
    /// Library size preference; `None` means standard.
    #[serde(default)]
    pub default_lib: Option<DefaultLib>,
}

impl TargetDescriptor {
    /// Construct a descriptor with the standard library preference.
    pub fn new(name: impl Into<String>, core: Core) -> Self {
        Self {
            name: name.into(),
            core,
            default_lib: None,
        }
    }

    /// The library preference with the standard default applied.
    pub fn resolved_default_lib(&self) -> DefaultLib {
        self.default_lib.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_lib_resolution() {
        let mut target = TargetDescriptor::new("BOARD_A", Core::CortexM4F);
        assert_eq!(target.resolved_default_lib(), DefaultLib::Std);
        target.default_lib = Some(DefaultLib::Small);
        assert_eq!(target.resolved_default_lib(), DefaultLib::Small);
    }
}
