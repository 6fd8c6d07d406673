//! CPU core taxonomy.
//!
//! Cores a device descriptor may name. The set is closed over the cores the
//! GNU Arm Embedded toolchain has dedicated flag handling for; anything else
//! is carried verbatim as [`Core::Other`] so that a descriptor written for a
//! newer core than this crate knows about still builds with reasonable
//! defaults instead of being rejected.

use serde::{Deserialize, Serialize};

/// A CPU core identifier.
///
/// Parsing never fails: unrecognized spellings land in `Other` and are
/// handled with a permissive lowercase fallback downstream. Use
/// [`Core::is_known`] to detect that the fallback applied.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Core {
    CortexM0,
    CortexM0Plus,
    CortexM1,
    CortexM3,
    CortexM4,
    /// Cortex-M4 with the single-precision FPv4 FPU.
    CortexM4F,
    CortexM7,
    /// Cortex-M7 with the single-precision FPv5 FPU.
    CortexM7F,
    /// Cortex-M7 with the double-precision FPv5 FPU.
    CortexM7FD,
    CortexM23,
    /// Cortex-M23 non-secure image (no security extension flags).
    CortexM23Ns,
    CortexM33,
    /// Cortex-M33 non-secure image (no security extension flags).
    CortexM33Ns,
    CortexA9,
    /// A core this crate has no dedicated handling for.
    Other(String),
}

impl Core {
    /// Parse a vendor spelling such as `"Cortex-M4F"`.
    pub fn parse(s: &str) -> Core {
        match s {
            "Cortex-M0" => Core::CortexM0,
            "Cortex-M0+" => Core::CortexM0Plus,
            "Cortex-M1" => Core::CortexM1,
            "Cortex-M3" => Core::CortexM3,
            "Cortex-M4" => Core::CortexM4,
            "Cortex-M4F" => Core::CortexM4F,
            "Cortex-M7" => Core::CortexM7,
            "Cortex-M7F" => Core::CortexM7F,
            "Cortex-M7FD" => Core::CortexM7FD,
            "Cortex-M23" => Core::CortexM23,
            "Cortex-M23-NS" => Core::CortexM23Ns,
            "Cortex-M33" => Core::CortexM33,
            "Cortex-M33-NS" => Core::CortexM33Ns,
            "Cortex-A9" => Core::CortexA9,
            other => Core::Other(other.to_string()),
        }
    }

    /// The canonical vendor spelling.
    pub fn as_str(&self) -> &str {
        match self {
            Core::CortexM0 => "Cortex-M0",
            Core::CortexM0Plus => "Cortex-M0+",
            Core::CortexM1 => "Cortex-M1",
            Core::CortexM3 => "Cortex-M3",
            Core::CortexM4 => "Cortex-M4",
            Core::CortexM4F => "Cortex-M4F",
            Core::CortexM7 => "Cortex-M7",
            Core::CortexM7F => "Cortex-M7F",
            Core::CortexM7FD => "Cortex-M7FD",
            Core::CortexM23 => "Cortex-M23",
            Core::CortexM23Ns => "Cortex-M23-NS",
            Core::CortexM33 => "Cortex-M33",
            Core::CortexM33Ns => "Cortex-M33-NS",
            Core::CortexA9 => "Cortex-A9",
            Core::Other(s) => s,
        }
    }

    /// Whether this core has dedicated handling (false means the lowercase
    /// fallback will apply during flag derivation).
    pub fn is_known(&self) -> bool {
        !matches!(self, Core::Other(_))
    }

    /// Whether this core belongs to the Cortex-M family (controls thumb
    /// instruction mode selection).
    pub fn is_cortex_m(&self) -> bool {
        self.as_str().starts_with("Cortex-M")
    }
}

impl From<String> for Core {
    fn from(s: String) -> Self {
        Core::parse(&s)
    }
}

impl From<Core> for String {
    fn from(core: Core) -> Self {
        core.as_str().to_string()
    }
}

impl std::fmt::Display for Core {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_cores_round_trip() {
        for spelling in [
            "Cortex-M0",
            "Cortex-M0+",
            "Cortex-M1",
            "Cortex-M3",
            "Cortex-M4",
            "Cortex-M4F",
            "Cortex-M7",
            "Cortex-M7F",
            "Cortex-M7FD",
            "Cortex-M23",
            "Cortex-M23-NS",
            "Cortex-M33",
            "Cortex-M33-NS",
            "Cortex-A9",
        ] {
            let core = Core::parse(spelling);
            assert!(core.is_known(), "{spelling} should be known");
            assert_eq!(core.as_str(), spelling);
        }
    }

    #[test]
    fn parse_unknown_core_falls_back() {
        let core = Core::parse("Cortex-M85");
        assert!(!core.is_known());
        assert_eq!(core.as_str(), "Cortex-M85");
        // Family detection still works on the literal spelling.
        assert!(core.is_cortex_m());
    }

    #[test]
    fn cortex_m_family_detection() {
        assert!(Core::CortexM0Plus.is_cortex_m());
        assert!(Core::CortexM33Ns.is_cortex_m());
        assert!(!Core::CortexA9.is_cortex_m());
        assert!(!Core::Other("RISC-V".into()).is_cortex_m());
    }
}
