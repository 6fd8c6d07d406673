//! Architecture, FPU, and ABI flag derivation.
//!
//! The per-core special cases here encode hard-won toolchain knowledge; flag
//! order is significant because later flags override earlier ones at the
//! tool level, so derivation order is part of the contract.

use serde::{Deserialize, Serialize};

use crossarm_target::{Core, DefaultLib};

/// Per-phase base flags from an optimization profile, before any
/// target-specific derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildProfile {
    /// Flags shared by assembly, C, and C++ compilation.
    #[serde(default)]
    pub common: Vec<String>,
    /// Assembler-only flags.
    #[serde(default)]
    pub asm: Vec<String>,
    /// C-only flags.
    #[serde(default)]
    pub c: Vec<String>,
    /// C++-only flags.
    #[serde(default)]
    pub cxx: Vec<String>,
    /// Linker flags.
    #[serde(default)]
    pub ld: Vec<String>,
}

fn base_common() -> Vec<String> {
    [
        "-c",
        "-Wall",
        "-Wextra",
        "-Wno-unused-parameter",
        "-Wno-missing-field-initializers",
        "-fmessage-length=0",
        "-fno-exceptions",
        "-ffunction-sections",
        "-fdata-sections",
        "-funsigned-char",
        "-fomit-frame-pointer",
    ]
    .map(String::from)
    .to_vec()
}

impl BuildProfile {
    /// Day-to-day profile: size-optimized with usable debug info.
    pub fn develop() -> Self {
        let mut common = base_common();
        common.extend(["-Os", "-g1"].map(String::from));
        Self {
            common,
            asm: ["-x", "assembler-with-cpp"].map(String::from).to_vec(),
            c: vec!["-std=gnu99".into()],
            cxx: ["-std=gnu++14", "-fno-rtti"].map(String::from).to_vec(),
            ld: vec!["-Wl,--gc-sections".into()],
        }
    }

    /// Unoptimized profile with full debug info.
    pub fn debug() -> Self {
        let mut profile = Self::develop();
        profile.common.retain(|f| f != "-Os" && f != "-g1");
        profile.common.extend(["-O0", "-g3"].map(String::from));
        profile
    }

    /// Size-optimized profile with assertions compiled out.
    pub fn release() -> Self {
        let mut profile = Self::develop();
        profile.common.retain(|f| f != "-g1");
        profile.common.push("-DNDEBUG".into());
        profile
    }
}

/// Map a core to its `-mcpu=` tag.
///
/// FPU-variant suffixes are stripped (the FPU is selected separately via
/// `-mfpu`), non-secure suffixes resolve to their base core, and an
/// unrecognized core falls back to its lowercased literal so that future
/// cores keep building.
pub fn cpu_tag(core: &Core) -> String {
    match core {
        Core::CortexM0Plus => "cortex-m0plus".to_string(),
        Core::CortexM4F => "cortex-m4".to_string(),
        Core::CortexM7F | Core::CortexM7FD => "cortex-m7".to_string(),
        Core::CortexM23Ns => "cortex-m23".to_string(),
        Core::CortexM33Ns => "cortex-m33".to_string(),
        other => other.as_str().to_lowercase(),
    }
}

/// Derive the instruction-set, FPU, and ABI flags for a core.
///
/// Output order matches the derivation order below and must not be
/// rearranged.
pub fn derive_cpu_flags(core: &Core) -> Vec<String> {
    let mut flags = vec![format!("-mcpu={}", cpu_tag(core))];

    if core.is_cortex_m() {
        flags.push("-mthumb".to_string());
    }

    // FPU selection keys on the exact core, not the stripped cpu tag: the
    // M7 may carry either a single- or double-precision FPv5.
    match core {
        Core::CortexM4F => {
            flags.push("-mfpu=fpv4-sp-d16".to_string());
            flags.push("-mfloat-abi=softfp".to_string());
        }
        Core::CortexM7F => {
            flags.push("-mfpu=fpv5-sp-d16".to_string());
            flags.push("-mfloat-abi=softfp".to_string());
        }
        Core::CortexM7FD => {
            flags.push("-mfpu=fpv5-d16".to_string());
            flags.push("-mfloat-abi=softfp".to_string());
        }
        _ => {}
    }

    if *core == Core::CortexA9 {
        flags.extend(
            [
                "-mthumb-interwork",
                "-marm",
                "-march=armv7-a",
                "-mfpu=vfpv3",
                "-mfloat-abi=hard",
                "-mno-unaligned-access",
            ]
            .map(String::from),
        );
    }

    match core {
        Core::CortexM23 | Core::CortexM23Ns => flags.push("-march=armv8-m.base".to_string()),
        Core::CortexM33 | Core::CortexM33Ns => flags.push("-march=armv8-m.main".to_string()),
        _ => {}
    }

    // Security extensions only for the secure (non-NS) images.
    if matches!(core, Core::CortexM23 | Core::CortexM33) {
        flags.push("-mcmse".to_string());
    }

    flags
}

/// Categorized flag sequences for each tool phase.
///
/// Built once per adapter; per-call options are concatenated onto copies,
/// never appended to the stored base.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    pub common: Vec<String>,
    pub asm: Vec<String>,
    pub c: Vec<String>,
    pub cxx: Vec<String>,
    pub ld: Vec<String>,
}

impl FlagSet {
    /// Derive the full flag set for a target: profile base flags, then CPU
    /// flags on `common` and `ld`, then library-size handling.
    pub fn derive(profile: &BuildProfile, core: &Core, default_lib: DefaultLib) -> Self {
        let cpu = derive_cpu_flags(core);

        let mut flags = Self {
            common: profile.common.clone(),
            asm: profile.asm.clone(),
            c: profile.c.clone(),
            cxx: profile.cxx.clone(),
            ld: profile.ld.clone(),
        };
        flags.common.extend(cpu.iter().cloned());
        flags.ld.extend(cpu);

        if default_lib == DefaultLib::Small {
            flags.common.push("-DRTOS_SINGLE_THREAD".to_string());
            flags.ld.push("--specs=nano.specs".to_string());
        }

        flags
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_for(core: &Core) -> Vec<String> {
        derive_cpu_flags(core)
    }

    #[test]
    fn derivation_is_deterministic() {
        for spelling in ["Cortex-M0+", "Cortex-M4F", "Cortex-M33-NS", "Cortex-A9"] {
            let core = Core::parse(spelling);
            assert_eq!(flags_for(&core), flags_for(&core));
        }
    }

    #[test]
    fn m0_plus_tag() {
        let flags = flags_for(&Core::CortexM0Plus);
        assert_eq!(flags, vec!["-mcpu=cortex-m0plus", "-mthumb"]);
    }

    #[test]
    fn m4f_single_precision_softfp() {
        let flags = flags_for(&Core::CortexM4F);
        assert_eq!(
            flags,
            vec![
                "-mcpu=cortex-m4",
                "-mthumb",
                "-mfpu=fpv4-sp-d16",
                "-mfloat-abi=softfp"
            ]
        );
        assert_eq!(flags.iter().filter(|f| f.starts_with("-mfpu=")).count(), 1);
        assert!(!flags.iter().any(|f| f.contains("fpv5-d16")));
    }

    #[test]
    fn m7_fpu_variants() {
        assert!(flags_for(&Core::CortexM7F).contains(&"-mfpu=fpv5-sp-d16".to_string()));
        let m7fd = flags_for(&Core::CortexM7FD);
        assert!(m7fd.contains(&"-mcpu=cortex-m7".to_string()));
        assert!(m7fd.contains(&"-mfpu=fpv5-d16".to_string()));
    }

    #[test]
    fn a9_profile_has_no_thumb() {
        let flags = flags_for(&Core::CortexA9);
        assert!(!flags.contains(&"-mthumb".to_string()));
        assert!(flags.contains(&"-mfloat-abi=hard".to_string()));
        assert!(flags.contains(&"-march=armv7-a".to_string()));
        assert!(flags.contains(&"-mno-unaligned-access".to_string()));
    }

    #[test]
    fn m33_ns_arch_without_cmse() {
        let flags = flags_for(&Core::CortexM33Ns);
        assert!(flags.contains(&"-march=armv8-m.main".to_string()));
        assert!(!flags.contains(&"-mcmse".to_string()));
    }

    #[test]
    fn m23_and_m33_secure_get_cmse() {
        for core in [Core::CortexM23, Core::CortexM33] {
            assert!(flags_for(&core).contains(&"-mcmse".to_string()), "{core:?}");
        }
        assert!(flags_for(&Core::CortexM23).contains(&"-march=armv8-m.base".to_string()));
        assert!(!flags_for(&Core::CortexM23Ns).contains(&"-mcmse".to_string()));
    }

    #[test]
    fn unknown_core_lowercase_fallback() {
        let flags = flags_for(&Core::parse("Cortex-M85"));
        assert_eq!(flags[0], "-mcpu=cortex-m85");
        // Still thumb: the literal spelling is in the Cortex-M family.
        assert_eq!(flags[1], "-mthumb");
        assert_eq!(flags.len(), 2);

        let flags = flags_for(&Core::parse("Some-Future-Core"));
        assert_eq!(flags, vec!["-mcpu=some-future-core"]);
    }

    #[test]
    fn small_lib_flags() {
        let profile = BuildProfile::develop();
        let small = FlagSet::derive(&profile, &Core::CortexM0, DefaultLib::Small);
        assert!(small.common.contains(&"-DRTOS_SINGLE_THREAD".to_string()));
        assert!(small.ld.contains(&"--specs=nano.specs".to_string()));

        let std = FlagSet::derive(&profile, &Core::CortexM0, DefaultLib::Std);
        assert!(!std.common.contains(&"-DRTOS_SINGLE_THREAD".to_string()));
        assert!(!std.ld.contains(&"--specs=nano.specs".to_string()));
    }

    #[test]
    fn cpu_flags_land_on_common_and_ld() {
        let profile = BuildProfile::develop();
        let flags = FlagSet::derive(&profile, &Core::CortexM4F, DefaultLib::Std);
        for phase in [&flags.common, &flags.ld] {
            assert!(phase.contains(&"-mcpu=cortex-m4".to_string()));
            assert!(phase.contains(&"-mfpu=fpv4-sp-d16".to_string()));
        }
        assert!(!flags.c.contains(&"-mcpu=cortex-m4".to_string()));
    }

    #[test]
    fn profiles_differ_in_optimization() {
        assert!(BuildProfile::develop().common.contains(&"-Os".to_string()));
        assert!(BuildProfile::debug().common.contains(&"-O0".to_string()));
        assert!(!BuildProfile::debug().common.contains(&"-Os".to_string()));
        assert!(BuildProfile::release().common.contains(&"-DNDEBUG".to_string()));
    }
}
