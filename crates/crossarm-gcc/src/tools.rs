//! Toolchain binary paths and installation probing.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// The compiler binary probed for when checking toolchain availability.
pub const GCC_BIN: &str = "arm-none-eabi-gcc";

const GXX_BIN: &str = "arm-none-eabi-g++";
const CPP_BIN: &str = "arm-none-eabi-cpp";
const AR_BIN: &str = "arm-none-eabi-ar";
const OBJCOPY_BIN: &str = "arm-none-eabi-objcopy";

/// Resolved executable paths for the toolchain.
///
/// Resolved exactly once from the configured root directory and immutable
/// for the adapter's lifetime. An empty root yields bare binary names,
/// meaning the OS resolves them through the executable search path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolPaths {
    /// C compiler; also the linker driver.
    pub cc: PathBuf,
    /// C++ compiler.
    pub cxx: PathBuf,
    /// Standalone C preprocessor (linker-script expansion).
    pub cpp: PathBuf,
    /// Linker (the gcc driver, so library specs resolve).
    pub ld: PathBuf,
    /// Static archiver.
    pub ar: PathBuf,
    /// ELF-to-image converter.
    pub objcopy: PathBuf,
}

impl ToolPaths {
    /// Resolve the tool paths under a toolchain root directory.
    pub fn from_root(root: &Path) -> Self {
        Self {
            cc: root.join(GCC_BIN),
            cxx: root.join(GXX_BIN),
            cpp: root.join(CPP_BIN),
            ld: root.join(GCC_BIN),
            ar: root.join(AR_BIN),
            objcopy: root.join(OBJCOPY_BIN),
        }
    }
}

/// Process-wide default toolchain root.
///
/// Written at most once (first write wins; later writes are ignored, which
/// is harmless since redundant writes carry the same resolution outcome).
/// An empty recorded root means "resolve tools through PATH". Callers treat
/// this as one-time initialization before concurrent adapter use.
pub mod registry {
    use std::path::{Path, PathBuf};
    use std::sync::OnceLock;

    static DEFAULT_ROOT: OnceLock<PathBuf> = OnceLock::new();

    /// Record the default root if none is recorded yet; returns the value
    /// in effect afterwards.
    pub fn initialize(root: impl Into<PathBuf>) -> &'static Path {
        DEFAULT_ROOT.get_or_init(|| root.into())
    }

    /// The recorded default root, if initialization has happened.
    pub fn default_root() -> Option<&'static Path> {
        DEFAULT_ROOT.get().map(PathBuf::as_path)
    }
}

fn exists_with_exe_suffix(path: &Path) -> bool {
    if path.exists() {
        return true;
    }
    let suffix = std::env::consts::EXE_SUFFIX;
    if suffix.is_empty() {
        return false;
    }
    let mut with_suffix = path.as_os_str().to_os_string();
    with_suffix.push(suffix);
    PathBuf::from(with_suffix).exists()
}

/// Search an executable search path string for the compiler binary.
fn find_in_path(name: &str, path_var: Option<&OsStr>) -> Option<PathBuf> {
    let path_var = path_var?;
    for dir in std::env::split_paths(path_var) {
        if dir.as_os_str().is_empty() {
            continue;
        }
        let candidate = dir.join(name);
        if exists_with_exe_suffix(&candidate) {
            return Some(candidate);
        }
    }
    None
}

/// Core of the availability predicate, with the search path injected so the
/// probe stays deterministic under test.
fn available_with(configured_root: &Path, path_var: Option<&OsStr>) -> bool {
    if configured_root.as_os_str().is_empty() || !configured_root.is_dir() {
        if find_in_path(GCC_BIN, path_var).is_some() {
            // Empty root: later tool resolution goes through PATH.
            registry::initialize(PathBuf::new());
            true
        } else {
            false
        }
    } else {
        exists_with_exe_suffix(&configured_root.join(GCC_BIN))
    }
}

/// Whether the toolchain is installed.
///
/// True if the compiler binary sits directly under `configured_root`, or,
/// when the root is empty or missing, if it can be found on the process's
/// PATH. A successful PATH probe records an empty root in the process-wide
/// [`registry`] so later adapter instances resolve tools the same way; this
/// predicate is therefore one-time initialization, not a per-call check.
pub fn is_toolchain_available(configured_root: &Path) -> bool {
    available_with(configured_root, std::env::var_os("PATH").as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tool_paths_under_root() {
        let paths = ToolPaths::from_root(Path::new("/opt/gcc-arm"));
        assert_eq!(paths.cc, Path::new("/opt/gcc-arm/arm-none-eabi-gcc"));
        assert_eq!(paths.cxx, Path::new("/opt/gcc-arm/arm-none-eabi-g++"));
        assert_eq!(paths.cpp, Path::new("/opt/gcc-arm/arm-none-eabi-cpp"));
        assert_eq!(paths.ld, paths.cc);
        assert_eq!(paths.ar, Path::new("/opt/gcc-arm/arm-none-eabi-ar"));
        assert_eq!(paths.objcopy, Path::new("/opt/gcc-arm/arm-none-eabi-objcopy"));
    }

    #[test]
    fn empty_root_yields_bare_names() {
        let paths = ToolPaths::from_root(Path::new(""));
        assert_eq!(paths.cc, Path::new("arm-none-eabi-gcc"));
    }

    #[test]
    fn available_when_compiler_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(GCC_BIN), "").unwrap();
        assert!(available_with(dir.path(), None));
    }

    #[test]
    fn unavailable_when_root_lacks_compiler() {
        let dir = tempfile::tempdir().unwrap();
        // Existing directory, no compiler inside, and an empty search path.
        assert!(!available_with(dir.path(), None));
    }

    #[test]
    fn missing_root_falls_back_to_search_path() {
        let bin_dir = tempfile::tempdir().unwrap();
        std::fs::write(bin_dir.path().join(GCC_BIN), "").unwrap();
        let path_var = std::env::join_paths([bin_dir.path()]).unwrap();

        assert!(available_with(Path::new(""), Some(path_var.as_os_str())));
        // PATH fallback records the empty root for later instances.
        assert_eq!(registry::default_root(), Some(Path::new("")));
    }

    #[test]
    fn missing_root_and_empty_search_path() {
        assert!(!available_with(Path::new("/nonexistent/toolchain"), None));
    }

    #[test]
    fn find_in_path_skips_empty_entries() {
        let bin_dir = tempfile::tempdir().unwrap();
        std::fs::write(bin_dir.path().join(GCC_BIN), "").unwrap();
        let joined = std::env::join_paths([Path::new(""), bin_dir.path()]).unwrap();
        assert!(find_in_path(GCC_BIN, Some(joined.as_os_str())).is_some());
    }
}
