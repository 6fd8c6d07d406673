//! TOML parsing, serialization, validation, and discovery for target
//! descriptors.
//!
//! Descriptors are stored as `.target.toml` files in the `targets/`
//! directory of a project. This module provides functions to load, validate,
//! serialize, and discover these files.

use std::path::{Path, PathBuf};

use crate::descriptor::TargetDescriptor;
use crate::error::{Result, TargetError};

/// A validation issue found in a target descriptor.
#[derive(Debug, Clone)]
pub struct ValidationIssue {
    /// Severity: "error" or "warning".
    pub severity: &'static str,
    /// Human-readable description.
    pub message: String,
}

/// Load a descriptor from a `.target.toml` file.
pub fn load_descriptor(path: &Path) -> Result<TargetDescriptor> {
    if !path.exists() {
        return Err(TargetError::NotFound {
            path: path.to_path_buf(),
        });
    }
    let content = std::fs::read_to_string(path)?;
    parse_descriptor(&content)
}

/// Parse a descriptor from a TOML string.
pub fn parse_descriptor(toml_str: &str) -> Result<TargetDescriptor> {
    let descriptor: TargetDescriptor = toml::from_str(toml_str)?;
    Ok(descriptor)
}

/// Serialize a descriptor to pretty TOML.
pub fn descriptor_to_toml(descriptor: &TargetDescriptor) -> Result<String> {
    let toml_str = toml::to_string_pretty(descriptor)?;
    Ok(toml_str)
}

/// Validate a descriptor.
///
/// Returns `Ok(())` if clean, or `Err(issues)` with a list of problems. An
/// unrecognized core is a warning, not an error: flag derivation applies a
/// permissive lowercase fallback for forward compatibility.
pub fn validate_descriptor(
    descriptor: &TargetDescriptor,
) -> std::result::Result<(), Vec<ValidationIssue>> {
    let mut issues = Vec::new();

    if descriptor.name.is_empty() {
        issues.push(ValidationIssue {
            severity: "error",
            message: "target name is empty".into(),
        });
    }

    if !descriptor.core.is_known() {
        issues.push(ValidationIssue {
            severity: "warning",
            message: format!(
                "core '{}' is not recognized; the lowercase fallback will be used for -mcpu",
                descriptor.core
            ),
        });
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(issues)
    }
}

/// Discover all `.target.toml` files in a project's `targets/` directory.
///
/// Returns a list of (target_name, file_path) pairs sorted by name.
pub fn discover_targets(project_dir: &Path) -> Result<Vec<(String, PathBuf)>> {
    let targets_dir = project_dir.join("targets");
    if !targets_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut targets = Vec::new();
    let entries = std::fs::read_dir(&targets_dir)?;
    for entry in entries {
        let entry = entry?;
        let path = entry.path();
        if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
            if let Some(name) = file_name.strip_suffix(".target.toml") {
                targets.push((name.to_string(), path.clone()));
            }
        }
    }
    targets.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu::Core;
    use crate::descriptor::DefaultLib;

    #[test]
    fn round_trip_descriptor() {
        let original = TargetDescriptor {
            name: "DISCO_F746NG".into(),
            core: Core::CortexM7F,
            default_lib: Some(DefaultLib::Small),
        };
        let toml_str = descriptor_to_toml(&original).unwrap();
        let parsed = parse_descriptor(&toml_str).unwrap();
        assert_eq!(original, parsed);
    }

    #[test]
    fn parse_minimal_toml() {
        let descriptor = parse_descriptor(
            r#"
name = "NUCLEO_F401RE"
core = "Cortex-M4F"
"#,
        )
        .unwrap();
        assert_eq!(descriptor.name, "NUCLEO_F401RE");
        assert_eq!(descriptor.core, Core::CortexM4F);
        assert_eq!(descriptor.default_lib, None);
    }

    #[test]
    fn parse_small_lib_toml() {
        let descriptor = parse_descriptor(
            r#"
name = "TINY_BOARD"
core = "Cortex-M0+"
default-lib = "small"
"#,
        )
        .unwrap();
        assert_eq!(descriptor.core, Core::CortexM0Plus);
        assert_eq!(descriptor.default_lib, Some(DefaultLib::Small));
    }

    #[test]
    fn parse_invalid_returns_error() {
        assert!(parse_descriptor("this is not valid toml [[[").is_err());
    }

    #[test]
    fn parse_missing_field_returns_error() {
        assert!(parse_descriptor("name = \"incomplete\"\n").is_err());
    }

    #[test]
    fn validate_unknown_core_warns() {
        let descriptor = TargetDescriptor::new("FUTURE", Core::parse("Cortex-M85"));
        let issues = validate_descriptor(&descriptor).unwrap_err();
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, "warning");
        assert!(issues[0].message.contains("Cortex-M85"));
    }

    #[test]
    fn validate_empty_name_errors() {
        let descriptor = TargetDescriptor::new("", Core::CortexM3);
        let issues = validate_descriptor(&descriptor).unwrap_err();
        assert!(issues.iter().any(|i| i.severity == "error"));
    }

    #[test]
    fn validate_clean_descriptor() {
        let descriptor = TargetDescriptor::new("NUCLEO_L476RG", Core::CortexM4F);
        assert!(validate_descriptor(&descriptor).is_ok());
    }

    #[test]
    fn discover_targets_finds_files() {
        let dir = tempfile::tempdir().unwrap();
        let targets_dir = dir.path().join("targets");
        std::fs::create_dir_all(&targets_dir).unwrap();

        let descriptor = TargetDescriptor::new("BOARD", Core::CortexM4);
        let toml_str = descriptor_to_toml(&descriptor).unwrap();
        std::fs::write(targets_dir.join("board-a.target.toml"), &toml_str).unwrap();
        std::fs::write(targets_dir.join("board-b.target.toml"), &toml_str).unwrap();
        // Non-descriptor file is ignored.
        std::fs::write(targets_dir.join("notes.txt"), "ignore me").unwrap();

        let targets = discover_targets(dir.path()).unwrap();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[0].0, "board-a");
        assert_eq!(targets[1].0, "board-b");
    }

    #[test]
    fn discover_without_targets_dir() {
        let dir = tempfile::tempdir().unwrap();
        let targets = discover_targets(dir.path()).unwrap();
        assert!(targets.is_empty());
    }

    #[test]
    fn load_not_found() {
        let result = load_descriptor(Path::new("/nonexistent/board.target.toml"));
        assert!(matches!(result.unwrap_err(), TargetError::NotFound { .. }));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("board.target.toml");
        let descriptor = TargetDescriptor::new("FILE_BOARD", Core::CortexM33);
        std::fs::write(&path, descriptor_to_toml(&descriptor).unwrap()).unwrap();

        let loaded = load_descriptor(&path).unwrap();
        assert_eq!(loaded, descriptor);
    }
}
