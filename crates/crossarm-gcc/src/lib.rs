//! GNU Arm Embedded toolchain adapter.
//!
//! Turns a [`crossarm_target::TargetDescriptor`] into the exact invocation
//! parameters for `arm-none-eabi-gcc` and friends, and build requests
//! (compile a source file, link objects, archive objects, convert an ELF to
//! a flashable image) into ready-to-execute command token lists. The raw
//! diagnostic stream captured from a toolchain run is parsed back into
//! structured records.
//!
//! Nothing in this crate spawns a process. Command construction is a pure
//! function of the immutable adapter state, so a build orchestrator may call
//! it from many workers concurrently; process execution, scheduling, and
//! dependency tracking belong to the caller.

pub mod command;
pub mod diagnostics;
pub mod error;
pub mod flags;
pub mod response;
pub mod tools;

pub use command::{CommandHooks, CommandLine, CommandTransform, GccConfig, GccToolchain, Language};
pub use diagnostics::{
    is_not_supported_error, DiagnosticRecord, DiagnosticSink, OutputParser, Severity,
    TOOLCHAIN_NAME,
};
pub use error::{GccError, Result};
pub use flags::{cpu_tag, derive_cpu_flags, BuildProfile, FlagSet};
pub use response::{DiskResponseFiles, ResponseFileKind, ResponseFileWriter};
pub use tools::{is_toolchain_available, registry, ToolPaths};
