//! Embedded build target model for the crossarm toolchain adapter.
//!
//! A target is described by a [`TargetDescriptor`]: which CPU core the
//! device carries, which C library size trade-off it wants, and a
//! human-readable name used for diagnostic attribution. Descriptors are
//! stored as `.target.toml` files in a project's `targets/` directory.

pub mod cpu;
pub mod descriptor;
pub mod error;
pub mod parse;

pub use cpu::Core;
pub use descriptor::{DefaultLib, TargetDescriptor};
pub use error::{Result, TargetError};
pub use parse::{
    descriptor_to_toml, discover_targets, load_descriptor, parse_descriptor, validate_descriptor,
    ValidationIssue,
};
