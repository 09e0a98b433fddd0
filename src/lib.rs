//! genlib - an engine for building derive-from-interface Go code generators
//!
//! This crate resolves Go import paths to package directories, extracts
//! exported interfaces into a normalized type model, and emits generated
//! Go source through a pluggable per-interface generator.

pub mod core;
pub mod extract;
pub mod generation;
pub mod ops;
pub mod resolver;
pub mod util;

/// Test utilities for genlib unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides on-disk GOPATH and module fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{Interface, Method, Package, Packages, TypeDescriptor};
pub use extract::{Extractor, GoSourceOracle, TypeOracle};
pub use generation::{AppInfo, EmitConfig, Emitter, GoFile, OutputTarget};
pub use ops::{generate, GenerateOptions, RunOutcome};
pub use resolver::{PathResolver, ResolvedPath};
pub use util::context::GlobalContext;
