//! Test utilities for genlib unit tests.
//!
//! Provides on-disk workspace fixtures and small generator callbacks used
//! across the resolver, extractor, emitter and orchestrator tests.

pub mod fixtures;

use crate::core::Interface;
use crate::generation::GoFile;

pub use fixtures::*;

/// A generator that emits one marker type per interface.
pub fn marker_generator(file: &mut GoFile, iface: &Interface, prefix: &str) {
    file.add_raw(format!("type {}{}Marker struct{{}}", prefix, iface.name));
}

/// File names of the form `<name>.go`.
pub fn go_filename(name: &str) -> String {
    format!("{name}.go")
}
