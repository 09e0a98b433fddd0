//! High-level operations.
//!
//! A generation run validates options, resolves and extracts packages,
//! applies the interface allow-list and hands the result to the emitter.

pub mod errors;
pub mod generate;
pub mod options;

pub use errors::{ConfigError, GenerateError};
pub use generate::{generate, RunOutcome};
pub use options::{GenerateOptions, STDOUT_FILENAME};
