//! Emission error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while rendering or writing generated files.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A destination already exists and `--force` was not given.
    #[error("filename {display} already exists, overwrite with --force")]
    Conflict {
        path: PathBuf,
        /// The path as shown to the user
        display: String,
    },

    /// Two interfaces map to the same file in directory mode.
    #[error("{first} and {second} would both be written to {display}")]
    Collision {
        path: PathBuf,
        display: String,
        first: String,
        second: String,
    },

    /// The generated source does not parse.
    #[error("generated source is invalid: {message}")]
    Serialization { message: String },

    #[error("failed to write {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
