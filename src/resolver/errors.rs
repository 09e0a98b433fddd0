//! Resolution error types.

use std::path::PathBuf;

use thiserror::Error;

/// Error while locating a package on disk.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("could not locate package `{import_path}`")]
    NotFound {
        import_path: String,
        /// Candidate directories that were checked, in order
        searched: Vec<PathBuf>,
    },
}

impl ResolveError {
    /// The specifier that failed to resolve.
    pub fn import_path(&self) -> &str {
        match self {
            ResolveError::NotFound { import_path, .. } => import_path,
        }
    }

    /// Candidate directories that were checked.
    pub fn searched(&self) -> &[PathBuf] {
        match self {
            ResolveError::NotFound { searched, .. } => searched,
        }
    }
}
