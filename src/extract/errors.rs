//! Extraction error types.

use thiserror::Error;

use super::oracle::OracleError;

/// A package directory that could not be turned into a type model.
#[derive(Debug, Error)]
#[error("could not import package `{import_path}`")]
pub struct ExtractError {
    /// Specifier of the offending package
    pub import_path: String,
    #[source]
    pub source: OracleError,
}

impl ExtractError {
    pub fn new(import_path: impl Into<String>, source: OracleError) -> Self {
        ExtractError {
            import_path: import_path.into(),
            source,
        }
    }
}
