//! Orchestration error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::extract::ExtractError;
use crate::generation::EmitError;
use crate::resolver::ResolveError;

/// Invalid or unsatisfiable options.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("dirname and filename are mutually exclusive")]
    MutuallyExclusiveOutputs,

    #[error("could not infer package name, supply one with --package")]
    PackageNameUnresolvable,

    #[error("illegal package name `{0}`")]
    InvalidPackageName(String),

    #[error("illegal prefix `{0}`")]
    InvalidPrefix(String),

    #[error("type '{0}' not found in supplied import paths")]
    InterfaceNotFound(String),

    #[error("failed to make output directory {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Any failure of a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error(transparent)]
    Emit(#[from] EmitError),

    #[error("failed to write output")]
    Output(#[source] std::io::Error),
}
