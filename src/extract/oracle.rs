//! The type oracle: the seam between the extractor and a Go frontend.
//!
//! An oracle parses and checks one package directory and reports its
//! top-level type declarations with fully resolved types. Named types carry
//! the import path of their defining package, exactly as a type checker
//! would report them; the extractor decides what to keep.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::ChanDir;

/// Parses and type-checks a package directory.
pub trait TypeOracle {
    /// Check the package in `dir`, known to callers as `import_path`.
    fn resolve_package(&self, dir: &Path, import_path: &str)
        -> Result<CheckedPackage, OracleError>;
}

/// A checked package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedPackage {
    /// Name from the package clause
    pub name: String,
    /// Import path the package was checked under
    pub import_path: String,
    /// Top-level type declarations in source order
    pub declarations: Vec<Declaration>,
    /// Exported integer constants, usable as array lengths elsewhere
    pub constants: BTreeMap<String, i128>,
}

impl CheckedPackage {
    /// Look up a declaration by name.
    pub fn declaration(&self, name: &str) -> Option<&Declaration> {
        self.declarations.iter().find(|d| d.name == name)
    }
}

/// A top-level type declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    /// Whether the declaration has type parameters
    pub generic: bool,
    pub kind: DeclarationKind,
}

/// What a declared type's underlying type is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationKind {
    /// An interface with its complete method set
    Interface(Vec<CheckedMethod>),
    /// An interface containing type-set terms; only usable as a constraint
    Constraint,
    /// Anything else
    Other,
}

/// A method in an interface's method set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckedMethod {
    pub name: String,
    pub signature: CheckedSignature,
}

/// A checked function signature. Variadic signatures store the final
/// parameter as a slice.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CheckedSignature {
    pub params: Vec<CheckedType>,
    pub results: Vec<CheckedType>,
    pub variadic: bool,
}

/// A resolved type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckedType {
    /// A named type. `package` is the defining import path, `None` for
    /// universe types.
    Named {
        package: Option<String>,
        name: String,
    },
    Pointer(Box<CheckedType>),
    Slice(Box<CheckedType>),
    Array(Box<CheckedType>, u64),
    Map(Box<CheckedType>, Box<CheckedType>),
    Chan(Box<CheckedType>, ChanDir),
    Signature(CheckedSignature),
    /// A generic type with its type arguments
    Instance(Box<CheckedType>, Vec<CheckedType>),
    /// A reference through the cgo pseudo-package
    Cgo(String),
    EmptyInterface,
    EmptyStruct,
}

/// Why a package could not be checked.
#[derive(Debug, Error)]
pub enum OracleError {
    #[error("no buildable Go source files in {}", .dir.display())]
    NoFiles { dir: PathBuf },

    #[error("{}:{line}:{column}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        column: usize,
        message: String,
    },

    #[error("{message}")]
    TypeCheck { message: String },

    #[error("failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl OracleError {
    pub(crate) fn type_check(message: impl Into<String>) -> Self {
        OracleError::TypeCheck {
            message: message.into(),
        }
    }
}
