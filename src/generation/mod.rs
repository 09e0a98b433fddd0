//! Code generation: the Go source builder, signature composition helpers,
//! the emitter and the shipped wrapper generator.

pub mod emit;
pub mod errors;
pub mod file;
pub mod signature;
pub mod wrapper;

pub use emit::{
    AppInfo, EmitConfig, Emitter, FilenameGenerator, InterfaceGenerator, OutputTarget,
};
pub use errors::EmitError;
pub use file::{FuncDecl, GoFile, StructDecl};
pub use wrapper::{wrapper_filename, WrapperGenerator};
