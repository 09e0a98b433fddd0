//! Options of a generation run and their validation.

use std::path::{Path, PathBuf};

use super::errors::ConfigError;
use crate::core::names::is_valid_identifier;
use crate::generation::{EmitConfig, OutputTarget};
use crate::util::fs::absolutize;

/// File name that selects standard output.
pub const STDOUT_FILENAME: &str = "-";

/// Options for a generation run, as given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Import specifiers to scan
    pub import_paths: Vec<String>,

    /// Write one file per interface into this directory
    pub output_dir: Option<PathBuf>,

    /// Write every interface into this file (`-` for standard output)
    pub output_file: Option<PathBuf>,

    /// Overwrite existing files
    pub force: bool,

    /// Interfaces to generate, matched case-insensitively (empty = all)
    pub interfaces: Vec<String>,

    /// Package name of the generated code
    pub package_name: Option<String>,

    /// Prefix for generated type names
    pub prefix: Option<String>,

    /// Only print the interfaces that would be generated
    pub list_only: bool,
}

impl GenerateOptions {
    /// Validate the output options against `cwd` and build the emitter
    /// configuration.
    pub fn emit_config(&self, cwd: &Path) -> Result<EmitConfig, ConfigError> {
        let target = match (&self.output_dir, &self.output_file) {
            (Some(_), Some(_)) => return Err(ConfigError::MutuallyExclusiveOutputs),
            (None, Some(file)) if file.as_os_str() == STDOUT_FILENAME => OutputTarget::Stdout,
            (None, Some(file)) => OutputTarget::File(absolutize(cwd, file)),
            (Some(dir), None) => OutputTarget::Directory(absolutize(cwd, dir)),
            (None, None) => OutputTarget::Directory(absolutize(cwd, Path::new("."))),
        };

        let package_name = match &self.package_name {
            Some(name) => name.clone(),
            None => default_package_name(&target).ok_or(ConfigError::PackageNameUnresolvable)?,
        };
        if !is_valid_identifier(&package_name) {
            return Err(ConfigError::InvalidPackageName(package_name));
        }

        let prefix = self.prefix.clone().filter(|p| !p.is_empty());
        if let Some(prefix) = &prefix {
            if !is_valid_identifier(prefix) {
                return Err(ConfigError::InvalidPrefix(prefix.clone()));
            }
        }

        Ok(EmitConfig {
            target,
            force: self.force,
            package_name,
            prefix,
        })
    }

    /// Whether `name` passes the allow-list.
    pub fn allows(&self, name: &str) -> bool {
        self.interfaces.is_empty()
            || self
                .interfaces
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(name))
    }
}

/// Base name of the directory generated files land in.
fn default_package_name(target: &OutputTarget) -> Option<String> {
    let dir = match target {
        OutputTarget::File(path) => path.parent()?,
        OutputTarget::Directory(dir) => dir.as_path(),
        OutputTarget::Stdout => return None,
    };
    dir.file_name().map(|name| name.to_string_lossy().into_owned())
}
