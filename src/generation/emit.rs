//! Output placement and emission.
//!
//! Interfaces are rendered either into one aggregated file (or standard
//! output) or into one file per interface inside a directory. Every
//! destination is checked before anything is written, so a conflict leaves
//! the filesystem untouched.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};

use super::errors::EmitError;
use super::file::GoFile;
use crate::core::Interface;
use crate::util::fs::{any_exists, display_path, ensure_dir, file_exists, write_file};

/// Identity of the generator built on top of this crate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    /// Tool name shown in the header
    pub name: String,
    pub version: String,
    /// Command line the tool was invoked with
    pub command: Vec<String>,
}

impl AppInfo {
    pub fn new(name: impl Into<String>, version: impl Into<String>, command: Vec<String>) -> Self {
        AppInfo {
            name: name.into(),
            version: version.into(),
            command,
        }
    }
}

/// Where generated code goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// Every interface in one file
    File(PathBuf),
    /// One file per interface
    Directory(PathBuf),
    /// Every interface, printed
    Stdout,
}

/// Validated emission settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmitConfig {
    pub target: OutputTarget,
    /// Overwrite existing files
    pub force: bool,
    /// Package clause of generated files
    pub package_name: String,
    pub prefix: Option<String>,
}

impl EmitConfig {
    /// Directory generated files land in, if any.
    pub fn output_dir(&self) -> Option<&Path> {
        match &self.target {
            OutputTarget::File(path) => path.parent(),
            OutputTarget::Directory(dir) => Some(dir),
            OutputTarget::Stdout => None,
        }
    }
}

/// Generates code for one interface into a file.
pub trait InterfaceGenerator {
    fn generate(&self, file: &mut GoFile, iface: &Interface, prefix: &str);
}

impl<F> InterfaceGenerator for F
where
    F: Fn(&mut GoFile, &Interface, &str),
{
    fn generate(&self, file: &mut GoFile, iface: &Interface, prefix: &str) {
        self(file, iface, prefix)
    }
}

/// Maps an interface name to the base name of its file in directory mode.
pub trait FilenameGenerator {
    fn filename(&self, interface_name: &str) -> String;
}

impl<F> FilenameGenerator for F
where
    F: Fn(&str) -> String,
{
    fn filename(&self, interface_name: &str) -> String {
        self(interface_name)
    }
}

/// Renders interfaces and writes the results.
pub struct Emitter<'a> {
    app: &'a AppInfo,
    /// Base for paths shown in logs and errors
    cwd: &'a Path,
}

impl<'a> Emitter<'a> {
    pub fn new(app: &'a AppInfo, cwd: &'a Path) -> Self {
        Emitter { app, cwd }
    }

    /// Emit `interfaces` according to `config`, returning the files written.
    ///
    /// With [`OutputTarget::Stdout`] the code goes to `out` instead.
    pub fn emit(
        &self,
        interfaces: &[Interface],
        config: &EmitConfig,
        filenames: &dyn FilenameGenerator,
        generator: &dyn InterfaceGenerator,
        out: &mut dyn Write,
    ) -> Result<Vec<PathBuf>, EmitError> {
        let prefix = config.prefix.as_deref().unwrap_or_default();

        match &config.target {
            OutputTarget::Stdout => {
                let content = self.render(interfaces, config, generator)?;
                out.write_all(content.as_bytes())
                    .map_err(|e| EmitError::Write {
                        path: PathBuf::from("<stdout>"),
                        source: e,
                    })?;
                Ok(Vec::new())
            }
            OutputTarget::File(path) => {
                let exists = file_exists(path).map_err(|e| write_error(path, e))?;
                if exists && !config.force {
                    return Err(self.conflict(path));
                }

                let content = self.render(interfaces, config, generator)?;
                self.write(path, &content)?;
                Ok(vec![path.clone()])
            }
            OutputTarget::Directory(dir) => {
                let mut batch: Vec<(&Interface, PathBuf)> = Vec::with_capacity(interfaces.len());
                for iface in interfaces {
                    let path = dir.join(output_filename(&iface.name, prefix, filenames));
                    match batch.iter().find(|(_, other)| *other == path) {
                        Some((first, _)) if first.same_declaration(iface) => continue,
                        Some((first, _)) => {
                            return Err(EmitError::Collision {
                                display: display_path(self.cwd, &path),
                                path,
                                first: qualified_name(first),
                                second: qualified_name(iface),
                            })
                        }
                        None => batch.push((iface, path)),
                    }
                }

                if !config.force {
                    let conflict = any_exists(batch.iter().map(|(_, path)| path))
                        .map_err(|e| write_error(dir, e))?;
                    if let Some(path) = conflict {
                        return Err(self.conflict(&path));
                    }
                }

                // Nothing touches the disk until every file has rendered
                let rendered = batch
                    .into_iter()
                    .map(|(iface, path)| -> Result<(PathBuf, String), EmitError> {
                        let content =
                            self.render(std::slice::from_ref(iface), config, generator)?;
                        Ok((path, content))
                    })
                    .collect::<Result<Vec<_>, EmitError>>()?;

                let mut written = Vec::with_capacity(rendered.len());
                for (path, content) in rendered {
                    self.write(&path, &content)?;
                    written.push(path);
                }
                Ok(written)
            }
        }
    }

    /// Render `interfaces` into one file.
    fn render(
        &self,
        interfaces: &[Interface],
        config: &EmitConfig,
        generator: &dyn InterfaceGenerator,
    ) -> Result<String, EmitError> {
        let mut file = GoFile::new(&config.package_name);
        for line in header_lines(self.app, &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true))
        {
            file.header_comment(line);
        }

        let prefix = config.prefix.as_deref().unwrap_or_default();
        for iface in interfaces {
            tracing::info!("generating code for interface '{}'", iface.name);
            generator.generate(&mut file, iface, prefix);
        }

        file.render()
    }

    fn write(&self, path: &Path, content: &str) -> Result<(), EmitError> {
        tracing::info!("writing to '{}'", display_path(self.cwd, path));

        if let Some(parent) = path.parent() {
            ensure_dir(parent).map_err(|e| write_error(parent, e))?;
        }
        write_file(path, content.as_bytes()).map_err(|e| write_error(path, e))
    }

    fn conflict(&self, path: &Path) -> EmitError {
        EmitError::Conflict {
            path: path.to_path_buf(),
            display: display_path(self.cwd, path),
        }
    }
}

fn write_error(path: &Path, source: std::io::Error) -> EmitError {
    EmitError::Write {
        path: path.to_path_buf(),
        source,
    }
}

/// `import/path.Name`, or just the name once elided.
fn qualified_name(iface: &Interface) -> String {
    if iface.import_path.is_empty() {
        iface.name.clone()
    } else {
        format!("{}.{}", iface.import_path, iface.name)
    }
}

/// The header comment block of a generated file.
pub fn header_lines(app: &AppInfo, timestamp: &str) -> Vec<String> {
    vec![
        format!("Code generated by {} {}; DO NOT EDIT.", app.name, app.version),
        "This file was generated by robots at".to_string(),
        timestamp.to_string(),
        "using the command".to_string(),
        format!("$ {}", app.command.join(" ")),
    ]
}

/// File name for an interface in directory mode: the generator's name,
/// prefixed with `<prefix>_`, lower-cased, with `-` replaced by `_`.
pub fn output_filename(
    interface_name: &str,
    prefix: &str,
    filenames: &dyn FilenameGenerator,
) -> String {
    let mut name = filenames.filename(interface_name);
    if !prefix.is_empty() {
        name = format!("{}_{}", prefix, name);
    }
    name.to_lowercase().replace('-', "_")
}
