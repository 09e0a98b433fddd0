//! `go.mod` discovery.

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::util::fs;

/// Name of the module declaration file.
pub const MODULE_FILE: &str = "go.mod";

static MODULE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^module\s+(.+)$").unwrap());

/// A module root and the name it declares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Module {
    /// Module path from the `module` directive
    pub name: String,
    /// Directory containing `go.mod`
    pub root: PathBuf,
}

impl Module {
    /// The part of `import_path` below this module, if it belongs to it.
    ///
    /// `example.com/app` owns `example.com/app` and `example.com/app/x`,
    /// but not `example.com/application`.
    pub fn relative<'a>(&self, import_path: &'a str) -> Option<&'a str> {
        let rest = import_path.strip_prefix(self.name.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Directory of a package inside this module.
    pub fn dir_of(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|s| !s.is_empty())
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }
}

/// Read the module name declared in `dir/go.mod`.
pub fn read_module_name(dir: &Path) -> Option<String> {
    let content = fs::read_to_string(&dir.join(MODULE_FILE)).ok()?;

    content.lines().find_map(|line| {
        let captures = MODULE_PATTERN.captures(line.trim())?;
        let value = captures.get(1)?.as_str();
        let value = value.split("//").next().unwrap_or(value).trim();
        let value = value.trim_matches(|c| c == '"' || c == '`');
        (!value.is_empty()).then(|| value.to_string())
    })
}

/// Walk upward from `start` looking for a module root.
///
/// The walk stops before `boundary`, so a `go.mod` at or above the global
/// source root is never picked up.
pub fn find_module(start: &Path, boundary: &Path) -> Option<Module> {
    let mut current = Some(start);
    while let Some(dir) = current {
        if dir == boundary {
            break;
        }

        if let Some(name) = read_module_name(dir) {
            return Some(Module {
                name,
                root: dir.to_path_buf(),
            });
        }

        current = dir.parent();
    }
    None
}
