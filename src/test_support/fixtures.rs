//! Test fixtures for common test scenarios.
//!
//! Builds throwaway GOPATH and module trees on disk so resolution,
//! extraction and emission can be tested against real directories.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::resolver::PathResolver;
use crate::util::context::GlobalContext;

/// A temporary directory holding a GOPATH (`<root>/gopath`) and room for
/// module projects outside of it.
pub struct GoWorkspaceFixture {
    tmp: TempDir,
}

impl GoWorkspaceFixture {
    /// Create an empty workspace with `<root>/gopath/src` in place.
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("gopath/src")).unwrap();
        GoWorkspaceFixture { tmp }
    }

    /// The temporary root.
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    /// The GOPATH.
    pub fn gopath(&self) -> PathBuf {
        self.root().join("gopath")
    }

    /// `$GOPATH/src`.
    pub fn src(&self) -> PathBuf {
        self.gopath().join("src")
    }

    /// A resolver over this workspace's source root.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.src())
    }

    /// A context whose working directory is `cwd`.
    pub fn context(&self, cwd: &Path) -> GlobalContext {
        GlobalContext::new(cwd, self.gopath())
    }

    /// Create a package directory under `$GOPATH/src` with the given files.
    pub fn add_package(&self, rel: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = self.src().join(rel);
        write_files(&dir, files);
        dir
    }

    /// Create a module root under `$GOPATH/src`.
    pub fn add_module(&self, rel: &str, module: &str) -> PathBuf {
        let dir = self.src().join(rel);
        let content = go_mod(module);
        write_files(&dir, &[("go.mod", content.as_str())]);
        dir
    }

    /// Create a module root outside the GOPATH, relative to the temp root.
    pub fn add_external_module(&self, rel: &str, module: &str) -> PathBuf {
        let dir = self.root().join(rel);
        let content = go_mod(module);
        write_files(&dir, &[("go.mod", content.as_str())]);
        dir
    }
}

impl Default for GoWorkspaceFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Write `files` into `dir`, creating it first.
pub fn write_files(dir: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    for (name, content) in files {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }
}

fn go_mod(module: &str) -> String {
    format!("module {module}\n\ngo 1.21\n")
}

/// Source of a package declaring the `Fetcher` interface.
pub const FETCHER_SOURCE: &str = r#"package fetch

// Fetcher retrieves values by key.
type Fetcher interface {
	Get(key string) (string, error)
}

type cache struct{}
"#;
