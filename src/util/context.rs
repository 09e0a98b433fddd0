//! Global context for genlib operations.
//!
//! Everything the engine would otherwise read from the process environment
//! (working directory, GOPATH, GOROOT) is captured here once at startup and
//! passed down explicitly.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};

use crate::resolver::PathResolver;
use crate::util::config::Config;
use crate::util::fs::absolutize;

/// Project directories for genlib
static PROJECT_DIRS: LazyLock<Option<ProjectDirs>> =
    LazyLock::new(|| ProjectDirs::from("com", "genlib", "genlib"));

/// Global context containing the working directory and source roots.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// GOPATH workspace root
    gopath: PathBuf,

    /// Go installation root, if known
    goroot: Option<PathBuf>,
}

impl GlobalContext {
    /// Create a context with explicit roots.
    pub fn new(cwd: impl Into<PathBuf>, gopath: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let gopath = absolutize(&cwd, &gopath.into());
        GlobalContext {
            cwd,
            gopath,
            goroot: None,
        }
    }

    /// Set the Go installation root.
    pub fn with_goroot(mut self, goroot: impl Into<PathBuf>) -> Self {
        self.goroot = Some(absolutize(&self.cwd, &goroot.into()));
        self
    }

    /// Build the context from the process environment and config files.
    pub fn from_env() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let global_config = PROJECT_DIRS
            .as_ref()
            .map(|dirs| dirs.config_dir().join("config.toml"));
        let config = Config::load_layered(global_config.as_deref(), &cwd);

        Ok(Self::from_parts(
            cwd,
            &config,
            std::env::var_os("GOPATH"),
            std::env::var_os("GOROOT"),
        ))
    }

    /// Combine environment values with configuration; the environment wins.
    fn from_parts(
        cwd: PathBuf,
        config: &Config,
        gopath_env: Option<OsString>,
        goroot_env: Option<OsString>,
    ) -> Self {
        let gopath = gopath_env
            .as_deref()
            .and_then(|value| std::env::split_paths(value).find(|p| !p.as_os_str().is_empty()))
            .or_else(|| config.paths.gopath.clone())
            .unwrap_or_else(default_gopath);

        let goroot = goroot_env
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| config.paths.goroot.clone());

        let ctx = GlobalContext::new(cwd, gopath);
        match goroot {
            Some(goroot) => ctx.with_goroot(goroot),
            None => ctx,
        }
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the GOPATH workspace root.
    pub fn gopath(&self) -> &Path {
        &self.gopath
    }

    /// Root under which import paths map to directories (`$GOPATH/src`).
    pub fn src_root(&self) -> PathBuf {
        self.gopath.join("src")
    }

    /// Standard library sources (`$GOROOT/src`), if GOROOT is known.
    pub fn goroot_src(&self) -> Option<PathBuf> {
        self.goroot.as_ref().map(|root| root.join("src"))
    }

    /// A path resolver bound to this context's source root.
    pub fn resolver(&self) -> PathResolver {
        PathResolver::new(self.src_root())
    }
}

/// Go's default GOPATH: `$HOME/go`.
fn default_gopath() -> PathBuf {
    BaseDirs::new()
        .map(|dirs| dirs.home_dir().join("go"))
        .unwrap_or_else(|| PathBuf::from("go"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::config::PathsConfig;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new("/work", "/home/dev/go").with_goroot("/usr/local/go");
        assert_eq!(ctx.cwd(), Path::new("/work"));
        assert_eq!(ctx.src_root(), PathBuf::from("/home/dev/go/src"));
        assert_eq!(ctx.goroot_src(), Some(PathBuf::from("/usr/local/go/src")));
    }

    #[test]
    fn test_relative_gopath_is_made_absolute() {
        let ctx = GlobalContext::new("/work", "gopath");
        assert_eq!(ctx.gopath(), Path::new("/work/gopath"));
    }

    #[test]
    fn test_environment_wins_over_config() {
        let config = Config {
            paths: PathsConfig {
                gopath: Some(PathBuf::from("/config/go")),
                goroot: Some(PathBuf::from("/config/goroot")),
            },
        };

        let ctx = GlobalContext::from_parts(
            PathBuf::from("/work"),
            &config,
            Some(OsString::from("/env/go")),
            None,
        );
        assert_eq!(ctx.gopath(), Path::new("/env/go"));
        assert_eq!(ctx.goroot_src(), Some(PathBuf::from("/config/goroot/src")));
    }

    #[test]
    fn test_config_used_without_environment() {
        let config = Config {
            paths: PathsConfig {
                gopath: Some(PathBuf::from("/config/go")),
                goroot: None,
            },
        };

        let ctx = GlobalContext::from_parts(PathBuf::from("/work"), &config, None, None);
        assert_eq!(ctx.gopath(), Path::new("/config/go"));
        assert_eq!(ctx.goroot_src(), None);
    }
}
