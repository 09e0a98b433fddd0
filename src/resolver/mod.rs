//! Import path resolution.
//!
//! Maps an import specifier to the directory holding the package and the
//! canonical import path generated code should use for it. Candidates are
//! tried in a fixed order and the first existing directory wins:
//!
//! 1. the enclosing module (`go.mod`), when the specifier is inside it
//! 2. a directory relative to the working directory
//! 3. `vendor/` directories from the working directory up to the source root
//! 4. the global source root (`$GOPATH/src`)

pub mod errors;
pub mod module;

use std::fmt;
use std::path::{Path, PathBuf};

pub use errors::ResolveError;
pub use module::{find_module, Module};

use crate::util::fs::{absolutize, dir_exists, normalize_lexically, to_slash};

/// Which resolution rule located a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Module,
    Directory,
    Vendor,
    SourceRoot,
}

impl fmt::Display for Resolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Resolution::Module => write!(f, "module"),
            Resolution::Directory => write!(f, "directory"),
            Resolution::Vendor => write!(f, "vendor"),
            Resolution::SourceRoot => write!(f, "source root"),
        }
    }
}

/// A located package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    /// Canonical import path to use in generated code
    pub import_path: String,
    /// Directory containing the package sources
    pub dir: PathBuf,
    /// Rule that produced this result
    pub resolution: Resolution,
}

/// Resolves import specifiers against a global source root.
#[derive(Debug, Clone)]
pub struct PathResolver {
    src_root: PathBuf,
}

impl PathResolver {
    /// Create a resolver for the given source root (`$GOPATH/src`).
    pub fn new(src_root: impl Into<PathBuf>) -> Self {
        PathResolver {
            src_root: normalize_lexically(&src_root.into()),
        }
    }

    /// The global source root.
    pub fn src_root(&self) -> &Path {
        &self.src_root
    }

    /// Find the module enclosing `dir`, without crossing the source root.
    pub fn find_module(&self, dir: &Path) -> Option<Module> {
        find_module(&normalize_lexically(dir), &self.src_root)
    }

    /// Infer the import path of a directory from its module or its
    /// position under the source root.
    pub fn infer_import_path(&self, dir: &Path) -> Option<String> {
        let dir = normalize_lexically(dir);

        if let Some(module) = self.find_module(&dir) {
            let rel = dir.strip_prefix(&module.root).ok()?;
            let rel = to_slash(rel);
            return Some(if rel.is_empty() {
                module.name
            } else {
                format!("{}/{}", module.name, rel)
            });
        }

        let rel = to_slash(dir.strip_prefix(&self.src_root).ok()?);
        (!rel.is_empty()).then_some(rel)
    }

    /// Locate `import_path` as seen from `wd`.
    pub fn resolve(&self, wd: &Path, import_path: &str) -> Result<ResolvedPath, ResolveError> {
        let wd = normalize_lexically(wd);
        let mut searched = Vec::new();
        let logical = is_logical(import_path);

        if logical {
            if let Some(module) = self.find_module(&wd) {
                if let Some(rel) = module.relative(import_path) {
                    let dir = module.dir_of(rel);
                    if dir_exists(&dir) {
                        return Ok(found(import_path, dir, Resolution::Module));
                    }
                    searched.push(dir);
                }
            }
        }

        let dir = absolutize(&wd, Path::new(import_path));
        if dir_exists(&dir) {
            if let Some(inferred) = self.infer_import_path(&dir) {
                return Ok(found(&inferred, dir, Resolution::Directory));
            }
        }
        searched.push(dir);

        if !logical {
            return Err(not_found(import_path, searched));
        }

        if wd.starts_with(&self.src_root) {
            let mut current = Some(wd.as_path());
            while let Some(dir) = current {
                if dir == self.src_root {
                    break;
                }

                let candidate = join_import_path(&dir.join("vendor"), import_path);
                if dir_exists(&candidate) {
                    return Ok(found(import_path, candidate, Resolution::Vendor));
                }
                searched.push(candidate);

                current = dir.parent();
            }
        }

        let global = join_import_path(&self.src_root, import_path);
        if dir_exists(&global) {
            return Ok(found(import_path, global, Resolution::SourceRoot));
        }
        searched.push(global);

        Err(not_found(import_path, searched))
    }
}

/// Whether a specifier is a logical import path rather than a filesystem
/// path (`./x`, `../x`, `/abs/x`).
fn is_logical(import_path: &str) -> bool {
    !import_path.is_empty() && !import_path.starts_with('.') && !Path::new(import_path).has_root()
}

fn join_import_path(base: &Path, import_path: &str) -> PathBuf {
    import_path
        .split('/')
        .filter(|s| !s.is_empty())
        .fold(base.to_path_buf(), |dir, segment| dir.join(segment))
}

fn found(import_path: &str, dir: PathBuf, resolution: Resolution) -> ResolvedPath {
    tracing::debug!(
        "resolved `{}` to {} via {}",
        import_path,
        dir.display(),
        resolution
    );
    ResolvedPath {
        import_path: import_path.to_string(),
        dir,
        resolution,
    }
}

fn not_found(import_path: &str, searched: Vec<PathBuf>) -> ResolveError {
    ResolveError::NotFound {
        import_path: import_path.to_string(),
        searched,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::GoWorkspaceFixture;

    #[test]
    fn test_module_preferred_over_vendor_and_global() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_module("example.com/app", "example.com/app");
        ws.add_package("example.com/app/fetch", &[("fetch.go", "package fetch\n")]);
        ws.add_package(
            "example.com/app/vendor/example.com/app/fetch",
            &[("fetch.go", "package fetch\n")],
        );

        let resolved = ws
            .resolver()
            .resolve(&project, "example.com/app/fetch")
            .unwrap();
        assert_eq!(resolved.resolution, Resolution::Module);
        assert_eq!(resolved.dir, project.join("fetch"));
        assert_eq!(resolved.import_path, "example.com/app/fetch");
    }

    #[test]
    fn test_module_outside_gopath() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_external_module("work/app", "example.com/app");
        std::fs::create_dir_all(project.join("internal/fetch")).unwrap();

        let resolved = ws
            .resolver()
            .resolve(&project.join("cmd"), "example.com/app/internal/fetch")
            .unwrap();
        assert_eq!(resolved.resolution, Resolution::Module);
        assert_eq!(resolved.dir, project.join("internal/fetch"));
    }

    #[test]
    fn test_directory_relative_infers_import_path() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_external_module("work/app", "example.com/app");
        std::fs::create_dir_all(project.join("internal/fetch")).unwrap();

        let resolved = ws.resolver().resolve(&project, "./internal/fetch").unwrap();
        assert_eq!(resolved.resolution, Resolution::Directory);
        assert_eq!(resolved.import_path, "example.com/app/internal/fetch");
    }

    #[test]
    fn test_directory_relative_under_gopath() {
        let ws = GoWorkspaceFixture::new();
        let wd = ws.add_package("github.com/acme/tool", &[]);
        ws.add_package("github.com/acme/tool/store", &[]);

        let resolved = ws.resolver().resolve(&wd, "store").unwrap();
        assert_eq!(resolved.resolution, Resolution::Directory);
        assert_eq!(resolved.import_path, "github.com/acme/tool/store");
    }

    #[test]
    fn test_nearest_vendor_wins() {
        let ws = GoWorkspaceFixture::new();
        let wd = ws.add_package("github.com/acme/tool/cmd/run", &[]);
        ws.add_package("github.com/acme/tool/vendor/github.com/dep/lib", &[]);
        ws.add_package("github.com/acme/vendor/github.com/dep/lib", &[]);
        ws.add_package("github.com/dep/lib", &[]);

        let resolved = ws.resolver().resolve(&wd, "github.com/dep/lib").unwrap();
        assert_eq!(resolved.resolution, Resolution::Vendor);
        assert_eq!(
            resolved.dir,
            ws.src().join("github.com/acme/tool/vendor/github.com/dep/lib")
        );
        assert_eq!(resolved.import_path, "github.com/dep/lib");
    }

    #[test]
    fn test_global_root_fallback() {
        let ws = GoWorkspaceFixture::new();
        let wd = ws.add_package("github.com/acme/tool", &[]);
        ws.add_package("github.com/dep/lib", &[]);

        let resolved = ws.resolver().resolve(&wd, "github.com/dep/lib").unwrap();
        assert_eq!(resolved.resolution, Resolution::SourceRoot);
        assert_eq!(resolved.dir, ws.src().join("github.com/dep/lib"));
    }

    #[test]
    fn test_vendor_not_walked_outside_source_root() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_external_module("work/app", "example.com/app");
        std::fs::create_dir_all(project.join("vendor/github.com/dep/lib")).unwrap();

        let result = ws.resolver().resolve(&project, "github.com/dep/lib");
        assert!(matches!(result, Err(ResolveError::NotFound { .. })));
    }

    #[test]
    fn test_not_found_names_specifier() {
        let ws = GoWorkspaceFixture::new();
        let wd = ws.add_package("github.com/acme/tool", &[]);

        let err = ws
            .resolver()
            .resolve(&wd, "github.com/missing/pkg")
            .unwrap_err();
        assert_eq!(err.import_path(), "github.com/missing/pkg");
        assert!(err.to_string().contains("github.com/missing/pkg"));
        assert!(err.searched().iter().all(|p| !p.exists()));
    }

    #[test]
    fn test_module_path_missing_on_disk_is_not_found() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_external_module("work/app", "example.com/app");

        let result = ws.resolver().resolve(&project, "example.com/app/nope");
        assert!(result.is_err());
    }

    #[test]
    fn test_infer_import_path() {
        let ws = GoWorkspaceFixture::new();
        let project = ws.add_external_module("work/app", "example.com/app");
        let resolver = ws.resolver();

        assert_eq!(
            resolver.infer_import_path(&project),
            Some("example.com/app".to_string())
        );
        assert_eq!(
            resolver.infer_import_path(&project.join("mocks")),
            Some("example.com/app/mocks".to_string())
        );
        assert_eq!(
            resolver.infer_import_path(&ws.src().join("github.com/acme/tool")),
            Some("github.com/acme/tool".to_string())
        );
        assert_eq!(resolver.infer_import_path(&ws.root().join("elsewhere")), None);
    }
}
