//! A [`TypeOracle`] that reads Go sources directly.
//!
//! Files are parsed with tree-sitter and checked by a small resolver that
//! understands everything an interface's method set can mention. Imported
//! packages are loaded on demand, only when an interface embeds one of
//! their types, and cached for the lifetime of the oracle.

mod checker;
pub mod files;

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tree_sitter::{LanguageError, Node, Parser, Point, Tree};

use self::checker::{named_children, PackageChecker, SourceFile};
use crate::extract::oracle::{CheckedPackage, OracleError, TypeOracle};
use crate::resolver::PathResolver;
use crate::util::context::GlobalContext;
use crate::util::fs::{dir_exists, read_to_string};

/// Go frontend backed by tree-sitter-go.
pub struct GoSourceOracle {
    resolver: PathResolver,
    /// Directory imports are resolved from
    wd: PathBuf,
    goroot_src: Option<PathBuf>,
    cache: RefCell<HashMap<String, Rc<CheckedPackage>>>,
    loading: RefCell<HashSet<String>>,
    /// Package clauses read without checking, by import path
    clauses: RefCell<HashMap<String, Option<String>>>,
}

impl GoSourceOracle {
    pub fn new(ctx: &GlobalContext) -> Self {
        GoSourceOracle {
            resolver: ctx.resolver(),
            wd: ctx.cwd().to_path_buf(),
            goroot_src: ctx.goroot_src(),
            cache: RefCell::new(HashMap::new()),
            loading: RefCell::new(HashSet::new()),
            clauses: RefCell::new(HashMap::new()),
        }
    }

    /// Parse and check the package in `dir`.
    fn check_dir(&self, dir: &Path, import_path: &str) -> Result<CheckedPackage, OracleError> {
        let paths = files::source_files(dir)?;
        if paths.is_empty() {
            return Err(OracleError::NoFiles {
                dir: dir.to_path_buf(),
            });
        }

        let mut parser = go_parser()
            .map_err(|e| OracleError::type_check(format!("failed to load Go grammar: {}", e)))?;

        let mut sources = Vec::with_capacity(paths.len());
        for path in paths {
            let source = read_to_string(&path).map_err(|e| OracleError::Io {
                path: path.clone(),
                source: e,
            })?;
            let tree = parser
                .parse(&source, None)
                .ok_or_else(|| OracleError::type_check(format!("failed to parse {}", path.display())))?;

            if let Some((pos, message)) = syntax_error(&tree) {
                return Err(OracleError::Parse {
                    file: path,
                    line: pos.row + 1,
                    column: pos.column + 1,
                    message,
                });
            }

            sources.push(SourceFile { path, source, tree });
        }

        let name = package_name(&sources)?;
        tracing::debug!(
            "checking package {} ({}) from {} file(s)",
            name,
            import_path,
            sources.len()
        );

        let checker = PackageChecker::new(self, import_path, &sources);
        let declarations = checker.declarations()?;

        Ok(CheckedPackage {
            name,
            import_path: import_path.to_string(),
            declarations,
            constants: checker.constants(),
        })
    }

    /// Load an imported package by path, from the cache when possible.
    pub(crate) fn load_import(&self, import_path: &str) -> Result<Rc<CheckedPackage>, OracleError> {
        if let Some(package) = self.cache.borrow().get(import_path) {
            return Ok(Rc::clone(package));
        }

        if !self.loading.borrow_mut().insert(import_path.to_string()) {
            return Err(OracleError::type_check(format!(
                "import cycle not allowed: {}",
                import_path
            )));
        }
        let result = self
            .locate(import_path)
            .and_then(|dir| self.check_dir(&dir, import_path));
        self.loading.borrow_mut().remove(import_path);

        let package = Rc::new(result?);
        self.cache
            .borrow_mut()
            .insert(import_path.to_string(), Rc::clone(&package));
        Ok(package)
    }

    /// The name an import is visible under when it has no alias.
    ///
    /// Reads only the package clause of the first source file. `None` when
    /// the package cannot be found or parsed.
    pub(crate) fn package_clause(&self, import_path: &str) -> Option<String> {
        if let Some(package) = self.cache.borrow().get(import_path) {
            return Some(package.name.clone());
        }
        if let Some(name) = self.clauses.borrow().get(import_path) {
            return name.clone();
        }

        let name = self.read_package_clause(import_path);
        self.clauses
            .borrow_mut()
            .insert(import_path.to_string(), name.clone());
        name
    }

    fn read_package_clause(&self, import_path: &str) -> Option<String> {
        let dir = self.locate(import_path).ok()?;
        let path = files::source_files(&dir).ok()?.into_iter().next()?;
        let source = read_to_string(&path).ok()?;
        let tree = go_parser().ok()?.parse(&source, None)?;

        let clause = named_children(tree.root_node())
            .into_iter()
            .find(|n| n.kind() == "package_clause")
            .and_then(|clause| named_children(clause).into_iter().next())?;
        Some(source[clause.byte_range()].to_string())
    }

    /// Find an imported package: standard library first, then the resolver.
    fn locate(&self, import_path: &str) -> Result<PathBuf, OracleError> {
        if is_standard_path(import_path) {
            if let Some(root) = &self.goroot_src {
                let dir = root.join(import_path);
                if dir_exists(&dir) {
                    return Ok(dir);
                }
            }
        }

        self.resolver
            .resolve(&self.wd, import_path)
            .map(|resolved| resolved.dir)
            .map_err(|e| OracleError::type_check(e.to_string()))
    }
}

impl TypeOracle for GoSourceOracle {
    fn resolve_package(&self, dir: &Path, import_path: &str) -> Result<CheckedPackage, OracleError> {
        let package = self.check_dir(dir, import_path)?;
        self.cache
            .borrow_mut()
            .insert(import_path.to_string(), Rc::new(package.clone()));
        Ok(package)
    }
}

/// Standard library paths have no dot in their first element.
fn is_standard_path(import_path: &str) -> bool {
    let first = import_path.split('/').next().unwrap_or_default();
    !first.is_empty() && !first.contains('.')
}

/// A parser for Go source files.
pub(crate) fn go_parser() -> Result<Parser, LanguageError> {
    let mut parser = Parser::new();
    parser.set_language(&tree_sitter_go::LANGUAGE.into())?;
    Ok(parser)
}

/// Position and description of the first syntax error in `tree`.
pub(crate) fn syntax_error(tree: &Tree) -> Option<(Point, String)> {
    let node = first_syntax_error(tree.root_node())?;
    let message = if node.is_missing() {
        format!("syntax error: missing {}", node.kind())
    } else {
        "syntax error".to_string()
    };
    Some((node.start_position(), message))
}

/// Depth-first search for the first error or missing node.
fn first_syntax_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    let children: Vec<Node<'_>> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_syntax_error)
}

/// The package clause shared by all files.
fn package_name(files: &[SourceFile]) -> Result<String, OracleError> {
    let mut names = Vec::with_capacity(files.len());

    for file in files {
        let clause = named_children(file.tree.root_node())
            .into_iter()
            .find(|n| n.kind() == "package_clause")
            .and_then(|clause| named_children(clause).into_iter().next())
            .ok_or_else(|| {
                OracleError::type_check(format!("{}: missing package clause", file.path.display()))
            })?;
        names.push((&file.source[clause.byte_range()], file.path.as_path()));
    }

    let Some(&(first, first_path)) = names.first() else {
        return Err(OracleError::type_check("no package clause"));
    };
    if let Some(&(other, other_path)) = names.iter().find(|(name, _)| *name != first) {
        return Err(OracleError::type_check(format!(
            "found packages {} ({}) and {} ({})",
            first,
            display_name(first_path),
            other,
            display_name(other_path)
        )));
    }

    Ok(first.to_string())
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
