//! A Go source file under construction.
//!
//! `GoFile` collects header comments, imports and top-level declarations
//! and renders them as gofmt-style source. Imports are registered as a side
//! effect of qualifying names, each package getting one alias that does not
//! collide with any other import in the file.

use std::collections::BTreeMap;

use super::errors::EmitError;
use crate::core::names::{guess_package_name, is_keyword, is_universe_type};
use crate::core::{ChanDir, Signature, TypeDescriptor};
use crate::extract::go::{go_parser, syntax_error};

/// A function or method declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuncDecl {
    /// Receiver as `(name, type)`, e.g. `("m", "*MockFetcher")`
    pub receiver: Option<(String, String)>,
    pub name: String,
    /// Rendered parameters, e.g. `v0 string` or `...int`
    pub params: Vec<String>,
    /// Rendered result types
    pub results: Vec<String>,
    /// Body statements, one per entry
    pub body: Vec<String>,
}

impl FuncDecl {
    fn render(&self) -> String {
        let mut out = String::from("func ");

        if let Some((name, ty)) = &self.receiver {
            out.push_str(&format!("({} {}) ", name, ty));
        }
        out.push_str(&self.name);
        out.push('(');
        out.push_str(&self.params.join(", "));
        out.push(')');
        out.push_str(&render_results(&self.results));

        if self.body.is_empty() {
            out.push_str(" {}");
        } else {
            out.push_str(" {\n");
            for stmt in &self.body {
                for line in stmt.lines() {
                    out.push('\t');
                    out.push_str(line);
                    out.push('\n');
                }
            }
            out.push('}');
        }

        out
    }
}

/// A struct type declaration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StructDecl {
    pub name: String,
    /// Fields as `(name, type)`
    pub fields: Vec<(String, String)>,
}

impl StructDecl {
    fn render(&self) -> String {
        if self.fields.is_empty() {
            return format!("type {} struct{{}}", self.name);
        }

        let width = self.fields.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
        let mut out = format!("type {} struct {{\n", self.name);
        for (name, ty) in &self.fields {
            out.push_str(&format!("\t{:width$} {}\n", name, ty, width = width));
        }
        out.push('}');
        out
    }
}

/// A Go source file being generated.
#[derive(Debug, Clone)]
pub struct GoFile {
    package: String,
    header: Vec<String>,
    /// Import path -> alias
    imports: BTreeMap<String, String>,
    decls: Vec<String>,
}

impl GoFile {
    /// Start an empty file in `package`.
    pub fn new(package: impl Into<String>) -> Self {
        GoFile {
            package: package.into(),
            header: Vec::new(),
            imports: BTreeMap::new(),
            decls: Vec::new(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// Add a `//` comment line above the package clause.
    pub fn header_comment(&mut self, line: impl Into<String>) {
        self.header.push(line.into());
    }

    /// Refer to `name` from the package at `import_path`, importing it.
    ///
    /// An empty import path refers to the file's own package.
    pub fn qualify(&mut self, import_path: &str, name: &str) -> String {
        if import_path.is_empty() {
            return name.to_string();
        }
        format!("{}.{}", self.import(import_path), name)
    }

    /// Import `import_path` and return the alias it is visible under.
    pub fn import(&mut self, import_path: &str) -> String {
        if let Some(alias) = self.imports.get(import_path) {
            return alias.clone();
        }

        let base = match guess_package_name(import_path) {
            name if is_keyword(&name) => format!("{}pkg", name),
            name => name,
        };
        let mut alias = base.clone();
        let mut n = 1;
        while self.imports.values().any(|a| *a == alias) {
            alias = format!("{}{}", base, n);
            n += 1;
        }

        self.imports.insert(import_path.to_string(), alias.clone());
        alias
    }

    /// Append a raw top-level declaration.
    pub fn add_raw(&mut self, code: String) {
        self.decls.push(code);
    }

    pub fn add_func(&mut self, func: FuncDecl) {
        self.decls.push(func.render());
    }

    pub fn add_struct(&mut self, decl: StructDecl) {
        self.decls.push(decl.render());
    }

    /// Render a type expression.
    ///
    /// Named types without an import path that are not predeclared belong
    /// to `iface_import_path`. With `variadic` set, a slice renders as
    /// `...T`.
    pub fn render_type(
        &mut self,
        ty: &TypeDescriptor,
        iface_import_path: &str,
        variadic: bool,
    ) -> String {
        match ty {
            TypeDescriptor::Slice(elem) if variadic => {
                format!("...{}", self.render_type(elem, iface_import_path, false))
            }
            TypeDescriptor::Named { name, import_path } => match import_path {
                Some(path) => self.qualify(path, name),
                None if is_universe_type(name) => name.clone(),
                None => self.qualify(iface_import_path, name),
            },
            TypeDescriptor::Pointer(elem) => {
                format!("*{}", self.render_type(elem, iface_import_path, false))
            }
            TypeDescriptor::Slice(elem) => {
                format!("[]{}", self.render_type(elem, iface_import_path, false))
            }
            TypeDescriptor::Array { elem, len } => {
                format!("[{}]{}", len, self.render_type(elem, iface_import_path, false))
            }
            TypeDescriptor::Map { key, value } => format!(
                "map[{}]{}",
                self.render_type(key, iface_import_path, false),
                self.render_type(value, iface_import_path, false)
            ),
            TypeDescriptor::Chan { elem, dir } => {
                let inner = self.render_type(elem, iface_import_path, false);
                match dir {
                    // `chan <-chan T` would parse as `chan<- (chan T)`
                    ChanDir::Both
                        if matches!(
                            **elem,
                            TypeDescriptor::Chan {
                                dir: ChanDir::Recv,
                                ..
                            }
                        ) =>
                    {
                        format!("chan ({})", inner)
                    }
                    ChanDir::Both => format!("chan {}", inner),
                    ChanDir::Send => format!("chan<- {}", inner),
                    ChanDir::Recv => format!("<-chan {}", inner),
                }
            }
            TypeDescriptor::Func(sig) => format!("func{}", self.render_signature(sig, iface_import_path)),
            TypeDescriptor::Instance { base, args } => {
                let base = self.render_type(base, iface_import_path, false);
                let args: Vec<String> = args
                    .iter()
                    .map(|arg| self.render_type(arg, iface_import_path, false))
                    .collect();
                format!("{}[{}]", base, args.join(", "))
            }
            TypeDescriptor::Selector { package, name } => {
                if package == "C" {
                    self.imports.insert("C".to_string(), "C".to_string());
                }
                format!("{}.{}", package, name)
            }
            TypeDescriptor::EmptyInterface => "interface{}".to_string(),
            TypeDescriptor::EmptyStruct => "struct{}".to_string(),
        }
    }

    fn render_signature(&mut self, sig: &Signature, iface_import_path: &str) -> String {
        let last = sig.params.len().saturating_sub(1);
        let params: Vec<String> = sig
            .params
            .iter()
            .enumerate()
            .map(|(i, ty)| self.render_type(ty, iface_import_path, sig.variadic && i == last))
            .collect();
        let results: Vec<String> = sig
            .results
            .iter()
            .map(|ty| self.render_type(ty, iface_import_path, false))
            .collect();

        format!("({}){}", params.join(", "), render_results(&results))
    }

    /// Render the file and check that it parses as Go.
    pub fn render(&self) -> Result<String, EmitError> {
        let mut out = String::new();

        for line in &self.header {
            out.push_str("// ");
            out.push_str(line);
            out.push('\n');
        }
        if !self.header.is_empty() {
            out.push('\n');
        }

        out.push_str(&format!("package {}\n", self.package));

        if !self.imports.is_empty() {
            out.push_str("\nimport (\n");
            for (path, alias) in &self.imports {
                if path.rsplit('/').next() == Some(alias.as_str()) {
                    out.push_str(&format!("\t\"{}\"\n", path));
                } else {
                    out.push_str(&format!("\t{} \"{}\"\n", alias, path));
                }
            }
            out.push_str(")\n");
        }

        for decl in &self.decls {
            out.push('\n');
            out.push_str(decl);
            out.push('\n');
        }

        validate(&out)?;
        Ok(out)
    }
}

fn render_results(results: &[String]) -> String {
    match results {
        [] => String::new(),
        [single] if !single.starts_with("func") => format!(" {}", single),
        _ => format!(" ({})", results.join(", ")),
    }
}

fn validate(source: &str) -> Result<(), EmitError> {
    let mut parser = go_parser().map_err(|e| EmitError::Serialization {
        message: e.to_string(),
    })?;
    let tree = parser
        .parse(source, None)
        .ok_or_else(|| EmitError::Serialization {
            message: "parser produced no tree".to_string(),
        })?;

    match syntax_error(&tree) {
        Some((pos, message)) => Err(EmitError::Serialization {
            message: format!("{}:{}: {}", pos.row + 1, pos.column + 1, message),
        }),
        None => Ok(()),
    }
}
