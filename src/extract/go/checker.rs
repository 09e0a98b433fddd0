//! Name resolution and type lowering over tree-sitter Go syntax trees.
//!
//! This is not a full Go type checker. It resolves every name that can
//! appear in an interface's method set (local declarations, predeclared
//! types, imported packages, cgo) and computes complete method sets,
//! following embedded interfaces into other packages when needed.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use tree_sitter::{Node, Tree};

use super::GoSourceOracle;
use crate::core::names::{guess_package_name, is_exported, is_universe_type};
use crate::core::ChanDir;
use crate::extract::oracle::{
    CheckedMethod, CheckedSignature, CheckedType, Declaration, DeclarationKind, OracleError,
};

/// A parsed source file.
pub struct SourceFile {
    pub path: PathBuf,
    pub source: String,
    pub tree: Tree,
}

impl SourceFile {
    fn text(&self, node: Node<'_>) -> &str {
        &self.source[node.byte_range()]
    }
}

/// Names visible at file scope.
#[derive(Debug, Default)]
struct FileScope {
    /// Package alias -> import path
    imports: HashMap<String, String>,
    /// Imports without an explicit alias
    unaliased: Vec<String>,
    cgo: bool,
    dot_import: bool,
}

struct TypeSpec<'a> {
    file: usize,
    ty: Node<'a>,
    generic: bool,
}

/// One name of a `const` declaration.
struct ConstSpec<'a> {
    file: usize,
    /// Initializer, repeated from an earlier spec when omitted
    value: Option<Node<'a>>,
    iota: u64,
}

/// Checks the declarations of one package.
pub struct PackageChecker<'a> {
    oracle: &'a GoSourceOracle,
    import_path: &'a str,
    files: &'a [SourceFile],
    scopes: Vec<FileScope>,
    specs: HashMap<String, TypeSpec<'a>>,
    order: Vec<String>,
    consts: HashMap<String, ConstSpec<'a>>,
    in_progress: RefCell<HashSet<String>>,
    evaluating: RefCell<HashSet<String>>,
}

impl<'a> PackageChecker<'a> {
    pub fn new(oracle: &'a GoSourceOracle, import_path: &'a str, files: &'a [SourceFile]) -> Self {
        let mut checker = PackageChecker {
            oracle,
            import_path,
            files,
            scopes: Vec::with_capacity(files.len()),
            specs: HashMap::new(),
            order: Vec::new(),
            consts: HashMap::new(),
            in_progress: RefCell::new(HashSet::new()),
            evaluating: RefCell::new(HashSet::new()),
        };

        for (index, file) in files.iter().enumerate() {
            let root = file.tree.root_node();
            checker.scopes.push(file_scope(file, root));
            checker.collect_type_specs(index, root);
            checker.collect_const_specs(index, root);
        }

        checker
    }

    fn collect_type_specs(&mut self, file: usize, root: Node<'a>) {
        let source = &self.files[file];

        for decl in named_children(root) {
            if decl.kind() != "type_declaration" {
                continue;
            }

            for spec in named_children(decl) {
                if spec.kind() != "type_spec" && spec.kind() != "type_alias" {
                    continue;
                }
                let (Some(name), Some(ty)) = (
                    spec.child_by_field_name("name"),
                    spec.child_by_field_name("type"),
                ) else {
                    continue;
                };

                let name = source.text(name).to_string();
                if self.specs.contains_key(&name) {
                    // Files selected by build tags may legitimately redeclare
                    tracing::debug!(
                        "{} redeclared in {}, keeping the first declaration",
                        name,
                        source.path.display()
                    );
                    continue;
                }

                self.order.push(name.clone());
                self.specs.insert(
                    name,
                    TypeSpec {
                        file,
                        ty,
                        generic: spec.child_by_field_name("type_parameters").is_some(),
                    },
                );
            }
        }
    }

    fn collect_const_specs(&mut self, file: usize, root: Node<'a>) {
        let source = &self.files[file];

        for decl in named_children(root) {
            if decl.kind() != "const_declaration" {
                continue;
            }

            let mut values: Vec<Node<'a>> = Vec::new();
            let specs = named_children(decl)
                .into_iter()
                .filter(|spec| spec.kind() == "const_spec");

            for (iota, spec) in specs.enumerate() {
                if let Some(list) = spec.child_by_field_name("value") {
                    values = named_children(list);
                }

                let mut cursor = spec.walk();
                let names: Vec<Node<'a>> = spec.children_by_field_name("name", &mut cursor).collect();
                for (index, name) in names.into_iter().enumerate() {
                    let name = source.text(name);
                    if name == "_" || self.consts.contains_key(name) {
                        continue;
                    }
                    self.consts.insert(
                        name.to_string(),
                        ConstSpec {
                            file,
                            value: values.get(index).copied(),
                            iota: iota as u64,
                        },
                    );
                }
            }
        }
    }

    /// Exported integer constants that evaluate without other packages.
    pub fn constants(&self) -> BTreeMap<String, i128> {
        self.consts
            .keys()
            .filter(|name| is_exported(name))
            .filter_map(|name| match self.local_constant(name, false) {
                Ok(value) => Some((name.clone(), value)),
                Err(e) => {
                    tracing::trace!("skipping constant {}: {}", name, e);
                    None
                }
            })
            .collect()
    }

    /// Check every top-level type declaration, in source order.
    pub fn declarations(&self) -> Result<Vec<Declaration>, OracleError> {
        self.order
            .iter()
            .map(|name| {
                let spec = &self.specs[name];
                let kind = if spec.generic {
                    // Method sets of generic declarations mention type
                    // parameters; they are reported but not lowered.
                    generic_kind(spec.ty)
                } else {
                    self.declaration_kind(name, false)?
                };

                Ok(Declaration {
                    name: name.clone(),
                    generic: spec.generic,
                    kind,
                })
            })
            .collect()
    }

    /// Underlying kind of the local declaration `name`.
    fn declaration_kind(&self, name: &str, strict: bool) -> Result<DeclarationKind, OracleError> {
        let spec = &self.specs[name];

        if !self.in_progress.borrow_mut().insert(name.to_string()) {
            return Err(self.error_at(
                spec.file,
                spec.ty,
                format!("invalid recursive type {}", name),
            ));
        }
        let kind = self.underlying(spec.file, spec.ty, strict);
        self.in_progress.borrow_mut().remove(name);

        kind
    }

    /// Classify the underlying type of a type expression.
    ///
    /// With `strict` unset, a package that cannot be loaded makes the type
    /// `Other` instead of an error.
    fn underlying(
        &self,
        file: usize,
        node: Node<'a>,
        strict: bool,
    ) -> Result<DeclarationKind, OracleError> {
        let source = &self.files[file];

        match node.kind() {
            "interface_type" => self.interface_kind(file, node),
            "parenthesized_type" => match first_named_child(node) {
                Some(inner) => self.underlying(file, inner, strict),
                None => Ok(DeclarationKind::Other),
            },
            "type_identifier" | "primitive_type" => {
                let name = source.text(node);
                if self.specs.contains_key(name) {
                    if self.specs[name].generic {
                        return Ok(DeclarationKind::Other);
                    }
                    return self.declaration_kind(name, strict);
                }
                match name {
                    "error" => Ok(DeclarationKind::Interface(vec![error_method()])),
                    "any" => Ok(DeclarationKind::Interface(Vec::new())),
                    "comparable" => Ok(DeclarationKind::Constraint),
                    _ if is_universe_type(name) => Ok(DeclarationKind::Other),
                    _ => Err(self.undefined(file, node, name)),
                }
            }
            "qualified_type" => {
                let (alias, name) = self.qualified_parts(file, node)?;
                let scope = &self.scopes[file];

                if scope.cgo && alias == "C" {
                    return Ok(DeclarationKind::Other);
                }
                let Some(path) = self.import_path_of(file, alias) else {
                    return Err(self.undefined(file, node, alias));
                };

                match self.oracle.load_import(&path) {
                    Ok(package) => match package.declaration(name) {
                        Some(decl) if decl.generic => Ok(DeclarationKind::Other),
                        Some(decl) => Ok(decl.kind.clone()),
                        None => Err(self.undefined(file, node, &format!("{}.{}", alias, name))),
                    },
                    Err(e) if strict => Err(self.error_at(
                        file,
                        node,
                        format!("could not import {} ({})", path, e),
                    )),
                    Err(e) => {
                        tracing::debug!("treating {}.{} as opaque: {}", alias, name, e);
                        Ok(DeclarationKind::Other)
                    }
                }
            }
            _ => Ok(DeclarationKind::Other),
        }
    }

    /// Compute the method set of an interface literal.
    fn interface_kind(&self, file: usize, node: Node<'a>) -> Result<DeclarationKind, OracleError> {
        let source = &self.files[file];
        let mut methods: Vec<CheckedMethod> = Vec::new();

        for elem in named_children(node) {
            match elem.kind() {
                "method_elem" | "method_spec" => {
                    let name = self.field(file, elem, "name")?;
                    let params = self.field(file, elem, "parameters")?;
                    let signature =
                        self.signature(file, params, elem.child_by_field_name("result"))?;

                    add_method(
                        &mut methods,
                        CheckedMethod {
                            name: source.text(name).to_string(),
                            signature,
                        },
                    )
                    .map_err(|msg| self.error_at(file, elem, msg))?;
                }
                "type_elem" | "constraint_elem" | "interface_type_name" => {
                    let terms = named_children(elem);
                    let [term] = terms.as_slice() else {
                        return Ok(DeclarationKind::Constraint);
                    };
                    if !matches!(
                        term.kind(),
                        "type_identifier" | "qualified_type" | "parenthesized_type"
                    ) {
                        return Ok(DeclarationKind::Constraint);
                    }

                    match self.underlying(file, *term, true)? {
                        DeclarationKind::Interface(embedded) => {
                            for method in embedded {
                                add_method(&mut methods, method)
                                    .map_err(|msg| self.error_at(file, elem, msg))?;
                            }
                        }
                        DeclarationKind::Constraint | DeclarationKind::Other => {
                            return Ok(DeclarationKind::Constraint)
                        }
                    }
                }
                _ => {}
            }
        }

        Ok(DeclarationKind::Interface(methods))
    }

    fn signature(
        &self,
        file: usize,
        params: Node<'a>,
        result: Option<Node<'a>>,
    ) -> Result<CheckedSignature, OracleError> {
        let (params, variadic) = self.parameters(file, params)?;
        let results = match result {
            None => Vec::new(),
            Some(list) if list.kind() == "parameter_list" => self.parameters(file, list)?.0,
            Some(ty) => vec![self.lower(file, ty)?],
        };

        Ok(CheckedSignature {
            params,
            results,
            variadic,
        })
    }

    fn parameters(
        &self,
        file: usize,
        list: Node<'a>,
    ) -> Result<(Vec<CheckedType>, bool), OracleError> {
        let mut types = Vec::new();
        let mut variadic = false;

        for param in named_children(list) {
            match param.kind() {
                "parameter_declaration" => {
                    let ty = self.lower(file, self.field(file, param, "type")?)?;
                    let mut cursor = param.walk();
                    let names = param.children_by_field_name("name", &mut cursor).count();
                    for _ in 0..names.max(1) {
                        types.push(ty.clone());
                    }
                }
                "variadic_parameter_declaration" => {
                    let ty = self.lower(file, self.field(file, param, "type")?)?;
                    types.push(CheckedType::Slice(Box::new(ty)));
                    variadic = true;
                }
                _ => {}
            }
        }

        Ok((types, variadic))
    }

    /// Resolve a type expression.
    fn lower(&self, file: usize, node: Node<'a>) -> Result<CheckedType, OracleError> {
        let source = &self.files[file];

        match node.kind() {
            "type_identifier" | "primitive_type" => self.named(file, node),
            "qualified_type" => {
                let (alias, name) = self.qualified_parts(file, node)?;
                let scope = &self.scopes[file];

                if scope.cgo && alias == "C" {
                    return Ok(CheckedType::Cgo(name.to_string()));
                }
                match self.import_path_of(file, alias) {
                    Some(path) => Ok(CheckedType::Named {
                        package: Some(path),
                        name: name.to_string(),
                    }),
                    None => Err(self.undefined(file, node, alias)),
                }
            }
            "pointer_type" => {
                let elem = first_named_child(node)
                    .ok_or_else(|| self.error_at(file, node, "malformed pointer type"))?;
                Ok(CheckedType::Pointer(Box::new(self.lower(file, elem)?)))
            }
            "slice_type" => {
                let elem = self.field(file, node, "element")?;
                Ok(CheckedType::Slice(Box::new(self.lower(file, elem)?)))
            }
            "array_type" => {
                let length = self.field(file, node, "length")?;
                let len = self.constant(file, length, None, true)?;
                let len = u64::try_from(len).map_err(|_| {
                    self.error_at(
                        file,
                        length,
                        format!("invalid array length {}", source.text(length)),
                    )
                })?;
                let elem = self.field(file, node, "element")?;
                Ok(CheckedType::Array(Box::new(self.lower(file, elem)?), len))
            }
            "generic_type" => {
                let base = self.lower(file, self.field(file, node, "type")?)?;
                let arguments = self.field(file, node, "type_arguments")?;
                let args = named_children(arguments)
                    .into_iter()
                    .map(|arg| self.type_argument(file, arg))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(CheckedType::Instance(Box::new(base), args))
            }
            "map_type" => {
                let key = self.lower(file, self.field(file, node, "key")?)?;
                let value = self.lower(file, self.field(file, node, "value")?)?;
                Ok(CheckedType::Map(Box::new(key), Box::new(value)))
            }
            "channel_type" => {
                let elem = self.lower(file, self.field(file, node, "value")?)?;
                Ok(CheckedType::Chan(Box::new(elem), channel_direction(node)))
            }
            "function_type" => {
                let params = self.field(file, node, "parameters")?;
                let sig = self.signature(file, params, node.child_by_field_name("result"))?;
                Ok(CheckedType::Signature(sig))
            }
            "parenthesized_type" => {
                let inner = first_named_child(node)
                    .ok_or_else(|| self.error_at(file, node, "malformed type"))?;
                self.lower(file, inner)
            }
            "interface_type" if named_children(node).is_empty() => {
                Ok(CheckedType::EmptyInterface)
            }
            "struct_type" if is_empty_struct(node) => Ok(CheckedType::EmptyStruct),
            _ => Err(self.error_at(
                file,
                node,
                format!("unsupported type expression {}", source.text(node)),
            )),
        }
    }

    fn type_argument(&self, file: usize, arg: Node<'a>) -> Result<CheckedType, OracleError> {
        if arg.kind() != "type_elem" {
            return self.lower(file, arg);
        }
        match named_children(arg).as_slice() {
            [term] => self.lower(file, *term),
            _ => Err(self.error_at(
                file,
                arg,
                format!("unsupported type argument {}", self.files[file].text(arg)),
            )),
        }
    }

    /// Evaluate an integer constant expression.
    ///
    /// `iota` is set inside `const` declarations. With `imports` unset,
    /// constants of other packages are not looked up.
    fn constant(
        &self,
        file: usize,
        node: Node<'a>,
        iota: Option<u64>,
        imports: bool,
    ) -> Result<i128, OracleError> {
        let text = self.files[file].text(node);

        match node.kind() {
            "int_literal" => parse_int_literal(text)
                .map(i128::from)
                .ok_or_else(|| self.error_at(file, node, format!("invalid integer {}", text))),
            "iota" => iota
                .map(i128::from)
                .ok_or_else(|| self.error_at(file, node, "cannot use iota outside constant declaration")),
            "identifier" => {
                if !self.consts.contains_key(text) {
                    return Err(self.undefined(file, node, text));
                }
                self.local_constant(text, imports)
            }
            "selector_expression" if imports => self.imported_constant(file, node),
            "parenthesized_expression" => match first_named_child(node) {
                Some(inner) => self.constant(file, inner, iota, imports),
                None => Err(self.error_at(file, node, "malformed expression")),
            },
            "unary_expression" => {
                let operand = self.field(file, node, "operand")?;
                let value = self.constant(file, operand, iota, imports)?;
                let result = match self.operator(file, node)? {
                    "+" => Some(value),
                    "-" => value.checked_neg(),
                    "^" => Some(!value),
                    _ => None,
                };
                result.ok_or_else(|| self.not_integer(file, node))
            }
            "binary_expression" => {
                let left = self.constant(file, self.field(file, node, "left")?, iota, imports)?;
                let right = self.constant(file, self.field(file, node, "right")?, iota, imports)?;
                let shift = u32::try_from(right).ok();
                let result = match self.operator(file, node)? {
                    "+" => left.checked_add(right),
                    "-" => left.checked_sub(right),
                    "*" => left.checked_mul(right),
                    "/" => left.checked_div(right),
                    "%" => left.checked_rem(right),
                    "<<" => shift.and_then(|n| left.checked_shl(n)),
                    ">>" => shift.and_then(|n| left.checked_shr(n)),
                    "&" => Some(left & right),
                    "|" => Some(left | right),
                    "^" => Some(left ^ right),
                    "&^" => Some(left & !right),
                    _ => None,
                };
                result.ok_or_else(|| self.not_integer(file, node))
            }
            _ => Err(self.not_integer(file, node)),
        }
    }

    fn local_constant(&self, name: &str, imports: bool) -> Result<i128, OracleError> {
        let Some(spec) = self.consts.get(name) else {
            return Err(OracleError::type_check(format!("undefined: {}", name)));
        };
        let Some(value) = spec.value else {
            return Err(OracleError::type_check(format!("missing init expr for {}", name)));
        };

        if !self.evaluating.borrow_mut().insert(name.to_string()) {
            return Err(self.error_at(
                spec.file,
                value,
                format!("initialization cycle for {}", name),
            ));
        }
        let result = self.constant(spec.file, value, Some(spec.iota), imports);
        self.evaluating.borrow_mut().remove(name);

        result
    }

    /// `pkg.Name` as a constant of an imported package.
    fn imported_constant(&self, file: usize, node: Node<'a>) -> Result<i128, OracleError> {
        let source = &self.files[file];
        let operand = self.field(file, node, "operand")?;
        let name = source.text(self.field(file, node, "field")?);
        let alias = source.text(operand);

        if operand.kind() != "identifier" {
            return Err(self.not_integer(file, node));
        }
        let Some(path) = self.import_path_of(file, alias) else {
            return Err(self.undefined(file, operand, alias));
        };

        let package = self.oracle.load_import(&path).map_err(|e| {
            self.error_at(file, node, format!("could not import {} ({})", path, e))
        })?;
        match package.constants.get(name) {
            Some(value) => Ok(*value),
            None => Err(self.undefined(file, node, &format!("{}.{}", alias, name))),
        }
    }

    fn operator(&self, file: usize, node: Node<'a>) -> Result<&'a str, OracleError> {
        let files: &'a [SourceFile] = self.files;
        let operator = self.field(file, node, "operator")?;
        Ok(files[file].text(operator))
    }

    fn not_integer(&self, file: usize, node: Node<'_>) -> OracleError {
        let text = self.files[file].text(node);
        self.error_at(file, node, format!("{} is not an integer constant", text))
    }

    fn named(&self, file: usize, node: Node<'a>) -> Result<CheckedType, OracleError> {
        let name = self.files[file].text(node);

        if self.specs.contains_key(name) {
            Ok(CheckedType::Named {
                package: Some(self.import_path.to_string()),
                name: name.to_string(),
            })
        } else if is_universe_type(name) {
            Ok(CheckedType::Named {
                package: None,
                name: name.to_string(),
            })
        } else {
            Err(self.undefined(file, node, name))
        }
    }

    /// Import path `alias` refers to in `file`.
    ///
    /// Unaliased imports are matched by guessed name first, then by the
    /// package clause of the imported package.
    fn import_path_of(&self, file: usize, alias: &str) -> Option<String> {
        let scope = &self.scopes[file];
        if let Some(path) = scope.imports.get(alias) {
            return Some(path.clone());
        }

        scope
            .unaliased
            .iter()
            .find(|path| self.oracle.package_clause(path).as_deref() == Some(alias))
            .cloned()
    }

    fn qualified_parts(&self, file: usize, node: Node<'a>) -> Result<(&'a str, &'a str), OracleError> {
        let files: &'a [SourceFile] = self.files;
        let source = &files[file];
        let package = self.field(file, node, "package")?;
        let name = self.field(file, node, "name")?;
        Ok((source.text(package), source.text(name)))
    }

    fn field(&self, file: usize, node: Node<'a>, field: &str) -> Result<Node<'a>, OracleError> {
        node.child_by_field_name(field).ok_or_else(|| {
            self.error_at(file, node, format!("malformed {} (missing {})", node.kind(), field))
        })
    }

    fn undefined(&self, file: usize, node: Node<'_>, name: &str) -> OracleError {
        if self.scopes[file].dot_import {
            self.error_at(
                file,
                node,
                format!("undefined: {} (dot imports are not supported)", name),
            )
        } else {
            self.error_at(file, node, format!("undefined: {}", name))
        }
    }

    fn error_at(&self, file: usize, node: Node<'_>, message: impl AsRef<str>) -> OracleError {
        let path = &self.files[file].path;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let pos = node.start_position();

        OracleError::type_check(format!(
            "{}:{}:{}: {}",
            name,
            pos.row + 1,
            pos.column + 1,
            message.as_ref()
        ))
    }
}

/// Collect the import aliases of a file.
fn file_scope(file: &SourceFile, root: Node<'_>) -> FileScope {
    let mut scope = FileScope::default();

    for decl in named_children(root) {
        if decl.kind() != "import_declaration" {
            continue;
        }

        let mut specs = Vec::new();
        for child in named_children(decl) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => specs.extend(
                    named_children(child)
                        .into_iter()
                        .filter(|c| c.kind() == "import_spec"),
                ),
                _ => {}
            }
        }

        for spec in specs {
            let Some(path) = spec.child_by_field_name("path") else {
                continue;
            };
            let path = unquote(file.text(path));

            match spec.child_by_field_name("name") {
                Some(name) if name.kind() == "dot" || file.text(name) == "." => {
                    scope.dot_import = true;
                }
                Some(name) if name.kind() == "blank_identifier" || file.text(name) == "_" => {}
                Some(name) => {
                    scope
                        .imports
                        .insert(file.text(name).to_string(), path.to_string());
                }
                None if path == "C" => scope.cgo = true,
                None => {
                    scope
                        .imports
                        .insert(guess_package_name(path), path.to_string());
                    scope.unaliased.push(path.to_string());
                }
            }
        }
    }

    scope
}

/// Kind reported for generic declarations without checking their bodies.
fn generic_kind(ty: Node<'_>) -> DeclarationKind {
    if ty.kind() != "interface_type" {
        return DeclarationKind::Other;
    }
    let has_terms = named_children(ty).into_iter().any(|elem| {
        if !matches!(elem.kind(), "type_elem" | "constraint_elem") {
            return false;
        }
        let terms = named_children(elem);
        terms.len() != 1 || !matches!(terms[0].kind(), "type_identifier" | "qualified_type")
    });
    if has_terms {
        DeclarationKind::Constraint
    } else {
        DeclarationKind::Interface(Vec::new())
    }
}

/// Add a method to a method set; identical duplicates from embedding are fine.
fn add_method(methods: &mut Vec<CheckedMethod>, method: CheckedMethod) -> Result<(), String> {
    match methods.iter().find(|m| m.name == method.name) {
        Some(existing) if existing.signature == method.signature => Ok(()),
        Some(_) => Err(format!("duplicate method {}", method.name)),
        None => {
            methods.push(method);
            Ok(())
        }
    }
}

/// The method set of the predeclared `error` interface.
fn error_method() -> CheckedMethod {
    CheckedMethod {
        name: "Error".to_string(),
        signature: CheckedSignature {
            params: Vec::new(),
            results: vec![CheckedType::Named {
                package: None,
                name: "string".to_string(),
            }],
            variadic: false,
        },
    }
}

fn channel_direction(node: Node<'_>) -> ChanDir {
    let mut cursor = node.walk();
    let tokens: Vec<&str> = node.children(&mut cursor).map(|c| c.kind()).collect();

    match tokens.iter().position(|k| *k == "<-") {
        Some(0) => ChanDir::Recv,
        Some(_) => ChanDir::Send,
        None => ChanDir::Both,
    }
}

fn is_empty_struct(node: Node<'_>) -> bool {
    named_children(node).iter().all(|list| {
        list.kind() != "field_declaration_list"
            || named_children(*list)
                .iter()
                .all(|field| field.kind() == "comment")
    })
}

/// Named children, without comments.
pub(super) fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let children = node
        .named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect();
    children
}

fn first_named_child(node: Node<'_>) -> Option<Node<'_>> {
    named_children(node).into_iter().next()
}

fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .or_else(|| literal.strip_prefix('`').and_then(|s| s.strip_suffix('`')))
        .unwrap_or(literal)
}

/// Parse a Go integer literal (`42`, `0x2a`, `0o52`, `052`, `0b101010`, `1_000`).
pub fn parse_int_literal(text: &str) -> Option<u64> {
    let digits: String = text.chars().filter(|c| *c != '_').collect();
    let lower = digits.to_ascii_lowercase();

    if let Some(hex) = lower.strip_prefix("0x") {
        u64::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = lower.strip_prefix("0b") {
        u64::from_str_radix(bin, 2).ok()
    } else if let Some(oct) = lower.strip_prefix("0o") {
        u64::from_str_radix(oct, 8).ok()
    } else if lower.len() > 1 && lower.starts_with('0') {
        u64::from_str_radix(&lower[1..], 8).ok()
    } else {
        lower.parse().ok()
    }
}
