//! Interface extraction.
//!
//! Runs a [`TypeOracle`] over every resolved package directory and turns the
//! exported interface declarations it reports into the type model. The run
//! is all-or-nothing: the first package that fails aborts extraction.

pub mod errors;
pub mod go;
pub mod oracle;

pub use errors::ExtractError;
pub use go::GoSourceOracle;
pub use oracle::{
    CheckedMethod, CheckedPackage, CheckedSignature, CheckedType, Declaration, DeclarationKind,
    OracleError, TypeOracle,
};

use crate::core::names::is_exported;
use crate::core::{Interface, Method, Package, Packages, Signature, TypeDescriptor};
use crate::resolver::ResolvedPath;

/// Builds the type model for a set of resolved packages.
pub struct Extractor<'a> {
    oracle: &'a dyn TypeOracle,
}

impl<'a> Extractor<'a> {
    /// Create an extractor backed by `oracle`.
    pub fn new(oracle: &'a dyn TypeOracle) -> Self {
        Extractor { oracle }
    }

    /// Extract every package, in order.
    pub fn extract(&self, resolved: &[ResolvedPath]) -> Result<Packages, ExtractError> {
        let mut packages = Packages::new();

        for path in resolved {
            tracing::info!("parsing package '{}'", path.import_path);

            let checked = self
                .oracle
                .resolve_package(&path.dir, &path.import_path)
                .map_err(|e| ExtractError::new(&path.import_path, e))?;

            packages.insert(build_package(&checked));
        }

        Ok(packages)
    }
}

/// Keep the exported, non-generic interface declarations of a package.
fn build_package(checked: &CheckedPackage) -> Package {
    let own = checked.import_path.as_str();
    let mut interfaces = Vec::new();

    for decl in &checked.declarations {
        if !is_exported(&decl.name) {
            continue;
        }

        let methods = match &decl.kind {
            DeclarationKind::Interface(methods) => methods,
            DeclarationKind::Constraint | DeclarationKind::Other => continue,
        };

        if decl.generic {
            tracing::debug!("skipping generic interface '{}'", decl.name);
            continue;
        }

        let mut methods: Vec<Method> = methods
            .iter()
            .map(|m| lower_method(m, own))
            .collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));

        interfaces.push(Interface {
            name: decl.name.clone(),
            import_path: own.to_string(),
            methods,
        });
    }

    Package::new(own, interfaces)
}

fn lower_method(method: &CheckedMethod, own: &str) -> Method {
    let sig = lower_signature(&method.signature, own);
    Method::new(&method.name, sig.params, sig.results, sig.variadic)
}

fn lower_signature(sig: &CheckedSignature, own: &str) -> Signature {
    Signature {
        params: sig.params.iter().map(|t| lower_type(t, own)).collect(),
        results: sig.results.iter().map(|t| lower_type(t, own)).collect(),
        variadic: sig.variadic,
    }
}

/// Lower a checked type. Types declared in `own` lose their import path so
/// they can be qualified later with the interface's (possibly elided) path.
pub fn lower_type(ty: &CheckedType, own: &str) -> TypeDescriptor {
    match ty {
        CheckedType::Named { package, name } => TypeDescriptor::Named {
            name: name.clone(),
            import_path: package.clone().filter(|p| p != own),
        },
        CheckedType::Pointer(elem) => TypeDescriptor::pointer(lower_type(elem, own)),
        CheckedType::Slice(elem) => TypeDescriptor::slice(lower_type(elem, own)),
        CheckedType::Array(elem, len) => TypeDescriptor::array(lower_type(elem, own), *len),
        CheckedType::Map(key, value) => {
            TypeDescriptor::map(lower_type(key, own), lower_type(value, own))
        }
        CheckedType::Chan(elem, dir) => TypeDescriptor::chan(lower_type(elem, own), *dir),
        CheckedType::Signature(sig) => TypeDescriptor::Func(lower_signature(sig, own)),
        CheckedType::Instance(base, args) => TypeDescriptor::Instance {
            base: Box::new(lower_type(base, own)),
            args: args.iter().map(|arg| lower_type(arg, own)).collect(),
        },
        CheckedType::Cgo(name) => TypeDescriptor::Selector {
            package: "C".to_string(),
            name: name.clone(),
        },
        CheckedType::EmptyInterface => TypeDescriptor::EmptyInterface,
        CheckedType::EmptyStruct => TypeDescriptor::EmptyStruct,
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::path::{Path, PathBuf};

    use super::*;
    use crate::core::ChanDir;
    use crate::resolver::Resolution;

    /// Oracle returning canned packages keyed by import path.
    struct CannedOracle {
        packages: Vec<CheckedPackage>,
        calls: RefCell<Vec<String>>,
    }

    impl TypeOracle for CannedOracle {
        fn resolve_package(
            &self,
            _dir: &Path,
            import_path: &str,
        ) -> Result<CheckedPackage, OracleError> {
            self.calls.borrow_mut().push(import_path.to_string());
            self.packages
                .iter()
                .find(|p| p.import_path == import_path)
                .cloned()
                .ok_or_else(|| OracleError::type_check("undefined: Missing"))
        }
    }

    fn resolved(import_path: &str) -> ResolvedPath {
        ResolvedPath {
            import_path: import_path.to_string(),
            dir: PathBuf::from("/src").join(import_path),
            resolution: Resolution::SourceRoot,
        }
    }

    fn named(package: Option<&str>, name: &str) -> CheckedType {
        CheckedType::Named {
            package: package.map(String::from),
            name: name.to_string(),
        }
    }

    fn interface(name: &str, methods: Vec<CheckedMethod>) -> Declaration {
        Declaration {
            name: name.to_string(),
            generic: false,
            kind: DeclarationKind::Interface(methods),
        }
    }

    fn store_package() -> CheckedPackage {
        CheckedPackage {
            name: "store".to_string(),
            import_path: "example.com/store".to_string(),
            declarations: vec![
                interface(
                    "Store",
                    vec![
                        CheckedMethod {
                            name: "Put".to_string(),
                            signature: CheckedSignature {
                                params: vec![
                                    named(Some("context"), "Context"),
                                    named(Some("example.com/store"), "Key"),
                                    CheckedType::Slice(Box::new(named(None, "byte"))),
                                ],
                                results: vec![named(None, "error")],
                                variadic: true,
                            },
                        },
                        CheckedMethod {
                            name: "Close".to_string(),
                            signature: CheckedSignature::default(),
                        },
                    ],
                ),
                interface("hidden", vec![]),
                Declaration {
                    name: "Key".to_string(),
                    generic: false,
                    kind: DeclarationKind::Other,
                },
                Declaration {
                    name: "Number".to_string(),
                    generic: false,
                    kind: DeclarationKind::Constraint,
                },
                Declaration {
                    name: "Set".to_string(),
                    generic: true,
                    kind: DeclarationKind::Interface(vec![]),
                },
            ],
            constants: Default::default(),
        }
    }

    #[test]
    fn test_extract_keeps_exported_interfaces_only() {
        let oracle = CannedOracle {
            packages: vec![store_package()],
            calls: RefCell::new(Vec::new()),
        };

        let packages = Extractor::new(&oracle)
            .extract(&[resolved("example.com/store")])
            .unwrap();

        let pkg = packages.get("example.com/store").unwrap();
        let names: Vec<_> = pkg.interfaces.keys().cloned().collect();
        assert_eq!(names, vec!["Store"]);
    }

    #[test]
    fn test_methods_sorted_and_lowered() {
        let oracle = CannedOracle {
            packages: vec![store_package()],
            calls: RefCell::new(Vec::new()),
        };

        let packages = Extractor::new(&oracle)
            .extract(&[resolved("example.com/store")])
            .unwrap();
        let store = packages
            .get("example.com/store")
            .and_then(|p| p.interface("Store"))
            .unwrap();

        assert_eq!(store.import_path, "example.com/store");
        assert_eq!(store.methods[0].name, "Close");
        assert_eq!(store.methods[1].name, "Put");

        let put = &store.methods[1];
        assert!(put.variadic);
        assert_eq!(
            put.params,
            vec![
                TypeDescriptor::qualified("context", "Context"),
                TypeDescriptor::local("Key"),
                TypeDescriptor::slice(TypeDescriptor::local("byte")),
            ]
        );
        assert_eq!(put.results, vec![TypeDescriptor::local("error")]);
    }

    #[test]
    fn test_failure_aborts_whole_run() {
        let oracle = CannedOracle {
            packages: vec![store_package()],
            calls: RefCell::new(Vec::new()),
        };

        let err = Extractor::new(&oracle)
            .extract(&[
                resolved("example.com/broken"),
                resolved("example.com/store"),
            ])
            .unwrap_err();

        assert_eq!(err.import_path, "example.com/broken");
        assert_eq!(err.to_string(), "could not import package `example.com/broken`");
        let cause = std::error::Error::source(&err).map(|e| e.to_string());
        assert_eq!(cause.as_deref(), Some("undefined: Missing"));
        assert_eq!(*oracle.calls.borrow(), vec!["example.com/broken"]);
    }

    #[test]
    fn test_lower_nested_types() {
        let ty = CheckedType::Slice(Box::new(CheckedType::Pointer(Box::new(CheckedType::Map(
            Box::new(named(None, "string")),
            Box::new(CheckedType::Chan(
                Box::new(named(Some("example.com/other"), "Event")),
                ChanDir::Recv,
            )),
        )))));

        assert_eq!(
            lower_type(&ty, "example.com/store"),
            TypeDescriptor::slice(TypeDescriptor::pointer(TypeDescriptor::map(
                TypeDescriptor::local("string"),
                TypeDescriptor::chan(
                    TypeDescriptor::qualified("example.com/other", "Event"),
                    ChanDir::Recv,
                ),
            )))
        );
    }

    #[test]
    fn test_lower_cgo_reference() {
        assert_eq!(
            lower_type(&CheckedType::Cgo("int".to_string()), "example.com/store"),
            TypeDescriptor::Selector {
                package: "C".to_string(),
                name: "int".to_string(),
            }
        );
    }

    #[test]
    fn test_lower_instance_drops_own_package() {
        let ty = CheckedType::Instance(
            Box::new(named(Some("sync/atomic"), "Pointer")),
            vec![named(Some("example.com/store"), "Key")],
        );

        assert_eq!(
            lower_type(&ty, "example.com/store"),
            TypeDescriptor::Instance {
                base: Box::new(TypeDescriptor::qualified("sync/atomic", "Pointer")),
                args: vec![TypeDescriptor::local("Key")],
            }
        );
    }
}
