//! Type model for extracted interfaces.
//!
//! These types are the normalized form of everything the generators need
//! to know about an interface: its methods and the recursive shape of each
//! parameter and result type. They are built once by the extractor and are
//! read-only afterwards, apart from self-reference elision.

use std::collections::BTreeMap;

/// The set of packages extracted in a single run, in specifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Packages {
    packages: Vec<Package>,
}

impl Packages {
    /// Create an empty package set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a package. A package with the same import path is replaced.
    pub fn insert(&mut self, package: Package) {
        match self
            .packages
            .iter_mut()
            .find(|p| p.import_path == package.import_path)
        {
            Some(existing) => *existing = package,
            None => self.packages.push(package),
        }
    }

    /// Look up a package by import path.
    pub fn get(&self, import_path: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.import_path == import_path)
    }

    /// Iterate packages in the order they were extracted.
    pub fn iter(&self) -> impl Iterator<Item = &Package> {
        self.packages.iter()
    }

    /// All interfaces across every package, package order first, then by name.
    pub fn interfaces(&self) -> Vec<Interface> {
        self.packages
            .iter()
            .flat_map(|p| p.interfaces.values().cloned())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.packages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
    }
}

/// A Go package and the exported interfaces declared in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Package {
    /// Slash-delimited import path
    pub import_path: String,

    /// Interfaces keyed by name
    pub interfaces: BTreeMap<String, Interface>,
}

impl Package {
    /// Create a package from its interfaces.
    pub fn new(import_path: impl Into<String>, interfaces: Vec<Interface>) -> Self {
        Package {
            import_path: import_path.into(),
            interfaces: interfaces
                .into_iter()
                .map(|iface| (iface.name.clone(), iface))
                .collect(),
        }
    }

    /// Look up an interface by name.
    pub fn interface(&self, name: &str) -> Option<&Interface> {
        self.interfaces.get(name)
    }
}

/// An exported interface declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interface {
    /// Interface name
    pub name: String,

    /// Import path of the declaring package. Empty once the interface has
    /// been elided as a self reference.
    pub import_path: String,

    /// Methods, sorted by name
    pub methods: Vec<Method>,
}

impl Interface {
    /// Create a new interface.
    pub fn new(name: impl Into<String>, import_path: impl Into<String>) -> Self {
        Interface {
            name: name.into(),
            import_path: import_path.into(),
            methods: Vec::new(),
        }
    }

    /// Add a method.
    pub fn with_method(mut self, method: Method) -> Self {
        self.methods.push(method);
        self
    }

    /// Whether two interfaces denote the same declaration.
    pub fn same_declaration(&self, other: &Interface) -> bool {
        self.import_path == other.import_path && self.name == other.name
    }

    /// Clear the import path if it names the package being generated into.
    pub fn elide_self_reference(&mut self, output_import_path: &str) {
        if self.import_path == output_import_path {
            self.import_path.clear();
        }
    }
}

/// A method of an interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    /// Method name
    pub name: String,

    /// Parameter types. For variadic methods the last entry is the slice
    /// type of the repeated element.
    pub params: Vec<TypeDescriptor>,

    /// Result types
    pub results: Vec<TypeDescriptor>,

    /// Whether the final parameter is variadic
    pub variadic: bool,
}

impl Method {
    /// Create a method.
    ///
    /// A variadic method must have at least one parameter.
    pub fn new(
        name: impl Into<String>,
        params: Vec<TypeDescriptor>,
        results: Vec<TypeDescriptor>,
        variadic: bool,
    ) -> Self {
        debug_assert!(!variadic || !params.is_empty());
        Method {
            name: name.into(),
            params,
            results,
            variadic,
        }
    }

    /// Index of the variadic parameter, if any.
    pub fn variadic_index(&self) -> Option<usize> {
        if self.variadic {
            self.params.len().checked_sub(1)
        } else {
            None
        }
    }
}

/// Direction of a channel type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ChanDir {
    /// `chan T`
    #[default]
    Both,
    /// `chan<- T`
    Send,
    /// `<-chan T`
    Recv,
}

/// A function signature, used both for function-typed values and methods.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Signature {
    pub params: Vec<TypeDescriptor>,
    pub results: Vec<TypeDescriptor>,
    pub variadic: bool,
}

/// Normalized, recursive representation of a parameter or result type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDescriptor {
    /// A named type. `import_path` is `None` for builtins and for types
    /// declared in the package the interface comes from.
    Named {
        name: String,
        import_path: Option<String>,
    },

    /// `*T`
    Pointer(Box<TypeDescriptor>),

    /// `[]T`
    Slice(Box<TypeDescriptor>),

    /// `[N]T`
    Array {
        elem: Box<TypeDescriptor>,
        len: u64,
    },

    /// `map[K]V`
    Map {
        key: Box<TypeDescriptor>,
        value: Box<TypeDescriptor>,
    },

    /// `chan T`, `chan<- T`, `<-chan T`
    Chan {
        elem: Box<TypeDescriptor>,
        dir: ChanDir,
    },

    /// `func(...) ...`
    Func(Signature),

    /// An instantiated generic type, `Base[A, B]`
    Instance {
        base: Box<TypeDescriptor>,
        args: Vec<TypeDescriptor>,
    },

    /// `alias.Name` where the alias has no resolvable import path
    Selector { package: String, name: String },

    /// `interface{}`
    EmptyInterface,

    /// `struct{}`
    EmptyStruct,
}

impl TypeDescriptor {
    /// A builtin or package-local named type.
    pub fn local(name: impl Into<String>) -> Self {
        TypeDescriptor::Named {
            name: name.into(),
            import_path: None,
        }
    }

    /// A named type declared in another package.
    pub fn qualified(import_path: impl Into<String>, name: impl Into<String>) -> Self {
        TypeDescriptor::Named {
            name: name.into(),
            import_path: Some(import_path.into()),
        }
    }

    pub fn pointer(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Pointer(Box::new(elem))
    }

    pub fn slice(elem: TypeDescriptor) -> Self {
        TypeDescriptor::Slice(Box::new(elem))
    }

    pub fn array(elem: TypeDescriptor, len: u64) -> Self {
        TypeDescriptor::Array {
            elem: Box::new(elem),
            len,
        }
    }

    pub fn map(key: TypeDescriptor, value: TypeDescriptor) -> Self {
        TypeDescriptor::Map {
            key: Box::new(key),
            value: Box::new(value),
        }
    }

    pub fn chan(elem: TypeDescriptor, dir: ChanDir) -> Self {
        TypeDescriptor::Chan {
            elem: Box::new(elem),
            dir,
        }
    }
}
