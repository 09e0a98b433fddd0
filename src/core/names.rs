//! Go naming rules shared by the frontend and the code builder.

use std::sync::LazyLock;

use regex::Regex;

/// Identifiers accepted for generated package names and prefixes.
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]([A-Za-z0-9_]*[A-Za-z])?$").unwrap());

static MAJOR_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v[0-9]+$").unwrap());

static DOT_VERSION_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.v[0-9]+$").unwrap());

/// Types predeclared in Go's universe scope.
const UNIVERSE_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

/// Go's reserved words.
const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "chan",
    "const",
    "continue",
    "default",
    "defer",
    "else",
    "fallthrough",
    "for",
    "func",
    "go",
    "goto",
    "if",
    "import",
    "interface",
    "map",
    "package",
    "range",
    "return",
    "select",
    "struct",
    "switch",
    "type",
    "var",
];

/// Whether a Go identifier is exported.
pub fn is_exported(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_uppercase())
}

/// Whether `name` is acceptable as a generated package name or prefix.
pub fn is_valid_identifier(name: &str) -> bool {
    IDENTIFIER_PATTERN.is_match(name)
}

/// Whether `name` is a reserved word.
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Whether `name` is a predeclared type.
pub fn is_universe_type(name: &str) -> bool {
    UNIVERSE_TYPES.contains(&name)
}

/// Guess the package name declared by the package at `import_path`.
///
/// Major version suffixes (`/v2`, `.v3`) and `go-` decorations are dropped,
/// then the name is cut at the first character that cannot appear in an
/// identifier.
pub fn guess_package_name(import_path: &str) -> String {
    let segments: Vec<&str> = import_path.split('/').filter(|s| !s.is_empty()).collect();

    let mut last = segments.last().copied().unwrap_or_default();
    if MAJOR_VERSION.is_match(last) && segments.len() > 1 {
        last = segments[segments.len() - 2];
    }

    let last = DOT_VERSION_SUFFIX.replace(last, "");
    let last = last.strip_prefix("go-").unwrap_or(&last);
    let last = last.strip_suffix("-go").unwrap_or(last);

    let name: String = last
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .skip_while(|c| c.is_ascii_digit())
        .collect();

    if name.is_empty() {
        "pkg".to_string()
    } else {
        name
    }
}
