//! Source file selection for a package directory.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::extract::oracle::OracleError;

const KNOWN_OS: &[&str] = &[
    "aix", "android", "darwin", "dragonfly", "freebsd", "hurd", "illumos", "ios", "js", "linux",
    "nacl", "netbsd", "openbsd", "plan9", "solaris", "wasip1", "windows", "zos",
];

const KNOWN_ARCH: &[&str] = &[
    "386", "amd64", "amd64p32", "arm", "armbe", "arm64", "arm64be", "loong64", "mips", "mipsle",
    "mips64", "mips64le", "mips64p32", "mips64p32le", "ppc", "ppc64", "ppc64le", "riscv",
    "riscv64", "s390", "s390x", "sparc", "sparc64", "wasm",
];

/// List the package's buildable, non-test `.go` files, sorted by name.
pub fn source_files(dir: &Path) -> Result<Vec<PathBuf>, OracleError> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| OracleError::Io {
            path: e.path().unwrap_or(dir).to_path_buf(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if is_source_file(&name) && matches_target(&name, target_os(), target_arch()) {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}

/// `*.go` files that are not `*_test.go`.
pub fn is_source_file(name: &str) -> bool {
    match name.strip_suffix(".go") {
        Some(base) => !base.is_empty() && !base.ends_with("_test"),
        None => false,
    }
}

/// Apply the `_GOOS`, `_GOARCH` and `_GOOS_GOARCH` file name constraints.
pub fn matches_target(name: &str, os: &str, arch: &str) -> bool {
    let base = name.strip_suffix(".go").unwrap_or(name);
    let base = base.strip_suffix("_test").unwrap_or(base);

    let Some(idx) = base.find('_') else {
        return true;
    };
    let parts: Vec<&str> = base[idx..].split('_').collect();
    let n = parts.len();

    if n >= 2 && KNOWN_OS.contains(&parts[n - 2]) && KNOWN_ARCH.contains(&parts[n - 1]) {
        return parts[n - 2] == os && parts[n - 1] == arch;
    }
    if KNOWN_OS.contains(&parts[n - 1]) {
        return parts[n - 1] == os;
    }
    if KNOWN_ARCH.contains(&parts[n - 1]) {
        return parts[n - 1] == arch;
    }
    true
}

/// The host operating system, spelled the way Go spells it.
pub fn target_os() -> &'static str {
    match std::env::consts::OS {
        "macos" => "darwin",
        other => other,
    }
}

/// The host architecture, spelled the way Go spells it.
pub fn target_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86" => "386",
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        "loongarch64" => "loong64",
        "powerpc" => "ppc",
        "powerpc64" => "ppc64",
        "wasm32" => "wasm",
        other => other,
    }
}
