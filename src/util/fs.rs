//! Filesystem utilities.
//!
//! Thin synchronous wrappers that report failures as `io::Result` values so
//! callers can attach the offending path to their own error types.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

/// Mode used for every generated file.
pub const GENERATED_FILE_MODE: u32 = 0o644;

/// Whether `path` exists and is a directory.
pub fn dir_exists(path: &Path) -> bool {
    path.is_dir()
}

/// Whether `path` exists (as a file or anything else).
pub fn file_exists(path: &Path) -> io::Result<bool> {
    match fs::symlink_metadata(path) {
        Ok(_) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e),
    }
}

/// Return the first path in `paths` that already exists.
pub fn any_exists<'a, I>(paths: I) -> io::Result<Option<PathBuf>>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    for path in paths {
        if file_exists(path)? {
            return Ok(Some(path.clone()));
        }
    }
    Ok(None)
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    if !path.is_dir() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

/// Read a file to string.
pub fn read_to_string(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Write `contents` to `path` with [`GENERATED_FILE_MODE`].
#[cfg(unix)]
pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(GENERATED_FILE_MODE)
        .open(path)?;
    file.write_all(contents)?;

    // mode() only applies on creation
    file.set_permissions(fs::Permissions::from_mode(GENERATED_FILE_MODE))
}

#[cfg(not(unix))]
pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
    fs::write(path, contents)
}

/// Make `path` absolute against `base` and fold `.`/`..` components.
///
/// Symlinks are left alone, so the result can be compared by prefix with
/// other lexically normalized paths.
pub fn absolutize(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        normalize_lexically(path)
    } else {
        normalize_lexically(&base.join(path))
    }
}

/// Fold `.` and `..` components without touching the filesystem.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Convert a relative path to a slash-separated import path fragment.
pub fn to_slash(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(s) => Some(s.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Path to show in messages: relative to `base` when that is shorter.
pub fn display_path(base: &Path, path: &Path) -> String {
    match pathdiff::diff_paths(path, base) {
        Some(rel) if !rel.as_os_str().is_empty() && !rel.starts_with("..") => {
            rel.display().to_string()
        }
        _ => path.display().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_any_exists_returns_first_conflict() {
        let tmp = TempDir::new().unwrap();
        let a = tmp.path().join("a.go");
        let b = tmp.path().join("b.go");
        let c = tmp.path().join("c.go");
        fs::write(&b, "package x").unwrap();
        fs::write(&c, "package x").unwrap();

        let paths = vec![a, b.clone(), c];
        assert_eq!(any_exists(&paths).unwrap(), Some(b));
    }

    #[test]
    fn test_any_exists_none() {
        let tmp = TempDir::new().unwrap();
        let paths = vec![tmp.path().join("missing.go")];
        assert_eq!(any_exists(&paths).unwrap(), None);
    }

    #[cfg(unix)]
    #[test]
    fn test_write_file_uses_fixed_mode() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.go");
        fs::write(&path, "old").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o600)).unwrap();

        write_file(&path, b"package out\n").unwrap();

        let mode = fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
        assert_eq!(fs::read_to_string(&path).unwrap(), "package out\n");
    }

    #[test]
    fn test_ensure_dir() {
        let tmp = TempDir::new().unwrap();
        let nested = tmp.path().join("a/b/c");
        ensure_dir(&nested).unwrap();
        assert!(dir_exists(&nested));
        ensure_dir(&nested).unwrap();
    }

    #[test]
    fn test_normalize_lexically() {
        assert_eq!(
            normalize_lexically(Path::new("/a/b/./c/../d")),
            PathBuf::from("/a/b/d")
        );
        assert_eq!(
            absolutize(Path::new("/work"), Path::new("./pkg/../mocks")),
            PathBuf::from("/work/mocks")
        );
    }

    #[test]
    fn test_to_slash() {
        assert_eq!(to_slash(Path::new("internal/fetch")), "internal/fetch");
        assert_eq!(to_slash(Path::new("")), "");
    }

    #[test]
    fn test_display_path() {
        let base = Path::new("/work/project");
        assert_eq!(
            display_path(base, Path::new("/work/project/mocks/a.go")),
            "mocks/a.go"
        );
        assert_eq!(display_path(base, Path::new("/elsewhere/a.go")), "/elsewhere/a.go");
    }
}
