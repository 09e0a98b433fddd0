//! Implementation of a generation run.

use std::io::Write;
use std::path::PathBuf;

use super::errors::{ConfigError, GenerateError};
use super::options::GenerateOptions;
use crate::core::Interface;
use crate::extract::{Extractor, TypeOracle};
use crate::generation::{AppInfo, Emitter, FilenameGenerator, InterfaceGenerator};
use crate::resolver::ResolvedPath;
use crate::util::fs::ensure_dir;
use crate::util::GlobalContext;

/// What a run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Interface names printed in list mode
    Listed(Vec<String>),
    /// Files written (empty when printing to standard output)
    Generated(Vec<PathBuf>),
}

/// Resolve, extract, filter and emit.
///
/// List mode prints the names of the selected interfaces to `out`, one per
/// line, and writes nothing else. Standard-output emission also goes to
/// `out`.
pub fn generate(
    ctx: &GlobalContext,
    opts: &GenerateOptions,
    app: &AppInfo,
    oracle: &dyn TypeOracle,
    filenames: &dyn FilenameGenerator,
    generator: &dyn InterfaceGenerator,
    out: &mut dyn Write,
) -> Result<RunOutcome, GenerateError> {
    let config = if opts.list_only {
        None
    } else {
        Some(opts.emit_config(ctx.cwd())?)
    };

    let resolved = resolve_all(ctx, &opts.import_paths)?;
    let packages = Extractor::new(oracle).extract(&resolved)?;

    let mut interfaces: Vec<Interface> = packages
        .interfaces()
        .into_iter()
        .filter(|iface| opts.allows(&iface.name))
        .collect();

    let Some(config) = config else {
        let names: Vec<String> = interfaces.iter().map(|iface| iface.name.clone()).collect();
        for name in &names {
            writeln!(out, "{}", name).map_err(GenerateError::Output)?;
        }
        return Ok(RunOutcome::Listed(names));
    };

    for name in &opts.interfaces {
        if !interfaces
            .iter()
            .any(|iface| iface.name.eq_ignore_ascii_case(name))
        {
            return Err(ConfigError::InterfaceNotFound(name.clone()).into());
        }
    }

    if let Some(dir) = config.output_dir() {
        ensure_dir(dir).map_err(|e| ConfigError::Io {
            path: dir.to_path_buf(),
            source: e,
        })?;

        match ctx.resolver().infer_import_path(dir) {
            Some(output_import_path) => {
                for iface in &mut interfaces {
                    iface.elide_self_reference(&output_import_path);
                }
            }
            None => tracing::debug!(
                "no import path for {}, keeping qualified references",
                dir.display()
            ),
        }
    }

    let written = Emitter::new(app, ctx.cwd()).emit(&interfaces, &config, filenames, generator, out)?;
    Ok(RunOutcome::Generated(written))
}

fn resolve_all(ctx: &GlobalContext, import_paths: &[String]) -> Result<Vec<ResolvedPath>, GenerateError> {
    let resolver = ctx.resolver();

    import_paths
        .iter()
        .map(|path| -> Result<ResolvedPath, GenerateError> {
            let resolved = resolver.resolve(ctx.cwd(), path)?;
            tracing::debug!(
                "resolved '{}' to {} ({})",
                path,
                resolved.dir.display(),
                resolved.resolution
            );
            Ok(resolved)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::extract::GoSourceOracle;
    use crate::generation::{wrapper_filename, EmitError, WrapperGenerator};
    use crate::test_support::{go_filename, marker_generator, GoWorkspaceFixture, FETCHER_SOURCE};

    const STORE_SOURCE: &str = r#"package store

import "context"

type Key string

type Store interface {
	Get(ctx context.Context, key Key) ([]byte, error)
	Keys(prefix string, more ...string) []Key
}

type Closer interface {
	Close() error
}
"#;

    fn app() -> AppInfo {
        AppInfo::new("genlib", "0.1.0", vec!["genlib".to_string()])
    }

    fn run(
        fixture: &GoWorkspaceFixture,
        cwd: &std::path::Path,
        opts: &GenerateOptions,
        out: &mut Vec<u8>,
    ) -> Result<RunOutcome, GenerateError> {
        let ctx = fixture.context(cwd);
        let oracle = GoSourceOracle::new(&ctx);
        generate(&ctx, opts, &app(), &oracle, &go_filename, &marker_generator, out)
    }

    fn opts(paths: &[&str]) -> GenerateOptions {
        GenerateOptions {
            import_paths: paths.iter().map(|p| p.to_string()).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_list_mode_prints_names_only() {
        let fixture = GoWorkspaceFixture::new();
        fixture.add_package("example.com/fetch", &[("fetch.go", FETCHER_SOURCE)]);
        let cwd = fixture.root().join("out");
        fs::create_dir_all(&cwd).unwrap();

        let mut out = Vec::new();
        let outcome = run(
            &fixture,
            &cwd,
            &GenerateOptions {
                list_only: true,
                ..opts(&["example.com/fetch"])
            },
            &mut out,
        )
        .unwrap();

        assert_eq!(outcome, RunOutcome::Listed(vec!["Fetcher".to_string()]));
        assert_eq!(String::from_utf8(out).unwrap(), "Fetcher\n");
        assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);
    }

    #[test]
    fn test_directory_mode_writes_fetcher() {
        let fixture = GoWorkspaceFixture::new();
        fixture.add_package("example.com/fetch", &[("fetch.go", FETCHER_SOURCE)]);
        let cwd = fixture.root().join("mocks");
        fs::create_dir_all(&cwd).unwrap();

        let outcome = run(&fixture, &cwd, &opts(&["example.com/fetch"]), &mut Vec::new()).unwrap();

        assert_eq!(outcome, RunOutcome::Generated(vec![cwd.join("fetcher.go")]));
        let content = fs::read_to_string(cwd.join("fetcher.go")).unwrap();
        assert!(content.contains("package mocks\n"));
        assert!(content.contains("type FetcherMarker struct{}"));
    }

    #[test]
    fn test_allow_list_filters_and_requires_presence() {
        let fixture = GoWorkspaceFixture::new();
        fixture.add_package("example.com/store", &[("store.go", STORE_SOURCE)]);
        let cwd = fixture.root().join("mocks");
        fs::create_dir_all(&cwd).unwrap();

        let mut out = Vec::new();
        let listed = run(
            &fixture,
            &cwd,
            &GenerateOptions {
                list_only: true,
                interfaces: vec!["STORE".to_string()],
                ..opts(&["example.com/store"])
            },
            &mut out,
        )
        .unwrap();
        assert_eq!(listed, RunOutcome::Listed(vec!["Store".to_string()]));

        let err = run(
            &fixture,
            &cwd,
            &GenerateOptions {
                interfaces: vec!["Store".to_string(), "Missing".to_string()],
                ..opts(&["example.com/store"])
            },
            &mut Vec::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "type 'Missing' not found in supplied import paths");
        assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);
    }

    #[test]
    fn test_unresolvable_path_fails() {
        let fixture = GoWorkspaceFixture::new();
        let cwd = fixture.root().join("mocks");
        fs::create_dir_all(&cwd).unwrap();

        let err = run(&fixture, &cwd, &opts(&["example.com/nowhere"]), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GenerateError::Resolve(_)));
    }

    #[test]
    fn test_conflict_is_reported() {
        let fixture = GoWorkspaceFixture::new();
        fixture.add_package("example.com/fetch", &[("fetch.go", FETCHER_SOURCE)]);
        let cwd = fixture.root().join("mocks");
        fs::create_dir_all(&cwd).unwrap();
        fs::write(cwd.join("fetcher.go"), "package mocks\n").unwrap();

        let err = run(&fixture, &cwd, &opts(&["example.com/fetch"]), &mut Vec::new()).unwrap_err();
        assert!(matches!(err, GenerateError::Emit(EmitError::Conflict { .. })));
    }

    #[test]
    fn test_same_name_in_two_packages_is_a_collision() {
        let fixture = GoWorkspaceFixture::new();
        let store = "package {}\n\ntype Store interface {\n\tGet(key string) ([]byte, error)\n}\n";
        let (a, b) = (store.replace("{}", "a"), store.replace("{}", "b"));
        fixture.add_package("example.com/a", &[("a.go", a.as_str())]);
        fixture.add_package("example.com/b", &[("b.go", b.as_str())]);
        let cwd = fixture.root().join("mocks");
        fs::create_dir_all(&cwd).unwrap();

        let err = run(
            &fixture,
            &cwd,
            &opts(&["example.com/a", "example.com/b"]),
            &mut Vec::new(),
        )
        .unwrap_err();

        assert!(matches!(err, GenerateError::Emit(EmitError::Collision { .. })));
        assert_eq!(fs::read_dir(&cwd).unwrap().count(), 0);
    }

    #[test]
    fn test_self_reference_elided_inside_own_package() {
        let fixture = GoWorkspaceFixture::new();
        let dir = fixture.add_package("example.com/store", &[("store.go", STORE_SOURCE)]);

        let ctx = fixture.context(&dir);
        let oracle = GoSourceOracle::new(&ctx);
        let options = GenerateOptions {
            output_file: Some(PathBuf::from("store_wrappers.go")),
            interfaces: vec!["Store".to_string()],
            ..opts(&["example.com/store"])
        };

        generate(
            &ctx,
            &options,
            &app(),
            &oracle,
            &wrapper_filename,
            &WrapperGenerator,
            &mut Vec::new(),
        )
        .unwrap();

        let content = fs::read_to_string(dir.join("store_wrappers.go")).unwrap();
        assert!(content.contains("package store\n"));
        assert!(!content.contains("\"example.com/store\""));
        assert!(content.contains("type StoreWrapper struct {\n\tinner Store\n}"));
        assert!(content.contains("Get(v0 context.Context, v1 Key) ([]byte, error)"));
        assert!(content.contains("Keys(v0 string, v1 ...string) []Key"));
        assert!(content.contains("r0 := w.inner.Keys(v0, v1...)"));
    }

    #[test]
    fn test_output_outside_source_root_keeps_qualification() {
        let fixture = GoWorkspaceFixture::new();
        fixture.add_package("example.com/store", &[("store.go", STORE_SOURCE)]);
        let cwd = fixture.root().join("elsewhere");
        fs::create_dir_all(&cwd).unwrap();

        let ctx = fixture.context(&cwd);
        let oracle = GoSourceOracle::new(&ctx);
        let options = GenerateOptions {
            output_file: Some(PathBuf::from("-")),
            package_name: Some("wrappers".to_string()),
            ..opts(&["example.com/store"])
        };

        let mut out = Vec::new();
        let outcome = generate(
            &ctx,
            &options,
            &app(),
            &oracle,
            &wrapper_filename,
            &WrapperGenerator,
            &mut out,
        )
        .unwrap();

        assert_eq!(outcome, RunOutcome::Generated(Vec::new()));
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("package wrappers\n"));
        assert!(printed.contains("\t\"example.com/store\"\n"));
        assert!(printed.contains("type CloserWrapper struct {\n\tinner store.Closer\n}"));
        assert!(printed.contains("Get(v0 context.Context, v1 store.Key) ([]byte, error)"));
    }
}
