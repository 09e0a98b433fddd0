//! The generation command.

use std::io;

use anyhow::Result;

use crate::cli::Cli;
use genlib::extract::GoSourceOracle;
use genlib::generation::{wrapper_filename, AppInfo, WrapperGenerator};
use genlib::ops::{generate, GenerateOptions, RunOutcome};
use genlib::util::GlobalContext;

pub fn execute(cli: Cli) -> Result<()> {
    let ctx = GlobalContext::from_env()?;

    let opts = GenerateOptions {
        import_paths: cli.paths,
        output_dir: cli.dirname,
        output_file: cli.filename,
        force: cli.force,
        interfaces: cli.interfaces,
        package_name: cli.package,
        prefix: cli.prefix,
        list_only: cli.list,
    };

    let app = AppInfo::new(
        env!("CARGO_BIN_NAME"),
        env!("CARGO_PKG_VERSION"),
        std::env::args().collect(),
    );
    let oracle = GoSourceOracle::new(&ctx);
    let stdout = io::stdout();

    let outcome = generate(
        &ctx,
        &opts,
        &app,
        &oracle,
        &wrapper_filename,
        &WrapperGenerator,
        &mut stdout.lock(),
    )?;

    if let RunOutcome::Generated(paths) = outcome {
        tracing::debug!("generated {} file(s)", paths.len());
    }

    Ok(())
}
