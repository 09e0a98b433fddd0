//! CLI definitions using clap.

use std::path::PathBuf;

use clap::Parser;

/// genlib - generate forwarding wrappers for Go interfaces
#[derive(Parser)]
#[command(name = "genlib")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The import paths used to search for eligible interfaces
    #[arg(required = true, value_name = "PATH")]
    pub paths: Vec<String>,

    /// The target output directory. Each wrapper will be written to a unique file.
    #[arg(short = 'd', long)]
    pub dirname: Option<PathBuf>,

    /// The target output file. All wrappers are written to this file ('-' for stdout).
    #[arg(short = 'o', long)]
    pub filename: Option<PathBuf>,

    /// Do not abort if a write to disk would overwrite an existing file
    #[arg(short, long)]
    pub force: bool,

    /// A whitelist of interfaces to generate given the import paths
    #[arg(short, long = "interfaces", value_name = "NAME")]
    pub interfaces: Vec<String>,

    /// Dry run - print the interfaces found in the given import paths
    #[arg(long)]
    pub list: bool,

    /// The name of the generated package (defaults to the name of the target directory)
    #[arg(short, long = "package", value_name = "NAME")]
    pub package: Option<String>,

    /// A prefix used in the name of each wrapper struct
    #[arg(long)]
    pub prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}
