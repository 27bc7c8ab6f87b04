use std::path::PathBuf;

use clap::Parser;

/// Invoked by the version control system with the three staged versions of
/// a collection file, in merge driver convention: ancestor, current, other.
/// The merged result replaces the current file unless `--check` is set.
#[derive(Parser, Debug)]
#[command(
    name = "rcm",
    about = "Three-way merge driver for JSON record collections",
    version,
)]
pub struct Cli {
    /// Common ancestor version of the collection file
    pub ancestor: PathBuf,

    /// Current side of the merge; receives the merged result
    pub current: PathBuf,

    /// Other side of the merge
    pub other: PathBuf,

    /// Compare and report only, write nothing
    #[arg(long)]
    pub check: bool,

    /// Enable verbose debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
