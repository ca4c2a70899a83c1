//! CLI definitions for cse.

use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cse",
    version,
    about = "Strip CoDeSys 2.3 symbol files down to the symbols tagged for export",
    after_help = "Examples:\n  cse Plant.SYM_XML                 # writes Plant_CSE.SYM_XML from Plant.pro\n  cse Plant.SYM_XML --tag HMI       # use another export tag\n  cse Plant.SYM_XML --json          # machine-readable report"
)]
pub struct Cli {
    /// Symbol file generated by CoDeSys (must have the symbol file extension).
    pub symbol_file: PathBuf,
    /// Project file to index (defaults to <base>.pro next to the symbol file).
    #[arg(long)]
    pub project: Option<PathBuf>,
    /// Destination file (defaults to <base>_CSE.SYM_XML).
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Configuration file (defaults to cse.toml next to the symbol file, if present).
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Export tag override.
    #[arg(long)]
    pub tag: Option<String>,
    /// Print a JSON report instead of the console listing.
    #[arg(long)]
    pub json: bool,
    /// Wait for ENTER before exiting (for double-click launches).
    #[arg(long)]
    pub pause: bool,
    /// Do not print the banner.
    #[arg(long, short)]
    pub quiet: bool,
    /// Show debug logging on stderr.
    #[arg(long, short)]
    pub verbose: bool,
}
