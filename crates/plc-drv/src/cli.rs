//! Command-line surface (spec §6, §10.2).

use std::path::PathBuf;

use clap::Parser;

/// Compiles a source file into a stack-machine instruction listing.
#[derive(Debug, Parser)]
#[command(name = "plc", version, about)]
pub struct Cli {
    /// Source file to compile.
    pub source: PathBuf,

    /// Emit a `.lis` file interleaving source lines with diagnostics.
    #[arg(short = 'l', long = "listing")]
    pub listing: bool,

    /// Output instruction file path. Defaults to the source path with its
    /// extension replaced by `.pal`.
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Increase log verbosity. May be repeated.
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn output_path(&self) -> PathBuf {
        self.output.clone().unwrap_or_else(|| self.source.with_extension("pal"))
    }

    pub fn listing_path(&self) -> PathBuf {
        self.source.with_extension("lis")
    }
}
