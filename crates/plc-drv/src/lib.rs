//! Wires the scanner/parser/analyzer/emitter pipeline to the filesystem
//! and the command line (spec §10). The core crates never touch a file or
//! a terminal; this crate is the only place that does.

mod cli;
mod error;
mod listing;

pub use cli::Cli;
pub use error::DriverError;
pub use listing::render_listing;

use std::time::Instant;

use plc_par::Parser;
use plc_util::{EmitError, Handler, SourceError};

/// Initializes the subscriber-based logging layer (spec §10.3). Verbosity
/// is controlled by `RUST_LOG`, or by the repeated `-v` flag when
/// `RUST_LOG` is unset.
pub fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

/// Compiles the file named by `cli`, writing the instruction file (and,
/// if requested, the listing file) as a side effect. Returns `Err` only
/// for the two fatal conditions of §7; diagnostics against the user's
/// source are never surfaced as `Err` (spec §10.4).
pub fn run(cli: &Cli) -> Result<(), DriverError> {
    let start = Instant::now();
    let source_path = &cli.source;

    tracing::debug!(path = %source_path.display(), "reading source file");
    let source = std::fs::read_to_string(source_path).map_err(|source_err| SourceError::Unopenable {
        path: source_path.display().to_string(),
        source: source_err,
    })?;

    let handler = Handler::new();
    let output = Parser::new(&source, &handler).parse();
    let error_count = handler.error_count();
    tracing::debug!(error_count, "parse and analysis complete");

    for dump in &output.dumps {
        print!("{dump}");
    }

    if error_count == 0 {
        let instructions = output.emitter.finalize()?;
        tracing::debug!(instruction_count = instructions.len(), "emission complete");
        let rendered = plc_gen::render_program(&instructions);
        let out_path = cli.output_path();
        std::fs::write(&out_path, rendered).map_err(|source_err| EmitError::OutputFileUnopenable {
            path: out_path.display().to_string(),
            source: source_err,
        })?;
    } else {
        tracing::debug!(error_count, "finalize skipped: errors were reported");
    }

    if cli.listing {
        let listing_path = cli.listing_path();
        let rendered = render_listing(&source, &handler.diagnostics());
        std::fs::write(&listing_path, rendered).map_err(|source_err| EmitError::OutputFileUnopenable {
            path: listing_path.display().to_string(),
            source: source_err,
        })?;
    }

    for diagnostic in handler.diagnostics() {
        eprintln!("{diagnostic}");
    }
    eprintln!("{error_count} error(s) in {:.3}s", start.elapsed().as_secs_f64());

    Ok(())
}
