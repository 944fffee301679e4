//! Closed-set failure modes (spec §7, §9, §10.4). These are the only
//! conditions modeled as Rust `Error` values; everything else the
//! compiler reports about the user's source is a [`crate::diagnostic::Diagnostic`]
//! collected by the [`crate::diagnostic::Handler`], never a thrown error.

use thiserror::Error;

/// Failures that can occur while emitting target-machine instructions.
#[derive(Debug, Error)]
pub enum EmitError {
    /// A label was referenced by some instruction but never placed before
    /// finalization (spec §4.6, §8: "no dangling references remain").
    #[error("internal error: label `{0}` referenced but never placed")]
    UnresolvedLabel(String),

    /// The output instruction file could not be opened for writing
    /// (spec §7: the second of exactly two fatal conditions).
    #[error("cannot open output file `{path}`: {source}")]
    OutputFileUnopenable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures that can occur before compilation of a source file can begin.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source file named on the command line could not be opened
    /// (spec §7: the first of exactly two fatal conditions).
    #[error("cannot open source file `{path}`: {source}")]
    Unopenable {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type EmitResult<T> = Result<T, EmitError>;
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_label_error_names_the_label() {
        let err = EmitError::UnresolvedLabel("L3".to_string());
        assert!(err.to_string().contains("L3"));
    }
}
