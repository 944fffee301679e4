//! The error sink (spec §4.2): a single owner, handed out by reference to
//! the scanner, parser, and analyzer, that collects diagnostics and counts
//! errors so the driver can decide whether to finalize the emitter (§7).

mod builder;
mod codes;

pub use builder::DiagnosticBuilder;
pub use codes::*;

use std::cell::RefCell;

use crate::span::Span;

/// Severity of a diagnostic. Only `Error` counts toward the error count
/// that gates finalization (§7); `Warning` is advisory.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Level {
    Error,
    Warning,
}

impl std::fmt::Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Error => write!(f, "error"),
            Level::Warning => write!(f, "warning"),
        }
    }
}

/// A single reported problem: a severity, a message, a source position,
/// and the closed numeric code it corresponds to.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub level: Level,
    pub message: String,
    pub span: Span,
    pub code: DiagnosticCode,
}

impl Diagnostic {
    pub fn new(level: Level, message: impl Into<String>, span: Span, code: DiagnosticCode) -> Self {
        Self {
            level,
            message: message.into(),
            span,
            code,
        }
    }

    pub fn error(message: impl Into<String>, span: Span, code: DiagnosticCode) -> Self {
        Self::new(Level::Error, message, span, code)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{}: {} [{}] {}",
            self.span.line(),
            self.span.column(),
            self.level,
            self.code,
            self.message
        )
    }
}

/// The single owner of every diagnostic produced while compiling one
/// source file. Non-owning references are handed to the scanner, parser,
/// and semantic analyzer for the duration of compilation (spec §5).
#[derive(Default)]
pub struct Handler {
    diagnostics: RefCell<Vec<Diagnostic>>,
}

impl Handler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.diagnostics.borrow_mut().push(diagnostic);
    }

    pub fn report(&self, line: u32, column: u32, code: DiagnosticCode, message: impl Into<String>) {
        self.emit(Diagnostic::error(message, Span::new(line, column), code));
    }

    pub fn build_error(&self, span: Span, message: impl Into<String>) -> DiagnosticBuilder<'_> {
        DiagnosticBuilder::error(self, message, span)
    }

    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics
            .borrow()
            .iter()
            .filter(|d| d.level == Level::Error)
            .count()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.diagnostics.borrow().clone()
    }

    pub fn clear(&self) {
        self.diagnostics.borrow_mut().clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_handler_has_no_errors() {
        let handler = Handler::new();
        assert!(!handler.has_errors());
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn reporting_increments_error_count() {
        let handler = Handler::new();
        handler.report(1, 0, E_SEM_NOT_DECLARED, "`X` is not declared");
        assert_eq!(handler.error_count(), 1);
        assert!(handler.has_errors());
    }

    #[test]
    fn diagnostics_preserve_reporting_order() {
        let handler = Handler::new();
        handler.report(1, 0, E_SEM_NOT_DECLARED, "first");
        handler.report(2, 0, E_SEM_TYPE_MISMATCH, "second");
        let diags = handler.diagnostics();
        assert_eq!(diags[0].message, "first");
        assert_eq!(diags[1].message, "second");
    }

    #[test]
    fn clear_resets_error_count() {
        let handler = Handler::new();
        handler.report(1, 0, E_SEM_NOT_DECLARED, "oops");
        handler.clear();
        assert_eq!(handler.error_count(), 0);
    }
}
