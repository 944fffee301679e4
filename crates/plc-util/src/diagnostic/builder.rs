//! Fluent construction of a [`Diagnostic`] before it is committed to a
//! [`Handler`]. Mirrors the call-then-emit shape used throughout the
//! scanner, parser, and analyzer: build up context, then `.emit()`.

use super::{Diagnostic, DiagnosticCode, Handler, Level};
use crate::span::Span;

pub struct DiagnosticBuilder<'h> {
    handler: &'h Handler,
    level: Level,
    message: String,
    span: Span,
    code: DiagnosticCode,
}

impl<'h> DiagnosticBuilder<'h> {
    pub fn error(handler: &'h Handler, message: impl Into<String>, span: Span) -> Self {
        Self {
            handler,
            level: Level::Error,
            message: message.into(),
            span,
            code: DiagnosticCode::new("E", 0),
        }
    }

    pub fn code(mut self, code: DiagnosticCode) -> Self {
        self.code = code;
        self
    }

    pub fn build(self) -> Diagnostic {
        Diagnostic::new(self.level, self.message, self.span, self.code)
    }

    pub fn emit(self) {
        let handler = self.handler;
        handler.emit(self.build());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::E_SEM_TYPE_MISMATCH;

    #[test]
    fn builder_emits_with_the_given_code() {
        let handler = Handler::new();
        DiagnosticBuilder::error(&handler, "bad types", Span::new(4, 2))
            .code(E_SEM_TYPE_MISMATCH)
            .emit();
        let diags = handler.diagnostics();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, E_SEM_TYPE_MISMATCH);
        assert_eq!(diags[0].span.line(), 4);
    }
}
