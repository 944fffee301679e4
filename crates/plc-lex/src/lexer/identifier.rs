//! Identifiers and keywords (spec §4.1): `[A-Za-z][A-Za-z0-9_]*`,
//! uppercased for comparison and storage, with a double-underscore or
//! trailing underscore rejected as illegal.

use plc_util::diagnostic::E_LEX_ILLEGAL_UNDERSCORE;
use plc_util::Symbol;

use super::core::{is_ident_continue, Lexer};
use crate::token::{keyword_kind, Literal, Token, TokenKind};

impl<'a, 'h> Lexer<'a, 'h> {
    pub(super) fn lex_identifier(&mut self) -> Token {
        let start = self.cursor.position();
        while is_ident_continue(self.cursor.current_char()) {
            self.cursor.advance();
        }
        let end = self.cursor.position();
        let text = self.cursor.slice(start, end);
        let upper = text.to_ascii_uppercase();

        if upper.contains("__") || upper.ends_with('_') {
            self.report(
                E_LEX_ILLEGAL_UNDERSCORE,
                format!("illegal underscore in identifier `{upper}`"),
            );
        }

        if let Some(kind) = keyword_kind(&upper) {
            return self.simple(kind);
        }

        self.with_literal(TokenKind::Ident, Literal::Text(Symbol::intern(&upper)))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use plc_util::Handler;

    fn lex_ident(source: &str) -> (TokenKind, Option<&'static str>, usize) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let tok = lexer.next_token();
        (tok.kind, tok.text().map(|s| s.as_str()), handler.error_count())
    }

    #[test]
    fn simple_identifier_is_uppercased() {
        let (kind, text, errs) = lex_ident("counter");
        assert_eq!(kind, TokenKind::Ident);
        assert_eq!(text, Some("COUNTER"));
        assert_eq!(errs, 0);
    }

    #[test]
    fn mixed_case_keyword_is_recognized() {
        let (kind, _, errs) = lex_ident("WhIlE");
        assert_eq!(kind, TokenKind::While);
        assert_eq!(errs, 0);
    }

    #[test]
    fn identifier_with_single_underscore_is_fine() {
        let (kind, text, errs) = lex_ident("my_var");
        assert_eq!(kind, TokenKind::Ident);
        assert_eq!(text, Some("MY_VAR"));
        assert_eq!(errs, 0);
    }

    #[test]
    fn double_underscore_is_reported() {
        let (_, _, errs) = lex_ident("my__var");
        assert_eq!(errs, 1);
    }

    #[test]
    fn trailing_underscore_is_reported() {
        let (_, _, errs) = lex_ident("trailing_");
        assert_eq!(errs, 1);
    }
}
