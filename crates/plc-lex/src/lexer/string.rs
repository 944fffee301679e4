//! String literals (spec §4.1): delimited by `"`, with `""` denoting an
//! embedded quote; they may not span lines.

use plc_util::diagnostic::E_LEX_UNTERMINATED_STRING;
use plc_util::Symbol;

use super::core::Lexer;
use crate::token::{Literal, Token, TokenKind};

impl<'a, 'h> Lexer<'a, 'h> {
    pub(super) fn lex_string(&mut self) -> Token {
        self.cursor.advance(); // opening quote
        let mut content = String::new();

        loop {
            let c = self.cursor.current_char();
            if c == '\0' || c == '\n' {
                self.report(E_LEX_UNTERMINATED_STRING, "unterminated string literal");
                break;
            }
            if c == '"' {
                if self.cursor.peek_char() == '"' {
                    content.push('"');
                    self.cursor.advance();
                    self.cursor.advance();
                    continue;
                }
                self.cursor.advance();
                break;
            }
            content.push(c);
            self.cursor.advance();
        }

        self.with_literal(TokenKind::StringLiteral, Literal::Text(Symbol::intern(&content)))
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use plc_util::Handler;

    fn lex_str(source: &str) -> (TokenKind, Option<&'static str>, usize) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let tok = lexer.next_token();
        (tok.kind, tok.text().map(|s| s.as_str()), handler.error_count())
    }

    #[test]
    fn plain_string_literal() {
        let (kind, text, errs) = lex_str("\"hello\"");
        assert_eq!(kind, TokenKind::StringLiteral);
        assert_eq!(text, Some("hello"));
        assert_eq!(errs, 0);
    }

    #[test]
    fn doubled_quote_yields_embedded_quote() {
        let (_, text, errs) = lex_str("\"a\"\"b\"");
        assert_eq!(text, Some("a\"b"));
        assert_eq!(errs, 0);
    }

    #[test]
    fn unterminated_string_is_reported_but_still_produced() {
        let (kind, _, errs) = lex_str("\"oops");
        assert_eq!(kind, TokenKind::StringLiteral);
        assert_eq!(errs, 1);
    }

    #[test]
    fn newline_before_closing_quote_is_reported() {
        let (_, _, errs) = lex_str("\"line1\nline2\"");
        assert_eq!(errs, 1);
    }
}
