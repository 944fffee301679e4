//! The scanner entry point (spec §4.1).

use plc_util::{Handler, Span};

use crate::cursor::Cursor;
use crate::token::{Literal, Token, TokenKind};

pub struct Lexer<'a, 'h> {
    pub(super) cursor: Cursor<'a>,
    pub(super) handler: &'h Handler,
    pub(super) token_start: usize,
    pub(super) token_start_line: u32,
    pub(super) token_start_column: u32,
}

impl<'a, 'h> Lexer<'a, 'h> {
    pub fn new(source: &'a str, handler: &'h Handler) -> Self {
        Self {
            cursor: Cursor::new(source),
            handler,
            token_start: 0,
            token_start_line: 1,
            token_start_column: 0,
        }
    }

    /// Returns the next token, or the end-of-program token at and after
    /// EOF (spec §4.1: "the scanner never blocks").
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace_and_comments();

        self.token_start = self.cursor.position();
        self.token_start_line = self.cursor.line();
        self.token_start_column = self.cursor.column();

        if self.cursor.is_at_end() {
            return self.simple(TokenKind::Eof);
        }

        let c = self.cursor.current_char();
        if is_ident_start(c) {
            return self.lex_identifier();
        }
        if c.is_ascii_digit() {
            return self.lex_number();
        }
        if c == '"' {
            return self.lex_string();
        }
        self.lex_operator()
    }

    pub(super) fn simple(&self, kind: TokenKind) -> Token {
        Token::simple(kind, self.token_start_line, self.token_start_column)
    }

    pub(super) fn with_literal(&self, kind: TokenKind, literal: Literal) -> Token {
        Token::new(kind, self.token_start_line, self.token_start_column, literal)
    }

    pub(super) fn token_span(&self) -> Span {
        Span::new(self.token_start_line, self.token_start_column)
    }

    pub(super) fn report(&self, code: plc_util::diagnostic::DiagnosticCode, message: impl Into<String>) {
        self.handler.build_error(self.token_span(), message).code(code).emit();
    }
}

pub(super) fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic()
}

pub(super) fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

impl<'a, 'h> Iterator for Lexer<'a, 'h> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        let tok = self.next_token();
        if tok.kind == TokenKind::Eof {
            None
        } else {
            Some(tok)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token();
            let eof = tok.kind == TokenKind::Eof;
            out.push(tok.kind);
            if eof {
                break;
            }
        }
        out
    }

    #[test]
    fn eof_is_returned_repeatedly_past_end() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("", &handler);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        assert_eq!(lexer.next_token().kind, TokenKind::Eof);
    }

    #[test]
    fn multi_char_operators_are_recognized_by_peeking() {
        let kinds = lex_all(":= <= <> >= **");
        assert_eq!(
            kinds,
            vec![
                TokenKind::Assign,
                TokenKind::Le,
                TokenKind::Ne,
                TokenKind::Ge,
                TokenKind::Pow,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn range_is_never_confused_with_two_dots() {
        let kinds = lex_all("1..10");
        assert_eq!(
            kinds,
            vec![
                TokenKind::IntLiteral,
                TokenKind::Range,
                TokenKind::IntLiteral,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn lone_dot_is_unexpected_character() {
        let handler = Handler::new();
        let mut lexer = Lexer::new(".", &handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Invalid);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn unknown_punctuation_is_reported_and_yields_invalid_token() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("@", &handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Invalid);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn tokens_are_monotonic_in_line_and_column() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("x := 1;\ny := 2;", &handler);
        let mut last = (0u32, 0u32);
        loop {
            let tok = lexer.next_token();
            if tok.kind == TokenKind::Eof {
                break;
            }
            assert!((tok.line, tok.column) >= last);
            last = (tok.line, tok.column);
        }
    }
}
