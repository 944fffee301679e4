//! Operators and punctuation (spec §4.1): multi-character operators are
//! recognized by peeking one character ahead; `.` is never a token on its
//! own — only `..` (range) is valid here, a lone `.` in a numeric context
//! is handled by [`super::number`].

use plc_util::diagnostic::E_LEX_UNEXPECTED_CHARACTER;

use super::core::Lexer;
use crate::token::{Token, TokenKind};

impl<'a, 'h> Lexer<'a, 'h> {
    pub(super) fn lex_operator(&mut self) -> Token {
        let c = self.cursor.current_char();
        self.cursor.advance();
        let kind = match c {
            ':' if self.cursor.current_char() == '=' => {
                self.cursor.advance();
                TokenKind::Assign
            }
            ':' => TokenKind::Colon,
            '<' if self.cursor.current_char() == '=' => {
                self.cursor.advance();
                TokenKind::Le
            }
            '<' if self.cursor.current_char() == '>' => {
                self.cursor.advance();
                TokenKind::Ne
            }
            '<' => TokenKind::Lt,
            '>' if self.cursor.current_char() == '=' => {
                self.cursor.advance();
                TokenKind::Ge
            }
            '>' => TokenKind::Gt,
            '*' if self.cursor.current_char() == '*' => {
                self.cursor.advance();
                TokenKind::Pow
            }
            '*' => TokenKind::Star,
            '.' if self.cursor.current_char() == '.' => {
                self.cursor.advance();
                TokenKind::Range
            }
            '.' => {
                self.report(
                    E_LEX_UNEXPECTED_CHARACTER,
                    "'.' is not a valid token outside a numeric literal or range",
                );
                TokenKind::Invalid
            }
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '/' => TokenKind::Slash,
            '&' => TokenKind::Amp,
            '=' => TokenKind::Eq,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            other => {
                self.report(E_LEX_UNEXPECTED_CHARACTER, format!("unexpected character '{other}'"));
                TokenKind::Invalid
            }
        };
        self.simple(kind)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use plc_util::Handler;

    #[test]
    fn single_char_operators_are_recognized() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("+ - / & = ( ) , ; :", &handler);
        let kinds: Vec<_> = std::iter::from_fn(|| {
            let tok = lexer.next_token();
            (tok.kind != TokenKind::Eof).then_some(tok.kind)
        })
        .collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Amp,
                TokenKind::Eq,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::Colon,
            ]
        );
    }
}
