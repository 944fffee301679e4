//! Integer and real literals (spec §4.1): a digit run, an optional
//! `.` + digit run that is *not* the start of `..`, and an optional
//! exponent marker.

use plc_util::diagnostic::E_LEX_MALFORMED_NUMERIC;

use super::core::Lexer;
use crate::token::{Literal, Token, TokenKind};

impl<'a, 'h> Lexer<'a, 'h> {
    pub(super) fn lex_number(&mut self) -> Token {
        let start = self.cursor.position();
        let mut is_real = false;

        self.consume_digits();

        // `.` followed by a digit extends to a real; `..` is the range
        // operator and must be left alone for the operator sub-scanner.
        if self.cursor.current_char() == '.' && self.cursor.peek_char().is_ascii_digit() {
            is_real = true;
            self.cursor.advance();
            self.consume_digits();
        }

        if matches!(self.cursor.current_char(), 'e' | 'E') {
            let has_sign = matches!(self.cursor.char_at(1), '+' | '-');
            let digit_offset = if has_sign { 2 } else { 1 };
            if self.cursor.char_at(digit_offset).is_ascii_digit() {
                is_real = true;
                self.cursor.advance(); // e/E
                if has_sign {
                    self.cursor.advance();
                }
                self.consume_digits();
            }
        }

        if self.cursor.current_char().is_ascii_alphabetic() {
            self.report(
                E_LEX_MALFORMED_NUMERIC,
                "letter immediately follows a numeric literal",
            );
        }

        let end = self.cursor.position();
        let text = self.cursor.slice(start, end);

        if is_real {
            match text.parse::<f64>() {
                Ok(value) => self.with_literal(TokenKind::RealLiteral, Literal::Real(value)),
                Err(_) => {
                    self.report(E_LEX_MALFORMED_NUMERIC, format!("malformed real literal `{text}`"));
                    self.with_literal(TokenKind::RealLiteral, Literal::Real(0.0))
                }
            }
        } else {
            match text.parse::<i64>() {
                Ok(value) => self.with_literal(TokenKind::IntLiteral, Literal::Int(value)),
                Err(_) => {
                    self.report(
                        E_LEX_MALFORMED_NUMERIC,
                        format!("integer literal `{text}` out of range"),
                    );
                    self.with_literal(TokenKind::IntLiteral, Literal::Int(0))
                }
            }
        }
    }

    fn consume_digits(&mut self) {
        while self.cursor.current_char().is_ascii_digit() {
            self.cursor.advance();
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use plc_util::Handler;

    fn lex_num(source: &str) -> (TokenKind, Option<i64>, Option<f64>, usize) {
        let handler = Handler::new();
        let mut lexer = Lexer::new(source, &handler);
        let tok = lexer.next_token();
        (tok.kind, tok.int_value(), tok.real_value(), handler.error_count())
    }

    #[test]
    fn decimal_integer() {
        let (kind, int, _, errs) = lex_num("42");
        assert_eq!(kind, TokenKind::IntLiteral);
        assert_eq!(int, Some(42));
        assert_eq!(errs, 0);
    }

    #[test]
    fn real_with_fraction() {
        let (kind, _, real, errs) = lex_num("3.14");
        assert_eq!(kind, TokenKind::RealLiteral);
        assert_eq!(real, Some(3.14));
        assert_eq!(errs, 0);
    }

    #[test]
    fn real_with_positive_exponent() {
        let (kind, _, real, errs) = lex_num("1.5E+2");
        assert_eq!(kind, TokenKind::RealLiteral);
        assert_eq!(real, Some(150.0));
        assert_eq!(errs, 0);
    }

    #[test]
    fn real_with_negative_exponent() {
        let (_, _, real, _) = lex_num("2E-1");
        assert_eq!(real, Some(0.2));
    }

    #[test]
    fn range_after_integer_is_not_consumed_as_a_dot() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("1..10", &handler);
        let first = lexer.next_token();
        assert_eq!(first.kind, TokenKind::IntLiteral);
        assert_eq!(first.int_value(), Some(1));
        let second = lexer.next_token();
        assert_eq!(second.kind, TokenKind::Range);
        let third = lexer.next_token();
        assert_eq!(third.int_value(), Some(10));
    }

    #[test]
    fn letter_adjacent_to_digit_is_malformed() {
        let (_, _, _, errs) = lex_num("123abc");
        assert_eq!(errs, 1);
    }
}
