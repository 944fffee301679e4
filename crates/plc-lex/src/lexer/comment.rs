//! Whitespace and `--` line comments (spec §4.1).

use super::core::Lexer;

impl<'a, 'h> Lexer<'a, 'h> {
    /// Skips whitespace and comments repeatedly until a character that
    /// starts a real token is reached, or EOF.
    pub(super) fn skip_whitespace_and_comments(&mut self) {
        loop {
            let c = self.cursor.current_char();
            if c != '\0' && (c as u32) <= (' ' as u32) {
                self.cursor.advance();
                continue;
            }
            if c == '-' && self.cursor.peek_char() == '-' {
                while !self.cursor.is_at_end() && self.cursor.current_char() != '\n' {
                    self.cursor.advance();
                }
                continue;
            }
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::Lexer;
    use crate::token::TokenKind;
    use plc_util::Handler;

    #[test]
    fn comment_is_skipped_to_end_of_line() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("-- a comment\nBEGIN", &handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::Begin);
        assert_eq!(tok.line, 2);
    }

    #[test]
    fn blank_lines_and_spaces_are_skipped() {
        let handler = Handler::new();
        let mut lexer = Lexer::new("   \n\n  END", &handler);
        let tok = lexer.next_token();
        assert_eq!(tok.kind, TokenKind::End);
        assert_eq!(tok.line, 3);
    }
}
