//! The token stream, panic-mode recovery, and the top-level program rule
//! (spec §4.5).

use std::collections::HashMap;

use plc_lex::{Lexer, Token, TokenKind};
use plc_sem::{Analyzer, Type};
use plc_util::diagnostic::{DiagnosticCode, E_SYN_END_IDENTIFIER_MISMATCH, E_SYN_EXPECTED_SEMICOLON, E_SYN_UNEXPECTED_TOKEN};
use plc_util::Handler;

use plc_gen::{BuiltinAddresses, Emitter};

/// Follow set used to resynchronize after a malformed statement.
pub(super) const STMT_FOLLOW: &[TokenKind] = &[
    TokenKind::Semicolon,
    TokenKind::End,
    TokenKind::Else,
    TokenKind::Elsif,
];

/// What [`Parser::parse`] hands back to the driver: the (unfinalized)
/// emitter and the symbol-table dumps collected at each scope close, in
/// the order they occurred (spec §6).
pub struct ParseOutput {
    pub emitter: Emitter,
    pub dumps: Vec<String>,
}

pub struct Parser<'a, 'h> {
    pub(super) lexer: Lexer<'a, 'h>,
    pub(super) current: Token,
    pub(super) handler: &'h Handler,
    pub(super) analyzer: Analyzer<'h>,
    pub(super) emitter: Emitter,
    pub(super) recovering: bool,
    /// Maps a declared procedure/function name to the label marking its
    /// entry point (the jump that skips over its own nested declarations).
    pub(super) labels: HashMap<String, String>,
    pub(super) dumps: Vec<String>,
    /// The enclosing function's return type, for checking `return expr`.
    /// `None` at program level and inside a procedure.
    pub(super) return_ty_stack: Vec<Option<Type>>,
    pub(super) builtins: Option<BuiltinAddresses>,
}

impl<'a, 'h> Parser<'a, 'h> {
    pub fn new(source: &'a str, handler: &'h Handler) -> Self {
        let mut lexer = Lexer::new(source, handler);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            handler,
            analyzer: Analyzer::new(handler),
            emitter: Emitter::new(),
            recovering: false,
            labels: HashMap::new(),
            dumps: Vec::new(),
            return_ty_stack: Vec::new(),
            builtins: None,
        }
    }

    /// Compiles the whole program, consuming the parser. The driver is
    /// responsible for checking the handler's error count and deciding
    /// whether to call `finalize()` on the returned emitter (spec §7).
    pub fn parse(mut self) -> ParseOutput {
        let user_code_label = self.emitter.new_label();
        let builtins = plc_gen::emit_builtin_prologue(&mut self.emitter, &user_code_label);
        self.builtins = Some(builtins);
        self.parse_program(&user_code_label);
        ParseOutput {
            emitter: self.emitter,
            dumps: self.dumps,
        }
    }

    fn parse_program(&mut self, entry_label: &str) {
        self.expect(TokenKind::Program, E_SYN_UNEXPECTED_TOKEN);
        let (name, _, _) = self.expect_ident();
        self.expect(TokenKind::Is, E_SYN_UNEXPECTED_TOKEN);
        self.parse_block(entry_label, None, &name);
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// Compiles one block body shared by the program and every procedure
    /// or function: a leading jump over the block's own nested
    /// declarations, the declarations themselves, the reserved-locals
    /// `INC`, the statement part, and a trailing `END [name]` (spec §4.5,
    /// §4.6).
    pub(super) fn parse_block(&mut self, entry_label: &str, return_ty: Option<Type>, name: &str) {
        self.emitter.place_label(entry_label);
        let body_label = self.emitter.new_label();
        self.emitter.emit_jmp(&body_label);

        self.return_ty_stack.push(return_ty);
        self.parse_decls();

        self.emitter.place_label(&body_label);
        let local_count = self.analyzer.table.current_frame().locals_count();
        self.emitter.emit_inc(local_count as i64);

        self.expect(TokenKind::Begin, E_SYN_UNEXPECTED_TOKEN);
        self.parse_stmts();
        self.expect(TokenKind::End, E_SYN_UNEXPECTED_TOKEN);

        if self.check(TokenKind::Ident) {
            let (end_name, line, col) = self.expect_ident();
            if end_name != name {
                self.handler.report(
                    line,
                    col,
                    E_SYN_END_IDENTIFIER_MISMATCH,
                    format!("`end {end_name}` does not match `{name}`"),
                );
            }
        }
        self.emitter.emit_opr(plc_gen::opr::RETURN, "return");
        self.return_ty_stack.pop();

        let mut buf = String::new();
        let _ = self.analyzer.table.close_scope_and_dump(&mut buf);
        self.dumps.push(buf);
    }

    pub(super) fn current_return_ty(&self) -> Option<Type> {
        self.return_ty_stack.last().copied().flatten()
    }

    pub(super) fn pos(&self) -> (u32, u32) {
        (self.current.line, self.current.column)
    }

    pub(super) fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    pub(super) fn advance(&mut self) -> Token {
        let next = self.lexer.next_token();
        std::mem::replace(&mut self.current, next)
    }

    /// Consumes an identifier token, returning its uppercased text and
    /// position, or reports and returns an empty placeholder.
    pub(super) fn expect_ident(&mut self) -> (String, u32, u32) {
        let tok = self.current;
        if tok.kind == TokenKind::Ident {
            self.advance();
            let text = tok.text().map(|s| s.as_str().to_string()).unwrap_or_default();
            (text, tok.line, tok.column)
        } else {
            self.report_syntax(E_SYN_UNEXPECTED_TOKEN, "expected an identifier".to_string(), tok.line, tok.column);
            (String::new(), tok.line, tok.column)
        }
    }

    /// Panic-mode `expect` (spec §4.5): while not recovering, a match
    /// consumes and succeeds, a mismatch reports and enters recovery
    /// without consuming. While recovering, tokens are skipped until
    /// `kind` is found (consumed, clearing recovery) or EOF is reached.
    pub(super) fn expect(&mut self, kind: TokenKind, code: DiagnosticCode) -> bool {
        if !self.recovering {
            if self.check(kind) {
                self.advance();
                return true;
            }
            self.report_syntax(code, format!("expected {:?}", kind), self.current.line, self.current.column);
        }
        while !self.check(kind) && !self.check(TokenKind::Eof) {
            self.advance();
        }
        if self.check(kind) {
            self.advance();
            self.recovering = false;
            true
        } else {
            false
        }
    }

    /// Skips tokens until one is in `follow` or EOF is reached (spec
    /// §4.5). Does not consume the token it stops on.
    pub(super) fn synchronize(&mut self, follow: &[TokenKind]) {
        while !follow.contains(&self.current.kind) && !self.check(TokenKind::Eof) {
            self.advance();
        }
        if follow.contains(&self.current.kind) {
            self.recovering = false;
        }
    }

    /// Reports a syntax-level diagnostic only when not already recovering,
    /// then enters recovery (spec §4.5).
    pub(super) fn report_syntax(&mut self, code: DiagnosticCode, message: String, line: u32, column: u32) {
        if !self.recovering {
            self.handler.report(line, column, code, message);
            self.recovering = true;
        }
    }

    pub(super) fn builtin_addr(&self, name: &str) -> Option<i64> {
        let b = self.builtins?;
        match name {
            "INT2REAL" => Some(b.int2real),
            "REAL2INT" => Some(b.real2int),
            "INT2STRING" => Some(b.int2string),
            "REAL2STRING" => Some(b.real2string),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_program_compiles_with_no_diagnostics() {
        let handler = Handler::new();
        let parser = Parser::new("program P is begin end P;", &handler);
        let output = parser.parse();
        assert_eq!(handler.error_count(), 0);
        assert!(output.emitter.finalize().is_ok());
    }

    #[test]
    fn mismatched_end_identifier_is_reported() {
        let handler = Handler::new();
        let parser = Parser::new("program P is begin end Q;", &handler);
        let _ = parser.parse();
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn missing_semicolon_after_statement_recovers_to_next_statement() {
        let handler = Handler::new();
        let src = "program P is X : integer; begin X := 1 X := 2; end P;";
        let parser = Parser::new(src, &handler);
        let output = parser.parse();
        assert!(handler.error_count() >= 1);
        assert!(output.emitter.finalize().is_ok());
    }
}
