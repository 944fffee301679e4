//! Declaration rules: variables, constants, procedures, and functions
//! (spec §4.5).

use plc_lex::TokenKind;
use plc_sem::Type;
use plc_util::diagnostic::{
    E_SEM_TYPE_MISMATCH, E_SYN_EXPECTED_SEMICOLON, E_SYN_PARAMETER_MODE_EXPECTED, E_SYN_TYPE_NAME_EXPECTED,
    E_SYN_UNEXPECTED_TOKEN,
};

use super::core::Parser;

impl<'a, 'h> Parser<'a, 'h> {
    /// Declarations may appear in any order and any number of times
    /// before the statement part begins (spec §4.5).
    pub(super) fn parse_decls(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::Constant => self.parse_const_decl(),
                TokenKind::Procedure => self.parse_proc_or_func(false),
                TokenKind::Function => self.parse_proc_or_func(true),
                TokenKind::Ident => self.parse_var_decl(),
                _ => break,
            }
        }
    }

    fn parse_ident_list(&mut self) -> Vec<(String, u32, u32)> {
        let mut out = Vec::new();
        loop {
            out.push(self.expect_ident());
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        out
    }

    fn parse_type_name(&mut self) -> Type {
        let tok = self.current;
        let ty = match tok.kind {
            TokenKind::IntegerTy => Type::Integer,
            TokenKind::RealTy => Type::Real,
            TokenKind::StringTy => Type::String,
            TokenKind::BooleanTy => Type::Boolean,
            _ => {
                self.report_syntax(E_SYN_TYPE_NAME_EXPECTED, "expected a type name".to_string(), tok.line, tok.column);
                return Type::Unknown;
            }
        };
        self.advance();
        ty
    }

    /// Stores the just-evaluated expression (left on the runtime stack) as
    /// `name`'s initial value. Not routed through `Analyzer::check_assignment`
    /// because that rejects constants and loop indices as un-assignable,
    /// which does not apply to a declaration's own initializer.
    fn initializer_store(&mut self, name: &str, decl_ty: Type, rhs_ty: Type, line: u32, column: u32) {
        let compatible = decl_ty == rhs_ty
            || (decl_ty == Type::Real && rhs_ty == Type::Integer)
            || decl_ty == Type::Unknown
            || rhs_ty == Type::Unknown;
        if !compatible {
            self.handler.report(
                line,
                column,
                E_SEM_TYPE_MISMATCH,
                format!("cannot initialize `{name}` of type {decl_ty} with {rhs_ty}"),
            );
        }
        if let Some(record) = self.analyzer.table.lookup_local(name) {
            let offset = record.offset as i64;
            self.emitter.emit_sto(0, offset);
        }
    }

    /// `id {, id} : type [ := expr {, expr} ] ;` (spec §4.5). Names are
    /// declared before any initializer is parsed, so each name's offset is
    /// known when its initializer's store is emitted.
    fn parse_var_decl(&mut self) {
        let names = self.parse_ident_list();
        self.expect(TokenKind::Colon, E_SYN_TYPE_NAME_EXPECTED);
        let ty = self.parse_type_name();
        for (name, line, column) in &names {
            self.analyzer.declare_var(name, ty, *line, *column);
        }
        if self.check(TokenKind::Assign) {
            self.advance();
            for (i, (name, line, column)) in names.iter().enumerate() {
                if i > 0 {
                    self.expect(TokenKind::Comma, E_SYN_UNEXPECTED_TOKEN);
                }
                let (expr_ty, _) = self.parse_expr();
                self.initializer_store(name, ty, expr_ty, *line, *column);
            }
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `CONSTANT id {, id} [ : type ] (:=|IS) expr {, expr} ;` (spec
    /// §4.5). When the type annotation is omitted, the first initializer's
    /// type is used for every name in the list.
    fn parse_const_decl(&mut self) {
        self.advance(); // CONSTANT
        let names = self.parse_ident_list();
        let annotated = if self.check(TokenKind::Colon) {
            self.advance();
            Some(self.parse_type_name())
        } else {
            None
        };
        if self.check(TokenKind::Assign) || self.check(TokenKind::Is) {
            self.advance();
        } else {
            self.report_syntax(
                E_SYN_UNEXPECTED_TOKEN,
                "expected `:=` or `is`".to_string(),
                self.current.line,
                self.current.column,
            );
        }
        let mut decl_ty = annotated;
        for (i, (name, line, column)) in names.iter().enumerate() {
            if i > 0 {
                self.expect(TokenKind::Comma, E_SYN_UNEXPECTED_TOKEN);
            }
            let (expr_ty, _) = self.parse_expr();
            let ty = *decl_ty.get_or_insert(expr_ty);
            self.analyzer.declare_const(name, ty, *line, *column);
            self.initializer_store(name, ty, expr_ty, *line, *column);
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `( id {, id} : (VALUE|REF) type ; ... )`, optional (spec §4.5).
    /// The VALUE/REF mode is parsed and discarded: every parameter is
    /// declared as an ordinary local variable.
    fn parse_param_list(&mut self) -> Vec<(String, Type, u32, u32)> {
        let mut params = Vec::new();
        if self.check(TokenKind::LParen) {
            self.advance();
            loop {
                let names = self.parse_ident_list();
                self.expect(TokenKind::Colon, E_SYN_PARAMETER_MODE_EXPECTED);
                if self.check(TokenKind::Value) || self.check(TokenKind::Ref) {
                    self.advance();
                } else {
                    self.report_syntax(
                        E_SYN_PARAMETER_MODE_EXPECTED,
                        "expected `value` or `ref`".to_string(),
                        self.current.line,
                        self.current.column,
                    );
                }
                let ty = self.parse_type_name();
                for (name, line, column) in names {
                    params.push((name, ty, line, column));
                }
                if self.check(TokenKind::Semicolon) {
                    self.advance();
                } else {
                    break;
                }
            }
            self.expect(TokenKind::RParen, E_SYN_UNEXPECTED_TOKEN);
        }
        params
    }

    /// `PROCEDURE id [params] IS ... END [id] ;` or `FUNCTION id [params]
    /// RETURN type IS ... END [id] ;` (spec §4.5). The name is declared in
    /// the enclosing scope before the body is parsed, so recursive calls
    /// resolve.
    fn parse_proc_or_func(&mut self, is_function: bool) {
        self.advance(); // PROCEDURE or FUNCTION
        let (name, line, column) = self.expect_ident();
        let params = self.parse_param_list();
        let return_ty = if is_function {
            self.expect(TokenKind::Return, E_SYN_TYPE_NAME_EXPECTED);
            Some(self.parse_type_name())
        } else {
            None
        };

        self.analyzer.declare_callable(&name, return_ty, line, column);
        if let Some(record) = self.analyzer.table.lookup_local_mut(&name) {
            record.param_count = params.len();
        }

        let entry_label = self.emitter.new_label();
        self.labels.insert(name.clone(), entry_label.clone());

        self.expect(TokenKind::Is, E_SYN_UNEXPECTED_TOKEN);
        self.analyzer.table.open_scope();
        for (pname, pty, pline, pcolumn) in &params {
            self.analyzer.declare_param(pname, *pty, *pline, *pcolumn);
        }

        self.parse_block(&entry_label, return_ty, &name);
    }
}
