//! Statement rules and their control-flow emission patterns (spec §4.5,
//! §4.6).

use plc_gen::opr;
use plc_lex::TokenKind;
use plc_sem::Type;
use plc_util::diagnostic::{E_SYN_EXPECTED_SEMICOLON, E_SYN_UNEXPECTED_TOKEN};

use super::core::{Parser, STMT_FOLLOW};

impl<'a, 'h> Parser<'a, 'h> {
    pub(super) fn parse_stmts(&mut self) {
        loop {
            match self.current.kind {
                TokenKind::End | TokenKind::Else | TokenKind::Elsif | TokenKind::Eof => break,
                _ => self.parse_stmt(),
            }
        }
    }

    fn parse_stmt(&mut self) {
        match self.current.kind {
            TokenKind::Null => self.parse_null_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::Loop => self.parse_loop_stmt(),
            TokenKind::Exit => self.parse_exit_stmt(),
            TokenKind::Read => self.parse_read_stmt(),
            TokenKind::Write => self.parse_write_stmt(false),
            TokenKind::Writeln => self.parse_write_stmt(true),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Ident => self.parse_assign_or_call(),
            _ => {
                self.report_syntax(
                    E_SYN_UNEXPECTED_TOKEN,
                    "expected a statement".to_string(),
                    self.current.line,
                    self.current.column,
                );
                self.synchronize(STMT_FOLLOW);
            }
        }
    }

    fn parse_null_stmt(&mut self) {
        self.advance(); // NULL
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `IF expr THEN stmts {ELSIF expr THEN stmts} [ELSE stmts] END [IF] ;`
    /// (spec §4.5, §4.6). Every branch jumps to one shared `end_label`.
    fn parse_if_stmt(&mut self) {
        self.advance(); // IF
        let end_label = self.emitter.new_label();
        self.parse_if_branch(&end_label);
        self.expect(TokenKind::End, E_SYN_UNEXPECTED_TOKEN);
        if self.check(TokenKind::If) {
            self.advance();
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
        self.emitter.place_label(&end_label);
    }

    fn parse_if_branch(&mut self, end_label: &str) {
        let pos = self.pos();
        let (cond_ty, _) = self.parse_expr();
        self.analyzer.require_boolean(cond_ty, pos.0, pos.1);
        let else_label = self.emitter.new_label();
        self.emitter.emit_jif(&else_label);
        self.expect(TokenKind::Then, E_SYN_UNEXPECTED_TOKEN);
        self.parse_stmts();
        self.emitter.emit_jmp(end_label);
        self.emitter.place_label(&else_label);
        if self.check(TokenKind::Elsif) {
            self.advance();
            self.parse_if_branch(end_label);
        } else if self.check(TokenKind::Else) {
            self.advance();
            self.parse_stmts();
        }
    }

    /// `WHILE expr LOOP stmts END [LOOP] ;` (spec §4.5, §4.6).
    fn parse_while_stmt(&mut self) {
        self.advance(); // WHILE
        let start_label = self.emitter.new_label();
        let end_label = self.emitter.new_label();
        self.emitter.place_label(&start_label);
        let pos = self.pos();
        let (cond_ty, _) = self.parse_expr();
        self.analyzer.require_boolean(cond_ty, pos.0, pos.1);
        self.emitter.emit_jif(&end_label);
        self.expect(TokenKind::Loop, E_SYN_UNEXPECTED_TOKEN);
        self.emitter.push_loop_exit(end_label.clone());
        self.parse_stmts();
        self.emitter.pop_loop_exit();
        self.emitter.emit_jmp(&start_label);
        self.emitter.place_label(&end_label);
        self.expect(TokenKind::End, E_SYN_UNEXPECTED_TOKEN);
        if self.check(TokenKind::Loop) {
            self.advance();
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// Bare `LOOP stmts END [LOOP] ;`: infinite, exits only via `EXIT`
    /// (spec §4.5, §4.6).
    fn parse_loop_stmt(&mut self) {
        self.advance(); // LOOP
        let start_label = self.emitter.new_label();
        let end_label = self.emitter.new_label();
        self.emitter.place_label(&start_label);
        self.emitter.push_loop_exit(end_label.clone());
        self.parse_stmts();
        self.emitter.pop_loop_exit();
        self.emitter.emit_jmp(&start_label);
        self.emitter.place_label(&end_label);
        self.expect(TokenKind::End, E_SYN_UNEXPECTED_TOKEN);
        if self.check(TokenKind::Loop) {
            self.advance();
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `FOR id IN [REVERSE] expr .. expr LOOP stmts END [LOOP] ;` (spec
    /// §4.5, §4.6). Opens a scope holding the loop index and a hidden
    /// slot for the (otherwise unrepresentable) upper/lower bound, so the
    /// bound is evaluated once and reused by every iteration's test.
    fn parse_for_stmt(&mut self) {
        self.advance(); // FOR
        let (name, line, column) = self.expect_ident();
        self.expect(TokenKind::In, E_SYN_UNEXPECTED_TOKEN);
        let reverse = if self.check(TokenKind::Reverse) {
            self.advance();
            true
        } else {
            false
        };
        let start_pos = self.pos();
        let (start_ty, _) = self.parse_simple_expr_pos();
        self.require_arithmetic(start_ty, start_pos.0, start_pos.1);
        self.expect(TokenKind::Range, E_SYN_UNEXPECTED_TOKEN);
        let end_pos = self.pos();
        let (end_ty, _) = self.parse_simple_expr_pos();
        self.require_arithmetic(end_ty, end_pos.0, end_pos.1);

        self.analyzer.table.open_scope();
        let bound_record = self.analyzer.table.enter("$FOR_BOUND", line, column);
        bound_record.ty = Type::Integer;
        bound_record.kind = plc_sem::Kind::Variable;
        let bound_offset = bound_record.offset as i64;

        self.analyzer.declare_loop_index(&name, Type::Integer, line, column);
        let index_offset = self.analyzer.table.lookup_local(&name).map(|r| r.offset).unwrap_or(0) as i64;

        // Reserve both slots in this scope's own activation record before
        // storing into them, exactly as `parse_block` reserves a block's
        // locals with a single `INC` sized to the frame (spec §9).
        let local_count = self.analyzer.table.current_frame().locals_count();
        self.emitter.emit_inc(local_count as i64);
        self.emitter.emit_sto(0, bound_offset);
        self.emitter.emit_sto(0, index_offset);

        let start_label = self.emitter.new_label();
        let end_label = self.emitter.new_label();
        self.emitter.place_label(&start_label);
        self.emitter.emit_ldv(0, index_offset);
        self.emitter.emit_ldv(0, bound_offset);
        self.emitter.emit_opr(if reverse { opr::GE } else { opr::LE }, "loop bound test");
        self.emitter.emit_jif(&end_label);

        self.expect(TokenKind::Loop, E_SYN_UNEXPECTED_TOKEN);
        self.emitter.push_loop_exit(end_label.clone());
        self.parse_stmts();
        self.emitter.pop_loop_exit();

        self.emitter.emit_ldv(0, index_offset);
        self.emitter.emit_lci(1);
        self.emitter.emit_opr(if reverse { opr::SUB } else { opr::ADD }, "step");
        self.emitter.emit_sto(0, index_offset);
        self.emitter.emit_jmp(&start_label);
        self.emitter.place_label(&end_label);

        self.expect(TokenKind::End, E_SYN_UNEXPECTED_TOKEN);
        if self.check(TokenKind::Loop) {
            self.advance();
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);

        let mut buf = String::new();
        let _ = self.analyzer.table.close_scope_and_dump(&mut buf);
        self.dumps.push(buf);
    }

    fn require_arithmetic(&mut self, ty: Type, line: u32, column: u32) {
        if ty != Type::Integer && ty != Type::Unknown {
            self.handler.report(
                line,
                column,
                plc_util::diagnostic::E_SEM_ARITHMETIC_REQUIRED,
                "a `for` range bound must be an integer",
            );
        }
    }

    /// `EXIT [WHEN expr] ;` (spec §4.5). `exit when c` is compiled as
    /// `not c; jif loop_end` — jump out exactly when `c` holds — since the
    /// instruction set has no dedicated "jump if true".
    fn parse_exit_stmt(&mut self) {
        let pos = self.pos();
        self.advance(); // EXIT
        let in_loop = self.emitter.in_loop();
        self.analyzer.require_loop_context(in_loop, pos.0, pos.1);
        let exit_label = self.emitter.current_loop_exit().map(str::to_string);
        if self.check(TokenKind::When) {
            self.advance();
            let cond_pos = self.pos();
            let (cond_ty, _) = self.parse_expr();
            self.analyzer.require_boolean(cond_ty, cond_pos.0, cond_pos.1);
            self.emitter.emit_opr(opr::NOT, "invert exit condition");
            if let Some(label) = &exit_label {
                self.emitter.emit_jif(label);
            }
        } else if let Some(label) = &exit_label {
            self.emitter.emit_jmp(label);
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `READ [(] id {, id} [)] ;` (spec §4.5). Dispatches on the
    /// variable's declared type: integers use `RDI`, reals use `RDR`.
    fn parse_read_stmt(&mut self) {
        self.advance(); // READ
        let paren = self.check(TokenKind::LParen);
        if paren {
            self.advance();
        }
        loop {
            let (name, line, column) = self.expect_ident();
            let ty = self.analyzer.lookup_type(&name, line, column);
            if let Some(record) = self.analyzer.table.lookup(&name) {
                let diff = (self.analyzer.table.level() - record.level) as i64;
                let offset = record.offset as i64;
                match ty {
                    Type::Real => self.emitter.emit_rdr(diff, offset),
                    Type::Integer => self.emitter.emit_rdi(diff, offset),
                    Type::Unknown => {}
                    _ => self.handler.report(
                        line,
                        column,
                        plc_util::diagnostic::E_SEM_ARITHMETIC_REQUIRED,
                        format!("`read` does not support values of type {ty}"),
                    ),
                }
            }
            if self.check(TokenKind::Comma) {
                self.advance();
            } else {
                break;
            }
        }
        if paren {
            self.expect(TokenKind::RParen, E_SYN_UNEXPECTED_TOKEN);
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `WRITE|WRITELN [(] expr {, expr} [)] ;` (spec §4.5). Each argument
    /// picks its `OPR` code by its own type; `WRITELN` appends a final
    /// newline `OPR` after all arguments, even when there are none.
    fn parse_write_stmt(&mut self, newline: bool) {
        self.advance(); // WRITE or WRITELN
        let paren = self.check(TokenKind::LParen);
        if paren {
            self.advance();
        }
        let has_args = !self.check(TokenKind::RParen) && !self.check(TokenKind::Semicolon);
        if paren || has_args {
            loop {
                let (ty, _) = self.parse_expr();
                let code = match ty {
                    Type::Integer => opr::WRITE_INT,
                    Type::Real => opr::WRITE_REAL,
                    Type::String => opr::WRITE_STRING,
                    Type::Boolean => opr::WRITE_BOOL,
                    _ => opr::WRITE_INT,
                };
                self.emitter.emit_opr(code, "write value");
                if self.check(TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        if paren {
            self.expect(TokenKind::RParen, E_SYN_UNEXPECTED_TOKEN);
        }
        if newline {
            self.emitter.emit_opr(opr::WRITELN, "newline");
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `RETURN [expr] ;` (spec §4.5). Checked against the enclosing
    /// function's declared return type, when there is one.
    fn parse_return_stmt(&mut self) {
        let pos = self.pos();
        self.advance(); // RETURN
        if !self.check(TokenKind::Semicolon) {
            let (expr_ty, _) = self.parse_expr();
            if let Some(expected) = self.current_return_ty() {
                let ok = expected == expr_ty
                    || (expected == Type::Real && expr_ty == Type::Integer)
                    || expected == Type::Unknown
                    || expr_ty == Type::Unknown;
                if !ok {
                    self.handler.report(
                        pos.0,
                        pos.1,
                        plc_util::diagnostic::E_SEM_TYPE_MISMATCH,
                        format!("cannot return {expr_ty} from a function returning {expected}"),
                    );
                }
            }
        }
        self.emitter.emit_opr(opr::RETURN, "explicit return");
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }

    /// `id := expr ;` or `id [(args)] ;` (spec §4.5).
    fn parse_assign_or_call(&mut self) {
        let (name, line, column) = self.expect_ident();
        if self.check(TokenKind::Assign) {
            self.advance();
            let (rhs_ty, _) = self.parse_expr();
            self.analyzer.check_assignment(&name, rhs_ty, line, column);
            if let Some(record) = self.analyzer.table.lookup(&name) {
                let diff = (self.analyzer.table.level() - record.level) as i64;
                self.emitter.emit_sto(diff, record.offset as i64);
            }
        } else {
            let _ = self.emit_call(&name, line, column);
        }
        self.expect(TokenKind::Semicolon, E_SYN_EXPECTED_SEMICOLON);
    }
}
