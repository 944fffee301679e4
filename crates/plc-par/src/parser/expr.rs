//! Expression rules (spec §4.5). Each rule returns the
//! [`plc_sem::Type`] of the value it leaves on the runtime stack; there is
//! no AST node to return instead.

use plc_gen::opr;
use plc_lex::TokenKind;
use plc_sem::{BinOp, Type, UnaryOp};
use plc_util::diagnostic::E_SYN_UNEXPECTED_TOKEN;

use super::core::Parser;

impl<'a, 'h> Parser<'a, 'h> {
    /// `simple_expr [ relop simple_expr ]` (spec §4.5).
    pub(super) fn parse_expr(&mut self) -> (Type, (u32, u32)) {
        let pos = self.pos();
        let left = self.parse_simple_expr();
        let op = match self.current.kind {
            TokenKind::Eq => Some((BinOp::Eq, opr::EQ)),
            TokenKind::Ne => Some((BinOp::Ne, opr::NE)),
            TokenKind::Lt => Some((BinOp::Lt, opr::LT)),
            TokenKind::Le => Some((BinOp::Le, opr::LE)),
            TokenKind::Gt => Some((BinOp::Gt, opr::GT)),
            TokenKind::Ge => Some((BinOp::Ge, opr::GE)),
            _ => None,
        };
        let ty = if let Some((bin_op, code)) = op {
            self.advance();
            let right = self.parse_simple_expr();
            let result = self.analyzer.binary_op_type(left, bin_op, right, pos.0, pos.1);
            self.emitter.emit_opr(code, "relational");
            result
        } else {
            left
        };
        (ty, pos)
    }

    pub(super) fn parse_simple_expr_pos(&mut self) -> (Type, (u32, u32)) {
        let pos = self.pos();
        (self.parse_simple_expr(), pos)
    }

    /// `[+|-] term { (+|-|OR|&) term }` (spec §4.5).
    fn parse_simple_expr(&mut self) -> Type {
        let pos = self.pos();
        let leading_minus = if self.check(TokenKind::Plus) {
            self.advance();
            false
        } else if self.check(TokenKind::Minus) {
            self.advance();
            true
        } else {
            false
        };
        let mut ty = self.parse_term();
        if leading_minus {
            ty = self.analyzer.unary_op_type(UnaryOp::Neg, ty, pos.0, pos.1);
            self.emitter.emit_opr(opr::NEG, "unary minus");
        }
        loop {
            let op = match self.current.kind {
                TokenKind::Plus => Some((BinOp::Add, opr::ADD)),
                TokenKind::Minus => Some((BinOp::Sub, opr::SUB)),
                TokenKind::Or => Some((BinOp::Or, opr::OR)),
                TokenKind::Amp => Some((BinOp::Concat, opr::CONCAT)),
                _ => None,
            };
            let Some((bin_op, code)) = op else { break };
            let op_pos = self.pos();
            self.advance();
            let right = self.parse_term();
            ty = self.analyzer.binary_op_type(ty, bin_op, right, op_pos.0, op_pos.1);
            self.emitter.emit_opr(code, "simple_expr op");
        }
        ty
    }

    /// `factor { (*|/|AND) factor }` (spec §4.5).
    fn parse_term(&mut self) -> Type {
        let mut ty = self.parse_factor();
        loop {
            let op = match self.current.kind {
                TokenKind::Star => Some((BinOp::Mul, opr::MUL)),
                TokenKind::Slash => Some((BinOp::Div, opr::DIV)),
                TokenKind::And => Some((BinOp::And, opr::AND)),
                _ => None,
            };
            let Some((bin_op, code)) = op else { break };
            let op_pos = self.pos();
            self.advance();
            let right = self.parse_factor();
            ty = self.analyzer.binary_op_type(ty, bin_op, right, op_pos.0, op_pos.1);
            self.emitter.emit_opr(code, "term op");
        }
        ty
    }

    /// `[+|-|NOT|ODD] primary [ ** primary ]` (spec §4.5).
    fn parse_factor(&mut self) -> Type {
        let pos = self.pos();
        let prefix = match self.current.kind {
            TokenKind::Plus => {
                self.advance();
                Some(UnaryOp::Pos)
            }
            TokenKind::Minus => {
                self.advance();
                Some(UnaryOp::Neg)
            }
            TokenKind::Not => {
                self.advance();
                Some(UnaryOp::Not)
            }
            TokenKind::Odd => {
                self.advance();
                Some(UnaryOp::Odd)
            }
            _ => None,
        };
        let mut ty = self.parse_primary();
        if let Some(op) = prefix {
            ty = self.analyzer.unary_op_type(op, ty, pos.0, pos.1);
            match op {
                UnaryOp::Not => self.emitter.emit_opr(opr::NOT, "not"),
                UnaryOp::Neg => self.emitter.emit_opr(opr::NEG, "unary minus"),
                UnaryOp::Odd => self.emitter.emit_opr(opr::ODD, "odd"),
                UnaryOp::Pos => {}
            }
        }
        if self.check(TokenKind::Pow) {
            let pow_pos = self.pos();
            self.advance();
            let right = self.parse_primary();
            ty = self.analyzer.binary_op_type(ty, BinOp::Pow, right, pow_pos.0, pow_pos.1);
            self.emitter.emit_opr(opr::POW, "power");
        }
        ty
    }

    /// `id [(args)] | int | real | string | TRUE | FALSE | ( expr )`
    /// (spec §4.5).
    fn parse_primary(&mut self) -> Type {
        let tok = self.current;
        match tok.kind {
            TokenKind::IntLiteral => {
                self.advance();
                self.emitter.emit_lci(tok.int_value().unwrap_or(0));
                Type::Integer
            }
            TokenKind::RealLiteral => {
                self.advance();
                self.emitter.emit_lcr(tok.real_value().unwrap_or(0.0));
                Type::Real
            }
            TokenKind::StringLiteral => {
                self.advance();
                let text = tok.text().map(|s| s.as_str().to_string()).unwrap_or_default();
                self.emitter.emit_lcs(&text);
                Type::String
            }
            TokenKind::True => {
                self.advance();
                self.emitter.emit_lci(1);
                Type::Boolean
            }
            TokenKind::False => {
                self.advance();
                self.emitter.emit_lci(0);
                Type::Boolean
            }
            TokenKind::LParen => {
                self.advance();
                let (ty, _) = self.parse_expr();
                self.expect(TokenKind::RParen, E_SYN_UNEXPECTED_TOKEN);
                ty
            }
            TokenKind::Ident => {
                let (name, line, column) = self.expect_ident();
                if self.check(TokenKind::LParen) {
                    self.emit_call(&name, line, column)
                } else {
                    let ty = self.analyzer.lookup_type(&name, line, column);
                    if let Some(record) = self.analyzer.table.lookup(&name) {
                        let diff = (self.analyzer.table.level() - record.level) as i64;
                        self.emitter.emit_ldv(diff, record.offset as i64);
                    }
                    ty
                }
            }
            _ => {
                self.report_syntax(E_SYN_UNEXPECTED_TOKEN, "expected an expression".to_string(), tok.line, tok.column);
                if tok.kind != TokenKind::Eof {
                    self.advance();
                }
                Type::Unknown
            }
        }
    }

    /// Emits `MST`, the argument list, and a `CAL` to either a fixed
    /// builtin address or a user procedure/function's entry label (spec
    /// §4.5, §4.6). Used both for call-statements and call-expressions.
    pub(super) fn emit_call(&mut self, name: &str, line: u32, column: u32) -> Type {
        self.emitter.emit_mst();
        self.parse_call_args();
        let ty = self.analyzer.call_result_type(name, line, column);
        if let Some(addr) = self.builtin_addr(name) {
            self.emitter.emit_cal_addr(0, addr);
        } else if let Some(label) = self.labels.get(name).cloned() {
            let callee_level = self.analyzer.table.lookup(name).map(|r| r.level).unwrap_or(0);
            let diff = self.analyzer.table.level().saturating_sub(callee_level) as i64;
            self.emitter.emit_cal_label(diff, &label);
        }
        ty
    }

    fn parse_call_args(&mut self) -> usize {
        let mut count = 0;
        if self.check(TokenKind::LParen) {
            self.advance();
            if !self.check(TokenKind::RParen) {
                loop {
                    self.parse_expr();
                    count += 1;
                    if self.check(TokenKind::Comma) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            }
            self.expect(TokenKind::RParen, E_SYN_UNEXPECTED_TOKEN);
        }
        count
    }
}
