//! The semantic analyzer (spec §4.4): declarations, lookups, assignment
//! checking, and operator typing, all reported through a shared
//! [`Handler`].

use plc_util::diagnostic::{
    E_SEM_ARITHMETIC_REQUIRED, E_SEM_BOOLEAN_REQUIRED, E_SEM_BOTH_STRINGS_REQUIRED,
    E_SEM_DUPLICATE_DECLARATION, E_SEM_EXIT_OUTSIDE_LOOP, E_SEM_IDENTIFIER_NOT_ASSIGNABLE,
    E_SEM_NOT_DECLARED, E_SEM_TYPE_MISMATCH,
};
use plc_util::Handler;

use crate::scope::SymbolTable;
use crate::types::{Kind, Type};

/// Binary operator classes the analyzer type-checks (spec §4.4). The
/// parser maps its own token kinds onto these before calling in, so this
/// crate never needs to know about lexer tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    And,
    Or,
    Concat,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Neg,
    Pos,
    Odd,
}

/// The four built-in conversion functions installed in the global scope
/// before parsing begins (spec §4.4).
pub const BUILTINS: &[(&str, Type)] = &[
    ("INT2REAL", Type::Real),
    ("REAL2INT", Type::Integer),
    ("INT2STRING", Type::String),
    ("REAL2STRING", Type::String),
];

pub struct Analyzer<'h> {
    pub table: SymbolTable,
    handler: &'h Handler,
}

impl<'h> Analyzer<'h> {
    pub fn new(handler: &'h Handler) -> Self {
        let mut table = SymbolTable::new();
        for (name, return_ty) in BUILTINS {
            let rec = table.enter(name, 0, 0);
            rec.kind = Kind::Function;
            rec.ty = Type::Function;
            rec.return_ty = Some(*return_ty);
        }
        Self { table, handler }
    }

    fn builtin_return_type(name: &str) -> Option<Type> {
        BUILTINS.iter().find(|(n, _)| *n == name).map(|(_, t)| *t)
    }

    pub fn declare_var(&mut self, name: &str, ty: Type, line: u32, column: u32) {
        self.declare(name, ty, Kind::Variable, line, column);
    }

    pub fn declare_const(&mut self, name: &str, ty: Type, line: u32, column: u32) {
        self.declare(name, ty, Kind::Constant, line, column);
    }

    pub fn declare_loop_index(&mut self, name: &str, ty: Type, line: u32, column: u32) {
        self.declare(name, ty, Kind::LoopIndex, line, column);
    }

    pub fn declare_param(&mut self, name: &str, ty: Type, line: u32, column: u32) {
        self.declare(name, ty, Kind::Variable, line, column);
    }

    fn declare(&mut self, name: &str, ty: Type, kind: Kind, line: u32, column: u32) {
        if self.table.lookup_local(name).is_some() {
            self.handler.report(
                line,
                column,
                E_SEM_DUPLICATE_DECLARATION,
                format!("`{name}` is already declared in this scope"),
            );
            return;
        }
        let rec = self.table.enter(name, line, column);
        rec.kind = kind;
        rec.ty = ty;
    }

    /// Declares a procedure or function name. `return_ty` is `None` for a
    /// procedure and `Some(_)` for a function (spec §4.4, §4.5).
    pub fn declare_callable(&mut self, name: &str, return_ty: Option<Type>, line: u32, column: u32) {
        if self.table.lookup_local(name).is_some() {
            self.handler.report(
                line,
                column,
                E_SEM_DUPLICATE_DECLARATION,
                format!("`{name}` is already declared in this scope"),
            );
            return;
        }
        let kind = if return_ty.is_some() { Kind::Function } else { Kind::Procedure };
        let rec = self.table.enter(name, line, column);
        rec.kind = kind;
        rec.ty = Type::Function;
        rec.return_ty = return_ty;
    }

    /// Looks up `name`'s declared type, emitting not-declared on a miss
    /// (spec §4.4: "Lookup-type").
    pub fn lookup_type(&self, name: &str, line: u32, column: u32) -> Type {
        match self.table.lookup(name) {
            Some(record) => record.ty,
            None => {
                self.handler.report(line, column, E_SEM_NOT_DECLARED, format!("`{name}` is not declared"));
                Type::Unknown
            }
        }
    }

    /// The type of a *call* to `name`, applying the fixed builtin-result
    /// override regardless of what the symbol table says (spec §4.4).
    pub fn call_result_type(&self, name: &str, line: u32, column: u32) -> Type {
        if let Some(ty) = Self::builtin_return_type(name) {
            return ty;
        }
        match self.table.lookup(name) {
            Some(record) => record.return_ty.unwrap_or(Type::Unknown),
            None => {
                self.handler.report(line, column, E_SEM_NOT_DECLARED, format!("`{name}` is not declared"));
                Type::Unknown
            }
        }
    }

    /// Checks `name := <rhs_ty>` (spec §4.4: "Assignment check").
    pub fn check_assignment(&self, name: &str, rhs_ty: Type, line: u32, column: u32) {
        let record = match self.table.lookup(name) {
            Some(r) => r,
            None => {
                self.handler.report(line, column, E_SEM_NOT_DECLARED, format!("`{name}` is not declared"));
                return;
            }
        };
        if !record.kind.is_assignable() {
            self.handler.report(
                line,
                column,
                E_SEM_IDENTIFIER_NOT_ASSIGNABLE,
                format!("`{name}` is not assignable"),
            );
            return;
        }
        let lhs_ty = record.ty;
        let ok = lhs_ty == rhs_ty
            || (lhs_ty == Type::Real && rhs_ty == Type::Integer)
            || lhs_ty == Type::Unknown
            || rhs_ty == Type::Unknown;
        if !ok {
            self.handler.report(
                line,
                column,
                E_SEM_TYPE_MISMATCH,
                format!("cannot assign {rhs_ty} to {name} of type {lhs_ty}"),
            );
        }
    }

    /// Binary operator typing (spec §4.4).
    pub fn binary_op_type(&self, left: Type, op: BinOp, right: Type, line: u32, column: u32) -> Type {
        let either_unknown = left == Type::Unknown || right == Type::Unknown;
        match op {
            BinOp::Add | BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Pow => {
                if either_unknown {
                    return Type::Unknown;
                }
                if left.is_numeric() && right.is_numeric() {
                    if left == Type::Real || right == Type::Real {
                        Type::Real
                    } else {
                        Type::Integer
                    }
                } else {
                    self.handler.report(line, column, E_SEM_ARITHMETIC_REQUIRED, "arithmetic requires numeric operands");
                    Type::Unknown
                }
            }
            BinOp::And | BinOp::Or => {
                if either_unknown {
                    return Type::Boolean;
                }
                if left == Type::Boolean && right == Type::Boolean {
                    Type::Boolean
                } else {
                    self.handler.report(line, column, E_SEM_BOOLEAN_REQUIRED, "`and`/`or` require boolean operands");
                    Type::Boolean
                }
            }
            BinOp::Concat => {
                if either_unknown {
                    return Type::String;
                }
                let promotable = |t: Type| matches!(t, Type::String | Type::Integer | Type::Real | Type::Boolean);
                if (left == Type::String || right == Type::String) && promotable(left) && promotable(right) {
                    Type::String
                } else if left.is_numeric() && right.is_numeric()
                    || (left == Type::Boolean && right == Type::Boolean)
                {
                    Type::String
                } else {
                    self.handler.report(
                        line,
                        column,
                        E_SEM_BOTH_STRINGS_REQUIRED,
                        "`&` requires string-compatible operands",
                    );
                    Type::Unknown
                }
            }
            BinOp::Eq | BinOp::Ne => {
                if either_unknown {
                    return Type::Boolean;
                }
                let compatible = (left.is_numeric() && right.is_numeric())
                    || (left == Type::String && right == Type::String)
                    || (left == Type::Boolean && right == Type::Boolean);
                if !compatible {
                    self.handler.report(line, column, E_SEM_TYPE_MISMATCH, "cannot compare these types for equality");
                }
                Type::Boolean
            }
            BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => {
                if either_unknown {
                    return Type::Boolean;
                }
                if !(left.is_numeric() && right.is_numeric()) {
                    self.handler.report(line, column, E_SEM_TYPE_MISMATCH, "relational operators require numeric operands");
                }
                Type::Boolean
            }
        }
    }

    /// Unary operator typing (spec §4.4).
    pub fn unary_op_type(&self, op: UnaryOp, operand: Type, line: u32, column: u32) -> Type {
        if operand == Type::Unknown {
            return match op {
                UnaryOp::Not | UnaryOp::Odd => Type::Boolean,
                UnaryOp::Neg | UnaryOp::Pos => Type::Unknown,
            };
        }
        match op {
            UnaryOp::Not => {
                if operand != Type::Boolean {
                    self.handler.report(line, column, E_SEM_BOOLEAN_REQUIRED, "`not` requires a boolean operand");
                }
                Type::Boolean
            }
            UnaryOp::Odd => {
                if operand != Type::Integer {
                    self.handler.report(line, column, E_SEM_ARITHMETIC_REQUIRED, "`odd` requires an integer operand");
                }
                Type::Boolean
            }
            UnaryOp::Neg | UnaryOp::Pos => {
                if !operand.is_numeric() {
                    self.handler.report(line, column, E_SEM_ARITHMETIC_REQUIRED, "unary +/- requires a numeric operand");
                    return Type::Unknown;
                }
                operand
            }
        }
    }

    pub fn require_boolean(&self, ty: Type, line: u32, column: u32) {
        if ty != Type::Boolean && ty != Type::Unknown {
            self.handler.report(line, column, E_SEM_BOOLEAN_REQUIRED, "condition must be boolean");
        }
    }

    pub fn require_loop_context(&self, in_loop: bool, line: u32, column: u32) {
        if !in_loop {
            self.handler.report(line, column, E_SEM_EXIT_OUTSIDE_LOOP, "`exit` used outside of a loop");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use plc_util::Handler;

    #[test]
    fn duplicate_declaration_is_reported_once() {
        let handler = Handler::new();
        let mut analyzer = Analyzer::new(&handler);
        analyzer.declare_var("X", Type::Integer, 1, 0);
        analyzer.declare_var("X", Type::Real, 1, 5);
        assert_eq!(handler.error_count(), 1);
        assert_eq!(analyzer.table.lookup_local("X").unwrap().ty, Type::Integer);
    }

    #[test]
    fn widening_assignment_is_accepted() {
        let handler = Handler::new();
        let mut analyzer = Analyzer::new(&handler);
        analyzer.declare_var("R", Type::Real, 1, 0);
        analyzer.check_assignment("R", Type::Integer, 2, 0);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn mismatched_assignment_is_reported() {
        let handler = Handler::new();
        let mut analyzer = Analyzer::new(&handler);
        analyzer.declare_var("X", Type::Integer, 1, 0);
        analyzer.check_assignment("X", Type::String, 2, 0);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn constant_assignment_is_not_assignable() {
        let handler = Handler::new();
        let mut analyzer = Analyzer::new(&handler);
        analyzer.declare_const("K", Type::Integer, 1, 0);
        analyzer.check_assignment("K", Type::Integer, 2, 0);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn loop_index_assignment_is_not_assignable() {
        let handler = Handler::new();
        let mut analyzer = Analyzer::new(&handler);
        analyzer.declare_loop_index("I", Type::Integer, 1, 0);
        analyzer.check_assignment("I", Type::Integer, 2, 0);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn builtin_call_result_type_overrides_symbol_table() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        assert_eq!(analyzer.call_result_type("INT2REAL", 1, 0), Type::Real);
        assert_eq!(analyzer.call_result_type("REAL2INT", 1, 0), Type::Integer);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn not_declared_identifier_reports_and_returns_unknown() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        assert_eq!(analyzer.lookup_type("MISSING", 1, 0), Type::Unknown);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn arithmetic_between_integer_and_real_widens_to_real() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        let ty = analyzer.binary_op_type(Type::Integer, BinOp::Add, Type::Real, 1, 0);
        assert_eq!(ty, Type::Real);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn arithmetic_on_strings_is_rejected() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        let ty = analyzer.binary_op_type(Type::String, BinOp::Add, Type::Integer, 1, 0);
        assert_eq!(ty, Type::Unknown);
        assert_eq!(handler.error_count(), 1);
    }

    #[test]
    fn unknown_operand_suppresses_cascading_diagnostics() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        analyzer.binary_op_type(Type::Unknown, BinOp::Add, Type::Integer, 1, 0);
        assert_eq!(handler.error_count(), 0);
    }

    #[test]
    fn exit_outside_loop_is_reported() {
        let handler = Handler::new();
        let analyzer = Analyzer::new(&handler);
        analyzer.require_loop_context(false, 3, 0);
        assert_eq!(handler.error_count(), 1);
    }
}
