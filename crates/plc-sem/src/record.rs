//! A declared name's entry in the symbol table (spec §3).

use crate::types::{Kind, Type};

#[derive(Clone, Debug)]
pub struct Record {
    /// The identifier's original (not uppercased) spelling, kept only for
    /// diagnostics and the symbol-table dump (spec §6).
    pub text: String,
    pub ty: Type,
    pub kind: Kind,
    pub level: u32,
    pub offset: u32,
    pub line: u32,
    pub column: u32,
    pub param_count: usize,
    /// Populated only for `Kind::Function`; the type of a *call* to this
    /// name, as distinct from `ty` (spec §3, §4.4).
    pub return_ty: Option<Type>,
}

impl Record {
    pub fn new(text: impl Into<String>, level: u32, line: u32, column: u32) -> Self {
        Self {
            text: text.into(),
            ty: Type::Unknown,
            kind: Kind::Unknown,
            level,
            offset: 0,
            line,
            column,
            param_count: 0,
            return_ty: None,
        }
    }
}
