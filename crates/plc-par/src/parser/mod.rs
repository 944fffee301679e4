//! Parser submodules, split by grammar concern the way the scanner splits
//! by lexeme kind: `core` owns the token stream and recovery machinery,
//! `decl`/`stmt`/`expr` hold one family of grammar rules each.

mod core;
mod decl;
mod expr;
mod stmt;

pub use core::{ParseOutput, Parser};
