//! The recursive-descent parser (spec §4.5): the single driving component
//! that walks the token stream and calls directly into the semantic
//! analyzer and the emitter at each grammar action point. There is no
//! intermediate syntax tree — expression rules return the analyzer's
//! [`plc_sem::Type`] and emit code as a side effect; statement and
//! declaration rules emit code and return nothing.

pub mod parser;

pub use parser::{ParseOutput, Parser};
