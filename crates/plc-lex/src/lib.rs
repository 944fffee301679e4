//! The scanner (spec §4.1): converts source characters into a stream of
//! positioned tokens, recognizing keywords, identifiers, numeric and
//! string literals, operators, and comments.

pub mod cursor;
pub mod lexer;
pub mod token;

pub use lexer::Lexer;
pub use token::{keyword_kind, Literal, Token, TokenKind};
