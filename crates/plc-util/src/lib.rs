//! Foundation types shared by every stage of the pipeline: interned
//! identifiers, source positions, diagnostics, a typed-index vector, and
//! the small set of fatal (non-diagnostic) errors the compiler can raise.

pub mod diagnostic;
pub mod error;
pub mod index_vec;
pub mod span;
pub mod symbol;

pub use diagnostic::{Diagnostic, DiagnosticBuilder, Handler, Level};
pub use error::{EmitError, EmitResult, SourceError, SourceResult};
pub use index_vec::{Idx, IndexVec};
pub use span::{Position, Span};
pub use symbol::Symbol;
