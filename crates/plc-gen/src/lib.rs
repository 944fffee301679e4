pub mod builtins;
pub mod emitter;
pub mod instruction;
pub mod opr;
pub mod write;

pub use builtins::{emit_builtin_prologue, BuiltinAddresses};
pub use emitter::Emitter;
pub use instruction::{Instruction, Opcode, Operand};
pub use write::{render_instruction, render_program};
