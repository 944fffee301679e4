//! The target-machine instruction set (spec §4.6).

/// An opcode of the stack-machine instruction set (spec §4.6).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Opcode {
    Jmp,
    Jif,
    Ldv,
    Lda,
    Sto,
    Sti,
    Lci,
    Lcr,
    Lcs,
    Opr,
    Mst,
    Cal,
    Inc,
    Rdi,
    Rdr,
}

impl Opcode {
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Jmp => "JMP",
            Opcode::Jif => "JIF",
            Opcode::Ldv => "LDV",
            Opcode::Lda => "LDA",
            Opcode::Sto => "STO",
            Opcode::Sti => "STI",
            Opcode::Lci => "LCI",
            Opcode::Lcr => "LCR",
            Opcode::Lcs => "LCS",
            Opcode::Opr => "OPR",
            Opcode::Mst => "MST",
            Opcode::Cal => "CAL",
            Opcode::Inc => "INC",
            Opcode::Rdi => "RDI",
            Opcode::Rdr => "RDR",
        }
    }
}

/// The second operand of an instruction (spec §3): either a resolved
/// value or an unresolved symbolic label awaiting [`crate::Emitter::finalize`].
#[derive(Clone, Debug, PartialEq)]
pub enum Operand {
    None,
    Int(i64),
    Real(f64),
    Str(String),
    /// A label name not yet resolved to an instruction index.
    Label(String),
}

impl std::fmt::Display for Operand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operand::None => write!(f, ""),
            Operand::Int(v) => write!(f, "{v}"),
            Operand::Real(v) => write!(f, "{v}"),
            Operand::Str(v) => write!(f, "\"{v}\""),
            Operand::Label(name) => write!(f, "{name}"),
        }
    }
}

/// A single emitted instruction (spec §3).
#[derive(Clone, Debug)]
pub struct Instruction {
    pub op: Opcode,
    /// Typically a static level difference (spec §4.6), or the argument
    /// count for `OPR`/the local count for `INC`.
    pub first: i64,
    pub operand: Operand,
    pub comment: Option<String>,
}

impl Instruction {
    pub fn new(op: Opcode, first: i64, operand: Operand, comment: Option<String>) -> Self {
        Self { op, first, operand, comment }
    }
}
