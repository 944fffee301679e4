//! Rendering resolved instructions into the output instruction file format
//! (spec §6): fixed-width columns followed by the instruction's 1-based
//! index in parentheses and a free-form comment.

use std::fmt::Write as _;

use crate::instruction::Instruction;

/// Renders one instruction as a single output line, with no trailing
/// newline.
pub fn render_instruction(index: usize, instr: &Instruction) -> String {
    let mut line = String::new();
    let _ = write!(
        line,
        "{:<5}{:>6}{:>13} ({index})",
        instr.op.mnemonic(),
        instr.first,
        instr.operand,
    );
    if let Some(comment) = &instr.comment {
        let _ = write!(line, "  {comment}");
    }
    line
}

/// Renders the full resolved instruction stream. The first instruction
/// is numbered 1 (spec §4.6).
pub fn render_program(instructions: &[Instruction]) -> String {
    let mut out = String::new();
    for (i, instr) in instructions.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&render_instruction(i + 1, instr));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instruction::{Opcode, Operand};

    #[test]
    fn render_instruction_includes_index_in_parens() {
        let instr = Instruction::new(Opcode::Ldv, 0, Operand::Int(3), None);
        let line = render_instruction(7, &instr);
        assert!(line.ends_with("(7)"));
        assert!(line.starts_with("LDV"));
    }

    #[test]
    fn render_instruction_appends_comment_after_the_parenthesized_index() {
        let instr = Instruction::new(Opcode::Opr, 1, Operand::None, Some("add".to_string()));
        let line = render_instruction(1, &instr);
        assert!(line.ends_with("(1)  add"));
    }

    #[test]
    fn render_program_numbers_instructions_from_one() {
        let instructions = vec![
            Instruction::new(Opcode::Lci, 0, Operand::Int(1), None),
            Instruction::new(Opcode::Lci, 0, Operand::Int(2), None),
        ];
        let out = render_program(&instructions);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("(1)"));
        assert!(lines[1].contains("(2)"));
    }
}
