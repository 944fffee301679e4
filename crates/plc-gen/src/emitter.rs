//! Label allocation, instruction emission, and finalization (spec §4.6).

use std::collections::HashMap;

use plc_util::{EmitError, EmitResult};

use crate::instruction::{Instruction, Opcode, Operand};

pub struct Emitter {
    instructions: Vec<Instruction>,
    labels: HashMap<String, usize>,
    next_label: u32,
    loop_exit_stack: Vec<String>,
}

impl Emitter {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
            labels: HashMap::new(),
            next_label: 0,
            loop_exit_stack: Vec::new(),
        }
    }

    /// Returns a fresh, never-before-used label name.
    pub fn new_label(&mut self) -> String {
        let label = format!("L{}", self.next_label);
        self.next_label += 1;
        label
    }

    /// Binds `label` to the index of the next instruction to be
    /// appended. Each name may be placed at most once (spec §3, §4.6).
    pub fn place_label(&mut self, label: &str) {
        let index = self.next_index();
        let previous = self.labels.insert(label.to_string(), index);
        debug_assert!(previous.is_none(), "label `{label}` placed more than once");
    }

    /// The 1-based index the next emitted instruction will receive.
    pub fn next_index(&self) -> usize {
        self.instructions.len() + 1
    }

    fn push(&mut self, op: Opcode, first: i64, operand: Operand, comment: Option<&str>) -> usize {
        self.instructions
            .push(Instruction::new(op, first, operand, comment.map(str::to_string)));
        self.next_index() - 1
    }

    pub fn emit_jmp(&mut self, label: &str) {
        self.push(Opcode::Jmp, 0, Operand::Label(label.to_string()), None);
    }

    pub fn emit_jif(&mut self, label: &str) {
        self.push(Opcode::Jif, 0, Operand::Label(label.to_string()), None);
    }

    pub fn emit_ldv(&mut self, level_diff: i64, offset: i64) {
        self.push(Opcode::Ldv, level_diff, Operand::Int(offset), None);
    }

    pub fn emit_lda(&mut self, level_diff: i64, offset: i64) {
        self.push(Opcode::Lda, level_diff, Operand::Int(offset), None);
    }

    pub fn emit_sto(&mut self, level_diff: i64, offset: i64) {
        self.push(Opcode::Sto, level_diff, Operand::Int(offset), None);
    }

    pub fn emit_sti(&mut self) {
        self.push(Opcode::Sti, 0, Operand::None, None);
    }

    pub fn emit_lci(&mut self, value: i64) {
        self.push(Opcode::Lci, 0, Operand::Int(value), None);
    }

    pub fn emit_lcr(&mut self, value: f64) {
        self.push(Opcode::Lcr, 0, Operand::Real(value), None);
    }

    pub fn emit_lcs(&mut self, value: &str) {
        self.push(Opcode::Lcs, 0, Operand::Str(value.to_string()), None);
    }

    pub fn emit_opr(&mut self, n: i64, comment: &str) {
        self.push(Opcode::Opr, n, Operand::None, Some(comment));
    }

    pub fn emit_mst(&mut self) {
        self.push(Opcode::Mst, 0, Operand::None, None);
    }

    pub fn emit_cal_label(&mut self, level_diff: i64, target: &str) {
        self.push(Opcode::Cal, level_diff, Operand::Label(target.to_string()), None);
    }

    pub fn emit_cal_addr(&mut self, level_diff: i64, address: i64) {
        self.push(Opcode::Cal, level_diff, Operand::Int(address), None);
    }

    /// Reserves storage for a scope's locals. Exactly one `INC` is
    /// emitted per scope frame (spec §9: the duplicate-`INC` bug is not
    /// reproduced).
    pub fn emit_inc(&mut self, local_count: i64) {
        self.push(Opcode::Inc, local_count, Operand::None, None);
    }

    pub fn emit_rdi(&mut self, level_diff: i64, offset: i64) {
        self.push(Opcode::Rdi, level_diff, Operand::Int(offset), None);
    }

    pub fn emit_rdr(&mut self, level_diff: i64, offset: i64) {
        self.push(Opcode::Rdr, level_diff, Operand::Int(offset), None);
    }

    pub fn push_loop_exit(&mut self, label: String) {
        self.loop_exit_stack.push(label);
    }

    pub fn pop_loop_exit(&mut self) -> Option<String> {
        self.loop_exit_stack.pop()
    }

    pub fn current_loop_exit(&self) -> Option<&str> {
        self.loop_exit_stack.last().map(String::as_str)
    }

    pub fn in_loop(&self) -> bool {
        !self.loop_exit_stack.is_empty()
    }

    /// Resolves every label operand to its placed instruction index.
    /// A label referenced but never placed is a fatal internal error
    /// (spec §4.6, §8).
    pub fn finalize(self) -> EmitResult<Vec<Instruction>> {
        let Emitter { mut instructions, labels, .. } = self;
        for instr in instructions.iter_mut() {
            if let Operand::Label(name) = &instr.operand {
                match labels.get(name) {
                    Some(index) => instr.operand = Operand::Int(*index as i64),
                    None => return Err(EmitError::UnresolvedLabel(name.clone())),
                }
            }
        }
        Ok(instructions)
    }
}

impl Default for Emitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn place_label_binds_to_the_next_instruction_index() {
        let mut emitter = Emitter::new();
        emitter.emit_lci(1);
        let label = emitter.new_label();
        emitter.place_label(&label);
        emitter.emit_lci(2);
        emitter.emit_jmp(&label);
        let instructions = emitter.finalize().unwrap();
        assert_eq!(instructions[1].operand, Operand::Int(2));
    }

    #[test]
    fn unresolved_label_is_a_fatal_finalize_error() {
        let mut emitter = Emitter::new();
        let label = emitter.new_label();
        emitter.emit_jmp(&label);
        let err = emitter.finalize().unwrap_err();
        assert!(matches!(err, EmitError::UnresolvedLabel(name) if name == label));
    }

    #[test]
    fn loop_exit_stack_is_lifo() {
        let mut emitter = Emitter::new();
        emitter.push_loop_exit("OUTER".to_string());
        emitter.push_loop_exit("INNER".to_string());
        assert_eq!(emitter.current_loop_exit(), Some("INNER"));
        assert_eq!(emitter.pop_loop_exit(), Some("INNER".to_string()));
        assert_eq!(emitter.current_loop_exit(), Some("OUTER"));
    }

    #[test]
    fn while_loop_pattern_resolves_both_labels() {
        let mut emitter = Emitter::new();
        let start = emitter.new_label();
        let end = emitter.new_label();
        emitter.place_label(&start);
        emitter.emit_lci(1); // condition placeholder
        emitter.emit_jif(&end);
        emitter.emit_lci(0); // body placeholder
        emitter.emit_jmp(&start);
        emitter.place_label(&end);
        let instructions = emitter.finalize().unwrap();
        assert_eq!(instructions[1].operand, Operand::Int(4)); // JIF end
        assert_eq!(instructions[3].operand, Operand::Int(1)); // JMP start
    }
}
