//! The symbol table (spec §4.3): a stack of lexically nested scope frames.

use std::collections::HashMap;

use crate::record::Record;

/// A single lexical scope: an insertion-ordered map from uppercase
/// identifier text to its [`Record`].
#[derive(Default)]
pub struct Frame {
    order: Vec<String>,
    records: HashMap<String, Record>,
    next_offset: u32,
}

impl Frame {
    fn new() -> Self {
        Self::default()
    }

    /// Inserts a new record, or returns the existing one unchanged if
    /// `name` is already present (spec §4.3: the table does not decide
    /// whether a repeat insert is an error — the analyzer does).
    fn enter(&mut self, name: &str, level: u32, line: u32, column: u32) -> &mut Record {
        if !self.records.contains_key(name) {
            let mut record = Record::new(name, level, line, column);
            record.offset = self.next_offset;
            self.next_offset += 1;
            self.records.insert(name.to_string(), record);
            self.order.push(name.to_string());
        }
        self.records.get_mut(name).unwrap()
    }

    fn get(&self, name: &str) -> Option<&Record> {
        self.records.get(name)
    }

    fn get_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.records.get_mut(name)
    }

    pub fn locals_count(&self) -> u32 {
        self.next_offset
    }

    pub fn records_in_order(&self) -> impl Iterator<Item = &Record> {
        self.order.iter().map(move |name| &self.records[name])
    }
}

/// A stack of scope frames; index 0 is the outermost (global) scope
/// (spec §3, §4.3).
pub struct SymbolTable {
    frames: Vec<Frame>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::new()],
        }
    }

    /// The level of the currently active (topmost) frame.
    pub fn level(&self) -> u32 {
        (self.frames.len() - 1) as u32
    }

    pub fn open_scope(&mut self) {
        self.frames.push(Frame::new());
    }

    /// Pops the top frame, destroying its records. The outermost frame is
    /// never popped; attempts are silently no-ops (spec §4.3).
    pub fn close_scope(&mut self) -> Option<Frame> {
        if self.frames.len() <= 1 {
            return None;
        }
        self.frames.pop()
    }

    pub fn enter(&mut self, name: &str, line: u32, column: u32) -> &mut Record {
        let level = self.level();
        self.frames.last_mut().unwrap().enter(name, level, line, column)
    }

    pub fn lookup_local(&self, name: &str) -> Option<&Record> {
        self.frames.last().unwrap().get(name)
    }

    pub fn lookup_local_mut(&mut self, name: &str) -> Option<&mut Record> {
        self.frames.last_mut().unwrap().get_mut(name)
    }

    /// Searches from innermost to outermost, returning the first match.
    pub fn lookup(&self, name: &str) -> Option<&Record> {
        self.frames.iter().rev().find_map(|frame| frame.get(name))
    }

    pub fn current_frame(&self) -> &Frame {
        self.frames.last().unwrap()
    }

    /// Prints every scope from outermost to innermost in the external
    /// dump format (spec §6), without closing anything.
    pub fn dump(&self, out: &mut dyn std::fmt::Write) -> std::fmt::Result {
        writeln!(out, "---- symbol table dump ----")?;
        for (level, frame) in self.frames.iter().enumerate() {
            writeln!(out, "scope level {level}")?;
            for record in frame.records_in_order() {
                // Compiler-synthesized slots (e.g. a for-loop's hidden bound)
                // are never real source identifiers and `$` cannot start one,
                // so they're excluded from the external dump (spec §6).
                if record.text.starts_with('$') {
                    continue;
                }
                write!(
                    out,
                    "Token Name: {}  Line No: {}  Position: {}  Type: {}  Kind: {}  Level: {}  Offset: {}  Trace?: 0  #params: {}",
                    record.text,
                    record.line,
                    record.column,
                    record.ty,
                    record.kind,
                    record.level,
                    record.offset,
                    record.param_count,
                )?;
                if record.kind == crate::types::Kind::Function {
                    write!(out, "  Return ty: {}", record.return_ty.unwrap_or(crate::types::Type::Unknown))?;
                }
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Dumps the full table, then pops the top frame (spec §4.5:
    /// `close_scope_and_dump`).
    pub fn close_scope_and_dump(&mut self, out: &mut dyn std::fmt::Write) -> std::fmt::Result {
        self.dump(out)?;
        self.close_scope();
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Kind, Type};

    #[test]
    fn outermost_scope_is_never_popped() {
        let mut table = SymbolTable::new();
        assert!(table.close_scope().is_none());
        assert_eq!(table.level(), 0);
    }

    #[test]
    fn close_scope_destroys_its_records() {
        let mut table = SymbolTable::new();
        table.open_scope();
        table.enter("X", 1, 0);
        assert!(table.lookup_local("X").is_some());
        table.close_scope();
        assert!(table.lookup("X").is_none());
    }

    #[test]
    fn lookup_searches_innermost_to_outermost() {
        let mut table = SymbolTable::new();
        table.enter("X", 1, 0).ty = Type::Integer;
        table.open_scope();
        assert_eq!(table.lookup("X").unwrap().ty, Type::Integer);
    }

    #[test]
    fn entering_an_existing_name_returns_the_existing_record() {
        let mut table = SymbolTable::new();
        table.enter("X", 1, 0).ty = Type::Integer;
        table.enter("X", 2, 0);
        assert_eq!(table.lookup_local("X").unwrap().ty, Type::Integer);
        assert_eq!(table.lookup_local("X").unwrap().line, 1);
    }

    #[test]
    fn offsets_are_sequential_within_a_frame() {
        let mut table = SymbolTable::new();
        table.enter("A", 1, 0);
        table.enter("B", 2, 0);
        assert_eq!(table.lookup_local("A").unwrap().offset, 0);
        assert_eq!(table.lookup_local("B").unwrap().offset, 1);
    }

    #[test]
    fn dump_lists_scopes_outermost_to_innermost() {
        let mut table = SymbolTable::new();
        table.enter("X", 1, 0).kind = Kind::Variable;
        table.open_scope();
        table.enter("Y", 2, 0).kind = Kind::Variable;
        let mut buf = String::new();
        table.dump(&mut buf).unwrap();
        let x_pos = buf.find("Token Name: X").unwrap();
        let y_pos = buf.find("Token Name: Y").unwrap();
        assert!(x_pos < y_pos);
    }
}
