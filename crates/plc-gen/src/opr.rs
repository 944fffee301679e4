//! The fixed table of `OPR n` operation codes (spec §4.6): arithmetic,
//! comparison, logical, I/O, and conversion operations all share the one
//! `OPR` opcode, selected by `n`.

pub const HALT: i64 = 0;
pub const ADD: i64 = 1;
pub const SUB: i64 = 2;
pub const MUL: i64 = 3;
pub const DIV: i64 = 4;
pub const POW: i64 = 5;
pub const NEG: i64 = 6;
pub const AND: i64 = 7;
pub const OR: i64 = 8;
pub const NOT: i64 = 9;
pub const ODD: i64 = 10;
pub const EQ: i64 = 11;
pub const NE: i64 = 12;
pub const LT: i64 = 13;
pub const LE: i64 = 14;
pub const GT: i64 = 15;
pub const GE: i64 = 16;
pub const CONCAT: i64 = 17;
pub const WRITE_INT: i64 = 18;
pub const WRITE_REAL: i64 = 19;
pub const WRITE_STRING: i64 = 20;
pub const WRITE_BOOL: i64 = 21;
pub const WRITELN: i64 = 22;
pub const RETURN: i64 = 23;
pub const INT2REAL: i64 = 24;
pub const REAL2INT: i64 = 25;
pub const INT2STRING: i64 = 26;
pub const REAL2STRING: i64 = 27;
