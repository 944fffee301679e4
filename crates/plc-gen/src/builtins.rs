//! The program prologue's built-in conversion block (spec §4.6): fixed
//! instruction addresses for `INT2REAL`, `REAL2INT`, `INT2STRING`,
//! `REAL2STRING`, each implemented as load-argument / conversion `OPR` /
//! return. The very first instruction jumps over this block into user
//! code.

use crate::emitter::Emitter;
use crate::opr;

/// Fixed instruction indices of the four builtin conversion routines,
/// for use as `CAL` targets (spec §4.6: "Calls to a builtin target its
/// fixed address").
#[derive(Clone, Copy, Debug)]
pub struct BuiltinAddresses {
    pub int2real: i64,
    pub real2int: i64,
    pub int2string: i64,
    pub real2string: i64,
}

/// Emits the prologue jump and the four conversion routines. Must be
/// called before any other instruction is emitted, so the routines land
/// at the fixed addresses the spec describes.
pub fn emit_builtin_prologue(emitter: &mut Emitter, user_code_label: &str) -> BuiltinAddresses {
    emitter.emit_jmp(user_code_label);

    let int2real = emit_conversion_routine(emitter, opr::INT2REAL);
    let real2int = emit_conversion_routine(emitter, opr::REAL2INT);
    let int2string = emit_conversion_routine(emitter, opr::INT2STRING);
    let real2string = emit_conversion_routine(emitter, opr::REAL2STRING);

    BuiltinAddresses {
        int2real,
        real2int,
        int2string,
        real2string,
    }
}

fn emit_conversion_routine(emitter: &mut Emitter, conversion: i64) -> i64 {
    let start = emitter.next_index() as i64;
    emitter.emit_ldv(0, 0);
    emitter.emit_opr(conversion, "convert argument");
    emitter.emit_opr(opr::RETURN, "return from builtin");
    start
}
