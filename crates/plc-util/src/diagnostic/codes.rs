//! The closed table of diagnostic codes shared by the scanner, parser, and
//! semantic analyzer (spec §4.2, §7).

/// A diagnostic code, rendered as e.g. `E1003`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiagnosticCode {
    prefix: &'static str,
    number: u32,
}

impl DiagnosticCode {
    pub const fn new(prefix: &'static str, number: u32) -> Self {
        Self { prefix, number }
    }

    pub const fn prefix(&self) -> &'static str {
        self.prefix
    }

    pub const fn number(&self) -> u32 {
        self.number
    }
}

impl std::fmt::Debug for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

impl std::fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{:04}", self.prefix, self.number)
    }
}

// Lexical (scanner) codes: E_LEX_*
pub const E_LEX_ILLEGAL_UNDERSCORE: DiagnosticCode = DiagnosticCode::new("E", 1001);
pub const E_LEX_MALFORMED_NUMERIC: DiagnosticCode = DiagnosticCode::new("E", 1002);
pub const E_LEX_UNTERMINATED_STRING: DiagnosticCode = DiagnosticCode::new("E", 1003);
pub const E_LEX_UNEXPECTED_CHARACTER: DiagnosticCode = DiagnosticCode::new("E", 1004);

// Syntactic (parser) codes: E_SYN_*
pub const E_SYN_EXPECTED_SEMICOLON: DiagnosticCode = DiagnosticCode::new("E", 2001);
pub const E_SYN_UNEXPECTED_TOKEN: DiagnosticCode = DiagnosticCode::new("E", 2002);
pub const E_SYN_TYPE_NAME_EXPECTED: DiagnosticCode = DiagnosticCode::new("E", 2003);
pub const E_SYN_PARAMETER_MODE_EXPECTED: DiagnosticCode = DiagnosticCode::new("E", 2004);
pub const E_SYN_END_IDENTIFIER_MISMATCH: DiagnosticCode = DiagnosticCode::new("E", 2005);
pub const E_SYN_END_OF_PROGRAM_EXPECTED: DiagnosticCode = DiagnosticCode::new("E", 2006);

// Semantic (analyzer) codes: E_SEM_*
pub const E_SEM_NOT_DECLARED: DiagnosticCode = DiagnosticCode::new("E", 3001);
pub const E_SEM_DUPLICATE_DECLARATION: DiagnosticCode = DiagnosticCode::new("E", 3002);
pub const E_SEM_TYPE_MISMATCH: DiagnosticCode = DiagnosticCode::new("E", 3003);
pub const E_SEM_BOOLEAN_REQUIRED: DiagnosticCode = DiagnosticCode::new("E", 3004);
pub const E_SEM_ARITHMETIC_REQUIRED: DiagnosticCode = DiagnosticCode::new("E", 3005);
pub const E_SEM_BOTH_STRINGS_REQUIRED: DiagnosticCode = DiagnosticCode::new("E", 3006);
pub const E_SEM_IDENTIFIER_NOT_ASSIGNABLE: DiagnosticCode = DiagnosticCode::new("E", 3007);
pub const E_SEM_EXIT_OUTSIDE_LOOP: DiagnosticCode = DiagnosticCode::new("E", 3008);

// Internal/fatal codes: E_FATAL_*
pub const E_FATAL_UNRESOLVED_LABEL: DiagnosticCode = DiagnosticCode::new("F", 9001);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_render_with_zero_padded_number() {
        assert_eq!(E_SEM_NOT_DECLARED.to_string(), "E3001");
    }

    #[test]
    fn fatal_codes_use_the_f_prefix() {
        assert_eq!(E_FATAL_UNRESOLVED_LABEL.prefix(), "F");
    }
}
