//! The listing file (spec §6, §8 scenario 8): source lines interleaved
//! with the diagnostics reported against them.

use plc_util::Diagnostic;

/// Renders every source line followed immediately by the diagnostics
/// reported at that line, in reporting order.
pub fn render_listing(source: &str, diagnostics: &[Diagnostic]) -> String {
    let mut out = String::new();
    for (i, line) in source.lines().enumerate() {
        let line_no = (i + 1) as u32;
        out.push_str(line);
        out.push('\n');
        for diag in diagnostics.iter().filter(|d| d.span.line() == line_no) {
            out.push_str(&format!("    ^ {}\n", diag));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use plc_util::{Handler, diagnostic::E_SEM_DUPLICATE_DECLARATION};

    #[test]
    fn listing_places_diagnostic_after_its_source_line() {
        let source = "program P is\nX : integer;\nX : real;\nbegin end P;";
        let handler = Handler::new();
        handler.report(3, 0, E_SEM_DUPLICATE_DECLARATION, "`X` is already declared");
        let listing = render_listing(source, &handler.diagnostics());
        let lines: Vec<&str> = listing.lines().collect();
        let decl_idx = lines.iter().position(|l| *l == "X : real;").unwrap();
        assert!(lines[decl_idx + 1].contains("E3002"));
    }
}
