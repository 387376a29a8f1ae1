//! Lenient numeric parsing for spreadsheet cell text.
//!
//! Budget sheets carry amounts as "$1,234.56", "(45.00)" or plain numbers;
//! a cell that fails to parse is never an error, it simply contributes no
//! numeric signal.

/// Parse an amount out of cell text.
///
/// Strips common currency symbols and thousands separators and reads
/// accounting-style parentheses as negation. Returns `None` for anything
/// that still fails to parse.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let mut body = trimmed.replace(',', "");
    let negated = body.starts_with('(') && body.ends_with(')') && body.len() > 2;
    if negated {
        body = body[1..body.len() - 1].to_string();
    }
    let body = body.trim_start_matches(['$', '€', '£']).trim();
    body.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| if negated { -v } else { v })
}

/// True when the cell text parses as an amount.
pub fn is_numeric(raw: &str) -> bool {
    parse_amount(raw).is_some()
}
