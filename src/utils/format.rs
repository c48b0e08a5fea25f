//! Number formatting for report output

/// Integer with comma thousands separators, e.g. `1234567` -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Threshold label as the report prints it: "10.0", "12.5", "0.25"
pub fn format_threshold(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 { format!("{:.1}", value) } else { value.to_string() }
}
