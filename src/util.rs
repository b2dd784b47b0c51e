/// Parses a millimeter value typed by the user, accepting either `.` or `,` as decimal mark.
pub fn parse_mm(text: &str) -> Option<f64> {
    let value: f64 = text.trim().replace(',', ".").parse().ok()?;
    value.is_finite().then_some(value)
}

/// Formats millimeters without a trailing `.0` on whole numbers.
pub fn format_mm(mm: f64) -> String {
    if mm.fract() == 0.0 && mm.abs() < 1e9 {
        format!("{mm:.0}")
    } else {
        mm.to_string()
    }
}
