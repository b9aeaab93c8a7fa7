/// 1) Trim whitespace + strip outer quotes if present.
pub fn clean_str(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.starts_with('"') && trimmed.ends_with('"') && trimmed.len() >= 2 {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// 2) Coerce a unit-count cell to a number. Blank, non-numeric and
/// non-finite text all come back as `None`; this never fails.
pub fn parse_units(raw: &str) -> Option<f64> {
    clean_str(raw)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// 3) Product codes are opaque strings. Leading zeros survive; a numeric
/// rendering with an empty fraction (`"123.0"`) collapses to `"123"` so the
/// same product keys identically whichever way the sheet exported it.
pub fn normalize_code(raw: &str) -> String {
    let code = clean_str(raw);
    if let Some((int_part, frac)) = code.split_once('.') {
        if !int_part.is_empty()
            && int_part.chars().all(|c| c.is_ascii_digit())
            && !frac.is_empty()
            && frac.chars().all(|c| c == '0')
        {
            return int_part.to_string();
        }
    }
    code
}

/// 4) Header comparison key: surrounding whitespace is not significant.
pub fn header_key(raw: &str) -> &str {
    raw.trim()
}

/// Round half to even, matching the sheet tooling's array rounding.
pub fn round_units(v: f64) -> f64 {
    v.round_ties_even()
}

/// Round to `decimals` places, half to even.
pub fn round_to(v: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (v * scale).round_ties_even() / scale
}
