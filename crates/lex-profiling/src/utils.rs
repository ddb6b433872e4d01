//! Shared numeric helpers for parsing cell text and rendering labels.

// =============================================================================
// Parsing
// =============================================================================

/// Parse cell text as a float, ignoring surrounding whitespace.
///
/// Accepts the usual float grammar, including exponents, `inf` and `nan`.
pub fn parse_float(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Cast a float to an integer, truncating toward zero.
///
/// Non-finite values and values outside the `i64` range do not cast.
pub fn truncate_to_int(value: f64) -> Option<i64> {
    if !value.is_finite() {
        return None;
    }
    let truncated = value.trunc();
    // i64::MAX as f64 rounds up to 2^63, which is itself out of range
    if truncated < i64::MIN as f64 || truncated >= i64::MAX as f64 {
        return None;
    }
    Some(truncated as i64)
}

// =============================================================================
// Formatting
// =============================================================================

/// Format a number with no decimals and `,` as the thousands separator.
///
/// Rounding is `{:.0}`'s half-to-even on the exact binary value.
///
/// # Example
///
/// ```rust,ignore
/// assert_eq!(format_thousands(1234567.4), "1,234,567");
/// assert_eq!(format_thousands(-1000.0), "-1,000");
/// ```
pub fn format_thousands(value: f64) -> String {
    let rendered = format!("{:.0}", value);
    let (sign, digits) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };

    // inf / NaN have no digits to group
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return rendered;
    }

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

/// Render a numeric cell value as a label: `1` for whole numbers, `2.5` otherwise.
pub fn format_value(value: f64) -> String {
    if value == 0.0 {
        // Collapse -0.0
        return "0".to_string();
    }
    value.to_string()
}
