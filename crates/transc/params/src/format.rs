//! Number formatting for persisted values.
//!
//! Values written back into configuration documents use general notation
//! with a fixed number of significant digits: fixed-point when the decimal
//! exponent is in `[-4, digits)`, scientific otherwise, trailing zeros dropped.

/// Significant digits used by stream-style output when no precision is given.
pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 6;

/// Format `value` in general notation with `significant_digits` digits.
pub fn format_general(value: f64, significant_digits: usize) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let digits = significant_digits.max(1);
    let scientific = format!("{:.*e}", digits - 1, value);
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (scientific.as_str(), 0),
    };

    if exponent < -4 || exponent >= digits as i32 {
        let sign = if exponent < 0 { '-' } else { '+' };
        format!(
            "{}e{}{:02}",
            trim_fraction(mantissa),
            sign,
            exponent.unsigned_abs()
        )
    } else {
        let decimals = (digits as i32 - 1 - exponent).max(0) as usize;
        trim_fraction(&format!("{:.*}", decimals, value)).to_string()
    }
}

/// Right-align a value in a field of `width` characters.
pub fn format_fixed_width(value: f64, width: usize) -> String {
    format!(
        "{:>width$}",
        format_general(value, DEFAULT_SIGNIFICANT_DIGITS),
        width = width
    )
}

fn trim_fraction(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}
