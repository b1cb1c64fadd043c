//! Lenient number handling for form input.
//!
//! Form fields arrive as text. They are read the way a browser `parseFloat`
//! reads them: leading whitespace is skipped, the longest numeric prefix is
//! taken, and anything without one becomes NaN. Nothing is rejected; NaN and
//! infinities flow through arithmetic and are rendered by [`format_fixed`].

/// Parse the longest leading decimal number of `input`, or NaN.
pub fn parse_float(input: &str) -> f64 {
    let text = input.trim_start();
    let bytes = text.as_bytes();
    let mut pos = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        pos += 1;
    }

    if text[pos..].starts_with("Infinity") {
        return if bytes.first() == Some(&b'-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = pos;
    while pos < bytes.len() && bytes[pos].is_ascii_digit() {
        pos += 1;
    }
    let mut digits = pos - int_start;

    if pos < bytes.len() && bytes[pos] == b'.' {
        let frac_start = pos + 1;
        let mut end = frac_start;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        digits += end - frac_start;
        if digits > 0 {
            pos = end;
        }
    }

    if digits == 0 {
        return f64::NAN;
    }

    // Exponent only counts when at least one digit follows it.
    if pos < bytes.len() && matches!(bytes[pos], b'e' | b'E') {
        let mut end = pos + 1;
        if end < bytes.len() && matches!(bytes[end], b'+' | b'-') {
            end += 1;
        }
        let exp_digits_start = end;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
        if end > exp_digits_start {
            pos = end;
        }
    }

    text[..pos].parse::<f64>().unwrap_or(f64::NAN)
}

/// Integer prefix of `input`, read the way `parseInt(input)` reads it:
/// fractions are truncated, no leading digits gives NaN.
pub fn parse_int(input: &str) -> f64 {
    let text = input.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return f64::NAN;
    }

    let value = digits[..end].parse::<f64>().unwrap_or(f64::NAN);
    if negative {
        -value
    } else {
        value
    }
}

/// Parse an optional field: empty text means "not supplied".
pub fn parse_optional(input: &str) -> Option<f64> {
    if input.is_empty() {
        None
    } else {
        Some(parse_float(input))
    }
}

/// Fixed-point rendering with browser spelling of non-finite values.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string()
    } else {
        format!("{:.*}", decimals, value)
    }
}

/// Round through the formatted string, so later arithmetic sees exactly the
/// number that was displayed.
pub fn round_to(value: f64, decimals: usize) -> f64 {
    parse_float(&format_fixed(value, decimals))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_numbers() {
        assert_eq!(parse_float("6.5"), 6.5);
        assert_eq!(parse_float("  42"), 42.0);
        assert_eq!(parse_float("-3"), -3.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("1e3"), 1000.0);
    }

    #[test]
    fn test_parse_takes_numeric_prefix() {
        assert_eq!(parse_float("6.5abc"), 6.5);
        assert_eq!(parse_float("12 hectares"), 12.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("1.2.3"), 1.2);
    }

    #[test]
    fn test_parse_non_numeric_is_nan() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
    }

    #[test]
    fn test_parse_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_format_fixed() {
        assert_eq!(format_fixed(36.0525, 2), "36.05");
        assert_eq!(format_fixed(15.0 * 0.95 * 0.9, 2), "12.83");
        assert_eq!(format_fixed(f64::NAN, 2), "NaN");
        assert_eq!(format_fixed(f64::INFINITY, 2), "Infinity");
        assert_eq!(format_fixed(f64::NEG_INFINITY, 1), "-Infinity");
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(36.05 * 0.85, 2), 30.64);
        assert!(round_to(f64::NAN, 2).is_nan());
    }

    #[test]
    fn test_parse_optional() {
        assert_eq!(parse_optional(""), None);
        assert_eq!(parse_optional("150"), Some(150.0));
        assert!(parse_optional("n/a").unwrap().is_nan());
    }

    #[test]
    fn test_parse_int_truncates() {
        assert_eq!(parse_int("35.5"), 35.0);
        assert_eq!(parse_int(" 25°C"), 25.0);
        assert_eq!(parse_int("-4"), -4.0);
        assert!(parse_int("").is_nan());
        assert!(parse_int("warm").is_nan());
        assert!(parse_int(".5").is_nan());
    }
}
