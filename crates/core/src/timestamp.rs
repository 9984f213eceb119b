//! Stored timestamp encoding
//!
//! Values are decimal millisecond strings, the same shape `localStorage`
//! ends up with when a JS number is written to it.

/// Parse a stored last-activity value
///
/// Integer strings are taken as-is. Finite decimals are truncated toward
/// zero. Everything else yields `None`.
pub fn parse(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(millis) = raw.parse::<i64>() {
        return Some(millis);
    }

    let value = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    #[allow(clippy::cast_possible_truncation)]
    let truncated = value.trunc() as i64;
    // `as` saturates, reject values that were clamped
    (truncated as f64 == value.trunc()).then_some(truncated)
}

pub fn format(millis: i64) -> String {
    millis.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer_strings() {
        assert_eq!(parse("1700000000000"), Some(1_700_000_000_000));
        assert_eq!(parse("  42\n"), Some(42));
        assert_eq!(parse("-5"), Some(-5));
    }

    #[test]
    fn test_parse_truncates_decimals() {
        assert_eq!(parse("1700000000000.9"), Some(1_700_000_000_000));
        assert_eq!(parse("1.7e12"), Some(1_700_000_000_000));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
        assert_eq!(parse("yesterday"), None);
        assert_eq!(parse("NaN"), None);
        assert_eq!(parse("Infinity"), None);
        assert_eq!(parse("1e300"), None);
    }

    #[test]
    fn test_format_is_plain_decimal() {
        assert_eq!(format(1_700_000_000_000), "1700000000000");
        assert_eq!(parse(&format(123)), Some(123));
    }
}
