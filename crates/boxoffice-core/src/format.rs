//! Display formatting for predictions

/// Prefix of every successful prediction message
pub const REVENUE_PREFIX: &str = "Predicted Worldwide Revenue: $";

/// Round to a whole number and group digits in threes: `123456.7` → `"123,457"`
///
/// Rounding is ties-to-even on the exact binary value.
pub fn format_thousands(value: f64) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "nan".to_string()
        } else if value > 0.0 {
            "inf".to_string()
        } else {
            "-inf".to_string()
        };
    }

    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}

/// The user-visible result line for a predicted revenue
pub fn format_revenue(value: f64) -> String {
    format!("{}{}", REVENUE_PREFIX, format_thousands(value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revenue_line() {
        assert_eq!(format_revenue(123456.7), "Predicted Worldwide Revenue: $123,457");
    }

    #[test]
    fn test_grouping() {
        assert_eq!(format_thousands(0.0), "0");
        assert_eq!(format_thousands(999.0), "999");
        assert_eq!(format_thousands(1000.0), "1,000");
        assert_eq!(format_thousands(1_234_567_890.0), "1,234,567,890");
        assert_eq!(format_thousands(-45_000.4), "-45,000");
    }

    #[test]
    fn test_rounding_carries_into_new_group() {
        assert_eq!(format_thousands(999_999.5), "1,000,000");
        assert_eq!(format_thousands(99_999.9), "100,000");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_thousands(f64::NAN), "nan");
        assert_eq!(format_thousands(f64::INFINITY), "inf");
        assert_eq!(format_thousands(f64::NEG_INFINITY), "-inf");
    }
}
