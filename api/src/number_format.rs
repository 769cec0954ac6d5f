//! en-US style number rendering: `,` thousands separators, `.` decimal point.

/// Inserts `,` separators into a string of ASCII digits.
pub(crate) fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Formats `value` with thousands separators and between `min_fraction` and
/// `max_fraction` fraction digits. Trailing zeros beyond `min_fraction` are
/// dropped, so `format_grouped(2.5, 0, 3)` is `"2.5"` and
/// `format_grouped(20000.0, 0, 3)` is `"20,000"`.
pub fn format_grouped(value: f64, min_fraction: usize, max_fraction: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let max_fraction = max_fraction.max(min_fraction);
    let (int_part, frac_part) = round_shortest(value.abs(), max_fraction);

    let trimmed = frac_part.trim_end_matches('0');
    let frac = if trimmed.len() < min_fraction {
        &frac_part[..min_fraction]
    } else {
        trimmed
    };

    // "-0" is not a useful thing to show.
    let is_negative = value < 0.0
        && int_part
            .bytes()
            .chain(frac_part.bytes())
            .any(|b| matches!(b, b'1'..=b'9'));

    let mut out = String::new();
    if is_negative {
        out.push('-');
    }
    out.push_str(&group_thousands(&int_part));
    if !frac.is_empty() {
        out.push('.');
        out.push_str(frac);
    }
    out
}

/// Rounds a finite, non-negative `value` half-up to exactly `fraction` digits.
///
/// Works on the shortest decimal representation that round-trips, so `1e24`
/// yields `1` followed by 24 zeros rather than the exact binary expansion.
fn round_shortest(value: f64, fraction: usize) -> (String, String) {
    // `Display` for f64 never uses exponent notation.
    let repr = value.to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));

    if frac_part.len() <= fraction {
        return (
            int_part.to_string(),
            format!("{:0<width$}", frac_part, width = fraction),
        );
    }

    let round_up = frac_part.as_bytes()[fraction] >= b'5';
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part[..fraction].bytes())
        .collect();

    if round_up {
        let mut carry = true;
        for d in digits.iter_mut().rev() {
            if *d == b'9' {
                *d = b'0';
            } else {
                *d += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let split = digits.len() - fraction;
    let int_digits = digits[..split].iter().map(|&b| b as char).collect();
    let frac_digits = digits[split..].iter().map(|&b| b as char).collect();
    (int_digits, frac_digits)
}

/// Formats a count the way a browser's default number format does: grouped,
/// at most three fraction digits.
pub fn format_count(value: f64) -> String {
    format_grouped(value, 0, 3)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_integer_digits() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("123"), "123");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("100000"), "100,000");
        assert_eq!(group_thousands("1234567"), "1,234,567");
    }

    #[test]
    fn counts_drop_trailing_zeros() {
        assert_eq!(format_count(20_000.0), "20,000");
        assert_eq!(format_count(2.5), "2.5");
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(1.0 / 3.0), "0.333");
        assert_eq!(format_count(1234.5678), "1,234.568");
    }

    #[test]
    fn keeps_minimum_fraction_digits() {
        assert_eq!(format_grouped(50_000.0, 2, 8), "50,000.00");
        assert_eq!(format_grouped(0.00001234, 2, 8), "0.00001234");
        assert_eq!(format_grouped(1.5, 2, 2), "1.50");
    }

    #[test]
    fn negative_values_keep_their_sign() {
        assert_eq!(format_grouped(-1234.5, 2, 2), "-1,234.50");
        assert_eq!(format_grouped(-0.0001, 0, 2), "0");
    }

    #[test]
    fn large_values_use_shortest_digits() {
        assert_eq!(format_count(1e24), "1,000,000,000,000,000,000,000,000");
        assert_eq!(
            format_grouped(5e24, 2, 2),
            "5,000,000,000,000,000,000,000,000.00"
        );
    }

    #[test]
    fn rounding_carries_into_the_integer_part() {
        assert_eq!(format_grouped(999.9996, 0, 3), "1,000");
        assert_eq!(format_grouped(0.995, 2, 2), "1.00");
        assert_eq!(format_grouped(9.5, 0, 0), "10");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_count(f64::INFINITY), "∞");
        assert_eq!(format_count(f64::NAN), "NaN");
    }
}
