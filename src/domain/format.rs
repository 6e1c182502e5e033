//! Result formatting for calculator outputs.
//!
//! Outputs are rendered either at a fixed number of decimal places, or, when
//! no precision is requested, with a magnitude-based choice between fixed and
//! scientific notation. Undefined values render as [`PLACEHOLDER`].
//!
//! Rounding is round-half-up on the exact binary value of the number: when a
//! value lies exactly between two candidates the larger magnitude wins.

/// Display string for undefined, non-finite or invalid results.
pub const PLACEHOLDER: &str = "—";

/// Digits rendered past the requested precision before rounding by hand.
const GUARD_DIGITS: usize = 30;

/// Formats a calculator result.
///
/// # Arguments
///
/// * `value` - The computed value, or `None` when inputs were invalid
/// * `decimals` - Fixed number of decimal places, or `None` for automatic
///
/// # Examples
///
/// ```
/// use quickcalc::domain::{format_number, PLACEHOLDER};
///
/// assert_eq!(format_number(Some(3.14159), Some(3)), "3.142");
/// assert_eq!(format_number(Some(1500.0), None), "1.50e+3");
/// assert_eq!(format_number(Some(0.0), None), "0.00");
/// assert_eq!(format_number(None, None), PLACEHOLDER);
/// ```
pub fn format_number(value: Option<f64>, decimals: Option<usize>) -> String {
    let x = match value {
        Some(x) if x.is_finite() => x,
        _ => return PLACEHOLDER.to_string(),
    };

    if let Some(places) = decimals {
        return to_fixed(x, places);
    }

    let magnitude = x.abs();
    if magnitude >= 1000.0 || (magnitude < 0.01 && x != 0.0) {
        to_exponential(x, 2)
    } else {
        to_fixed(x, 2)
    }
}

/// Renders `value` with exactly `places` decimal places.
pub fn to_fixed(value: f64, places: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let expanded = format!("{:.*}", places + GUARD_DIGITS, value.abs());
    let (head, guard) = expanded.split_at(expanded.len() - GUARD_DIGITS);

    let mut digits = head.trim_end_matches('.').to_string();
    if guard.as_bytes()[0] >= b'5' {
        digits = increment_decimal(&digits);
    }

    format!("{sign}{digits}")
}

/// Renders `value` in scientific notation with `places` fractional mantissa
/// digits, e.g. `1.50e+3` or `-5.00e-3`.
pub fn to_exponential(value: f64, places: usize) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let expanded = format!("{:.*e}", places + GUARD_DIGITS, value.abs());
    let (mantissa, exponent) = match expanded.split_once('e') {
        Some(parts) => parts,
        None => return PLACEHOLDER.to_string(),
    };
    let mut exponent: i32 = exponent.parse().unwrap_or(0);
    let (head, guard) = mantissa.split_at(mantissa.len() - GUARD_DIGITS);

    let mut digits = head.trim_end_matches('.').to_string();
    if guard.as_bytes()[0] >= b'5' {
        digits = increment_decimal(&digits);
        // 9.99 rounds to 10.00; renormalise to 1.00 and bump the exponent
        if digits.starts_with("10") {
            digits = shift_carry(&digits);
            exponent += 1;
        }
    }

    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{digits}e{exponent_sign}{}", exponent.abs())
}

/// Adds one unit in the last place to a non-negative decimal string.
fn increment_decimal(digits: &str) -> String {
    let mut bytes = digits.as_bytes().to_vec();
    let mut index = bytes.len();
    loop {
        if index == 0 {
            bytes.insert(0, b'1');
            break;
        }
        index -= 1;
        match bytes[index] {
            b'.' => continue,
            b'9' => bytes[index] = b'0',
            digit => {
                bytes[index] = digit + 1;
                break;
            }
        }
    }
    String::from_utf8(bytes).unwrap_or_default()
}

/// Turns a mantissa of the form `10.00` into `1.00`, keeping its width.
fn shift_carry(digits: &str) -> String {
    let fraction_len = digits.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
    if fraction_len == 0 {
        "1".to_string()
    } else {
        format!("1.{}", "0".repeat(fraction_len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_for_undefined() {
        assert_eq!(format_number(None, None), PLACEHOLDER);
        assert_eq!(format_number(Some(f64::NAN), None), PLACEHOLDER);
        assert_eq!(format_number(Some(f64::NAN), Some(3)), PLACEHOLDER);
        assert_eq!(format_number(Some(f64::INFINITY), Some(2)), PLACEHOLDER);
        assert_eq!(format_number(Some(f64::NEG_INFINITY), None), PLACEHOLDER);
    }

    #[test]
    fn test_automatic_fixed_range() {
        assert_eq!(format_number(Some(0.0), None), "0.00");
        assert_eq!(format_number(Some(1.0), None), "1.00");
        assert_eq!(format_number(Some(999.994), None), "999.99");
        assert_eq!(format_number(Some(0.01), None), "0.01");
        assert_eq!(format_number(Some(-12.346), None), "-12.35");
    }

    #[test]
    fn test_automatic_scientific_range() {
        assert_eq!(format_number(Some(1500.0), None), "1.50e+3");
        assert_eq!(format_number(Some(1000.0), None), "1.00e+3");
        assert_eq!(format_number(Some(0.005), None), "5.00e-3");
        assert_eq!(format_number(Some(-2_000_000.0), None), "-2.00e+6");
        assert_eq!(format_number(Some(0.000123), None), "1.23e-4");
    }

    #[test]
    fn test_explicit_precision_ignores_magnitude() {
        assert_eq!(format_number(Some(1500.0), Some(3)), "1500.000");
        assert_eq!(format_number(Some(0.005), Some(3)), "0.005");
        assert_eq!(format_number(Some(10000.4), Some(0)), "10000");
        assert_eq!(format_number(Some(2.0 / 3.0), Some(4)), "0.6667");
    }

    #[test]
    fn test_fixed_rounds_half_up() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.5, 0), "1");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        // 1.005 is stored slightly below the tie
        assert_eq!(to_fixed(1.005, 2), "1.00");
    }

    #[test]
    fn test_fixed_carries() {
        assert_eq!(to_fixed(9.999, 2), "10.00");
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(0.0, 0), "0");
    }

    #[test]
    fn test_fixed_keeps_negative_sign_at_zero() {
        assert_eq!(to_fixed(-0.001, 2), "-0.00");
        assert_eq!(to_fixed(-0.0, 2), "0.00");
    }

    #[test]
    fn test_exponential_carry_renormalises() {
        assert_eq!(to_exponential(9999.0, 2), "1.00e+4");
        assert_eq!(to_exponential(0.009999, 2), "1.00e-2");
        assert_eq!(to_exponential(1.0, 2), "1.00e+0");
        assert_eq!(to_exponential(1.125, 2), "1.13e+0");
    }
}
