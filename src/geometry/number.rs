//! Number parsing and formatting shared by the geometry code
//!
//! SVG attribute values separate numbers by any run of whitespace and commas.
//! Output numbers are printed the way hand-written SVG looks: no trailing
//! zeros, no exponent, and never `-0`.

/// Significant digits kept when printing a coordinate
const SIGNIFICANT_DIGITS: i32 = 14;

/// Print a number with up to 14 significant digits and no trailing zeros
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (SIGNIFICANT_DIGITS - 1 - magnitude).clamp(0, 15) as usize;
    let mut text = format!("{value:.decimals$}");
    if text.contains('.') {
        let trimmed_len = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed_len);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    text
}

/// Round half away from zero to the given number of decimal digits
pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

/// Collapse runs of whitespace and commas into single spaces and trim
pub fn normalize_separators(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parse a single number, rejecting `inf`, `NaN` and overflowing literals
pub fn parse_finite(text: &str) -> Option<f64> {
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Split a whitespace/comma separated list into numbers
///
/// Returns the first token that is not a number as the error.
pub fn parse_number_list(text: &str) -> Result<Vec<f64>, String> {
    text.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| parse_finite(token).ok_or_else(|| token.to_string()))
        .collect()
}

/// Parse the numeric prefix of a value such as `12.5px` or `100%`
pub fn parse_leading_number(text: &str) -> Option<f64> {
    let text = text.trim();
    let bytes = text.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end += 1;
    }
    let mut seen_digit = false;
    let mut seen_dot = false;
    while let Some(&byte) = bytes.get(end) {
        match byte {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return None;
    }
    parse_finite(&text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integers_print_without_fraction() {
        assert_eq!(format_number(20.0), "20");
        assert_eq!(format_number(-448.0), "-448");
        assert_eq!(format_number(-0.0), "0");
    }

    #[test]
    fn float_noise_is_trimmed() {
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(5.5228475), "5.5228475");
        assert_eq!(format_number(-1e-20), "0");
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.5, 0), 3.0);
        assert_eq!(round_to(-2.5, 0), -3.0);
        assert_eq!(round_to(1.2345, 2), 1.23);
    }

    #[test]
    fn separators_collapse() {
        assert_eq!(normalize_separators("  0, 0 ,\n10\t20  "), "0 0 10 20");
        assert_eq!(parse_number_list("1,2 3").unwrap(), vec![1.0, 2.0, 3.0]);
        assert_eq!(parse_number_list("1 two").unwrap_err(), "two");
    }

    #[test]
    fn leading_numbers() {
        assert_eq!(parse_leading_number("12.5mm"), Some(12.5));
        assert_eq!(parse_leading_number(" 100% "), Some(100.0));
        assert_eq!(parse_leading_number("-3"), Some(-3.0));
        assert_eq!(parse_leading_number("auto"), None);
    }

    #[test]
    fn non_finite_numbers_are_rejected() {
        assert_eq!(parse_finite("1.5"), Some(1.5));
        assert_eq!(parse_finite("inf"), None);
        assert_eq!(parse_finite("-Infinity"), None);
        assert_eq!(parse_finite("NaN"), None);
        assert_eq!(parse_finite("1e400"), None);
        assert_eq!(parse_number_list("0 0 inf 10").unwrap_err(), "inf");
        assert_eq!(parse_number_list("1,nan").unwrap_err(), "nan");
        assert_eq!(parse_leading_number(&"9".repeat(400)), None);
    }
}
