//! Display formatting shared by every report.
//!
//! - [`format_number`]: two decimals at most, thousands grouped, trailing zeros dropped
//! - [`format_p_value`]: scientific notation with four fractional digits
//! - [`format_correlation`]: three fixed decimals, `N/A` for undefined values

/// Formats a statistic for display.
///
/// The value is rounded to two decimals, the integer part is grouped by
/// thousands with `,`, and trailing fractional zeros are dropped. Infinities
/// render as `∞`/`-∞` and `NaN` as `NaN`.
///
/// # Examples
///
/// ```
/// use stratlab_stats::format::format_number;
///
/// assert_eq!(format_number(1234.5), "1,234.5");
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(-9876543.216), "-9,876,543.22");
/// assert_eq!(format_number(f64::INFINITY), "∞");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_owned();
    }

    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + fixed.len() / 3 + 1);
    // Values that round to zero lose their sign.
    if value < 0.0 && (int_part != "0" || !frac_part.is_empty()) {
        out.push('-');
    }
    let len = int_part.len();
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Formats a p-value in scientific notation with four fractional digits and
/// an explicitly signed exponent.
///
/// ```
/// use stratlab_stats::format::format_p_value;
///
/// assert_eq!(format_p_value(0.5), "5.0000e-1");
/// assert_eq!(format_p_value(0.0), "0.0000e+0");
/// assert_eq!(format_p_value(f64::NAN), "NaN");
/// ```
#[must_use]
pub fn format_p_value(p_value: f64) -> String {
    let formatted = format!("{p_value:.4e}");
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => formatted,
    }
}

/// Formats a correlation coefficient with three decimals.
///
/// Undefined correlations (a constant group) render as `N/A`.
///
/// ```
/// use stratlab_stats::format::format_correlation;
///
/// assert_eq!(format_correlation(0.98765), "0.988");
/// assert_eq!(format_correlation(-1.0), "-1.000");
/// assert_eq!(format_correlation(f64::NAN), "N/A");
/// ```
#[must_use]
pub fn format_correlation(value: f64) -> String {
    if value.is_nan() {
        "N/A".to_owned()
    } else if value.is_infinite() {
        format_number(value)
    } else {
        format!("{value:.3}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_grouping() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1000.0), "1,000");
        assert_eq!(format_number(123_456.0), "123,456");
        assert_eq!(format_number(1_234_567.891), "1,234,567.89");
    }

    #[test]
    fn test_format_number_rounding() {
        assert_eq!(format_number(2.999), "3");
        assert_eq!(format_number(0.1), "0.1");
        assert_eq!(format_number(0.004), "0");
        assert_eq!(format_number(-0.004), "0");
        assert_eq!(format_number(-12.3), "-12.3");
    }

    #[test]
    fn test_format_number_non_finite() {
        assert_eq!(format_number(f64::NEG_INFINITY), "-∞");
        assert_eq!(format_number(f64::NAN), "NaN");
    }

    #[test]
    fn test_format_p_value_exponents() {
        assert_eq!(format_p_value(1.0), "1.0000e+0");
        assert_eq!(format_p_value(0.012_345_67), "1.2346e-2");
        assert_eq!(format_p_value(1.0 / (1.0 + 13.5_f64.exp())), "1.3710e-6");
    }
}
