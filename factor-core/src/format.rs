//! Numeric formatting for the result tables. The rules are golden: fixed
//! precision for statistics and coefficients, and a `toExponential`-style
//! rendering for p-values above the display floor.

/// Threshold below which a p-value renders as the literal `< 0.0001`.
const P_VALUE_FLOOR: f64 = 1e-4;

/// Summary statistics and t-statistics: fixed 4 decimals.
pub fn fmt_stat(value: f64) -> String {
    format!("{value:.4}")
}

/// Coefficients and standard errors: fixed 6 decimals.
pub fn fmt_coefficient(value: f64) -> String {
    format!("{value:.6}")
}

/// P-values: the literal floor below 0.0001, scientific notation at four
/// fractional digits otherwise.
pub fn fmt_p_value(p: f64) -> String {
    if p < P_VALUE_FLOOR {
        "< 0.0001".to_string()
    } else {
        to_exponential(p, 4)
    }
}

/// Scientific notation matching JS `Number.prototype.toExponential`:
/// fixed fractional digits and an explicitly signed exponent
/// (`3.0000e-5`, `1.0000e+0`).
pub fn to_exponential(value: f64, digits: usize) -> String {
    if value == 0.0 {
        return format!("{:.digits$}e+0", 0.0);
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();
    let mut exponent = magnitude.log10().floor() as i32;
    let mut mantissa = magnitude / 10f64.powi(exponent);
    // Rounding the mantissa can carry it to 10.0; renormalize.
    let scale = 10f64.powi(digits as i32);
    mantissa = (mantissa * scale).round() / scale;
    if mantissa >= 10.0 {
        mantissa /= 10.0;
        exponent += 1;
    }
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!(
        "{sign}{mantissa:.digits$}e{exponent_sign}{}",
        exponent.abs()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_render_to_four_decimals() {
        assert_eq!(fmt_stat(0.8234), "0.8234");
        assert_eq!(fmt_stat(62.3), "62.3000");
        assert_eq!(fmt_stat(-1.5), "-1.5000");
    }

    #[test]
    fn coefficients_render_to_six_decimals() {
        assert_eq!(fmt_coefficient(0.912345), "0.912345");
        assert_eq!(fmt_coefficient(-0.5), "-0.500000");
        assert_eq!(fmt_coefficient(0.000123), "0.000123");
    }

    #[test]
    fn tiny_p_values_render_as_floor_literal() {
        assert_eq!(fmt_p_value(0.00003), "< 0.0001");
        assert_eq!(fmt_p_value(0.0), "< 0.0001");
        assert_eq!(fmt_p_value(0.000099999), "< 0.0001");
    }

    #[test]
    fn larger_p_values_render_scientific() {
        assert_eq!(fmt_p_value(0.0234), "2.3400e-2");
        assert_eq!(fmt_p_value(0.5), "5.0000e-1");
        assert_eq!(fmt_p_value(1.0), "1.0000e+0");
        assert_eq!(fmt_p_value(0.0001), "1.0000e-4");
    }

    #[test]
    fn exponential_matches_js_rendering() {
        assert_eq!(to_exponential(0.00003, 4), "3.0000e-5");
        assert_eq!(to_exponential(12345.0, 2), "1.23e+4");
        assert_eq!(to_exponential(-0.042, 3), "-4.200e-2");
        assert_eq!(to_exponential(0.0, 4), "0.0000e+0");
    }

    #[test]
    fn exponential_mantissa_carry() {
        assert_eq!(to_exponential(9.99999, 2), "1.00e+1");
        assert_eq!(to_exponential(0.0999999, 3), "1.000e-1");
    }
}
