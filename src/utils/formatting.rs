/// Formats `value` as `m × 10^e` with `precision` mantissa digits.
pub fn format_scientific(value: f64, precision: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return format!("{:.precision$}", value, precision = precision);
    }

    let mut exponent = value.abs().log10().floor() as i32;
    let mut mantissa = value / 10f64.powi(exponent);
    // Rounding can carry the mantissa to 10.
    if format!("{:.precision$}", mantissa.abs(), precision = precision).starts_with("10") {
        exponent += 1;
        mantissa = value / 10f64.powi(exponent);
    }

    format!(
        "{:.precision$} × 10^{}",
        mantissa,
        exponent,
        precision = precision
    )
}

/// Plain decimal for everyday magnitudes, scientific notation otherwise.
pub fn format_quantity(value: f64) -> String {
    let magnitude = value.abs();
    if value == 0.0 || (1e-2..1e6).contains(&magnitude) {
        format!("{:.3}", value)
    } else {
        format_scientific(value, 3)
    }
}

/// Markdown table with a header row.
pub fn markdown_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let header_row = format!("| {} |\n", headers.join(" | "));
    let separator_row = format!("{}|\n", "|---".repeat(headers.len()));
    let data_rows: String = rows
        .iter()
        .map(|row| format!("| {} |\n", row.join(" | ")))
        .collect();

    header_row + &separator_row + &data_rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_scientific() {
        assert_eq!(format_scientific(7.946e-4, 3), "7.946 × 10^-4");
        assert_eq!(format_scientific(-1.8e7, 2), "-1.80 × 10^7");
        assert_eq!(format_scientific(0.0, 2), "0.00");
    }

    #[test]
    fn test_format_scientific_mantissa_carry() {
        assert_eq!(format_scientific(9.9996e-3, 3), "1.000 × 10^-2");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(30.8812), "30.881");
        assert_eq!(format_quantity(0.0), "0.000");
        assert_eq!(format_quantity(7.946e-4), "7.946 × 10^-4");
        assert_eq!(format_quantity(1.8e7), "1.800 × 10^7");
    }

    #[test]
    fn test_markdown_table() {
        let table = markdown_table(
            &["Quantity", "Value"],
            &[vec!["T".to_string(), "3081.2".to_string()]],
        );

        assert_eq!(table, "| Quantity | Value |\n|---|---|\n| T | 3081.2 |\n");
    }
}
