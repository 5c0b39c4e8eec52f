//! Display formatting for prices, ratios and review data.

use crate::data::ErrorPercent;

/// `1234.5` → `"₹ 1,234.50"`.
pub fn currency(value: f64, symbol: &str) -> String {
    format!("{symbol} {}", thousands(value, 2))
}

/// Fraction as a percentage with thousands separators, or `n/a`.
pub fn percent(value: ErrorPercent) -> String {
    match value {
        ErrorPercent::Defined(v) => format!("{}%", thousands(v * 100.0, 2)),
        ErrorPercent::Undefined => "n/a".to_string(),
    }
}

pub fn rating(value: f64) -> String {
    format!("{value:.2}")
}

pub fn sentiment(value: f64) -> String {
    format!("{value:.3}")
}

pub fn count(value: u64) -> String {
    let digits = value.to_string();
    group_digits(&digits)
}

/// Fixed `decimals`, with `,` between groups of three integer digits.
pub fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::new();
    // "-0.00" reads badly; only keep the sign when something non-zero is shown.
    if value < 0.0 && formatted.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_digits(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_digits(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands() {
        assert_eq!(thousands(1234567.891, 2), "1,234,567.89");
        assert_eq!(thousands(999.0, 2), "999.00");
        assert_eq!(thousands(1000.0, 0), "1,000");
        assert_eq!(thousands(-2500.5, 1), "-2,500.5");
        assert_eq!(thousands(-0.001, 2), "0.00");
    }

    #[test]
    fn currency_prefixes_symbol() {
        assert_eq!(currency(1234.5, "₹"), "₹ 1,234.50");
        assert_eq!(currency(0.0, "$"), "$ 0.00");
    }

    #[test]
    fn percent_distinguishes_undefined_from_zero() {
        assert_eq!(percent(ErrorPercent::Defined(0.2)), "20.00%");
        assert_eq!(percent(ErrorPercent::Defined(0.0)), "0.00%");
        assert_eq!(percent(ErrorPercent::Undefined), "n/a");
    }

    #[test]
    fn review_fields() {
        assert_eq!(rating(4.0), "4.00");
        assert_eq!(sentiment(0.12345), "0.123");
        assert_eq!(count(24269), "24,269");
        assert_eq!(count(7), "7");
    }
}
