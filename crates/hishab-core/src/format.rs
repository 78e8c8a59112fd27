//! Display formatting helpers for amounts.
//!
//! Numbers group bn-BD style: the last three digits form one group, every
//! group above it has two digits (`12,34,567`). Pure string rendering only;
//! digit-shape localization stays in the embedding view layer.

/// Renders an amount with bn-BD thousands separators. Whole amounts drop
/// the fraction; anything else keeps two decimal places.
pub fn format_number(value: f64) -> String {
    let negative = value < 0.0;
    let cents = (value.abs() * 100.0).round() as u64;
    let whole = cents / 100;
    let fraction = cents % 100;

    let grouped = group_digits(whole);
    let body = if fraction == 0 {
        grouped
    } else {
        format!("{grouped}.{fraction:02}")
    };
    if negative {
        format!("-{body}")
    } else {
        body
    }
}

/// Renders an amount followed by a currency label, e.g. `70,000 টাকা`.
pub fn format_currency(value: f64, unit: &str) -> String {
    format!("{} {}", format_number(value), unit)
}

fn group_digits(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);
    for (position, digit) in head.chars().enumerate() {
        let remaining = head.len() - position;
        if position > 0 && remaining % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped.push(',');
    grouped.push_str(tail);
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_last_three_then_pairs() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(70000.0), "70,000");
        assert_eq!(format_number(123456.0), "1,23,456");
        assert_eq!(format_number(1234567.0), "12,34,567");
        assert_eq!(format_number(123456789.0), "12,34,56,789");
    }

    #[test]
    fn keeps_two_decimals_for_fractional_amounts() {
        assert_eq!(format_number(1234.5), "1,234.50");
        assert_eq!(format_number(0.25), "0.25");
    }

    #[test]
    fn renders_negative_balances() {
        assert_eq!(format_number(-67800.0), "-67,800");
    }

    #[test]
    fn appends_the_currency_label() {
        assert_eq!(format_currency(70000.0, "টাকা"), "70,000 টাকা");
    }
}
