/// Renders an amount the way every page shows money: `TZS 1,234.56`.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (sign, unsigned) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("TZS {sign}{grouped}.{fraction}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "TZS 0.00");
        assert_eq!(format_currency(1100.0), "TZS 1,100.00");
        assert_eq!(format_currency(999.999), "TZS 1,000.00");
        assert_eq!(format_currency(1234567.891), "TZS 1,234,567.89");
        assert_eq!(format_currency(123.4), "TZS 123.40");
    }

    #[test]
    fn test_format_negative_currency() {
        assert_eq!(format_currency(-2500.5), "TZS -2,500.50");
    }
}
