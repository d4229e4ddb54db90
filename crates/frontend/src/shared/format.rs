//! Number formatting in the fr-FR conventions.

/// Thousands separator used by fr-FR (narrow no-break space)
pub const GROUP_SEPARATOR: char = '\u{202f}';

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    let len = digits.chars().count();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(c);
    }
    out
}

/// Formats `value` with exactly `decimals` fraction digits, grouped integer part
/// and a decimal comma.
pub fn format_fixed(value: f64, decimals: usize) -> String {
    let raw = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match raw.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (raw.as_str(), None),
    };
    let mut out = String::new();
    // "-0,00" is never shown
    if value < 0.0 && raw.chars().any(|c| c.is_ascii_digit() && c != '0') {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push(',');
        out.push_str(frac);
    }
    out
}

/// "1 234,56 €"
pub fn format_currency(amount: f64) -> String {
    format_currency_in(amount, "EUR")
}

pub fn format_currency_in(amount: f64, currency: &str) -> String {
    let symbol = match currency {
        "EUR" => "€",
        "USD" => "$US",
        "GBP" => "£GB",
        other => other,
    };
    format!("{}\u{a0}{}", format_fixed(amount, 2), symbol)
}

/// Up to three fraction digits, trailing zeros dropped
pub fn format_number(value: f64) -> String {
    let fixed = format_fixed(value, 3);
    match fixed.split_once(',') {
        Some((int_part, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int_part.to_string()
            } else {
                format!("{int_part},{frac}")
            }
        }
        None => fixed,
    }
}

/// Ratio to percentage: 0.125 with 1 decimal gives "12.5%"
pub fn format_percentage(ratio: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, ratio * 100.0)
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut index = ((bytes as f64).ln() / 1024f64.ln()).floor() as usize;
    index = index.min(UNITS.len() - 1);
    let scaled = bytes as f64 / 1024f64.powi(index as i32);
    let text = format!("{scaled:.2}");
    let text = text.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", text, UNITS[index])
}

#[cfg(test)]
mod tests {
    use super::*;

    const NNBSP: char = '\u{202f}';

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(1234.56), format!("1{NNBSP}234,56\u{a0}€"));
        assert_eq!(format_currency(0.0), "0,00\u{a0}€");
        assert_eq!(
            format_currency(-1_234_567.891),
            format!("-1{NNBSP}234{NNBSP}567,89\u{a0}€")
        );
        assert_eq!(format_currency(999.0), "999,00\u{a0}€");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_fixed(-0.001, 2), "0,00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(2847.0), format!("2{NNBSP}847"));
        assert_eq!(format_number(3.14159), "3,142");
        assert_eq!(format_number(0.5), "0,5");
    }

    #[test]
    fn test_format_percentage() {
        assert_eq!(format_percentage(0.125, 1), "12.5%");
        assert_eq!(format_percentage(1.0, 0), "100%");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
