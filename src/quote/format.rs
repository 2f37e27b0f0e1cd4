//! Display formatting for quoted amounts

/// Display currency
pub const CURRENCY: &str = "XOF";

/// Shown in place of a payment when the input cannot be quoted
pub const NOT_APPLICABLE: &str = "N/A";

/// Group digits by thousands with a space: 13213 -> "13 213"
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);

    if value < 0 {
        grouped.push('-');
    }

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(ch);
    }

    grouped
}

/// Grouped amount with currency suffix: "13 213 XOF"
pub fn format_amount(value: i64) -> String {
    format!("{} {}", group_thousands(value), CURRENCY)
}
