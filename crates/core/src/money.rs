//! Currency formatting for alert messages and health-score details.
//!
//! Amounts are dollars held as `f64`. The sign is kept after the currency
//! symbol, so `-50.0` renders as `$-50.00`.

/// Format with two decimals and no digit grouping, e.g. `$1234.50`.
pub fn format_money(amount: f64) -> String {
    format!("${amount:.2}")
}

/// Format with two decimals and comma thousands separators, e.g. `$1,234.50`.
pub fn format_money_grouped(amount: f64) -> String {
    let fixed = format!("{:.2}", amount.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if amount < 0.0 { "-" } else { "" };
    format!("${sign}{grouped}.{cents}")
}
