//! # Display Formatting
//!
//! Pure functions turning raw addresses, amounts and timestamps into the
//! strings the wallet screens render.
//!
//! ## Usage
//!
//! ```rust
//! use shared::utils::{format_address, format_amount, format_usd};
//!
//! assert_eq!(format_address("8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL", 4), "8W6Q...JKAL");
//! assert_eq!(format_amount(1234.56789, 4), "1,234.5679");
//! assert_eq!(format_usd(1234.567), "$1,234.57");
//! ```

use crate::dto::wallet::Token;
use chrono::DateTime;

/// Show the first and last `length` characters of an address.
///
/// Empty input yields an empty string. Addresses too short to shorten are
/// returned as-is.
///
/// ```rust
/// use shared::utils::format_address;
///
/// let addr = "8W6QginkhTTxoP2deQjq7rZ9YMwN5FH9JYuLfSKuJKAL";
/// assert_eq!(format_address(addr, 6), "8W6Qgi...KuJKAL");
/// assert_eq!(format_address("short", 4), "short");
/// ```
pub fn format_address(address: &str, length: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= length * 2 {
        return address.to_string();
    }

    let prefix: String = chars[..length].iter().collect();
    let suffix: String = chars[chars.len() - length..].iter().collect();
    format!("{}...{}", prefix, suffix)
}

/// [`format_address`] with the default 4-character ends.
pub fn truncate_address(address: &str) -> String {
    format_address(address, 4)
}

/// Format a token amount with grouping commas and up to `decimals`
/// fraction digits. Trailing zeros are dropped.
///
/// ```rust
/// use shared::utils::format_amount;
///
/// assert_eq!(format_amount(3.14159, 4), "3.1416");
/// assert_eq!(format_amount(250.0, 4), "250");
/// assert_eq!(format_amount(1234567.5, 2), "1,234,567.5");
/// ```
pub fn format_amount(amount: f64, decimals: usize) -> String {
    if !amount.is_finite() {
        return "0".to_string();
    }
    let fixed = format!("{:.prec$}", amount.abs(), prec = decimals);
    let (integer_part, fraction_part) = match fixed.split_once('.') {
        Some((int, frac)) => (int, frac.trim_end_matches('0')),
        None => (fixed.as_str(), ""),
    };

    let negative = amount < 0.0 && (integer_part != "0" || !fraction_part.is_empty());
    let sign = if negative { "-" } else { "" };
    let grouped = group_thousands(integer_part);

    if fraction_part.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{}.{}", sign, grouped, fraction_part)
    }
}

/// Format a USD amount as currency, always with two decimals.
///
/// ```rust
/// use shared::utils::format_usd;
///
/// assert_eq!(format_usd(0.0), "$0.00");
/// assert_eq!(format_usd(-12.5), "-$12.50");
/// assert_eq!(format_usd(f64::NAN), "$0.00");
/// ```
pub fn format_usd(amount: f64) -> String {
    if !amount.is_finite() {
        return "$0.00".to_string();
    }
    let fixed = format!("{:.2}", amount.abs());
    let (integer_part, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if amount < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}${}.{}", sign, group_thousands(integer_part), cents)
}

/// Format epoch milliseconds as a calendar date, e.g. `Jan 5, 2024` (UTC).
pub fn format_date(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

/// Format epoch milliseconds as a 12-hour clock time, e.g. `3:07 PM` (UTC).
pub fn format_time(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%-I:%M %p").to_string())
        .unwrap_or_default()
}

/// Sum of each token's USD value at read time.
pub fn total_balance_usd(tokens: &[Token]) -> f64 {
    tokens.iter().map(Token::usd_value).sum()
}

fn group_thousands(digits: &str) -> String {
    let mut result = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}
