//! # Validation Utilities
//!
//! Input checks run by the wallet forms before any store operation is
//! attempted. Every error is the exact message rendered inline next to the
//! offending field.

use shared::utils::format_amount;

/// Recovery phrase lengths accepted on import.
pub const VALID_PHRASE_LENGTHS: &[usize] = &[12, 24];

/// Shortest private key string accepted on import.
pub const MIN_PRIVATE_KEY_LEN: usize = 40;

/// Shortest recipient address accepted by the send form.
pub const MIN_RECIPIENT_LEN: usize = 32;

/// Validate that a wallet name is not blank.
pub fn validate_wallet_name(name: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        Err("Please enter a name for your wallet.".to_string())
    } else {
        Ok(())
    }
}

/// Split raw phrase text into words on any run of whitespace.
pub fn parse_seed_phrase(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Validate the shape of a recovery phrase: 12 or 24 non-empty words.
///
/// Word-list membership and checksum are not checked.
pub fn validate_seed_phrase(words: &[String]) -> Result<(), String> {
    if !VALID_PHRASE_LENGTHS.contains(&words.len()) {
        return Err("Recovery phrase must contain exactly 12 or 24 words.".to_string());
    }
    if words.iter().any(|w| w.trim().is_empty()) {
        return Err("Recovery phrase contains empty words. Please check your input.".to_string());
    }
    Ok(())
}

/// Validate a private key string by length only.
pub fn validate_private_key(key: &str) -> Result<(), String> {
    if key.trim().len() < MIN_PRIVATE_KEY_LEN {
        Err("Please enter a valid private key.".to_string())
    } else {
        Ok(())
    }
}

/// Validate the send form and return the parsed amount.
///
/// `amount` is the raw text from the amount field; grouping commas are
/// ignored. `max_amount` is the selected token's balance.
pub fn validate_send_form(
    recipient: &str,
    token_symbol: &str,
    amount: &str,
    max_amount: f64,
) -> Result<f64, String> {
    if recipient.trim().len() < MIN_RECIPIENT_LEN {
        return Err("Please enter a valid recipient address.".to_string());
    }
    if token_symbol.trim().is_empty() {
        return Err("Please select a token to send.".to_string());
    }

    let cleaned = amount.replace(',', "");
    let parsed = match cleaned.trim() {
        "" => 0.0,
        text => text.parse::<f64>().unwrap_or(f64::NAN),
    };
    if !parsed.is_finite() || parsed <= 0.0 {
        return Err("Please enter an amount greater than zero.".to_string());
    }
    if parsed > max_amount {
        return Err(format!(
            "Insufficient balance. Max: {} {}",
            format_amount(max_amount, 4),
            token_symbol
        ));
    }

    Ok(parsed)
}
