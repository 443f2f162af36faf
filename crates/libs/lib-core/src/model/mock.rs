//! # Mock Wallet Data
//!
//! Placeholder data behind every wallet: random addresses and recovery
//! phrases, the starter token set, the seed transaction log and the DApp
//! catalog. None of it is cryptographically meaningful. Addresses are random
//! bytes in base58 and phrases are drawn from a short word list.

use crate::{AppError, Result};
use chrono::Duration;
use lib_utils::time::millis_ago;
use rand::rngs::OsRng;
use rand::RngCore;
use shared::dto::dapp::DApp;
use shared::dto::wallet::{Token, Transaction, TransactionStatus, TransactionType};

pub const DEFAULT_WALLET_NAME: &str = "My Wallet";
pub const DEFAULT_IMPORTED_WALLET_NAME: &str = "Imported Wallet";

/// Words in a generated recovery phrase.
pub const SEED_PHRASE_WORDS: usize = 12;

const ADDRESS_BYTES: usize = 32;

/// Leading slice of the BIP39 English list.
pub const WORD_LIST: &[&str] = &[
    "abandon", "ability", "able", "about", "above", "absent", "absorb", "abstract",
    "absurd", "abuse", "access", "accident", "account", "accuse", "achieve", "acid",
    "acoustic", "acquire", "across", "act", "action", "actor", "actual", "adapt",
    "add", "addict", "address", "adjust", "admit", "adult", "advance", "advice",
    "aerobic", "affair", "afford", "afraid", "again", "age", "agent", "agree",
    "ahead", "aim", "air", "airport", "aisle", "alarm", "album", "alcohol", "alert",
];

/// Source of random bytes for generated addresses and phrases.
pub trait EntropySource: Send + Sync {
    fn fill(&self, buf: &mut [u8]) -> std::result::Result<(), String>;
}

/// Operating-system randomness.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsEntropy;

impl EntropySource for OsEntropy {
    fn fill(&self, buf: &mut [u8]) -> std::result::Result<(), String> {
        OsRng.try_fill_bytes(buf).map_err(|e| e.to_string())
    }
}

/// Random base58 address.
pub fn generate_wallet_address(entropy: &dyn EntropySource) -> Result<String> {
    let mut bytes = [0u8; ADDRESS_BYTES];
    entropy
        .fill(&mut bytes)
        .map_err(|e| AppError::Generation(format!("Address generation failed: {}", e)))?;
    Ok(bs58::encode(bytes).into_string())
}

/// Random 12-word phrase from [`WORD_LIST`]. Words may repeat.
pub fn generate_seed_phrase(entropy: &dyn EntropySource) -> Result<Vec<String>> {
    let mut bytes = [0u8; SEED_PHRASE_WORDS * 2];
    entropy
        .fill(&mut bytes)
        .map_err(|e| AppError::Generation(format!("Seed phrase generation failed: {}", e)))?;

    Ok(bytes
        .chunks_exact(2)
        .map(|pair| {
            let index = u16::from_le_bytes([pair[0], pair[1]]) as usize % WORD_LIST.len();
            WORD_LIST[index].to_string()
        })
        .collect())
}

#[allow(clippy::too_many_arguments)]
fn token(
    id: &str,
    name: &str,
    symbol: &str,
    balance: f64,
    price_usd: f64,
    price_history: &[f64],
    mint_address: &str,
    coingecko_id: &str,
) -> Token {
    Token {
        id: id.to_string(),
        name: name.to_string(),
        symbol: symbol.to_string(),
        icon_url: String::new(),
        balance,
        price_usd,
        price_history: price_history.to_vec(),
        mint_address: mint_address.to_string(),
        coingecko_id: Some(coingecko_id.to_string()),
    }
}

/// Token set every new wallet starts with.
pub fn starter_tokens() -> Vec<Token> {
    vec![
        token(
            "1",
            "Solana",
            "SOL",
            3.14159,
            110.0,
            &[102.0, 104.0, 99.0, 105.0, 110.0, 108.0, 112.0, 110.0, 114.0, 116.0, 110.0],
            "So11111111111111111111111111111111111111112",
            "solana",
        ),
        token(
            "2",
            "USD Coin",
            "USDC",
            250.75,
            1.0,
            &[1.0; 11],
            "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v",
            "usd-coin",
        ),
        token(
            "3",
            "Serum",
            "SRM",
            153.25,
            0.16,
            &[0.15, 0.14, 0.16, 0.17, 0.16, 0.17, 0.18, 0.17, 0.16, 0.16, 0.16],
            "SRMuApVNdxXokk5GT7XD5cUUgXMBCoAz2LHeuAoKWRt",
            "serum",
        ),
        token(
            "4",
            "Raydium",
            "RAY",
            42.5,
            0.4,
            &[0.38, 0.39, 0.41, 0.4, 0.42, 0.41, 0.4, 0.39, 0.4, 0.4, 0.4],
            "4k3Dyjzvzp8eMZWUXbBCjEvwSkkk59S5iCNLY3QrkX6R",
            "raydium",
        ),
    ]
}

/// Log shown before any transaction has been made, timestamped relative to now.
pub fn seed_transactions() -> Vec<Transaction> {
    use TransactionStatus::*;
    use TransactionType::*;
    const NULL_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

    let tx = |id: &str, kind, status, amount, token: &str, ago: Duration, address: &str| Transaction {
        id: id.to_string(),
        kind,
        status,
        amount,
        token: token.to_string(),
        timestamp: millis_ago(ago),
        address: address.to_string(),
        fee: None,
    };

    vec![
        tx("1", Receive, Success, 1.5, "SOL", Duration::hours(2), "0x123456789abcdef123456789abcdef123456789a"),
        tx("2", Send, Success, 0.5, "SOL", Duration::days(1), "0xabcdef123456789abcdef123456789abcdef1234"),
        tx("3", Swap, Success, 10.0, "USDC", Duration::days(2), NULL_ADDRESS),
        tx("4", Stake, Pending, 0.2, "SOL", Duration::minutes(10), NULL_ADDRESS),
        tx("5", Receive, Success, 25.0, "USDC", Duration::days(3), "0x9876543210fedcba9876543210fedcba98765432"),
        tx("6", Send, Failed, 0.1, "SOL", Duration::minutes(30), "0xfedcba9876543210fedcba9876543210fedcba98"),
    ]
}

/// The fixed DApp catalog.
pub fn dapp_catalog() -> Vec<DApp> {
    [
        ("1", "Magic Eden", "NFT marketplace for buying, selling, and creating digital collectibles", "https://magiceden.io", "NFT"),
        ("2", "Jupiter Swap", "Leading Solana DEX aggregator for best swap rates", "https://jup.ag", "DEX"),
        ("3", "Orca", "User-friendly decentralized exchange for Solana assets", "https://www.orca.so", "DEX"),
        ("4", "Marinade Finance", "Liquid staking protocol for earning passive yield on Solana", "https://marinade.finance", "Staking"),
        ("5", "Solend", "Lending and borrowing protocol for Solana assets", "https://solend.fi", "Lending"),
        ("6", "Step Finance", "Portfolio dashboard for tracking and managing Solana assets", "https://step.finance", "Analytics"),
        ("7", "Mango Markets", "Decentralized trading platform with perpetual futures", "https://mango.markets", "Trading"),
        ("8", "Saber", "Stablecoin exchange on Solana with low fees and slippage", "https://saber.so", "Stablecoins"),
    ]
    .into_iter()
    .map(|(id, name, description, site, category)| DApp {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        icon_url: format!("{}/favicon.ico", site),
        category: category.to_string(),
        url: format!("{}/", site),
    })
    .collect()
}
