//! # Wallet Data Transfer Objects
//!
//! Wallet, token and transaction records shared by the backend store, the
//! persisted record and any frontend consuming the wallet API.
//!
//! ## Wire Format
//!
//! These types use **camelCase** field names so the persisted record stays
//! readable by (and migratable from) the browser client that first wrote it:
//!
//! ```json
//! {
//!   "id": "1",
//!   "name": "Solana",
//!   "symbol": "SOL",
//!   "iconUrl": "",
//!   "balance": 3.14159,
//!   "priceUsd": 110.0,
//!   "priceHistory": [102.0, 104.0, 99.0],
//!   "mintAddress": "So11111111111111111111111111111111111111112",
//!   "coingeckoId": "solana"
//! }
//! ```
//!
//! A token's USD value is **not** part of the wire format. It is derived on
//! read with [`Token::usd_value`], so it can never disagree with the balance
//! and unit price it is computed from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Solana cluster the wallet is pointed at.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    #[default]
    Mainnet,
    Devnet,
}

impl Network {
    /// Display label used by the settings screen.
    pub fn label(&self) -> &'static str {
        match self {
            Network::Mainnet => "Mainnet",
            Network::Devnet => "Devnet",
        }
    }

    /// The other network. The settings toggle flips between the two.
    pub fn toggled(&self) -> Network {
        match self {
            Network::Mainnet => Network::Devnet,
            Network::Devnet => Network::Mainnet,
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Network::Mainnet => write!(f, "mainnet"),
            Network::Devnet => write!(f, "devnet"),
        }
    }
}

impl FromStr for Network {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mainnet" | "mainnet-beta" => Ok(Network::Mainnet),
            "devnet" => Ok(Network::Devnet),
            other => Err(format!("Unknown network: {}", other)),
        }
    }
}

/// A token balance held by the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub icon_url: String,

    /// Amount held, in whole token units. Never negative.
    pub balance: f64,

    /// Last-known USD unit price.
    ///
    /// Prices are not durable: a rehydrated token reads `0.0` here until a
    /// fresh price is applied.
    #[serde(default)]
    pub price_usd: f64,

    /// Short historical price series, oldest first.
    #[serde(default)]
    pub price_history: Vec<f64>,

    /// On-chain mint, used for the spot-price lookup.
    pub mint_address: String,

    /// CoinGecko catalog id, used for the market-chart lookup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coingecko_id: Option<String>,
}

impl Token {
    /// USD value of the holding (`balance * price_usd`).
    pub fn usd_value(&self) -> f64 {
        self.balance * self.price_usd
    }

    /// Percentage change between the first and last entries of the price history.
    ///
    /// Returns `None` when there is not enough history or the first price is zero.
    pub fn history_change_pct(&self) -> Option<f64> {
        let first = *self.price_history.first()?;
        let last = *self.price_history.last()?;
        if self.price_history.len() < 2 || first == 0.0 {
            return None;
        }
        Some((last - first) / first * 100.0)
    }
}

/// The single active wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    pub id: String,
    pub name: String,
    pub address: String,
    #[serde(default)]
    pub network: Network,
    pub tokens: Vec<Token>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub private_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed_phrase: Option<Vec<String>>,
}

impl Wallet {
    pub fn token(&self, symbol: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.symbol == symbol)
    }

    pub fn token_mut(&mut self, symbol: &str) -> Option<&mut Token> {
        self.tokens.iter_mut().find(|t| t.symbol == symbol)
    }

    /// "Total balance" shown on the wallet header.
    pub fn total_balance_usd(&self) -> f64 {
        crate::utils::total_balance_usd(&self.tokens)
    }
}

/// Kind of wallet activity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Send,
    Receive,
    Swap,
    Stake,
    Unstake,
}

impl TransactionType {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionType::Send => "Sent",
            TransactionType::Receive => "Received",
            TransactionType::Swap => "Swapped",
            TransactionType::Stake => "Staked",
            TransactionType::Unstake => "Unstaked",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Success,
    Pending,
    Failed,
}

/// An entry in the transaction log. Entries are never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub status: TransactionStatus,
    pub amount: f64,
    /// Token symbol, e.g. `"SOL"`.
    pub token: String,
    /// Epoch milliseconds.
    pub timestamp: i64,
    /// Counterparty address.
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee: Option<f64>,
}

/// Point-in-time view of the wallet store, as published to subscribers and
/// returned by `GET /api/wallet`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletSnapshot {
    pub current_wallet: Option<Wallet>,
    pub transactions: Vec<Transaction>,
    pub is_wallet_loading: bool,
    pub has_hydrated: bool,
}

impl WalletSnapshot {
    /// Transactions of one kind, in log order. `None` returns the full log.
    pub fn filter_transactions(&self, kind: Option<TransactionType>) -> Vec<&Transaction> {
        self.transactions
            .iter()
            .filter(|tx| kind.map_or(true, |k| tx.kind == k))
            .collect()
    }
}
