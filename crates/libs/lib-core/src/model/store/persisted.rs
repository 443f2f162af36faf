//! # Persisted Wallet Record
//!
//! The durable subset of the wallet store, `{currentWallet, transactions}`,
//! wrapped in a versioned envelope under [`STORAGE_KEY`]:
//!
//! ```json
//! {
//!   "state": {
//!     "currentWallet": { "id": "...", "name": "My Wallet", "tokens": [ ... ] },
//!     "transactions": [ ... ]
//!   },
//!   "version": 1
//! }
//! ```
//!
//! ## Versions
//!
//! - **0**: written by the browser client. Tokens carry a stored `usdValue`.
//!   Some records lack the `state` envelope entirely.
//! - **1**: current. `usdValue` is derived on read and not stored.
//!
//! [`decode`] runs every migration between the record's version and
//! [`CURRENT_VERSION`]. Records from a newer version are rejected rather than
//! guessed at.

use crate::{AppError, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use shared::dto::wallet::{Transaction, Wallet};

/// Fixed key of the wallet record.
pub const STORAGE_KEY: &str = "how-wallet";

pub const CURRENT_VERSION: u32 = 1;

/// The persisted subset of wallet store state.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    #[serde(default)]
    pub current_wallet: Option<Wallet>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
}

#[derive(Serialize)]
struct Envelope<'a> {
    state: &'a PersistedState,
    version: u32,
}

/// Serialize `state` at [`CURRENT_VERSION`].
pub fn encode(state: &PersistedState) -> Result<String> {
    Ok(serde_json::to_string(&Envelope {
        state,
        version: CURRENT_VERSION,
    })?)
}

/// Parse a stored record of any known version.
pub fn decode(raw: &str) -> Result<PersistedState> {
    let root: Value = serde_json::from_str(raw)?;

    let (mut state, version) = match root {
        Value::Object(mut map) if map.contains_key("state") => {
            let version = match map.get("version") {
                None | Some(Value::Null) => 0,
                Some(v) => v
                    .as_u64()
                    .and_then(|v| u32::try_from(v).ok())
                    .ok_or_else(|| AppError::Decoding(format!("Invalid record version: {}", v)))?,
            };
            (map.remove("state").unwrap_or(Value::Null), version)
        }
        // Bare `{currentWallet, transactions}` without an envelope.
        other @ Value::Object(_) => (other, 0),
        other => {
            return Err(AppError::Decoding(format!(
                "Wallet record must be a JSON object, got {}",
                other
            )))
        }
    };

    if version > CURRENT_VERSION {
        return Err(AppError::Decoding(format!(
            "Wallet record version {} is newer than supported version {}",
            version, CURRENT_VERSION
        )));
    }

    for from in version..CURRENT_VERSION {
        migrate(&mut state, from)?;
    }

    Ok(serde_json::from_value(state)?)
}

/// Upgrade `state` from version `from` to `from + 1`.
fn migrate(state: &mut Value, from: u32) -> Result<()> {
    match from {
        0 => {
            tracing::info!("Migrating wallet record from version 0 to 1");
            if let Some(tokens) = state
                .pointer_mut("/currentWallet/tokens")
                .and_then(Value::as_array_mut)
            {
                for token in tokens.iter_mut().filter_map(Value::as_object_mut) {
                    token.remove("usdValue");
                }
            }
            Ok(())
        }
        other => Err(AppError::Internal(format!("No migration from version {}", other))),
    }
}
