//! # Model Layer
//!
//! Wallet and DApp state containers, the mock data behind them and the
//! durable store they persist to.

// region: --- Modules
pub mod dapp_store;
pub mod mock;
pub mod settlement;
pub mod store;
pub mod wallet_store;
// endregion: --- Modules

pub use dapp_store::DAppDirectory;
pub use mock::{EntropySource, OsEntropy};
pub use settlement::{InstantSettlement, Settlement, Transfer};
pub use wallet_store::WalletStore;
