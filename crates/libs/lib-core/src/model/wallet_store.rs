//! # Wallet Store
//!
//! Owns the current wallet and the transaction log. Every mutation is applied
//! under one write lock, persisted, then published to subscribers as a fresh
//! [`WalletSnapshot`].
//!
//! ## Lifecycle
//!
//! 1. [`WalletStore::open`] rehydrates the persisted record. Token prices are
//!    reset to zero since they are not durable.
//! 2. Create, import and send wait a simulated latency while the loading flag
//!    is raised, then apply their change.
//! 3. Subscribers see every published snapshot through a
//!    [`tokio::sync::watch`] receiver.
//!
//! ## Example
//!
//! ```rust,no_run
//! # use lib_core::{Config, model::{WalletStore, store::MemoryKvStore}};
//! # use std::sync::Arc;
//! # async fn example() -> lib_core::Result<()> {
//! let store = WalletStore::open(Arc::new(MemoryKvStore::new()), &Config::default()).await;
//! let wallet = store.create_wallet("Savings").await?;
//!
//! let tx = store.send_token("SOL", 0.5, "9xQeWvG816bUx9EPjHmaT23yvVM2ZWbrrpZb9PusVFin").await?;
//! assert_eq!(store.snapshot().transactions[0].id, tx.id);
//! # Ok(())
//! # }
//! ```

use super::mock::{
    self, EntropySource, OsEntropy, DEFAULT_IMPORTED_WALLET_NAME, DEFAULT_WALLET_NAME,
};
use super::settlement::{InstantSettlement, Settlement, Transfer};
use super::store::{persisted, KeyValueStore, PersistedState, STORAGE_KEY};
use crate::{AppError, Config, Result};
use lib_utils::time::now_millis;
use lib_utils::validation::{validate_private_key, validate_seed_phrase};
use shared::dto::wallet::{
    Network, Transaction, TransactionStatus, TransactionType, Wallet, WalletSnapshot,
};
use shared::utils::format_amount;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug)]
struct StoreState {
    current_wallet: Option<Wallet>,
    transactions: Vec<Transaction>,
    has_hydrated: bool,
}

/// The wallet state container.
pub struct WalletStore {
    state: RwLock<StoreState>,
    kv: Arc<dyn KeyValueStore>,
    entropy: Arc<dyn EntropySource>,
    settlement: Arc<dyn Settlement>,
    simulated_delay: Duration,
    snapshots: watch::Sender<WalletSnapshot>,
    in_flight: AtomicUsize,
}

/// Raises the loading flag for as long as it lives.
struct LoadingGuard<'a> {
    snapshots: &'a watch::Sender<WalletSnapshot>,
    in_flight: &'a AtomicUsize,
}

impl<'a> LoadingGuard<'a> {
    fn new(snapshots: &'a watch::Sender<WalletSnapshot>, in_flight: &'a AtomicUsize) -> Self {
        snapshots.send_modify(|snap| {
            in_flight.fetch_add(1, Ordering::SeqCst);
            snap.is_wallet_loading = true;
        });
        Self { snapshots, in_flight }
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let in_flight = self.in_flight;
        self.snapshots.send_modify(|snap| {
            let remaining = in_flight.fetch_sub(1, Ordering::SeqCst) - 1;
            snap.is_wallet_loading = remaining > 0;
        });
    }
}

fn name_or_default(name: &str, default: &str) -> String {
    match name.trim() {
        "" => default.to_string(),
        trimmed => trimmed.to_string(),
    }
}

impl WalletStore {
    /// An empty, not yet hydrated store holding the seed transaction log.
    pub fn new(kv: Arc<dyn KeyValueStore>, simulated_delay: Duration) -> Self {
        let transactions = mock::seed_transactions();
        let (snapshots, _) = watch::channel(WalletSnapshot {
            current_wallet: None,
            transactions: transactions.clone(),
            is_wallet_loading: false,
            has_hydrated: false,
        });

        Self {
            state: RwLock::new(StoreState {
                current_wallet: None,
                transactions,
                has_hydrated: false,
            }),
            kv,
            entropy: Arc::new(OsEntropy),
            settlement: Arc::new(InstantSettlement),
            simulated_delay,
            snapshots,
            in_flight: AtomicUsize::new(0),
        }
    }

    /// Build a store from `config` and rehydrate it from `kv`.
    pub async fn open(kv: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let store = Self::new(kv, config.simulated_delay());
        store.rehydrate().await;
        store
    }

    pub fn with_entropy(mut self, entropy: Arc<dyn EntropySource>) -> Self {
        self.entropy = entropy;
        self
    }

    pub fn with_settlement(mut self, settlement: Arc<dyn Settlement>) -> Self {
        self.settlement = settlement;
        self
    }

    /// Current state as last published.
    pub fn snapshot(&self) -> WalletSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver observing every published snapshot.
    pub fn subscribe(&self) -> watch::Receiver<WalletSnapshot> {
        self.snapshots.subscribe()
    }

    /// Load the persisted record and mark the store hydrated.
    ///
    /// Never fails: an unreadable or corrupt record is logged and the store
    /// keeps its empty initial state.
    #[instrument(skip(self))]
    pub async fn rehydrate(&self) {
        let restored = match self.kv.get(STORAGE_KEY).await {
            Ok(Some(raw)) => match persisted::decode(&raw) {
                Ok(restored) => Some(restored),
                Err(e) => {
                    warn!(error = %e, "Ignoring corrupt wallet record");
                    None
                }
            },
            Ok(None) => {
                debug!("No persisted wallet record, starting fresh");
                None
            }
            Err(e) => {
                warn!(error = %e, "Failed to read wallet record");
                None
            }
        };

        let mut state = self.state.write().await;
        if let Some(PersistedState {
            mut current_wallet,
            transactions,
        }) = restored
        {
            if let Some(wallet) = current_wallet.as_mut() {
                for token in &mut wallet.tokens {
                    token.price_usd = 0.0;
                }
                info!(wallet_id = %wallet.id, "Restored wallet");
            }
            state.current_wallet = current_wallet;
            state.transactions = transactions;
        }
        state.has_hydrated = true;
        self.publish(&state);
    }

    /// Create a wallet with a fresh address and recovery phrase. A blank name
    /// becomes "My Wallet".
    #[instrument(skip(self))]
    pub async fn create_wallet(&self, name: &str) -> Result<Wallet> {
        let _loading = self.begin_loading();
        tokio::time::sleep(self.simulated_delay).await;

        let seed_phrase = mock::generate_seed_phrase(self.entropy.as_ref())?;
        let wallet = self.build_wallet(
            name_or_default(name, DEFAULT_WALLET_NAME),
            Some(seed_phrase),
            None,
        )?;
        self.replace_wallet(wallet).await
    }

    /// Import a wallet from an existing recovery phrase of 12 or 24 words.
    ///
    /// The phrase is checked before anything else happens, so a rejected
    /// import leaves the store untouched.
    #[instrument(skip(self, words))]
    pub async fn import_wallet(&self, words: Vec<String>, name: &str) -> Result<Wallet> {
        validate_seed_phrase(&words).map_err(AppError::InvalidInput)?;
        let words = words.into_iter().map(|w| w.trim().to_string()).collect();

        let _loading = self.begin_loading();
        tokio::time::sleep(self.simulated_delay).await;

        let wallet = self.build_wallet(
            name_or_default(name, DEFAULT_IMPORTED_WALLET_NAME),
            Some(words),
            None,
        )?;
        self.replace_wallet(wallet).await
    }

    /// Import a wallet from a private key string.
    #[instrument(skip(self, private_key))]
    pub async fn import_private_key(&self, private_key: &str, name: &str) -> Result<Wallet> {
        validate_private_key(private_key).map_err(AppError::InvalidInput)?;

        let _loading = self.begin_loading();
        tokio::time::sleep(self.simulated_delay).await;

        let wallet = self.build_wallet(
            name_or_default(name, DEFAULT_IMPORTED_WALLET_NAME),
            None,
            Some(private_key.trim().to_string()),
        )?;
        self.replace_wallet(wallet).await
    }

    /// Only one wallet exists, so this succeeds only for the current one.
    pub async fn select_wallet(&self, id: &str) -> Result<Wallet> {
        let state = self.state.read().await;
        let wallet = state.current_wallet.as_ref().ok_or(AppError::NoWallet)?;
        if wallet.id != id {
            return Err(AppError::NotFound(format!("Wallet {} not found", id)));
        }
        debug!(wallet_id = %id, "Selected wallet");
        Ok(wallet.clone())
    }

    /// Point the current wallet at `network`. Returns `None` when there is no
    /// wallet.
    #[instrument(skip(self))]
    pub async fn change_network(&self, network: Network) -> Result<Option<Wallet>> {
        let mut state = self.state.write().await;
        let Some(wallet) = state.current_wallet.as_mut() else {
            return Ok(None);
        };
        wallet.network = network;
        let updated = wallet.clone();

        self.commit(&state).await?;
        Ok(Some(updated))
    }

    /// Send `amount` of `symbol` to `recipient` and record the transfer.
    ///
    /// Balance check, settlement, debit and log insertion happen under one
    /// write lock.
    #[instrument(skip(self))]
    pub async fn send_token(&self, symbol: &str, amount: f64, recipient: &str) -> Result<Transaction> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(AppError::InvalidInput(
                "Please enter an amount greater than zero.".to_string(),
            ));
        }
        let recipient = recipient.trim();
        if recipient.is_empty() {
            return Err(AppError::InvalidInput(
                "Please enter a valid recipient address.".to_string(),
            ));
        }

        let _loading = self.begin_loading();
        tokio::time::sleep(self.simulated_delay).await;

        let mut state = self.state.write().await;
        let wallet = state.current_wallet.as_mut().ok_or(AppError::NoWallet)?;
        let token = wallet
            .token_mut(symbol)
            .ok_or_else(|| AppError::NotFound(format!("Token {} not found in wallet", symbol)))?;
        if amount > token.balance {
            return Err(AppError::InsufficientFunds(format!(
                "Insufficient balance. Max: {} {}",
                format_amount(token.balance, 4),
                symbol
            )));
        }

        let transfer = Transfer {
            token: symbol.to_string(),
            amount,
            recipient: recipient.to_string(),
        };
        let status = self.settlement.settle(&transfer).await;
        if status != TransactionStatus::Failed {
            token.balance = (token.balance - amount).max(0.0);
        }

        let transaction = Transaction {
            id: Uuid::new_v4().to_string(),
            kind: TransactionType::Send,
            status,
            amount,
            token: transfer.token,
            timestamp: now_millis(),
            address: transfer.recipient,
            fee: None,
        };
        state.transactions.insert(0, transaction.clone());
        info!(tx_id = %transaction.id, status = ?status, "Recorded send");

        self.commit(&state).await?;
        Ok(transaction)
    }

    /// Set the USD price of every token with mint `mint`. Returns whether any
    /// token matched. Prices are not persisted.
    pub async fn apply_spot_price(&self, mint: &str, price_usd: f64) -> Result<bool> {
        if !price_usd.is_finite() || price_usd < 0.0 {
            return Err(AppError::InvalidInput(format!("Invalid price: {}", price_usd)));
        }

        let mut state = self.state.write().await;
        let Some(wallet) = state.current_wallet.as_mut() else {
            return Ok(false);
        };
        let mut matched = false;
        for token in wallet.tokens.iter_mut().filter(|t| t.mint_address == mint) {
            token.price_usd = price_usd;
            matched = true;
        }
        if matched {
            self.publish(&state);
        }
        Ok(matched)
    }

    /// Forget the current wallet, restore the seed log and delete the
    /// persisted record.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<()> {
        let mut state = self.state.write().await;
        state.current_wallet = None;
        state.transactions = mock::seed_transactions();
        self.publish(&state);

        self.kv.remove(STORAGE_KEY).await?;
        info!("Wallet reset");
        Ok(())
    }

    fn begin_loading(&self) -> LoadingGuard<'_> {
        LoadingGuard::new(&self.snapshots, &self.in_flight)
    }

    fn build_wallet(
        &self,
        name: String,
        seed_phrase: Option<Vec<String>>,
        private_key: Option<String>,
    ) -> Result<Wallet> {
        Ok(Wallet {
            id: Uuid::new_v4().to_string(),
            name,
            address: mock::generate_wallet_address(self.entropy.as_ref())?,
            network: Network::default(),
            tokens: mock::starter_tokens(),
            private_key,
            seed_phrase,
        })
    }

    async fn replace_wallet(&self, wallet: Wallet) -> Result<Wallet> {
        let mut state = self.state.write().await;
        state.current_wallet = Some(wallet.clone());
        info!(wallet_id = %wallet.id, address = %wallet.address, "Wallet ready");

        self.commit(&state).await?;
        Ok(wallet)
    }

    /// Publish `state`, then persist it. The in-memory change stands even
    /// when the write fails.
    async fn commit(&self, state: &StoreState) -> Result<()> {
        self.publish(state);

        let record = persisted::encode(&PersistedState {
            current_wallet: state.current_wallet.clone(),
            transactions: state.transactions.clone(),
        })?;
        self.kv.set(STORAGE_KEY, &record).await.map_err(|e| {
            warn!(error = %e, "Failed to persist wallet record");
            e
        })
    }

    fn publish(&self, state: &StoreState) {
        self.snapshots.send_modify(|snap| {
            snap.current_wallet = state.current_wallet.clone();
            snap.transactions = state.transactions.clone();
            snap.has_hydrated = state.has_hydrated;
        });
    }
}
