//! # Wallet Handlers
//!
//! The wallet application API. Every handler delegates to the shared
//! [`WalletStore`]; errors render through [`AppError`]'s `IntoResponse`.
//!
//! ## Endpoints
//!
//! - `GET /api/wallet` - Current snapshot
//! - `POST /api/wallet/create` - Create a wallet
//! - `POST /api/wallet/import` - Import by recovery phrase or private key
//! - `POST /api/wallet/select` - Select the wallet by id
//! - `POST /api/wallet/network` - Switch network
//! - `POST /api/wallet/send` - Send tokens
//! - `POST /api/wallet/prices/refresh` - Pull spot prices into the wallet
//! - `DELETE /api/wallet` - Remove the wallet

use axum::{extract::State, http::StatusCode, Json};
use lib_core::{AppError, Result, WalletStore};
use lib_market::MarketClient;
use lib_utils::validation::{parse_seed_phrase, validate_send_form, validate_wallet_name};
use serde::Serialize;
use shared::dto::api::{
    ChangeNetworkRequest, CreateWalletRequest, ImportWalletRequest, SelectWalletRequest,
    SendTokenRequest,
};
use shared::dto::wallet::{Transaction, Wallet, WalletSnapshot};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// **Route**: `GET /api/wallet`
pub async fn get_wallet(State(store): State<Arc<WalletStore>>) -> Json<WalletSnapshot> {
    Json(store.snapshot())
}

/// **Route**: `POST /api/wallet/create`
///
/// Waits the simulated latency before answering `201` with the new wallet,
/// recovery phrase included.
#[instrument(skip_all)]
pub async fn create_wallet(
    State(store): State<Arc<WalletStore>>,
    Json(req): Json<CreateWalletRequest>,
) -> Result<(StatusCode, Json<Wallet>)> {
    let wallet = store.create_wallet(req.name.as_deref().unwrap_or_default()).await?;
    Ok((StatusCode::CREATED, Json(wallet)))
}

/// **Route**: `POST /api/wallet/import`
///
/// Body carries a non-blank `name` and either `seedPhrase` (whitespace
/// separated, 12 or 24 words) or `privateKey`.
#[instrument(skip_all)]
pub async fn import_wallet(
    State(store): State<Arc<WalletStore>>,
    Json(req): Json<ImportWalletRequest>,
) -> Result<(StatusCode, Json<Wallet>)> {
    let name = req.name.as_deref().unwrap_or_default();
    validate_wallet_name(name).map_err(AppError::InvalidInput)?;

    let wallet = match (req.seed_phrase.as_deref(), req.private_key.as_deref()) {
        (Some(phrase), _) if !phrase.trim().is_empty() => {
            store.import_wallet(parse_seed_phrase(phrase), name).await?
        }
        (_, Some(key)) if !key.trim().is_empty() => store.import_private_key(key, name).await?,
        _ => {
            return Err(AppError::InvalidInput(
                "Provide either a recovery phrase or a private key.".to_string(),
            ))
        }
    };

    Ok((StatusCode::CREATED, Json(wallet)))
}

/// **Route**: `POST /api/wallet/select`
pub async fn select_wallet(
    State(store): State<Arc<WalletStore>>,
    Json(req): Json<SelectWalletRequest>,
) -> Result<Json<Wallet>> {
    Ok(Json(store.select_wallet(&req.id).await?))
}

/// **Route**: `POST /api/wallet/network`
#[instrument(skip(store))]
pub async fn change_network(
    State(store): State<Arc<WalletStore>>,
    Json(req): Json<ChangeNetworkRequest>,
) -> Result<Json<Wallet>> {
    store
        .change_network(req.network)
        .await?
        .map(Json)
        .ok_or(AppError::NoWallet)
}

/// **Route**: `POST /api/wallet/send`
///
/// The send form rules run first. The balance is checked here against the
/// current snapshot and again by the store under its lock.
#[instrument(skip(store))]
pub async fn send_token(
    State(store): State<Arc<WalletStore>>,
    Json(req): Json<SendTokenRequest>,
) -> Result<(StatusCode, Json<Transaction>)> {
    let balance = store
        .snapshot()
        .current_wallet
        .and_then(|w| w.token(&req.token).map(|t| t.balance))
        .unwrap_or(f64::INFINITY);
    validate_send_form(&req.recipient, &req.token, &req.amount.to_string(), balance)
        .map_err(AppError::InvalidInput)?;

    let tx = store.send_token(&req.token, req.amount, &req.recipient).await?;
    Ok((StatusCode::CREATED, Json(tx)))
}

#[derive(Debug, Serialize)]
pub struct PriceRefresh {
    /// Symbols whose price was updated.
    pub updated: Vec<String>,
    /// Symbols the provider had no price for, or that failed.
    pub missing: Vec<String>,
}

/// **Route**: `POST /api/wallet/prices/refresh`
///
/// Fetches a Birdeye spot price for every token of the current wallet and
/// applies it. Per-token failures are reported in `missing`, not as errors.
#[instrument(skip_all)]
pub async fn refresh_prices(
    State(store): State<Arc<WalletStore>>,
    State(market): State<Arc<MarketClient>>,
) -> Result<Json<PriceRefresh>> {
    let wallet = store.snapshot().current_wallet.ok_or(AppError::NoWallet)?;
    if !market.has_birdeye_key() {
        return Err(AppError::Config("BIRDEYE_API_KEY is not set".to_string()));
    }

    let mut refresh = PriceRefresh {
        updated: Vec::new(),
        missing: Vec::new(),
    };

    for token in &wallet.tokens {
        match market.spot_price(&token.mint_address).await {
            Ok(Some(price)) => {
                store.apply_spot_price(&token.mint_address, price).await?;
                refresh.updated.push(token.symbol.clone());
            }
            Ok(None) => refresh.missing.push(token.symbol.clone()),
            Err(e) => {
                warn!(symbol = %token.symbol, "Spot price lookup failed: {}", e);
                refresh.missing.push(token.symbol.clone());
            }
        }
    }

    info!(updated = refresh.updated.len(), missing = refresh.missing.len(), "Prices refreshed");
    Ok(Json(refresh))
}

/// **Route**: `DELETE /api/wallet`
#[instrument(skip_all)]
pub async fn reset_wallet(State(store): State<Arc<WalletStore>>) -> Result<StatusCode> {
    store.reset().await?;
    Ok(StatusCode::NO_CONTENT)
}
