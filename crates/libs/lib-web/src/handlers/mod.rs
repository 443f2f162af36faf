//! # HTTP Request Handlers
//!
//! Axum handlers grouped by feature:
//!
//! - **[`proxy`]**: Birdeye / CoinGecko pass-through
//!   - `GET /api/price` - Spot price by mint address
//!   - `GET /api/market-chart` - Historical prices by CoinGecko id
//!
//! - **[`wallet`]**: Wallet state operations
//!   - `GET /api/wallet`, `DELETE /api/wallet`
//!   - `POST /api/wallet/{create,import,select,network,send}`
//!   - `POST /api/wallet/prices/refresh`
//!
//! - **[`transactions`]**: `GET /api/transactions`
//!
//! - **[`dapps`]**: `GET /api/dapps`
//!
//! ## Error Handling
//!
//! Wallet handlers return `lib_core::Result<T>`; an
//! [`AppError`](lib_core::AppError) renders as
//! `{"error": <message>, "code": <variant>}` with the matching status.
//! Proxy handlers build their `{"error": ...}` bodies directly.

pub mod dapps;
pub mod proxy;
pub mod transactions;
pub mod wallet;

#[cfg(test)]
mod tests;
