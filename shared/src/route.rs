//! # Route Guard
//!
//! Navigation gate for the wallet screens. "Authenticated" means a wallet is
//! present in the store; anything else is sent to the creation flow.
//!
//! The guard never decides before the store reports that persisted state has
//! been rehydrated, otherwise a returning user would be bounced to the
//! creation screen for the instant before their wallet is loaded.
//!
//! ```rust
//! use shared::route::{guard_route, GuardDecision, CREATE_WALLET_PATH};
//!
//! assert_eq!(guard_route(false, false, "/"), GuardDecision::Wait);
//! assert_eq!(guard_route(true, false, "/"), GuardDecision::Redirect(CREATE_WALLET_PATH));
//! assert_eq!(guard_route(true, true, "/send"), GuardDecision::Allow);
//! ```

pub const CREATE_WALLET_PATH: &str = "/create-wallet";
pub const IMPORT_WALLET_PATH: &str = "/import-wallet";

/// Path prefixes reachable without a wallet.
pub const ALLOWED_PATHS: &[&str] = &[CREATE_WALLET_PATH, IMPORT_WALLET_PATH];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Storage not rehydrated yet; render nothing.
    Wait,
    /// Render the requested screen.
    Allow,
    /// Replace the current location with this path.
    Redirect(&'static str),
}

/// Decide what to render for `path`.
pub fn guard_route(has_hydrated: bool, has_wallet: bool, path: &str) -> GuardDecision {
    if !has_hydrated {
        return GuardDecision::Wait;
    }

    let is_allowed = ALLOWED_PATHS.iter().any(|prefix| path.starts_with(prefix));
    if !has_wallet && !is_allowed {
        return GuardDecision::Redirect(CREATE_WALLET_PATH);
    }

    GuardDecision::Allow
}
