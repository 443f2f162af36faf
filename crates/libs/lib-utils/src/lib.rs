//! # Utilities Library
//!
//! Shared helpers for environment variables, epoch-millisecond time and
//! wallet form validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_opt, get_env_or, get_env_parse_or};
pub use time::{millis_ago, now_millis};
pub use validation::{
    parse_seed_phrase, validate_private_key, validate_seed_phrase, validate_send_form,
    validate_wallet_name,
};
