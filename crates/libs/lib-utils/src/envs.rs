//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get a required environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get an optional environment variable. Blank values count as unset.
pub fn get_env_opt(name: &'static str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable, falling back to `default` when unset.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    get_env_opt(name).unwrap_or_else(|| default.to_string())
}

/// Get and parse an environment variable, falling back to `default` when unset.
///
/// A value that is set but does not parse is an error, not a silent default.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_opt(name) {
        Some(val) => val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name)),
        None => Ok(default),
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{} must be set in environment", name),
            Error::WrongFormat(name) => write!(fmt, "{} has an invalid format", name),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error
