//! # Web Library
//!
//! HTTP handlers, middleware and server setup for the wallet backend.

pub mod handlers;
pub mod middleware;
pub mod server;

pub use server::{create_router, init_tracing, start_server, AppState, ServerConfig};
