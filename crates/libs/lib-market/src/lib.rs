//! # Market Library
//!
//! Price data for the wallet: the Birdeye and CoinGecko upstream clients used
//! by the proxy endpoints, the helpers that read those endpoints, and a
//! recurring price poller.

pub mod error;
pub mod feed;
pub mod poller;
pub mod types;
pub mod upstream;

// Re-export commonly used types from root for convenience
pub use error::{PriceError, Result};
pub use feed::PriceFeed;
pub use poller::PricePoller;
pub use types::PricePoint;
pub use upstream::MarketClient;
