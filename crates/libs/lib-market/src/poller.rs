//! # Price Poller
//!
//! Refreshes one coin's USD price on a fixed interval in a background task
//! and publishes it through a `watch` channel. The first fetch happens
//! immediately. A failed refresh keeps the last known price. Dropping the
//! poller stops the task.

use crate::upstream::MarketClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub struct PricePoller {
    coin_id: String,
    rx: watch::Receiver<Option<f64>>,
    handle: JoinHandle<()>,
}

impl PricePoller {
    /// Start polling `coin_id` every `interval`. Must be called within a
    /// tokio runtime.
    pub fn spawn(client: Arc<MarketClient>, coin_id: impl Into<String>, interval: Duration) -> Self {
        let coin_id = coin_id.into();
        let (tx, rx) = watch::channel(None);

        let task_coin = coin_id.clone();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

            loop {
                ticker.tick().await;

                match client.fetch_simple_price(&task_coin).await {
                    Ok(price) => {
                        debug!(coin = %task_coin, ?price, "Price refreshed");
                        tx.send_replace(price);
                    }
                    Err(e) => warn!(coin = %task_coin, "Price refresh failed: {}", e),
                }
            }
        });

        Self { coin_id, rx, handle }
    }

    pub fn coin_id(&self) -> &str {
        &self.coin_id
    }

    /// Last published price.
    pub fn latest(&self) -> Option<f64> {
        *self.rx.borrow()
    }

    /// Receiver notified on every refresh.
    pub fn subscribe(&self) -> watch::Receiver<Option<f64>> {
        self.rx.clone()
    }
}

impl Drop for PricePoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::serve;
    use axum::{routing::get, Json, Router};
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_poller_publishes_and_stops_on_drop() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        let app = Router::new().route(
            "/simple/price",
            get(move || {
                let counter = Arc::clone(&counter);
                async move {
                    let n = counter.fetch_add(1, Ordering::SeqCst) as f64;
                    Json(json!({ "solana": { "usd": 100.0 + n } }))
                }
            }),
        );
        let base = serve(app).await;
        let client = Arc::new(MarketClient::new(&base, None, &base).unwrap());

        let poller = PricePoller::spawn(client, "solana", Duration::from_millis(50));
        assert_eq!(poller.coin_id(), "solana");

        let mut rx = poller.subscribe();
        tokio::time::timeout(Duration::from_secs(5), rx.changed())
            .await
            .unwrap()
            .unwrap();
        assert!(poller.latest().unwrap() >= 100.0);

        drop(poller);
        tokio::time::sleep(Duration::from_millis(100)).await;
        let after_drop = hits.load(Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert_eq!(hits.load(Ordering::SeqCst), after_drop);
    }
}
