//! DApp directory shown on the Discover screen.

use super::mock;
use parking_lot::RwLock;
use shared::dto::dapp::DApp;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// The fixed catalog plus a loading flag. A fetch only simulates latency.
///
/// The flag counts fetches in flight, so it stays raised until the last one
/// finishes or is dropped.
pub struct DAppDirectory {
    dapps: RwLock<Vec<DApp>>,
    in_flight: AtomicUsize,
    delay: Duration,
}

/// Counts one fetch as in flight for as long as it lives.
struct FetchGuard<'a>(&'a AtomicUsize);

impl<'a> FetchGuard<'a> {
    fn new(in_flight: &'a AtomicUsize) -> Self {
        in_flight.fetch_add(1, Ordering::SeqCst);
        Self(in_flight)
    }
}

impl Drop for FetchGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl DAppDirectory {
    pub fn new(delay: Duration) -> Self {
        Self {
            dapps: RwLock::new(mock::dapp_catalog()),
            in_flight: AtomicUsize::new(0),
            delay,
        }
    }

    /// Wait the simulated delay, then republish the catalog.
    pub async fn fetch_dapps(&self) -> Vec<DApp> {
        let _fetching = FetchGuard::new(&self.in_flight);
        tokio::time::sleep(self.delay).await;

        let mut dapps = self.dapps.write();
        *dapps = mock::dapp_catalog();
        debug!(count = dapps.len(), "DApp catalog refreshed");
        dapps.clone()
    }

    pub fn dapps(&self) -> Vec<DApp> {
        self.dapps.read().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Entries whose category matches `category`, ignoring case.
    pub fn by_category(&self, category: &str) -> Vec<DApp> {
        self.dapps
            .read()
            .iter()
            .filter(|d| d.category.eq_ignore_ascii_case(category.trim()))
            .cloned()
            .collect()
    }

    /// Distinct categories in catalog order.
    pub fn categories(&self) -> Vec<String> {
        let dapps = self.dapps.read();
        let mut categories: Vec<String> = Vec::new();
        for dapp in dapps.iter() {
            if !categories.contains(&dapp.category) {
                categories.push(dapp.category.clone());
            }
        }
        categories
    }
}
