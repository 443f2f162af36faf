//! Settlement of outgoing transfers.
//!
//! Nothing is broadcast anywhere. The default [`InstantSettlement`] marks
//! every transfer successful, which is what the wallet screens expect.

use async_trait::async_trait;
use shared::dto::wallet::TransactionStatus;

/// A transfer that passed validation and is about to be recorded.
#[derive(Debug, Clone, PartialEq)]
pub struct Transfer {
    pub token: String,
    pub amount: f64,
    pub recipient: String,
}

#[async_trait]
pub trait Settlement: Send + Sync {
    /// Final status for `transfer`. A `Failed` transfer is logged but does
    /// not move funds.
    async fn settle(&self, transfer: &Transfer) -> TransactionStatus;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct InstantSettlement;

#[async_trait]
impl Settlement for InstantSettlement {
    async fn settle(&self, transfer: &Transfer) -> TransactionStatus {
        tracing::debug!(
            token = %transfer.token,
            amount = transfer.amount,
            "Settling transfer instantly"
        );
        TransactionStatus::Success
    }
}
