use crate::domain::model::DeliveryError;
use crate::domain::ports::ReceiptSender;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Receipt sender that "delivers" by logging and remembering the receipt.
/// Addresses without an `@` and configured addresses bounce.
#[derive(Debug, Clone, Default)]
pub struct SimulatedReceiptSender {
    undeliverable: HashSet<String>,
    sent: Arc<Mutex<Vec<(String, u64)>>>,
}

impl SimulatedReceiptSender {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_undeliverable_addresses<I, T>(addresses: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            undeliverable: addresses.into_iter().map(Into::into).collect(),
            sent: Arc::default(),
        }
    }

    /// Delivered receipts as `(email_address, amount_in_cents)`.
    pub async fn receipts(&self) -> Vec<(String, u64)> {
        self.sent.lock().await.clone()
    }
}

#[async_trait]
impl ReceiptSender for SimulatedReceiptSender {
    async fn send_receipt(&self, email_address: &str, amount_in_cents: u64) -> Result<(), DeliveryError> {
        if !email_address.contains('@') {
            return Err(DeliveryError::new(format!(
                "invalid email address '{}'",
                email_address
            )));
        }
        if self.undeliverable.contains(email_address) {
            return Err(DeliveryError::new("failed to send email"));
        }

        tracing::info!("📧 Receipt for {} cents sent to {}", amount_in_cents, email_address);
        self.sent
            .lock()
            .await
            .push((email_address.to_string(), amount_in_cents));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delivers_and_records() {
        let sender = SimulatedReceiptSender::new();
        sender.send_receipt("a@example.com", 250).await.unwrap();
        assert_eq!(sender.receipts().await, vec![("a@example.com".to_string(), 250)]);
    }

    #[tokio::test]
    async fn test_bounces() {
        let sender = SimulatedReceiptSender::with_undeliverable_addresses(["full@example.com"]);
        assert!(sender.send_receipt("full@example.com", 50).await.is_err());
        assert!(sender.send_receipt("not-an-address", 50).await.is_err());
        assert!(sender.receipts().await.is_empty());
    }
}
