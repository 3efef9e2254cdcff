use crate::domain::model::{ChargeError, DeliveryError, UndeliveredReceipt};
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

/// Reports how many cookies are available right now.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StockChecker: Send + Sync {
    async fn amount_in_stock(&self) -> u32;
}

/// Moves money. A call that returns `Ok` has charged the card; calling it
/// twice charges twice.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait CardCharger: Send + Sync {
    async fn charge_card(&self, card_token: &str, amount_in_cents: u64) -> Result<(), ChargeError>;
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait ReceiptSender: Send + Sync {
    async fn send_receipt(&self, email_address: &str, amount_in_cents: u64) -> Result<(), DeliveryError>;
}

/// Hook run when a charged purchase could not deliver its receipt.
///
/// This is where a refund, a retry queue or an alert would plug in. The
/// purchase still reports the delivery failure to its caller whatever the
/// handler does.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait UndeliveredReceiptHandler: Send + Sync {
    async fn on_undelivered(&self, receipt: &UndeliveredReceipt);
}

/// Default handler: records the missing receipt in the log and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogUndeliveredReceipt;

#[async_trait]
impl UndeliveredReceiptHandler for LogUndeliveredReceipt {
    async fn on_undelivered(&self, receipt: &UndeliveredReceipt) {
        tracing::warn!(
            email = %receipt.email_address,
            amount_in_cents = receipt.amount_in_cents,
            reason = %receipt.reason,
            "Receipt not delivered for a charged purchase"
        );
    }
}
