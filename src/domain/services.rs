use crate::domain::model::{
    clamp_quantity, cost_in_cents, PurchaseOutcome, PurchaseRequest, UndeliveredReceipt,
};
use crate::domain::ports::{
    CardCharger, LogUndeliveredReceipt, ReceiptSender, StockChecker, UndeliveredReceiptHandler,
};
use crate::utils::error::{Result, ShopError};

/// Sells cookies: checks stock, charges the card, then emails a receipt.
///
/// The service keeps no state between calls, so one instance can serve
/// concurrent purchases behind an `Arc`. Dropping a `purchase` future cancels
/// it; no step after the one in flight is started.
pub struct PurchaseService<S: StockChecker, C: CardCharger, R: ReceiptSender> {
    stock_checker: S,
    card_charger: C,
    receipt_sender: R,
    undelivered: Box<dyn UndeliveredReceiptHandler>,
}

impl<S: StockChecker, C: CardCharger, R: ReceiptSender> PurchaseService<S, C, R> {
    pub fn new(stock_checker: S, card_charger: C, receipt_sender: R) -> Self {
        Self {
            stock_checker,
            card_charger,
            receipt_sender,
            undelivered: Box::new(LogUndeliveredReceipt),
        }
    }

    pub fn with_undelivered_receipt_handler<H>(mut self, handler: H) -> Self
    where
        H: UndeliveredReceiptHandler + 'static,
    {
        self.undelivered = Box::new(handler);
        self
    }

    pub async fn purchase(
        &self,
        requested_quantity: u32,
        card_token: &str,
        email_address: &str,
    ) -> Result<PurchaseOutcome> {
        let in_stock = self.stock_checker.amount_in_stock().await;
        tracing::debug!("Stock check: {} in stock, {} requested", in_stock, requested_quantity);

        if in_stock == 0 {
            tracing::warn!("Purchase rejected, nothing in stock");
            return Err(ShopError::OutOfStock);
        }

        let charged_quantity = clamp_quantity(requested_quantity, in_stock);
        if charged_quantity < requested_quantity {
            tracing::info!(
                "Only {} of {} requested cookies available, selling what we have",
                charged_quantity,
                requested_quantity
            );
        }

        let amount_in_cents = cost_in_cents(charged_quantity);

        tracing::debug!("Charging card for {} cents", amount_in_cents);
        if let Err(source) = self.card_charger.charge_card(card_token, amount_in_cents).await {
            tracing::warn!("Card charge of {} cents failed: {}", amount_in_cents, source);
            return Err(ShopError::CardDeclined {
                amount_in_cents,
                source,
            });
        }

        tracing::debug!("Sending receipt to {}", email_address);
        if let Err(source) = self
            .receipt_sender
            .send_receipt(email_address, amount_in_cents)
            .await
        {
            tracing::error!(
                "Card charged {} cents but receipt to {} failed: {}",
                amount_in_cents,
                email_address,
                source
            );
            let receipt = UndeliveredReceipt {
                card_token: card_token.to_string(),
                email_address: email_address.to_string(),
                amount_in_cents,
                reason: source.reason.clone(),
            };
            self.undelivered.on_undelivered(&receipt).await;
            return Err(ShopError::ReceiptUndelivered {
                amount_in_cents,
                source,
            });
        }

        tracing::info!(
            "Sold {} cookies for {} cents",
            charged_quantity,
            amount_in_cents
        );

        Ok(PurchaseOutcome {
            requested_quantity,
            charged_quantity,
            amount_in_cents,
        })
    }

    pub async fn purchase_request(&self, request: &PurchaseRequest) -> Result<PurchaseOutcome> {
        self.purchase(request.quantity, &request.card_token, &request.email_address)
            .await
    }
}
