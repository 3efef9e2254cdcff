use async_trait::async_trait;
use cookie_shop::domain::model::{ChargeError, UndeliveredReceipt};
use cookie_shop::{
    CardCharger, FixedStock, PurchaseErrorKind, PurchaseService, ShopError, SimulatedCardCharger,
    SimulatedReceiptSender, UndeliveredReceiptHandler,
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_test::{assert_err, assert_ok, assert_pending};

const EMAIL: &str = "customer@example.com";
const TOKEN: &str = "tok_visa";

#[tokio::test]
async fn test_full_purchase_with_simulated_collaborators() {
    let charger = SimulatedCardCharger::new();
    let sender = SimulatedReceiptSender::new();
    let service = PurchaseService::new(FixedStock::new(5), charger.clone(), sender.clone());

    let outcome = assert_ok!(service.purchase(5, TOKEN, EMAIL).await);

    assert_eq!(outcome.amount_in_cents, 250);
    let charges = charger.charges().await;
    assert_eq!(charges.len(), 1);
    assert_eq!(charges[0].card_token, TOKEN);
    assert_eq!(charges[0].amount_in_cents, 250);
    assert_eq!(sender.receipts().await, vec![(EMAIL.to_string(), 250)]);
}

#[tokio::test]
async fn test_out_of_stock_leaves_no_trace() {
    let charger = SimulatedCardCharger::new();
    let sender = SimulatedReceiptSender::new();
    let service = PurchaseService::new(FixedStock::new(0), charger.clone(), sender.clone());

    let err = assert_err!(service.purchase(1, TOKEN, EMAIL).await);

    assert_eq!(err.kind(), Some(PurchaseErrorKind::OutOfStock));
    assert!(charger.charges().await.is_empty());
    assert!(sender.receipts().await.is_empty());
}

#[tokio::test]
async fn test_declined_card_sends_nothing() {
    let charger = SimulatedCardCharger::with_declined_tokens(["tok_stolen"]);
    let sender = SimulatedReceiptSender::new();
    let service = PurchaseService::new(FixedStock::new(5), charger.clone(), sender.clone());

    let err = assert_err!(service.purchase(5, "tok_stolen", EMAIL).await);

    assert_eq!(err.kind(), Some(PurchaseErrorKind::Charge));
    assert_eq!(err.user_friendly_message(), "your card was declined");
    assert!(sender.receipts().await.is_empty());
}

#[tokio::test]
async fn test_bounced_receipt_still_charges() {
    let charger = SimulatedCardCharger::new();
    let sender = SimulatedReceiptSender::with_undeliverable_addresses([EMAIL]);
    let service = PurchaseService::new(FixedStock::new(5), charger.clone(), sender);

    let err = assert_err!(service.purchase(5, TOKEN, EMAIL).await);

    assert_eq!(err.kind(), Some(PurchaseErrorKind::Delivery));
    assert!(err.charge_applied());
    assert!(matches!(
        err,
        ShopError::ReceiptUndelivered {
            amount_in_cents: 250,
            ..
        }
    ));
    assert_eq!(charger.total_charged_in_cents().await, 250);
}

#[tokio::test]
async fn test_partial_fulfilment() {
    let charger = SimulatedCardCharger::new();
    let sender = SimulatedReceiptSender::new();
    let service = PurchaseService::new(FixedStock::new(1), charger.clone(), sender.clone());

    let outcome = assert_ok!(service.purchase(5, TOKEN, EMAIL).await);

    assert!(outcome.was_clamped());
    assert_eq!(charger.total_charged_in_cents().await, 50);
    assert_eq!(sender.receipts().await, vec![(EMAIL.to_string(), 50)]);
}

#[tokio::test]
async fn test_retrying_a_purchase_charges_twice() {
    let charger = SimulatedCardCharger::new();
    let service = PurchaseService::new(FixedStock::new(3), charger.clone(), SimulatedReceiptSender::new());

    assert_ok!(service.purchase(2, TOKEN, EMAIL).await);
    assert_ok!(service.purchase(2, TOKEN, EMAIL).await);

    // No idempotency: the same request is billed again.
    assert_eq!(charger.charges().await.len(), 2);
    assert_eq!(charger.total_charged_in_cents().await, 200);
}

#[tokio::test]
async fn test_shared_service_handles_concurrent_purchases() {
    let charger = SimulatedCardCharger::new();
    let sender = SimulatedReceiptSender::new();
    let service = Arc::new(PurchaseService::new(FixedStock::new(4), charger.clone(), sender.clone()));

    let mut handles = Vec::new();
    for i in 0..8u32 {
        let service = Arc::clone(&service);
        handles.push(tokio::spawn(async move {
            let token = format!("tok_{}", i);
            service.purchase(i, &token, EMAIL).await
        }));
    }

    for handle in handles {
        assert_ok!(handle.await.unwrap());
    }

    // 0+1+2+3+4+4+4+4 cookies
    assert_eq!(charger.total_charged_in_cents().await, 22 * 50);
    assert_eq!(sender.receipts().await.len(), 8);
}

#[derive(Clone, Default)]
struct RecordingHandler {
    seen: Arc<Mutex<Vec<UndeliveredReceipt>>>,
}

#[async_trait]
impl UndeliveredReceiptHandler for RecordingHandler {
    async fn on_undelivered(&self, receipt: &UndeliveredReceipt) {
        self.seen.lock().await.push(receipt.clone());
    }
}

#[tokio::test]
async fn test_custom_undelivered_receipt_handler() {
    let handler = RecordingHandler::default();
    let service = PurchaseService::new(
        FixedStock::new(2),
        SimulatedCardCharger::new(),
        SimulatedReceiptSender::with_undeliverable_addresses([EMAIL]),
    )
    .with_undelivered_receipt_handler(handler.clone());

    assert_err!(service.purchase(2, TOKEN, EMAIL).await);

    let seen = handler.seen.lock().await;
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].amount_in_cents, 100);
    assert_eq!(seen[0].reason, "failed to send email");
}

struct HangingCharger;

#[async_trait]
impl CardCharger for HangingCharger {
    async fn charge_card(&self, _card_token: &str, _amount_in_cents: u64) -> Result<(), ChargeError> {
        std::future::pending().await
    }
}

#[test]
fn test_dropping_a_blocked_purchase_skips_the_receipt() {
    let sender = SimulatedReceiptSender::new();
    let service = PurchaseService::new(FixedStock::new(5), HangingCharger, sender.clone());

    let mut task = tokio_test::task::spawn(service.purchase(5, TOKEN, EMAIL));
    assert_pending!(task.poll());
    assert_pending!(task.poll());
    drop(task);

    let receipts = tokio_test::block_on(sender.receipts());
    assert!(receipts.is_empty());
}
