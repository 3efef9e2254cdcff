use serde::Serialize;
use thiserror::Error;

/// Price of one cookie. There is no override; every purchase is charged at this rate.
pub const UNIT_PRICE_IN_CENTS: u64 = 50;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRequest {
    pub quantity: u32,
    pub card_token: String,
    pub email_address: String,
}

impl PurchaseRequest {
    pub fn new(quantity: u32, card_token: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            quantity,
            card_token: card_token.into(),
            email_address: email_address.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PurchaseOutcome {
    pub requested_quantity: u32,
    pub charged_quantity: u32,
    pub amount_in_cents: u64,
}

impl PurchaseOutcome {
    /// Whether fewer cookies were sold than asked for.
    pub fn was_clamped(&self) -> bool {
        self.charged_quantity < self.requested_quantity
    }
}

/// Details handed to an `UndeliveredReceiptHandler` after the card was charged
/// but the receipt could not be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndeliveredReceipt {
    pub card_token: String,
    pub email_address: String,
    pub amount_in_cents: u64,
    pub reason: String,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ChargeError {
    pub reason: String,
}

impl ChargeError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct DeliveryError {
    pub reason: String,
}

impl DeliveryError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

pub fn clamp_quantity(requested: u32, in_stock: u32) -> u32 {
    requested.min(in_stock)
}

pub fn cost_in_cents(quantity: u32) -> u64 {
    UNIT_PRICE_IN_CENTS * u64::from(quantity)
}
