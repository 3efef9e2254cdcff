use crate::domain::model::ChargeError;
use crate::domain::ports::CardCharger;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCharge {
    pub card_token: String,
    pub amount_in_cents: u64,
}

/// Card charger that accepts every token except the empty one and those it
/// was told to decline. Clones share the same charge log.
#[derive(Debug, Clone, Default)]
pub struct SimulatedCardCharger {
    declined_tokens: HashSet<String>,
    charges: Arc<Mutex<Vec<RecordedCharge>>>,
}

impl SimulatedCardCharger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_declined_tokens<I, T>(tokens: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            declined_tokens: tokens.into_iter().map(Into::into).collect(),
            charges: Arc::default(),
        }
    }

    pub async fn charges(&self) -> Vec<RecordedCharge> {
        self.charges.lock().await.clone()
    }

    pub async fn total_charged_in_cents(&self) -> u64 {
        self.charges
            .lock()
            .await
            .iter()
            .map(|c| c.amount_in_cents)
            .sum()
    }
}

#[async_trait]
impl CardCharger for SimulatedCardCharger {
    async fn charge_card(&self, card_token: &str, amount_in_cents: u64) -> Result<(), ChargeError> {
        if card_token.trim().is_empty() {
            return Err(ChargeError::new("missing card token"));
        }
        if self.declined_tokens.contains(card_token) {
            return Err(ChargeError::new("card is declined"));
        }

        tracing::debug!("Simulated charge of {} cents accepted", amount_in_cents);
        self.charges.lock().await.push(RecordedCharge {
            card_token: card_token.to_string(),
            amount_in_cents,
        });
        Ok(())
    }
}
