use crate::domain::ports::StockChecker;
use async_trait::async_trait;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedStock {
    amount: u32,
}

impl FixedStock {
    pub fn new(amount: u32) -> Self {
        Self { amount }
    }
}

#[async_trait]
impl StockChecker for FixedStock {
    async fn amount_in_stock(&self) -> u32 {
        self.amount
    }
}
