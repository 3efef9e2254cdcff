pub mod adapters;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::ShopConfig;

pub use adapters::{FixedStock, SimulatedCardCharger, SimulatedReceiptSender};
pub use domain::model::{PurchaseOutcome, PurchaseRequest, UNIT_PRICE_IN_CENTS};
pub use domain::ports::{CardCharger, ReceiptSender, StockChecker, UndeliveredReceiptHandler};
pub use domain::services::PurchaseService;
pub use utils::error::{PurchaseErrorKind, Result, ShopError};
