// Adapters layer: in-memory collaborators used by the CLI and the integration tests.
// None of them reach a real payment provider or mail server.

pub mod email;
pub mod payment;
pub mod stock;

pub use email::SimulatedReceiptSender;
pub use payment::{RecordedCharge, SimulatedCardCharger};
pub use stock::FixedStock;
