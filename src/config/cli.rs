use crate::domain::model::PurchaseRequest;
use crate::utils::error::Result;
use crate::utils::validation::{validate_email_address, validate_non_empty_string, Validate};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "cookie-shop")]
#[command(about = "Sell cookies against simulated stock, payment and email collaborators")]
pub struct CliConfig {
    /// Number of cookies the customer asks for
    #[arg(short, long, default_value = "1")]
    pub quantity: u32,

    /// Opaque token of the customer's card
    #[arg(long)]
    pub card_token: String,

    /// Where the receipt is sent
    #[arg(long)]
    pub email: String,

    /// Path to a TOML shop configuration
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the stock level from the configuration
    #[arg(long)]
    pub stock: Option<u32>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn purchase_request(&self) -> PurchaseRequest {
        PurchaseRequest::new(self.quantity, self.card_token.clone(), self.email.clone())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("card_token", &self.card_token)?;
        validate_email_address("email", &self.email)?;
        Ok(())
    }
}
