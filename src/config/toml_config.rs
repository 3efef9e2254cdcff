use crate::adapters::{FixedStock, SimulatedCardCharger, SimulatedReceiptSender};
use crate::domain::services::PurchaseService;
use crate::utils::error::{Result, ShopError};
use crate::utils::validation::{
    validate_email_address, validate_no_duplicates, validate_non_empty_string,
    validate_required_field, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The shop served by the simulated collaborators.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub shop: ShopSection,
    pub stock: StockConfig,
    pub payment: PaymentConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShopSection {
    pub name: String,
}

impl Default for ShopSection {
    fn default() -> Self {
        Self {
            name: "cookie-shop".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockConfig {
    pub amount_in_stock: Option<u32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PaymentConfig {
    pub declined_tokens: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    pub undeliverable_addresses: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub json: bool,
}

pub type SimulatedPurchaseService =
    PurchaseService<FixedStock, SimulatedCardCharger, SimulatedReceiptSender>;

impl ShopConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ShopError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ShopError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value. Unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ShopError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn with_stock(mut self, amount_in_stock: u32) -> Self {
        self.stock.amount_in_stock = Some(amount_in_stock);
        self
    }

    pub fn amount_in_stock(&self) -> Result<u32> {
        validate_required_field("stock.amount_in_stock", &self.stock.amount_in_stock).copied()
    }

    /// Wires the simulated collaborators described by this configuration.
    pub fn build_service(&self) -> Result<SimulatedPurchaseService> {
        let stock = FixedStock::new(self.amount_in_stock()?);
        let charger = SimulatedCardCharger::with_declined_tokens(self.payment.declined_tokens.iter().cloned());
        let sender =
            SimulatedReceiptSender::with_undeliverable_addresses(self.email.undeliverable_addresses.iter().cloned());

        tracing::debug!(
            "Built '{}' with {} declined tokens and {} undeliverable addresses",
            self.shop.name,
            self.payment.declined_tokens.len(),
            self.email.undeliverable_addresses.len()
        );

        Ok(PurchaseService::new(stock, charger, sender))
    }
}

impl Validate for ShopConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("shop.name", &self.shop.name)?;
        self.amount_in_stock()?;
        validate_no_duplicates("payment.declined_tokens", &self.payment.declined_tokens)?;
        for token in &self.payment.declined_tokens {
            validate_non_empty_string("payment.declined_tokens", token)?;
        }
        validate_no_duplicates("email.undeliverable_addresses", &self.email.undeliverable_addresses)?;
        for address in &self.email.undeliverable_addresses {
            validate_email_address("email.undeliverable_addresses", address)?;
        }
        Ok(())
    }
}
