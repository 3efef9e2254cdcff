use clap::Parser;
use cookie_shop::utils::error::ErrorSeverity;
use cookie_shop::utils::{logger, validation::Validate};
use cookie_shop::{CliConfig, PurchaseOutcome, ShopConfig, ShopError};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let shop_config = match load_shop_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose);
            exit_with(&e)
        }
    };

    if shop_config.logging.json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🍪 Starting {}", shop_config.shop.name);
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let service = match shop_config.build_service() {
        Ok(service) => service,
        Err(e) => exit_with(&e),
    };

    let request = cli.purchase_request();
    match service.purchase_request(&request).await {
        Ok(outcome) => {
            print_outcome(&outcome, cli.json)?;
            Ok(())
        }
        Err(e) => exit_with(&e),
    }
}

fn load_shop_config(cli: &CliConfig) -> cookie_shop::Result<ShopConfig> {
    cli.validate()?;

    let mut config = match &cli.config {
        Some(path) => ShopConfig::from_file(path)?,
        None => ShopConfig::default(),
    };
    if let Some(stock) = cli.stock {
        config = config.with_stock(stock);
    }

    config.validate()?;
    Ok(config)
}

fn print_outcome(outcome: &PurchaseOutcome, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(outcome)?);
        return Ok(());
    }

    if outcome.was_clamped() {
        println!(
            "⚠️  Only {} of {} cookies were in stock",
            outcome.charged_quantity, outcome.requested_quantity
        );
    }
    println!(
        "✅ Sold {} cookies for {} cents",
        outcome.charged_quantity, outcome.amount_in_cents
    );
    Ok(())
}

fn exit_with(e: &ShopError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Medium => 2, // charged, receipt missing
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
