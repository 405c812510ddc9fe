//! Exchange rate cache refresh job.
//!
//! Primes the cached rate table for every ordered currency pair of the
//! static per-USD table. Intended to run on a schedule (cron or a
//! container job); each run is independent and safe to repeat.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use zakath_core::currency::{RateService, RateTable};
use zakath_db::{CurrencyRepository, ExchangeRateRepository, connect};
use zakath_shared::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "zakath=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = AppConfig::load()?;

    // Connect to database
    let db = connect(&config.database).await?;
    info!("Connected to database");

    let table = Arc::new(RateTable::from_config(&config.rates));
    let service = RateService::new(
        Arc::new(ExchangeRateRepository::new(db.clone())),
        Arc::new(CurrencyRepository::new(db)),
        table,
        config.rates.freshness_days,
    );

    let count = service.refresh_all_rates().await?;
    info!(count, "Exchange rate cache refreshed");

    Ok(())
}
