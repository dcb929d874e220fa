use anyhow::{Context, Result};
use itinerary::{AppState, ItineraryConfig, VERSION, logging, provider, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = ItineraryConfig::load().context("Failed to load configuration")?;
    logging::init(&config.logging)?;

    tracing::info!("Starting itinerary service v{}", VERSION);

    let api_key = provider::api_key_from_env(config.provider.kind)?;
    let provider = provider::from_config(&config.provider, api_key)?;

    web::run(&config.server, AppState::new(provider)).await?;
    Ok(())
}
