//! Weight surcharge service

use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weight_surcharge::api::{self, AppState, SERVICE_NAME};
use weight_surcharge::Settings;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let settings = Settings::from_env()?;
    tracing::info!(
        free_threshold_grams = %settings.free_threshold_grams,
        rate_per_kg = %settings.rate_per_kg,
        currency = %settings.default_currency,
        locale = %settings.display_locale,
        "weight pricing configured"
    );

    let app = api::router(AppState::from_settings(&settings));
    let addr = format!("0.0.0.0:{}", settings.port);
    tracing::info!("{} listening on {}", SERVICE_NAME, addr);
    axum::serve(tokio::net::TcpListener::bind(&addr).await?, app).await?;
    Ok(())
}
