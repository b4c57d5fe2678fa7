//! Soulmate relay service entry point.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use soulmate_service::{create_router, AppState, ServiceConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,soulmate=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting soulmate relay");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        leads_sheet_configured = %config.leads_sheet_id.is_some(),
        purchases_sheet_configured = %config.purchases_sheet_id.is_some(),
        google_credentials_present = %config.google_service_account_json.is_some(),
        stripe_configured = %config.stripe_secret_key.is_some(),
        stripe_price_configured = %config.stripe_price_id.is_some(),
        "Service configuration loaded"
    );

    let state = AppState::new(config.clone());
    let app = create_router(state);

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
