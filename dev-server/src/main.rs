//! Development server for StaffDesk UI development
//!
//! Runs the mock api on a fixed port, filled with a small company's worth
//! of data, so the UI can be worked on without the real backend.
//!
//! Environment variables can be set directly or loaded from a .env file:
//! - PORT: port to listen on (default 4000)
//!
//! Usage: cargo run -p dev-server

use anyhow::{Context, Result};
use mock_api::store::Clock;
use test_helpers::mock::DevDataset;
use tracing::info;

const DEFAULT_PORT: u16 = 4000;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    let subscriber = mock_api::telemetry::get_subscriber("info".into());
    mock_api::telemetry::init_subscriber(subscriber)?;

    let port = match std::env::var("PORT") {
        Ok(port) => port.parse().context("PORT must be a port number")?,
        Err(_) => DEFAULT_PORT,
    };

    info!("🚀 Starting StaffDesk development server");
    let app = test_helpers::spawn_app_with_clock(port, Clock::System).await;
    info!("✅ API server running on http://127.0.0.1:{}", app.port);

    info!("📊 Setting up development test data...");
    let dataset = DevDataset::create(&app).await?;
    // the browser logs in on its own
    app.client.logout().await?;

    info!("🎯 Development server ready!");
    info!("   API: http://127.0.0.1:{}", app.port);
    info!(
        "   UI:  cd ui && BACKEND_URL=http://127.0.0.1:{} trunk serve",
        app.port
    );
    info!("");
    dataset.print_summary();
    info!("");
    info!("👋 Press Ctrl+C to shutdown");

    tokio::signal::ctrl_c().await?;
    info!("🛑 Shutting down development server");
    Ok(())
}
