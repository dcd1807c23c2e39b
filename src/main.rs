// Backend API server with embedded frontend
// MTA subway service status: live feed with bundled sample fallback

use actix_cors::Cors;
use actix_web::{middleware, web, App, HttpServer};
use anyhow::Context;
use tracing::info;

use subway_status::routes;
use subway_status::settings::Settings;
use subway_status::status_feed::StatusFetcher;
use subway_status::telemetry;

// ============================================================================
// Server Setup
// ============================================================================

async fn run_server(settings: Settings, fetcher: StatusFetcher) -> anyhow::Result<()> {
    info!("🚀 Subway status server listening on http://{}:{}", settings.host, settings.port);
    info!("📡 Upstream feed: {}", settings.service_status_url);
    info!("📁 Sample fallback: {}", settings.sample_status_path.display());
    if settings.api_key().is_none() {
        info!("🔑 No MTA_API_KEY configured, requesting the feed without one");
    }
    info!("📍 Routes: GET /  GET /api/status  GET /health");

    let data = web::Data::new(fetcher);

    HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(Cors::permissive())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .configure(routes::configure)
    })
    .bind((settings.host.as_str(), settings.port))
    .with_context(|| format!("Failed to bind {}:{}", settings.host, settings.port))?
    .run()
    .await
    .context("Server failed to run")
}

// ============================================================================
// Main Entry Point
// ============================================================================

fn main() -> anyhow::Result<()> {
    telemetry::init_tracing();

    let settings = Settings::load().context("Failed to load settings")?;
    let fetcher = StatusFetcher::new(&settings).context("Failed to build HTTP client")?;

    actix_web::rt::System::new().block_on(run_server(settings, fetcher))
}
