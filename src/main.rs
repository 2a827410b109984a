use std::sync::Arc;

use darts_league::{
    app,
    matches::InMemoryMatchRepository,
    stats::{InMemoryMatchArchive, InMemoryStatsRepository},
    AppConfig, AppState, MatchService, StatsService,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "darts_league=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();
    info!(?config, "Starting darts league server");

    let archive = Arc::new(InMemoryMatchArchive::new());
    let stats_service = Arc::new(
        StatsService::builder(Arc::new(InMemoryStatsRepository::new()), archive.clone()).build(),
    );
    let match_service = Arc::new(
        MatchService::new(Arc::new(InMemoryMatchRepository::new()), archive)
            .with_stats_service(stats_service.clone(), config.recompute_on_finalize),
    );

    let app = app(AppState::new(match_service, stats_service));

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    info!("Server running on http://{}", config.bind_addr);
    axum::serve(listener, app).await
}
