//! Snap Insight server binary.

use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use snap_insight::adapters::ai::HttpVisionAnalyzer;
use snap_insight::adapters::http::{app_router, AnalysisAppState, PaymentAppState};
use snap_insight::adapters::postgres::PostgresOrderStore;
use snap_insight::config::AppConfig;
use snap_insight::ports::{ImageAnalyzer, OrderStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    let order_store: Arc<dyn OrderStore> = Arc::new(PostgresOrderStore::new(pool));
    let analyzer: Arc<dyn ImageAnalyzer> = Arc::new(HttpVisionAnalyzer::new(config.ai.clone()));

    let app = app_router(
        PaymentAppState {
            order_store: order_store.clone(),
            payment: config.payment.clone(),
        },
        AnalysisAppState {
            order_store,
            analyzer,
        },
        config.server.cors_origins_list(),
    );

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "snap-insight listening");

    axum::serve(listener, app).await?;

    Ok(())
}
