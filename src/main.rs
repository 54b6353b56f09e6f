use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use portal_gateway::db::{self, PortalStorage};
use portal_gateway::router::{GatewayState, gateway_router};
use portal_gateway::service::files::FileStore;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = &portal_gateway::config::CONFIG;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        listen_addr = %cfg.listen_addr,
        upload_dir = %cfg.upload_dir.display(),
        loglevel = %cfg.loglevel
    );

    // A failed connection aborts startup; everything after this point
    // surfaces errors per-request instead.
    let pool = db::connect(&cfg.database_url).await?;
    let storage = PortalStorage::new(pool.clone());
    storage.init_schema().await?;

    let files = FileStore::new(&cfg.upload_dir);
    let state = GatewayState::new(storage, files);
    let app = gateway_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
