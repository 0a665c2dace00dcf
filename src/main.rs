use chargehub::bootstrap;
use chargehub::config::Config;
use chargehub::router::{HubState, hub_router};
use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.basic.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        listen_addr = %cfg.basic.listen_addr,
        database = %cfg.database.path.display(),
        schema = %cfg.database.schema_path.display(),
        max_connections = cfg.database.max_connections,
        project_dir = %cfg.basic.project_dir.as_deref().unwrap_or("<none>"),
        loglevel = %cfg.basic.loglevel
    );

    bootstrap::enter_project_dir(cfg.basic.project_dir.as_deref())?;

    let (storage, outcome) = bootstrap::ensure_database(&cfg.database).await?;
    info!(?outcome, path = %cfg.database.path.display(), "database ready");

    let app = hub_router(HubState::new(storage.clone()));

    let listener = TcpListener::bind(&cfg.basic.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.basic.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    storage.close().await;
    info!("database pool closed, bye");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
