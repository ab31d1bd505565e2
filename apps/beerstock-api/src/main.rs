use axum_helpers::server::{create_production_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::Store;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Before any fallible operation, so start-up errors are colored too
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let store = Store::connect(&config.store, config.app.name).await?;

    let router = create_router::<openapi::ApiDoc>(api::routes(&store))?;

    // /health: liveness with name/version
    // /ready: store health checks
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(store.clone()));

    info!(
        "Starting {} with graceful shutdown ({:?} timeout)",
        config.app.name, config.server.shutdown_timeout
    );

    create_production_app(app, &config.server, async move {
        info!("Shutting down: closing beer store");
        store.close().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Beer stock API shutdown complete");
    Ok(())
}
