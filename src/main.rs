use std::sync::Arc;

use streamflix_api::{
    api::{create_router, AppState},
    catalog::Catalog,
    config::Config,
    logging,
    storage::FileSnapshotStore,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;
    logging::init_tracing(config.log_json)?;

    let snapshots = Arc::new(FileSnapshotStore::new(config.snapshot_dir.clone()));
    let address = config.bind_address();

    // Initialize application state from the last session snapshot
    let state = AppState::restore(Catalog::mock(), snapshots, config).await?;
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(%address, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
