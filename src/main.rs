use std::sync::Arc;

use anyhow::Context;
use dorm_move_store::{config::Config, router, Store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load(dorm_move_store::config::CONFIG_PATH)?;
    let store = Arc::new(Store::open(&config).context("failed to open store")?);

    let app = router(store.clone());

    tracing::info!("listening on {}", config.addr);

    axum::Server::try_bind(&config.addr)
        .with_context(|| format!("failed to bind {}", config.addr))?
        .serve(app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("shutting down");
        })
        .await?;

    store.flush().context("failed to write final snapshot")?;
    Ok(())
}
