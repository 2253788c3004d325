use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

use cityfare_api::AppState;
use cityfare_core::Config;
use cityfare_store::{MemoryRecipeStore, RecipeBackend};
use cityfare_upstream::UpstreamClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    cityfare_core::init()?;

    // Fail fast on bad or missing configuration
    let config = Config::from_env()?;

    let upstream = UpstreamClient::new(
        config.upstream_url.clone(),
        config.api_key.clone(),
        Duration::from_secs(config.upstream_timeout_secs),
    )?;
    let store: Arc<dyn RecipeBackend> = Arc::new(MemoryRecipeStore::new());

    let state = AppState { store, upstream };

    cityfare_api::serve(state, config.listen_addr(), |addr| {
        tracing::info!("cityfare listening on {}", addr);
    })
    .await
}
