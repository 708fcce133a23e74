use std::sync::Arc;

use shop_analytics::config::DEFAULT_LOG_FILTER;
use shop_analytics::{http, CollectionRepository, Config, JsonFileStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;
    tracing::info!(db_path = %config.db_path.display(), "opening document");
    let store = JsonFileStore::open_or_init(&config.db_path)?;
    let repo = Arc::new(CollectionRepository::new(store));

    http::serve(repo, config.addr).await?;
    Ok(())
}
