use std::{sync::Arc, time::Duration};

use reelshelf::{
    AppState, build_router,
    config::{Config, StoreBackend},
    db,
    omdb::OmdbClient,
    store::{DbStore, JsonFileStore, MovieStore},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,reelshelf=debug,sqlx=warn".to_string()),
        )
        .init();

    let config = Config::from_env()?;

    let http = reqwest::Client::builder()
        .user_agent("reelshelf/0.1")
        .timeout(Duration::from_secs(30))
        .build()?;

    let store: Arc<dyn MovieStore> = match &config.backend {
        StoreBackend::File(path) => {
            tracing::info!(path = %path.display(), "using file-backed store");
            Arc::new(JsonFileStore::new(path.clone()))
        }
        StoreBackend::Database(url) => {
            tracing::info!("using database-backed store");
            Arc::new(DbStore::new(db::connect_and_migrate(url).await?))
        }
    };

    let omdb = OmdbClient::new(
        http,
        config.omdb_api_key.clone(),
        config.omdb_base_url.clone(),
        config.omdb_rps,
    );

    let state = Arc::new(AppState { store, omdb: Arc::new(omdb) });
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    tracing::info!(addr = %config.addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
