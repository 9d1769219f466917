use std::net::SocketAddr;

use anyhow::Context;

#[derive(Clone, Debug, PartialEq)]
pub enum StoreBackend {
    /// Whole collection serialized as one pretty-printed JSON file.
    File(std::path::PathBuf),
    /// One row per record in SQLite, addressed by connection string.
    Database(String),
}

#[derive(Clone, Debug)]
pub struct Config {
    pub addr: SocketAddr,
    pub omdb_api_key: String,
    pub omdb_base_url: String,
    pub omdb_rps: u32,
    pub backend: StoreBackend,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port: u16 =
            std::env::var("PORT").unwrap_or_else(|_| "5001".to_string()).parse().context("PORT")?;

        // Missing credential must fail at startup, not on first call.
        let omdb_api_key = std::env::var("OMDB_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .context("OMDB_API_KEY is required")?;

        let omdb_base_url = std::env::var("OMDB_BASE_URL")
            .unwrap_or_else(|_| "https://www.omdbapi.com".to_string());

        let omdb_rps: u32 =
            std::env::var("OMDB_RPS").ok().and_then(|s| s.parse().ok()).unwrap_or(4);

        let backend = match std::env::var("STORE_BACKEND").as_deref() {
            Ok("database") => {
                let url = std::env::var("DATABASE_URL")
                    .context("DATABASE_URL is required when STORE_BACKEND=database")?;
                StoreBackend::Database(url)
            }
            Ok("file") | Err(_) => {
                let path =
                    std::env::var("MOVIES_FILE").unwrap_or_else(|_| "movies.json".to_string());
                StoreBackend::File(path.into())
            }
            Ok(other) => anyhow::bail!("unknown STORE_BACKEND {other:?} (file or database)"),
        };

        Ok(Self {
            addr: format!("{host}:{port}").parse().context("HOST/PORT")?,
            omdb_api_key,
            omdb_base_url,
            omdb_rps,
            backend,
        })
    }
}
