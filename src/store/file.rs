use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    error::ApiResult,
    models::{MoviePatch, MovieRecord},
    store::{InsertOutcome, MovieStore, UpdateOutcome},
};

/// Flat-file backend: the whole collection lives in one pretty-printed JSON
/// array and every mutation rewrites the file in full. Mutations are
/// serialized through a single in-process lock, so concurrent requests
/// cannot drop each other's writes; writers outside this process still can.
/// Rewrites go through a temp file renamed into place, so lock-free readers
/// always see a complete array.
pub struct JsonFileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), write_lock: Mutex::new(()) }
    }

    async fn read_all(&self) -> ApiResult<Vec<MovieRecord>> {
        let raw = match tokio::fs::read(&self.path).await {
            Ok(raw) => raw,
            // A store that has never been written to is an empty collection.
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(err) => return Err(err.into()),
        };
        Ok(serde_json::from_slice(&raw)?)
    }

    async fn write_all(&self, movies: &[MovieRecord]) -> ApiResult<()> {
        let raw = serde_json::to_vec_pretty(movies)?;
        // Rename is atomic on the same filesystem; a concurrent read sees
        // either the old array or the new one, never a torn file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl MovieStore for JsonFileStore {
    async fn list(&self) -> ApiResult<Vec<MovieRecord>> {
        self.read_all().await
    }

    async fn find_by_title(&self, title: &str) -> ApiResult<Option<MovieRecord>> {
        let movies = self.read_all().await?;
        Ok(movies.into_iter().find(|m| m.title_matches(title)))
    }

    async fn insert(&self, record: MovieRecord) -> ApiResult<InsertOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut movies = self.read_all().await?;
        if movies.iter().any(|m| m.title_matches(&record.title)) {
            return Ok(InsertOutcome::DuplicateTitle);
        }
        movies.push(record);
        self.write_all(&movies).await?;
        Ok(InsertOutcome::Inserted)
    }

    async fn update_partial(&self, title: &str, patch: &MoviePatch) -> ApiResult<UpdateOutcome> {
        let _guard = self.write_lock.lock().await;

        let mut movies = self.read_all().await?;
        let Some(movie) = movies.iter_mut().find(|m| m.title_matches(title)) else {
            return Ok(UpdateOutcome::NoSuchTitle);
        };
        patch.apply_to(movie);
        self.write_all(&movies).await?;
        Ok(UpdateOutcome::Updated)
    }
}
