use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::{Value, json};

use crate::{
    AppState,
    error::{ApiError, ApiResult},
    models::{MoviePatch, MovieRecord},
    store::{InsertOutcome, UpdateOutcome},
};

pub async fn index() -> &'static str {
    "reelshelf"
}

pub async fn list_movies(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<MovieRecord>>> {
    let movies = state.store.list().await?;
    Ok(Json(movies))
}

/// Draft lookup: asks the metadata provider, returns an unconfirmed record.
/// Nothing is written to the store here.
pub async fn get_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
) -> ApiResult<Json<MovieRecord>> {
    let draft = state
        .omdb
        .fetch_draft(&title)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("no metadata found for {title:?}")))?;
    Ok(Json(draft))
}

pub async fn add_movie(
    State(state): State<Arc<AppState>>,
    Json(record): Json<MovieRecord>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    if record.title.trim().is_empty() {
        return Err(ApiError::BadRequest("title is required".to_string()));
    }

    match state.store.insert(record).await? {
        InsertOutcome::Inserted => {
            Ok((StatusCode::CREATED, Json(json!({ "message": "movie added" }))))
        }
        InsertOutcome::DuplicateTitle => {
            Err(ApiError::Conflict("movie already exists".to_string()))
        }
    }
}

pub async fn update_movie(
    State(state): State<Arc<AppState>>,
    Path(title): Path<String>,
    Json(patch): Json<MoviePatch>,
) -> ApiResult<Json<Value>> {
    match state.store.update_partial(&title, &patch).await? {
        UpdateOutcome::Updated => Ok(Json(json!({ "message": "movie updated" }))),
        UpdateOutcome::NoSuchTitle => Err(ApiError::NotFound("movie not found".to_string())),
    }
}
