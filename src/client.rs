use reqwest::StatusCode;

use crate::{
    error::{ApiError, ApiResult},
    models::{MoviePatch, MovieRecord},
};

/// HTTP client for the movie service, used by the view-model side. Maps the
/// service's status-code contract back into the domain error taxonomy.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    pub async fn list_movies(&self) -> ApiResult<Vec<MovieRecord>> {
        let resp = self.http.get(format!("{}/movies", self.base_url)).send().await;
        let resp = check(resp).await?;
        Ok(resp.json().await.map_err(anyhow::Error::from)?)
    }

    pub async fn fetch_draft(&self, title: &str) -> ApiResult<MovieRecord> {
        let url = format!("{}/getMovie/{}", self.base_url, urlencoding::encode(title));
        let resp = check(self.http.get(url).send().await).await?;
        Ok(resp.json().await.map_err(anyhow::Error::from)?)
    }

    pub async fn add_movie(&self, record: &MovieRecord) -> ApiResult<()> {
        let url = format!("{}/addMovie", self.base_url);
        check(self.http.post(url).json(record).send().await).await?;
        Ok(())
    }

    pub async fn update_movie(&self, title: &str, patch: &MoviePatch) -> ApiResult<()> {
        let url = format!("{}/updateMovie/{}", self.base_url, urlencoding::encode(title));
        check(self.http.put(url).json(patch).send().await).await?;
        Ok(())
    }
}

async fn check(
    resp: Result<reqwest::Response, reqwest::Error>,
) -> ApiResult<reqwest::Response> {
    let resp = resp.map_err(anyhow::Error::from)?;
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }

    let message = error_message(resp).await;
    match status {
        StatusCode::NOT_FOUND => Err(ApiError::NotFound(message)),
        StatusCode::CONFLICT => Err(ApiError::Conflict(message)),
        StatusCode::BAD_REQUEST => Err(ApiError::BadRequest(message)),
        _ => Err(anyhow::anyhow!("server responded {status}: {message}").into()),
    }
}

/// Best-effort extraction of the `{"error": ...}` body; falls back to the
/// raw text.
async fn error_message(resp: reqwest::Response) -> String {
    let raw = resp.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&raw)
        .ok()
        .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(str::to_string))
        .unwrap_or(raw)
}
