use std::{num::NonZeroU32, sync::Arc};

use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use serde::Deserialize;

use crate::{error::ApiResult, models::MovieRecord};

/// Client for the OMDb metadata provider. Lookups are read-only and every
/// failure mode (transport, parse, provider "not found") collapses to
/// `Ok(None)` so callers only ever see a missing draft.
pub struct OmdbClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
}

impl OmdbClient {
    pub fn new(client: reqwest::Client, api_key: String, base_url: String, rps: u32) -> Self {
        let limiter =
            Arc::new(RateLimiter::direct(Quota::per_second(NonZeroU32::new(rps.max(1)).unwrap())));
        Self { client, api_key, base_url, limiter }
    }

    pub async fn fetch_draft(&self, title: &str) -> ApiResult<Option<MovieRecord>> {
        self.limiter.until_ready().await;

        let url = self.base_url.trim_end_matches('/').to_string();
        let resp = self
            .client
            .get(url)
            .query(&[("t", title), ("apikey", &self.api_key)])
            .send()
            .await
            .and_then(|r| r.error_for_status());

        let resp = match resp {
            Ok(resp) => resp,
            Err(err) => {
                tracing::warn!(title, error = %err, "omdb request failed");
                return Ok(None);
            }
        };

        let lookup: OmdbLookup = match resp.json().await {
            Ok(lookup) => lookup,
            Err(err) => {
                tracing::warn!(title, error = %err, "omdb response unreadable");
                return Ok(None);
            }
        };

        if lookup.response != "True" {
            tracing::debug!(title, error = ?lookup.error, "omdb reported no match");
            return Ok(None);
        }

        Ok(Some(MovieRecord {
            title: lookup.title.unwrap_or_else(|| title.to_string()),
            year: lookup.year.unwrap_or_default(),
            director: lookup.director.unwrap_or_default(),
            actors: split_actors(&lookup.actors.unwrap_or_default()),
            // Provider ratings are discarded; drafts start unrated and unseen.
            rating: 0.0,
            seen: false,
            genre: lookup.genre.unwrap_or_default(),
            poster: lookup.poster.unwrap_or_default(),
        }))
    }
}

fn split_actors(actors: &str) -> Vec<String> {
    actors
        .split(", ")
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Deserialize)]
struct OmdbLookup {
    #[serde(rename = "Response")]
    response: String,
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "Year")]
    year: Option<String>,
    #[serde(rename = "Director")]
    director: Option<String>,
    #[serde(rename = "Actors")]
    actors: Option<String>,
    #[serde(rename = "Genre")]
    genre: Option<String>,
    #[serde(rename = "Poster")]
    poster: Option<String>,
    #[serde(rename = "Error")]
    error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn actor_string_splits_in_order() {
        assert_eq!(
            split_actors("Timothée Chalamet, Rebecca Ferguson, Oscar Isaac"),
            vec!["Timothée Chalamet", "Rebecca Ferguson", "Oscar Isaac"]
        );
        assert!(split_actors("").is_empty());
    }

    #[test]
    fn success_payload_maps_to_draft() {
        let lookup: OmdbLookup = serde_json::from_str(
            r#"{"Response":"True","Title":"Dune","Year":"2021",
                "Director":"Denis Villeneuve","Actors":"Timothée Chalamet, Rebecca Ferguson",
                "Genre":"Sci-Fi","Poster":"http://x/p.jpg","imdbRating":"8.0"}"#,
        )
        .unwrap();
        assert_eq!(lookup.response, "True");
        assert_eq!(lookup.title.as_deref(), Some("Dune"));
    }

    #[test]
    fn provider_miss_is_flagged() {
        let lookup: OmdbLookup =
            serde_json::from_str(r#"{"Response":"False","Error":"Movie not found!"}"#).unwrap();
        assert_eq!(lookup.response, "False");
        assert_eq!(lookup.error.as_deref(), Some("Movie not found!"));
    }

    #[tokio::test]
    async fn unreachable_provider_yields_no_draft() {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        // Port 1 on loopback refuses the connection immediately.
        let client =
            OmdbClient::new(http, "test-key".to_string(), "http://127.0.0.1:1".to_string(), 4);
        let draft = client.fetch_draft("Dune").await.unwrap();
        assert!(draft.is_none());
    }
}
