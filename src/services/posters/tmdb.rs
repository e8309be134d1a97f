//! TMDB poster provider
//!
//! Searches `/search/movie` by title and joins the first result's `poster_path`
//! onto the image base URL.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::{
    config::Config,
    error::{AppError, AppResult},
    services::posters::{PosterLookup, PLACEHOLDER_POSTER_URL},
};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    #[serde(default)]
    poster_path: Option<String>,
}

#[derive(Clone)]
pub struct TmdbPosterClient {
    http_client: HttpClient,
    api_key: Option<String>,
    api_url: String,
    image_base_url: String,
    timeout: Duration,
}

impl TmdbPosterClient {
    pub fn new(
        api_key: Option<String>,
        api_url: String,
        image_base_url: String,
        timeout: Duration,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            api_url,
            image_base_url,
            timeout,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.tmdb_image_base_url.clone(),
            Duration::from_secs(config.poster_timeout_secs),
        )
    }

    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    /// First poster path found for `title`, `None` when TMDB has no match
    async fn search_poster_path(&self, api_key: &str, title: &str) -> AppResult<Option<String>> {
        let url = format!("{}/search/movie", self.api_url.trim_end_matches('/'));

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", api_key), ("query", title)])
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AppError::Internal(format!(
                "TMDB API returned status {}",
                response.status()
            )));
        }

        let search: SearchResponse = response.json().await?;
        Ok(search
            .results
            .into_iter()
            .next()
            .and_then(|r| r.poster_path)
            .filter(|path| !path.is_empty()))
    }

    fn image_url(&self, poster_path: &str) -> String {
        format!("{}{}", self.image_base_url.trim_end_matches('/'), poster_path)
    }
}

#[async_trait::async_trait]
impl PosterLookup for TmdbPosterClient {
    async fn poster_url(&self, title: &str) -> String {
        let Some(api_key) = self.api_key.as_deref() else {
            tracing::debug!(title = %title, "TMDB_API_KEY not set, using placeholder poster");
            return PLACEHOLDER_POSTER_URL.to_string();
        };

        match self.search_poster_path(api_key, title).await {
            Ok(Some(path)) => self.image_url(&path),
            Ok(None) => {
                tracing::debug!(title = %title, "No TMDB poster found");
                PLACEHOLDER_POSTER_URL.to_string()
            }
            Err(e) => {
                tracing::warn!(title = %title, error = %e, "TMDB poster lookup failed");
                PLACEHOLDER_POSTER_URL.to_string()
            }
        }
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
