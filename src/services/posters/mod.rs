//! Poster image lookup
//!
//! Posters are enrichment only. A lookup never fails: every error path resolves to
//! [`PLACEHOLDER_POSTER_URL`] so recommendation responses are never blocked by the
//! third-party API.
use std::sync::Arc;

use crate::models::Recommendation;

pub mod tmdb;

pub use tmdb::TmdbPosterClient;

/// Image returned whenever a real poster cannot be found
pub const PLACEHOLDER_POSTER_URL: &str = "https://images.unsplash.com/photo-1536440136628-849c177e76a1?q=80&w=1325&auto=format&fit=crop&ixlib=rb-4.0.3&ixid=M3wxMjA3fDB8MHxwaG90by1wYWdlfHx8fGVufDB8fHx8fA%3D%3D";

/// Trait for poster image providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait PosterLookup: Send + Sync {
    /// Poster URL for a movie title, or the placeholder
    async fn poster_url(&self, title: &str) -> String;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

/// Fills `poster_url` on every recommendation, one lookup task per record
///
/// A task that panics or is cancelled leaves the placeholder in place.
pub async fn enrich_with_posters(
    lookup: Arc<dyn PosterLookup>,
    recommendations: Vec<Recommendation>,
) -> Vec<Recommendation> {
    let mut tasks = Vec::with_capacity(recommendations.len());
    for rec in &recommendations {
        let lookup = lookup.clone();
        let title = rec.title.clone();
        tasks.push(tokio::spawn(async move { lookup.poster_url(&title).await }));
    }

    let mut enriched = Vec::with_capacity(recommendations.len());
    for (mut rec, task) in recommendations.into_iter().zip(tasks) {
        let url = match task.await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!(title = %rec.title, error = %e, "Poster task failed");
                PLACEHOLDER_POSTER_URL.to_string()
            }
        };
        rec.poster_url = Some(url);
        enriched.push(rec);
    }

    tracing::debug!(
        provider = lookup.name(),
        records = enriched.len(),
        "Poster enrichment completed"
    );

    enriched
}
