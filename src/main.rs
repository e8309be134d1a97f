use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use movie_recs::{
    api::{create_router, AppState},
    config::Config,
    services::{Corpus, Engine, TmdbPosterClient},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "movie_recs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env()?;

    // Loading and indexing finish before the listener is bound; any failure aborts startup.
    let corpus = Corpus::load(&config.movies_csv)
        .with_context(|| format!("Failed to load movie data from {}", config.movies_csv))?;
    let engine = tokio::task::spawn_blocking(move || Engine::build(corpus))
        .await
        .context("Engine construction failed")?;

    let posters = TmdbPosterClient::from_config(&config);
    if !posters.is_enabled() {
        tracing::warn!("TMDB_API_KEY not set, posters fall back to the placeholder image");
    }

    let mut state = AppState::new(engine, Arc::new(posters));
    state.excerpt_size = config.excerpt_size;
    state.max_recommendations = config.max_recommendations;

    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!(addr = %addr, "Server running");
    axum::serve(listener, app).await?;

    Ok(())
}
