use std::sync::Arc;

use tokio::sync::RwLock;

use crate::services::{recommender::DEFAULT_TOP_N, Engine, PosterLookup};

/// Shared reference to the current recommendation engine
///
/// Handlers take a snapshot with [`EngineHandle::current`] and release the lock before
/// doing any work. A rebuilt engine replaces the old one with [`EngineHandle::swap`];
/// requests already holding a snapshot finish against the engine they started with.
#[derive(Clone)]
pub struct EngineHandle {
    inner: Arc<RwLock<Arc<Engine>>>,
}

impl EngineHandle {
    pub fn new(engine: Engine) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(engine))),
        }
    }

    /// Snapshot of the engine serving new requests
    pub async fn current(&self) -> Arc<Engine> {
        self.inner.read().await.clone()
    }

    /// Installs `engine` for subsequent requests and returns the previous one
    pub async fn swap(&self, engine: Engine) -> Arc<Engine> {
        let mut guard = self.inner.write().await;
        let previous = std::mem::replace(&mut *guard, Arc::new(engine));
        tracing::info!(
            movies = guard.corpus().len(),
            vocabulary = guard.vocabulary_len(),
            "Recommendation engine swapped"
        );
        previous
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: EngineHandle,
    pub posters: Arc<dyn PosterLookup>,
    /// Number of records returned by `GET /`
    pub excerpt_size: usize,
    /// Number of recommendations per query
    pub max_recommendations: usize,
}

impl AppState {
    /// Creates state with the default excerpt and recommendation sizes
    pub fn new(engine: Engine, posters: Arc<dyn PosterLookup>) -> Self {
        Self {
            engine: EngineHandle::new(engine),
            posters,
            excerpt_size: 12,
            max_recommendations: DEFAULT_TOP_N,
        }
    }
}
