//! Content-based recommender
//!
//! Every movie is represented by the TF-IDF vector of its genre and keyword names.
//! Similarity between two movies is the cosine of their vectors. The engine is built
//! once from a [`Corpus`] and is read-only afterwards.

use std::collections::HashMap;
use std::time::Instant;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, Recommendation},
    services::corpus::Corpus,
};

pub mod features;
pub mod stop_words;
pub mod vectorizer;

pub use vectorizer::{SparseVector, TfidfVectorizer};

/// Vocabulary cap of the fitted vectorizer
pub const MAX_FEATURES: usize = 5000;

/// Number of recommendations returned when the caller does not ask for another amount
pub const DEFAULT_TOP_N: usize = 10;

/// Immutable recommendation state
pub struct Engine {
    corpus: Corpus,
    vectorizer: TfidfVectorizer,
    features: Vec<SparseVector>,
    /// term id → (position, weight) for every row containing the term
    postings: Vec<Vec<(usize, f64)>>,
    /// title → position of its first occurrence
    titles: HashMap<String, usize>,
}

impl Engine {
    /// Derives feature text for every movie, fits the vectorizer and indexes titles
    pub fn build(corpus: Corpus) -> Self {
        let started = Instant::now();

        let texts: Vec<String> = corpus.iter().map(features::feature_text).collect();
        let mut vectorizer = TfidfVectorizer::new(MAX_FEATURES);
        let features = vectorizer.fit_transform(&texts);

        let mut postings = vec![Vec::new(); vectorizer.vocabulary_len()];
        for (position, row) in features.iter().enumerate() {
            for &(term, weight) in row.entries() {
                postings[term as usize].push((position, weight));
            }
        }

        let mut titles = HashMap::with_capacity(corpus.len());
        for (position, movie) in corpus.iter().enumerate() {
            titles.entry(movie.title.clone()).or_insert(position);
        }

        tracing::info!(
            movies = corpus.len(),
            vocabulary = vectorizer.vocabulary_len(),
            unique_titles = titles.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Recommendation engine built"
        );

        Self {
            corpus,
            vectorizer,
            features,
            postings,
            titles,
        }
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn vocabulary_len(&self) -> usize {
        self.vectorizer.vocabulary_len()
    }

    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.titles.get(title).copied()
    }

    pub fn movie_by_title(&self, title: &str) -> Option<&MovieRecord> {
        self.position_of(title).and_then(|p| self.corpus.get(p))
    }

    pub fn movie_by_id(&self, id: u64) -> Option<&MovieRecord> {
        self.corpus.find_by_id(id)
    }

    /// Feature row of the movie at `position`
    pub fn feature_row(&self, position: usize) -> Option<&SparseVector> {
        self.features.get(position)
    }

    /// Cosine similarity between the row at `position` and every row, itself included
    pub fn scores(&self, position: usize) -> AppResult<Vec<f64>> {
        let query = self.features.get(position).ok_or_else(|| {
            AppError::Internal(format!(
                "position {} outside feature matrix of {} rows",
                position,
                self.features.len()
            ))
        })?;

        // Rows are unit length, so the dot product is the cosine.
        let mut scores = vec![0.0; self.features.len()];
        for &(term, query_weight) in query.entries() {
            for &(row, weight) in &self.postings[term as usize] {
                scores[row] += query_weight * weight;
            }
        }
        Ok(scores)
    }

    /// The `top_n` positions most similar to `position`, best first
    ///
    /// The query position itself is never returned. Equal scores keep ascending
    /// position order.
    pub fn similar_to_position(&self, position: usize, top_n: usize) -> AppResult<Vec<(usize, f64)>> {
        let scores = self.scores(position)?;

        let mut ranked: Vec<(usize, f64)> = scores
            .into_iter()
            .enumerate()
            .filter(|(candidate, _)| *candidate != position)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked.truncate(top_n);

        Ok(ranked)
    }

    /// Movies most similar to the one titled `title`
    pub fn recommend(&self, title: &str, top_n: usize) -> AppResult<Vec<Recommendation>> {
        let position = self
            .position_of(title)
            .ok_or_else(|| AppError::NotFound(format!("{} not found", title)))?;

        self.similar_to_position(position, top_n)?
            .into_iter()
            .map(|(candidate, _)| {
                self.corpus
                    .get(candidate)
                    .map(Recommendation::from)
                    .ok_or_else(|| AppError::Internal(format!("position {} missing from corpus", candidate)))
            })
            .collect()
    }
}
