use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use crate::{
    error::{AppError, AppResult},
    models::{MovieRecord, REQUIRED_COLUMNS},
};

/// Ordered, immutable collection of movies
///
/// A record's position is fixed for the lifetime of the corpus and is the key shared
/// with the recommender's feature rows.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    movies: Vec<MovieRecord>,
    /// id → position of the first record carrying that id
    by_id: HashMap<u64, usize>,
}

impl Corpus {
    /// Loads a corpus from a CSV file
    pub fn load(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(AppError::NotFound(format!(
                "Corpus file {} not found",
                path.display()
            )));
        }

        let file = std::fs::File::open(path)
            .map_err(|e| AppError::Load(format!("{}: {}", path.display(), e)))?;
        let corpus = Self::from_reader(file)?;

        tracing::info!(
            path = %path.display(),
            movies = corpus.len(),
            "Corpus loaded"
        );

        Ok(corpus)
    }

    /// Parses CSV data with a header row
    pub fn from_reader<R: Read>(reader: R) -> AppResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = reader.headers()?.clone();
        let mut missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|column| !headers.iter().any(|h| h == **column))
            .map(|column| column.to_string())
            .collect();
        if !missing.is_empty() {
            missing.sort();
            return Err(AppError::Schema(missing));
        }

        let mut movies = Vec::new();
        for (row, result) in reader.deserialize::<MovieRecord>().enumerate() {
            let movie = result.map_err(|e| AppError::Load(format!("row {}: {}", row + 1, e)))?;
            movies.push(movie);
        }

        Ok(Self::from_records(movies))
    }

    /// Builds a corpus from records already in memory
    pub fn from_records(movies: Vec<MovieRecord>) -> Self {
        let mut by_id = HashMap::with_capacity(movies.len());
        for (position, movie) in movies.iter().enumerate() {
            by_id.entry(movie.id).or_insert(position);
        }
        Self { movies, by_id }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&MovieRecord> {
        self.movies.get(position)
    }

    pub fn iter(&self) -> impl Iterator<Item = &MovieRecord> {
        self.movies.iter()
    }

    /// First `n` records in corpus order
    pub fn excerpt(&self, n: usize) -> &[MovieRecord] {
        &self.movies[..n.min(self.movies.len())]
    }

    pub fn find_by_id(&self, id: u64) -> Option<&MovieRecord> {
        self.by_id.get(&id).and_then(|&position| self.movies.get(position))
    }
}
