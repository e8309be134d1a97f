use serde::Serialize;

use super::{serialize_text_or_na, MovieRecord};

/// Public view of a recommended movie
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub id: u64,
    pub title: String,
    pub overview: String,
    #[serde(serialize_with = "serialize_text_or_na")]
    pub release_date: Option<String>,
    /// Only present when the caller asked for poster enrichment
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<String>,
}

impl From<&MovieRecord> for Recommendation {
    fn from(movie: &MovieRecord) -> Self {
        Self {
            id: movie.id,
            title: movie.title.clone(),
            overview: movie.overview.clone(),
            release_date: movie.release_date.clone(),
            poster_url: None,
        }
    }
}

/// Response body of `GET /movie-poster`
#[derive(Debug, Clone, Serialize)]
pub struct PosterResponse {
    pub title: String,
    pub poster_url: String,
}
