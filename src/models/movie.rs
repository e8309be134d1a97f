use serde::{Deserialize, Serialize};

use super::{serialize_count_or_na, serialize_float_or_na, serialize_text_or_na};

/// Columns the corpus file must provide
pub const REQUIRED_COLUMNS: [&str; 5] = ["id", "title", "genres", "keywords", "overview"];

/// One row of the TMDB movies file
///
/// `genres` and `keywords` keep the embedded JSON text exactly as it appears in the
/// source; feature extraction parses them when the recommender is built. The
/// remaining optional columns are carried for display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    #[serde(default, serialize_with = "serialize_count_or_na")]
    pub budget: Option<f64>,
    pub genres: String,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub homepage: Option<String>,
    pub id: u64,
    pub keywords: String,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub original_language: Option<String>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub original_title: Option<String>,
    /// Empty when the source cell is blank
    #[serde(default)]
    pub overview: String,
    #[serde(default, serialize_with = "serialize_float_or_na")]
    pub popularity: Option<f64>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub production_companies: Option<String>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub production_countries: Option<String>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub release_date: Option<String>,
    #[serde(default, serialize_with = "serialize_count_or_na")]
    pub revenue: Option<f64>,
    #[serde(default, serialize_with = "serialize_count_or_na")]
    pub runtime: Option<f64>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub spoken_languages: Option<String>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub status: Option<String>,
    #[serde(default, serialize_with = "serialize_text_or_na")]
    pub tagline: Option<String>,
    pub title: String,
    #[serde(default, serialize_with = "serialize_float_or_na")]
    pub vote_average: Option<f64>,
    #[serde(default, serialize_with = "serialize_count_or_na")]
    pub vote_count: Option<f64>,
}

impl MovieRecord {
    /// Creates a record with only the required columns populated
    pub fn new(id: u64, title: impl Into<String>, genres: impl Into<String>, keywords: impl Into<String>) -> Self {
        Self {
            budget: None,
            genres: genres.into(),
            homepage: None,
            id,
            keywords: keywords.into(),
            original_language: None,
            original_title: None,
            overview: String::new(),
            popularity: None,
            production_companies: None,
            production_countries: None,
            release_date: None,
            revenue: None,
            runtime: None,
            spoken_languages: None,
            status: None,
            tagline: None,
            title: title.into(),
            vote_average: None,
            vote_count: None,
        }
    }
}
