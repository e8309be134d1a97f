use serde_json::Value;

use crate::models::MovieRecord;

/// Extracts the `name` of every entry in an embedded JSON list such as
/// `[{"id": 28, "name": "Action"}]`.
///
/// Entries without a string `name` are skipped. Text that is not a JSON array is an error.
pub fn parse_names(raw: &str) -> Result<Vec<String>, serde_json::Error> {
    let entries: Vec<Value> = serde_json::from_str(raw)?;
    Ok(entries
        .iter()
        .filter_map(|entry| entry.get("name").and_then(Value::as_str))
        .map(squash_whitespace)
        .filter(|name| !name.is_empty())
        .collect())
}

/// Removes every whitespace character so multi-word names become a single token
fn squash_whitespace(name: &str) -> String {
    name.split_whitespace().collect()
}

/// Genre and keyword names of a movie joined by single spaces
///
/// A malformed `genres` or `keywords` cell contributes nothing rather than failing.
pub fn feature_text(movie: &MovieRecord) -> String {
    let mut names = names_or_empty(movie, "genres", &movie.genres);
    names.extend(names_or_empty(movie, "keywords", &movie.keywords));
    names.join(" ")
}

fn names_or_empty(movie: &MovieRecord, field: &'static str, raw: &str) -> Vec<String> {
    parse_names(raw).unwrap_or_else(|e| {
        tracing::debug!(
            movie_id = movie.id,
            field,
            error = %e,
            "Malformed structured field, treating as empty"
        );
        Vec::new()
    })
}
