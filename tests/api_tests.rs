use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::Value;

use movie_recs::{
    api::{create_router, AppState},
    services::{Corpus, Engine, PosterLookup, TmdbPosterClient, PLACEHOLDER_POSTER_URL},
};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/movies.csv");

/// Poster provider that derives a URL from the title
struct StaticPosters;

#[async_trait::async_trait]
impl PosterLookup for StaticPosters {
    async fn poster_url(&self, title: &str) -> String {
        format!("https://posters.test/{}.jpg", title.replace(' ', "_"))
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

fn create_test_server_with(posters: Arc<dyn PosterLookup>) -> TestServer {
    let corpus = Corpus::load(FIXTURE).unwrap();
    let state = AppState::new(Engine::build(corpus), posters);
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

fn create_test_server() -> TestServer {
    let posters = TmdbPosterClient::new(
        None,
        "http://127.0.0.1:9".to_string(),
        "https://image.tmdb.org/t/p/w500".to_string(),
        Duration::from_millis(100),
    );
    create_test_server_with(Arc::new(posters))
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["movies"], 13);
}

#[tokio::test]
async fn test_root_returns_excerpt() {
    let server = create_test_server();
    let response = server.get("/").await;
    response.assert_status_ok();
    let movies: Vec<Value> = response.json();
    assert_eq!(movies.len(), 12);
    assert_eq!(movies[0]["title"], "Avatar");
    assert_eq!(movies[0]["budget"], 237000000);
}

#[tokio::test]
async fn test_get_movie_by_id() {
    let server = create_test_server();
    let response = server.get("/movies/949").await;
    response.assert_status_ok();
    let movie: Value = response.json();
    assert_eq!(movie["title"], "Heat");
    assert_eq!(movie["release_date"], "1995-12-15");
    assert_eq!(movie["tagline"], "A Los Angeles crime saga");
    assert_eq!(movie["vote_average"], 7.7);
}

#[tokio::test]
async fn test_unknown_id_is_404() {
    let server = create_test_server();
    let response = server.get("/movies/123456789").await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Movie 123456789 not found");
}

#[tokio::test]
async fn test_missing_and_non_finite_values_are_na() {
    let server = create_test_server();
    let response = server.get("/movies/40000").await;
    response.assert_status_ok();
    let movie: Value = response.json();
    assert_eq!(movie["overview"], "");
    assert_eq!(movie["budget"], "N/A");
    assert_eq!(movie["runtime"], "N/A");
    assert_eq!(movie["revenue"], "N/A");
    assert_eq!(movie["release_date"], "N/A");
    assert!(movie["vote_average"].is_f64());
    assert_eq!(movie["vote_count"], 0);

    let text = response.text();
    assert!(!text.contains("NaN"));
    assert!(!text.contains("Infinity"));
}

#[tokio::test]
async fn test_get_movie_by_title_first_occurrence() {
    let server = create_test_server();
    let response = server
        .get("/movies")
        .add_query_param("movie_title", "Hercules")
        .await;
    response.assert_status_ok();
    let movie: Value = response.json();
    assert_eq!(movie["id"], 11970);
}

#[tokio::test]
async fn test_unknown_title_is_404() {
    let server = create_test_server();
    let response = server
        .get("/movies")
        .add_query_param("movie_title", "Not A Movie")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Not A Movie not found");
}

#[tokio::test]
async fn test_recommendation() {
    let server = create_test_server();
    let response = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Heat")
        .await;
    response.assert_status_ok();

    let recs: Vec<Value> = response.json();
    assert_eq!(recs.len(), 10);
    assert_eq!(recs[0]["title"], "Ronin");
    assert!(recs.iter().all(|r| r["id"] != 949));

    let keys: Vec<&String> = recs[0].as_object().unwrap().keys().collect();
    assert_eq!(keys.len(), 4);
    for field in ["id", "title", "overview", "release_date"] {
        assert!(recs[0].get(field).is_some(), "missing {field}");
    }
}

#[tokio::test]
async fn test_recommendation_is_repeatable() {
    let server = create_test_server();
    let first: Vec<Value> = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Titanic")
        .await
        .json();
    let second: Vec<Value> = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Titanic")
        .await
        .json();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_recommendation_for_duplicate_title() {
    let server = create_test_server();
    let recs: Vec<Value> = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Hercules")
        .await
        .json();

    assert_eq!(recs[0]["id"], 184345);
    assert!(recs.iter().all(|r| r["id"] != 11970));
}

#[tokio::test]
async fn test_recommendation_unknown_title_is_404() {
    let server = create_test_server();
    let response = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Avatar 7")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["error"], "Avatar 7 not found");
}

#[tokio::test]
async fn test_posters_without_key_use_placeholder() {
    let server = create_test_server();
    let recs: Vec<Value> = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Aliens")
        .add_query_param("with_posters", "true")
        .await
        .json();

    assert_eq!(recs.len(), 10);
    assert!(recs.iter().all(|r| r["poster_url"] == PLACEHOLDER_POSTER_URL));
}

#[tokio::test]
async fn test_posters_are_attached_per_record() {
    let server = create_test_server_with(Arc::new(StaticPosters));
    let recs: Vec<Value> = server
        .get("/movie-recommendation")
        .add_query_param("movie_title", "Heat")
        .add_query_param("with_posters", "true")
        .await
        .json();

    assert_eq!(recs[0]["poster_url"], "https://posters.test/Ronin.jpg");
}

#[tokio::test]
async fn test_movie_poster_endpoint() {
    let server = create_test_server_with(Arc::new(StaticPosters));
    let response = server
        .get("/movie-poster")
        .add_query_param("movie_title", "The Rock")
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["poster_url"], "https://posters.test/The_Rock.jpg");

    let response = server
        .get("/movie-poster")
        .add_query_param("movie_title", "Unknown")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let server = create_test_server();
    let response = server
        .get("/health")
        .add_header(
            "x-request-id".parse::<axum::http::HeaderName>().unwrap(),
            "trace-abc".parse::<axum::http::HeaderValue>().unwrap(),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "trace-abc");
}
