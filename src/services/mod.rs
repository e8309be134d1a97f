pub mod corpus;
pub mod posters;
pub mod recommender;

pub use corpus::Corpus;
pub use posters::{PosterLookup, TmdbPosterClient, PLACEHOLDER_POSTER_URL};
pub use recommender::Engine;
