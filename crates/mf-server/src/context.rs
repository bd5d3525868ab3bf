//! Application context shared by all request handlers.

use std::sync::Arc;

use mf_core::config::Config;
use mf_engine::MovieService;

/// Application context shared by all request handlers (via Axum state).
///
/// This is cheaply cloneable because it only holds `Arc`s.
#[derive(Clone)]
pub struct AppContext {
    /// Immutable application configuration snapshot.
    pub config: Arc<Config>,
    /// Cached, enriched movie catalog.
    pub movies: Arc<MovieService>,
}

impl AppContext {
    pub fn new(config: Config, movies: MovieService) -> Self {
        Self {
            config: Arc::new(config),
            movies: Arc::new(movies),
        }
    }
}
