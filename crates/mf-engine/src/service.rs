//! Cached aggregation facade.
//!
//! [`MovieService`] is the only entry point the server and CLI use. Every
//! operation is memoized in a [`TtlCache`] keyed by operation name and
//! parameters. Catalog failures are logged and returned to the caller; they
//! are never cached.

use mf_core::config::Config;
use mf_core::{CanonicalMovie, Category, Genre, MoviePage, Result};
use mf_providers::{CatalogSource, OmdbClient, RatingsSource, RawPage, TmdbClient};
use serde_json::json;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::cache::{CacheKey, TtlCache};
use crate::enrich::Enricher;

/// A value held by the service cache.
#[derive(Debug, Clone)]
pub enum CachedData {
    Page(MoviePage),
    Movie(CanonicalMovie),
    Genres(Vec<Genre>),
}

/// Cached, enriched access to the movie catalog.
pub struct MovieService {
    catalog: Arc<dyn CatalogSource>,
    enricher: Enricher,
    cache: TtlCache<CachedData>,
}

impl MovieService {
    /// Create a service over explicit sources and cache.
    ///
    /// Passing `None` for `ratings` disables enrichment for the lifetime of
    /// the service.
    pub fn new(
        catalog: Arc<dyn CatalogSource>,
        ratings: Option<Arc<dyn RatingsSource>>,
        cache: TtlCache<CachedData>,
    ) -> Self {
        Self {
            catalog,
            enricher: Enricher::new(ratings),
            cache,
        }
    }

    /// Build the TMDB and OMDb clients from configuration.
    ///
    /// Fails when the TMDB key is missing. A missing OMDb key only disables
    /// enrichment.
    pub fn from_config(config: &Config) -> Result<Self> {
        let catalog = TmdbClient::from_config(&config.providers.tmdb)?;
        let ratings = OmdbClient::from_config(&config.providers.omdb)?
            .map(|client| Arc::new(client) as Arc<dyn RatingsSource>);

        if ratings.is_some() {
            info!("OMDb enrichment enabled");
        } else {
            warn!("OMDb API key not set, movies will not be enriched with IMDb ratings");
        }

        Ok(Self::new(Arc::new(catalog), ratings, TtlCache::new()))
    }

    pub fn enrichment_enabled(&self) -> bool {
        self.enricher.is_enabled()
    }

    /// Number of cache entries, including stale ones not yet evicted.
    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }

    pub async fn popular(&self, page: u32) -> Result<MoviePage> {
        self.list(Category::Popular, page).await
    }

    pub async fn top_rated(&self, page: u32) -> Result<MoviePage> {
        self.list(Category::TopRated, page).await
    }

    pub async fn now_playing(&self, page: u32) -> Result<MoviePage> {
        self.list(Category::NowPlaying, page).await
    }

    pub async fn upcoming(&self, page: u32) -> Result<MoviePage> {
        self.list(Category::Upcoming, page).await
    }

    /// Fetch one enriched page of a curated listing.
    pub async fn list(&self, category: Category, page: u32) -> Result<MoviePage> {
        let key = CacheKey::new(category.as_str(), &json!({ "page": page }));
        let fetch = self.catalog.list(category, page);
        self.cached_page(key, fetch).await
    }

    /// Search by title and enrich the matching page.
    pub async fn search(&self, query: &str, page: u32) -> Result<MoviePage> {
        let key = CacheKey::new("search", &json!({ "query": query, "page": page }));
        let fetch = self.catalog.search(query, page);
        self.cached_page(key, fetch).await
    }

    /// Fetch and enrich a single movie.
    pub async fn details(&self, id: u64) -> Result<CanonicalMovie> {
        let key = CacheKey::new("details", &json!({ "movieId": id }));
        if let Some(CachedData::Movie(movie)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(movie);
        }

        let raw = self
            .catalog
            .details(id)
            .await
            .inspect_err(|e| error!(key = %key, error = %e, "Failed to fetch movie details"))?;

        let movie = self.enricher.enrich_one(&raw).await;
        self.cache.set(key, CachedData::Movie(movie.clone()));
        Ok(movie)
    }

    /// The catalog's genre list, unmodified.
    pub async fn genres(&self) -> Result<Vec<Genre>> {
        let key = CacheKey::new("genres", &json!({}));
        if let Some(CachedData::Genres(genres)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(genres);
        }

        let genres = self
            .catalog
            .genres()
            .await
            .inspect_err(|e| error!(key = %key, error = %e, "Failed to fetch genres"))?;

        self.cache.set(key, CachedData::Genres(genres.clone()));
        Ok(genres)
    }

    async fn cached_page<F>(&self, key: CacheKey, fetch: F) -> Result<MoviePage>
    where
        F: Future<Output = Result<RawPage>>,
    {
        if let Some(CachedData::Page(page)) = self.cache.get(&key) {
            debug!(key = %key, "Cache hit");
            return Ok(page);
        }

        let raw = fetch
            .await
            .inspect_err(|e| error!(key = %key, error = %e, "Failed to fetch movies"))?;

        let results = self.enricher.enrich_batch(&raw.results).await;
        let page = MoviePage {
            page: raw.page,
            total_pages: raw.total_pages,
            total_results: raw.total_results,
            results,
        };

        self.cache.set(key, CachedData::Page(page.clone()));
        Ok(page)
    }
}
