//! mf-engine: the movie aggregation engine.
//!
//! Turns raw catalog records into canonical movies, layers ratings data on
//! top, and memoizes every facade call in a time-bounded cache.
//!
//! # Module layout
//!
//! - [`cache`] -- TTL cache and deterministic cache keys.
//! - [`transform`] -- Raw catalog record to [`CanonicalMovie`](mf_core::CanonicalMovie).
//! - [`merge`] -- Field-by-field merge of a ratings record onto a canonical movie.
//! - [`enrich`] -- Concurrent, failure-isolated enrichment of record batches.
//! - [`service`] -- [`MovieService`], the cached entry point used by the server.

pub mod cache;
pub mod enrich;
pub mod merge;
pub mod service;
pub mod transform;

pub use cache::{CacheKey, TtlCache, DEFAULT_TTL};
pub use enrich::Enricher;
pub use merge::merge;
pub use service::{CachedData, MovieService};
pub use transform::transform;
