//! mf-providers: upstream movie data sources.
//!
//! Each source is described by a trait the aggregation engine depends on
//! ([`CatalogSource`], [`RatingsSource`]) together with an explicit schema for
//! the payload it returns. The concrete HTTP clients wrap TMDB (primary
//! catalog) and OMDb (secondary ratings).
//!
//! # Module layout
//!
//! - [`catalog`] -- Catalog trait and raw TMDB payload types.
//! - [`ratings`] -- Ratings trait and raw OMDb payload types.
//! - [`tmdb`] -- TMDB v3 REST client.
//! - [`omdb`] -- OMDb REST client.

pub mod catalog;
pub mod omdb;
pub mod ratings;
pub mod tmdb;

pub use catalog::{CatalogSource, RawMovie, RawPage};
pub use omdb::OmdbClient;
pub use ratings::{RatingsSource, RawRatings, ABSENT};
pub use tmdb::TmdbClient;

use std::time::Duration;

/// Per-request timeout applied by both HTTP clients.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client(provider: &str) -> mf_core::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| mf_core::Error::Internal(format!("failed to build {provider} client: {e}")))
}
