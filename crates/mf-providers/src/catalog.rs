//! Primary catalog contract and raw TMDB payload types.
//!
//! The raw types mirror TMDB's JSON closely and default every field, so a
//! sparse list entry and a fully appended details payload both parse into
//! the same [`RawMovie`].

use async_trait::async_trait;
use mf_core::{Category, Genre};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Raw payload types
// ---------------------------------------------------------------------------

/// Paging envelope returned by list and search endpoints.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawPage {
    pub page: u32,
    pub results: Vec<RawMovie>,
    pub total_pages: u32,
    pub total_results: u32,
}

/// A TMDB movie, either a list entry or a details payload with appendices.
///
/// The `credits`, `videos`, `external_ids` and `keywords` sub-objects are only
/// present when requested through `append_to_response`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawMovie {
    pub id: u64,
    pub title: Option<String>,
    pub original_title: Option<String>,
    pub original_language: Option<String>,
    pub release_date: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub runtime: Option<u32>,
    pub adult: Option<bool>,
    pub budget: Option<u64>,
    pub revenue: Option<u64>,
    pub homepage: Option<String>,
    pub status: Option<String>,
    pub popularity: Option<f64>,
    pub vote_average: Option<f64>,
    pub vote_count: Option<u64>,
    /// Top-level IMDb id, present on details payloads.
    pub imdb_id: Option<String>,
    pub credits: Option<RawCredits>,
    pub videos: Option<RawVideos>,
    pub external_ids: Option<RawExternalIds>,
    pub keywords: Option<RawKeywords>,
}

impl RawMovie {
    /// The IMDb identifier used to look the movie up in the ratings source.
    ///
    /// Prefers the `external_ids` appendix and falls back to the top-level
    /// field. Empty strings count as absent.
    pub fn external_id(&self) -> Option<&str> {
        self.external_ids
            .as_ref()
            .and_then(|ids| ids.imdb_id.as_deref())
            .filter(|id| !id.is_empty())
            .or_else(|| self.imdb_id.as_deref().filter(|id| !id.is_empty()))
    }

    /// Display label for log lines.
    pub fn label(&self) -> &str {
        self.title.as_deref().unwrap_or("<untitled>")
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCredits {
    pub cast: Vec<RawCastMember>,
    pub crew: Vec<RawCrewMember>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCastMember {
    pub name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCrewMember {
    pub name: String,
    pub job: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVideos {
    pub results: Vec<RawVideo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawExternalIds {
    pub imdb_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeywords {
    pub keywords: Vec<RawKeyword>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawKeyword {
    pub name: String,
}

// ---------------------------------------------------------------------------
// Catalog trait
// ---------------------------------------------------------------------------

/// Async contract for the primary catalog provider.
///
/// Every method returns the parsed payload or a descriptive error
/// ([`mf_core::Error::Transport`], [`mf_core::Error::Parse`],
/// [`mf_core::Error::Upstream`] or [`mf_core::Error::NotFound`]).
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Short, lowercase identifier for this source (e.g. `"tmdb"`).
    fn name(&self) -> &'static str;

    /// Fetch one page of a curated listing.
    async fn list(&self, category: Category, page: u32) -> mf_core::Result<RawPage>;

    /// Search movies by title.
    async fn search(&self, query: &str, page: u32) -> mf_core::Result<RawPage>;

    /// Fetch a single movie with credits, videos, external ids and keywords.
    async fn details(&self, id: u64) -> mf_core::Result<RawMovie>;

    /// Fetch the movie genre list.
    async fn genres(&self) -> mf_core::Result<Vec<Genre>>;
}
