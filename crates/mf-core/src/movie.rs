//! Canonical movie model served to clients.
//!
//! [`CanonicalMovie`] is the single merged representation built from the
//! primary catalog record and, when available, the secondary ratings record.
//! Field names serialize in camelCase to match what the browser UI consumes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// The merged movie record.
///
/// Instances are built once per cache population and never mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalMovie {
    /// Primary catalog identifier.
    pub id: u64,
    /// Same value as `id`, kept for clients that expect provider-named ids.
    pub tmdb_id: u64,
    pub imdb_id: Option<String>,
    pub title: Option<String>,
    pub original_title: Option<String>,
    /// Original language code (ISO-639-1).
    pub language: Option<String>,
    pub release_year: Option<i32>,
    pub release_date: Option<String>,
    /// Lowercased genre names in catalog order.
    pub genres: Vec<String>,
    pub plot: Option<String>,
    /// Runtime in minutes.
    pub runtime: Option<u32>,
    pub adult: bool,
    /// Budget in dollars as a decimal string.
    pub budget: Option<String>,
    /// Revenue in dollars as a decimal string.
    pub revenue: Option<String>,
    pub homepage: Option<String>,
    /// Lowercased release status (e.g. "released").
    pub status: Option<String>,
    pub keywords: Vec<String>,
    /// Up to five cast names, first-billed first.
    pub cast: Vec<String>,
    pub director: Option<String>,
    pub poster_url: Option<String>,
    pub backdrop_url: Option<String>,
    pub trailer_url: Option<String>,
    #[serde(rename = "trailerYouTubeId")]
    pub trailer_youtube_id: Option<String>,
    pub tmdb_popularity: Option<f64>,
    pub tmdb_rating: Option<f64>,
    pub tmdb_votes: Option<u64>,
    /// `true` when the original language is known and not English.
    pub foreign: bool,

    // Enrichment-only fields, omitted until the ratings source supplies them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub imdb_votes: Option<u64>,
    /// Rotten Tomatoes critic score as a percentage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rt_critic_rating: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metacritic_rating: Option<u32>,
}

impl CanonicalMovie {
    /// Whether any secondary-source rating field has been adopted.
    pub fn is_enriched(&self) -> bool {
        self.imdb_rating.is_some()
            || self.imdb_votes.is_some()
            || self.rt_critic_rating.is_some()
            || self.metacritic_rating.is_some()
    }
}

/// One page of enriched movies, carrying the catalog's paging envelope.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MoviePage {
    pub page: u32,
    pub total_pages: u32,
    pub total_results: u32,
    pub results: Vec<CanonicalMovie>,
}

/// A catalog genre.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Curated catalog listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Popular,
    TopRated,
    NowPlaying,
    Upcoming,
}

impl Category {
    /// Stable snake_case tag, also used as the cache operation name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Popular => "popular",
            Category::TopRated => "top_rated",
            Category::NowPlaying => "now_playing",
            Category::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popular" => Ok(Category::Popular),
            "top_rated" => Ok(Category::TopRated),
            "now_playing" => Ok(Category::NowPlaying),
            "upcoming" => Ok(Category::Upcoming),
            other => Err(crate::Error::Validation(format!("unknown category: {other}"))),
        }
    }
}
