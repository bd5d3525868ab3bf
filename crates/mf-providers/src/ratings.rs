//! Secondary ratings contract and raw OMDb payload types.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// OMDb's marker for a missing value. Never treated as data.
pub const ABSENT: &str = "N/A";

/// An OMDb title record. Every value is a string.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawRatings {
    pub title: Option<String>,
    pub year: Option<String>,
    /// Runtime such as `"154 min"`.
    pub runtime: Option<String>,
    pub director: Option<String>,
    pub plot: Option<String>,
    #[serde(rename = "imdbRating")]
    pub imdb_rating: Option<String>,
    /// Vote count with thousands separators, e.g. `"2,033,927"`.
    #[serde(rename = "imdbVotes")]
    pub imdb_votes: Option<String>,
    #[serde(rename = "imdbID")]
    pub imdb_id: Option<String>,
    pub metascore: Option<String>,
    pub ratings: Vec<RawRatingSource>,
    /// `"True"` on success, `"False"` otherwise.
    pub response: Option<String>,
    /// Error message accompanying `Response: "False"`.
    pub error: Option<String>,
}

/// One entry of the `Ratings` list, e.g. `{"Source": "Rotten Tomatoes", "Value": "93%"}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct RawRatingSource {
    pub source: String,
    pub value: String,
}

/// Return the value unless it is missing or the absent-sentinel.
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty() && *v != ABSENT)
}

/// Async contract for the secondary ratings provider.
#[async_trait]
pub trait RatingsSource: Send + Sync {
    /// Short, lowercase identifier for this source (e.g. `"omdb"`).
    fn name(&self) -> &'static str;

    /// Fetch the ratings record for an IMDb identifier.
    async fn by_imdb_id(&self, imdb_id: &str) -> mf_core::Result<RawRatings>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_omdb_field_names() {
        let raw: RawRatings = serde_json::from_value(json!({
            "Title": "Pulp Fiction",
            "Runtime": "154 min",
            "imdbRating": "8.9",
            "imdbVotes": "2,033,927",
            "imdbID": "tt0110912",
            "Metascore": "94",
            "Ratings": [
                { "Source": "Internet Movie Database", "Value": "8.9/10" },
                { "Source": "Rotten Tomatoes", "Value": "93%" }
            ],
            "Response": "True"
        }))
        .unwrap();

        assert_eq!(raw.imdb_rating.as_deref(), Some("8.9"));
        assert_eq!(raw.imdb_votes.as_deref(), Some("2,033,927"));
        assert_eq!(raw.imdb_id.as_deref(), Some("tt0110912"));
        assert_eq!(raw.metascore.as_deref(), Some("94"));
        assert_eq!(raw.ratings[1].source, "Rotten Tomatoes");
        assert_eq!(raw.response.as_deref(), Some("True"));
    }

    #[test]
    fn present_filters_sentinel() {
        assert_eq!(present(Some("8.9")), Some("8.9"));
        assert_eq!(present(Some("N/A")), None);
        assert_eq!(present(Some("")), None);
        assert_eq!(present(None), None);
    }
}
