//! Mapping of raw catalog records into [`CanonicalMovie`].

use mf_core::CanonicalMovie;
use mf_providers::catalog::{RawCredits, RawVideos};
use mf_providers::RawMovie;

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const BACKDROP_BASE_URL: &str = "https://image.tmdb.org/t/p/w1280";
const YOUTUBE_WATCH_URL: &str = "https://youtube.com/watch?v=";

/// Maximum number of cast names carried on a canonical record.
const CAST_LIMIT: usize = 5;

/// Build the canonical record for a raw catalog movie.
///
/// Total and deterministic: missing raw fields produce `None` or empty
/// collections, never an error.
pub fn transform(raw: &RawMovie) -> CanonicalMovie {
    let language = non_empty(raw.original_language.as_deref()).map(str::to_string);
    let foreign = language.as_deref().is_some_and(|l| l != "en");
    let trailer_key = trailer_key(raw.videos.as_ref());

    CanonicalMovie {
        id: raw.id,
        tmdb_id: raw.id,
        imdb_id: raw.external_id().map(str::to_string),
        title: raw.title.clone(),
        original_title: raw.original_title.clone(),
        language,
        release_year: release_year(raw.release_date.as_deref()),
        release_date: non_empty(raw.release_date.as_deref()).map(str::to_string),
        genres: raw.genres.iter().map(|g| g.name.to_lowercase()).collect(),
        plot: non_empty(raw.overview.as_deref()).map(str::to_string),
        runtime: raw.runtime.filter(|&r| r > 0),
        adult: raw.adult.unwrap_or(false),
        budget: raw.budget.filter(|&b| b > 0).map(|b| b.to_string()),
        revenue: raw.revenue.filter(|&r| r > 0).map(|r| r.to_string()),
        homepage: non_empty(raw.homepage.as_deref()).map(str::to_string),
        status: raw.status.as_deref().map(str::to_lowercase),
        keywords: raw
            .keywords
            .as_ref()
            .map(|k| k.keywords.iter().map(|kw| kw.name.clone()).collect())
            .unwrap_or_default(),
        cast: cast(raw.credits.as_ref()),
        director: director(raw.credits.as_ref()),
        poster_url: image_url(POSTER_BASE_URL, raw.poster_path.as_deref()),
        backdrop_url: image_url(BACKDROP_BASE_URL, raw.backdrop_path.as_deref()),
        trailer_url: trailer_key.map(|key| format!("{YOUTUBE_WATCH_URL}{key}")),
        trailer_youtube_id: trailer_key.map(str::to_string),
        tmdb_popularity: raw.popularity,
        tmdb_rating: raw.vote_average,
        tmdb_votes: raw.vote_count,
        foreign,
        imdb_rating: None,
        imdb_votes: None,
        rt_critic_rating: None,
        metacritic_rating: None,
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn image_url(base: &str, path: Option<&str>) -> Option<String> {
    non_empty(path).map(|p| format!("{base}{p}"))
}

/// Year component of a `YYYY-MM-DD` date.
fn release_year(date: Option<&str>) -> Option<i32> {
    non_empty(date)
        .and_then(|d| d.get(..4))
        .and_then(|y| y.parse().ok())
}

fn cast(credits: Option<&RawCredits>) -> Vec<String> {
    credits
        .map(|c| {
            c.cast
                .iter()
                .take(CAST_LIMIT)
                .map(|m| m.name.clone())
                .collect()
        })
        .unwrap_or_default()
}

fn director(credits: Option<&RawCredits>) -> Option<String> {
    credits?
        .crew
        .iter()
        .find(|m| m.job == "Director")
        .map(|m| m.name.clone())
}

fn trailer_key(videos: Option<&RawVideos>) -> Option<&str> {
    videos?
        .results
        .iter()
        .find(|v| v.kind == "Trailer" && v.site == "YouTube")
        .map(|v| v.key.as_str())
}
