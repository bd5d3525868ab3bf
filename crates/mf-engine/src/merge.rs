//! Field-by-field merge of a ratings record onto a canonical movie.
//!
//! Precedence per field:
//!
//! | Field              | Source                                                   |
//! |--------------------|----------------------------------------------------------|
//! | `imdb_rating`      | `imdbRating`, when present and numeric                   |
//! | `imdb_votes`       | `imdbVotes` with thousands separators removed            |
//! | `rt_critic_rating` | the `Rotten Tomatoes` entry of `Ratings`, `%` removed    |
//! | `metacritic_rating`| `Metascore`, when present and numeric                    |
//! | `plot`             | `Plot`, only when the catalog plot is missing            |
//! | `director`         | `Director`, only when the catalog director is missing    |
//! | `runtime`          | leading integer of `Runtime`, only when catalog has none |
//!
//! Everything else keeps the catalog value. A ratings value equal to
//! [`ABSENT`](mf_providers::ABSENT) is never adopted.

use mf_core::CanonicalMovie;
use mf_providers::ratings::present;
use mf_providers::RawRatings;

/// Name of the critic aggregator in the OMDb `Ratings` list.
const CRITIC_SOURCE: &str = "Rotten Tomatoes";

/// Layer `ratings` over `base` and return the merged record.
pub fn merge(base: &CanonicalMovie, ratings: &RawRatings) -> CanonicalMovie {
    let mut merged = base.clone();

    if let Some(rating) = present(ratings.imdb_rating.as_deref()).and_then(parse_rating) {
        merged.imdb_rating = Some(rating);
    }
    if let Some(votes) = present(ratings.imdb_votes.as_deref()).and_then(parse_votes) {
        merged.imdb_votes = Some(votes);
    }
    if let Some(score) = critic_score(ratings) {
        merged.rt_critic_rating = Some(score);
    }
    let metascore = present(ratings.metascore.as_deref()).and_then(|v| v.trim().parse().ok());
    if let Some(score) = metascore {
        merged.metacritic_rating = Some(score);
    }

    if is_blank(merged.plot.as_deref()) {
        if let Some(plot) = present(ratings.plot.as_deref()) {
            merged.plot = Some(plot.to_string());
        }
    }
    if is_blank(merged.director.as_deref()) {
        if let Some(director) = present(ratings.director.as_deref()) {
            merged.director = Some(director.to_string());
        }
    }
    if merged.runtime.is_none() {
        merged.runtime = present(ratings.runtime.as_deref()).and_then(parse_minutes);
    }

    merged
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Finite ratings only; `"NaN"` and `"inf"` parse as `f64` but cannot be serialized.
fn parse_rating(value: &str) -> Option<f64> {
    value.trim().parse::<f64>().ok().filter(|r| r.is_finite())
}

/// `"2,033,927"` -> `2033927`.
fn parse_votes(value: &str) -> Option<u64> {
    value.replace(',', "").trim().parse().ok()
}

fn critic_score(ratings: &RawRatings) -> Option<u32> {
    let entry = ratings.ratings.iter().find(|r| r.source == CRITIC_SOURCE)?;
    present(Some(entry.value.as_str()))?
        .trim()
        .trim_end_matches('%')
        .parse()
        .ok()
}

/// Leading integer of a runtime such as `"154 min"`.
fn parse_minutes(value: &str) -> Option<u32> {
    let digits: String = value
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok().filter(|&m| m > 0)
}
