//! Enrichment of catalog records with ratings data.
//!
//! A failed ratings lookup only affects the record it was made for: that
//! record falls back to its transformed form and a warning is logged.

use futures::future::join_all;
use mf_core::{CanonicalMovie, Result};
use mf_providers::{RatingsSource, RawMovie};
use std::sync::Arc;
use tracing::{debug, warn};

use crate::merge::merge;
use crate::transform::transform;

/// Applies the ratings source, if any, to catalog records.
#[derive(Clone, Default)]
pub struct Enricher {
    ratings: Option<Arc<dyn RatingsSource>>,
}

impl Enricher {
    pub fn new(ratings: Option<Arc<dyn RatingsSource>>) -> Self {
        Self { ratings }
    }

    /// An enricher that only transforms.
    pub fn disabled() -> Self {
        Self::default()
    }

    pub fn is_enabled(&self) -> bool {
        self.ratings.is_some()
    }

    /// Enrich a single record. Never fails.
    pub async fn enrich_one(&self, raw: &RawMovie) -> CanonicalMovie {
        let outcome = self.attempt(raw).await;
        settle(raw, outcome)
    }

    /// Enrich a batch concurrently.
    ///
    /// The output has the same length and order as `raws`. Every lookup is
    /// awaited to completion; one failure does not cancel its siblings.
    pub async fn enrich_batch(&self, raws: &[RawMovie]) -> Vec<CanonicalMovie> {
        if !self.is_enabled() {
            return raws.iter().map(transform).collect();
        }

        let outcomes = join_all(raws.iter().map(|raw| self.attempt(raw))).await;

        raws.iter()
            .zip(outcomes)
            .map(|(raw, outcome)| settle(raw, outcome))
            .collect()
    }

    async fn attempt(&self, raw: &RawMovie) -> Result<CanonicalMovie> {
        let base = transform(raw);
        let (Some(source), Some(imdb_id)) = (self.ratings.as_deref(), raw.external_id()) else {
            return Ok(base);
        };

        let record = source.by_imdb_id(imdb_id).await?;
        debug!(
            movie = raw.label(),
            imdb_id,
            source = source.name(),
            "Merged ratings"
        );
        Ok(merge(&base, &record))
    }
}

fn settle(raw: &RawMovie, outcome: Result<CanonicalMovie>) -> CanonicalMovie {
    outcome.unwrap_or_else(|e| {
        warn!(
            movie = raw.label(),
            tmdb_id = raw.id,
            error = %e,
            "Failed to enrich movie, serving catalog data only"
        );
        transform(raw)
    })
}
