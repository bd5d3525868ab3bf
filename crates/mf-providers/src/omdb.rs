//! OMDb (Open Movie Database) API client.
//!
//! Implements [`RatingsSource`]. OMDb signals logical failures in-band with
//! `"Response": "False"` and an `"Error"` message, usually with a 200 status,
//! so the body is always inspected rather than the status code alone.

use async_trait::async_trait;
use mf_core::config::{OmdbConfig, DEFAULT_OMDB_BASE_URL};
use mf_core::{Error, Result};
use tracing::debug;

use crate::ratings::{RatingsSource, RawRatings};

const PROVIDER: &str = "omdb";

/// OMDb ratings client.
pub struct OmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OmdbClient {
    /// Create a client against the public OMDb endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_OMDB_BASE_URL)
    }

    /// Create a client against a custom base URL.
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: crate::http_client(PROVIDER)?,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from configuration, or `None` when no API key is set.
    pub fn from_config(config: &OmdbConfig) -> Result<Option<Self>> {
        config
            .api_key()
            .map(|key| Self::with_base_url(key, config.base_url.as_str()))
            .transpose()
    }

    async fn get(&self, params: &[(&str, &str)]) -> Result<RawRatings> {
        let url = format!("{}/", self.base_url);
        let mut query: Vec<(&str, &str)> = vec![("apikey", self.api_key.as_str())];
        query.extend_from_slice(params);

        let resp = self
            .http
            .get(&url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let record: RawRatings = match serde_json::from_str(&body) {
            Ok(r) => r,
            Err(_) if !status.is_success() => {
                return Err(Error::upstream(PROVIDER, format!("HTTP {status}")));
            }
            Err(e) => return Err(Error::parse(PROVIDER, e)),
        };

        if record.response.as_deref() != Some("True") {
            let message = record.error.unwrap_or_else(|| "Unknown error".to_string());
            return Err(Error::upstream(PROVIDER, message));
        }

        Ok(record)
    }
}

#[async_trait]
impl RatingsSource for OmdbClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn by_imdb_id(&self, imdb_id: &str) -> Result<RawRatings> {
        debug!(imdb_id, "OMDb lookup");
        self.get(&[("i", imdb_id), ("plot", "full")]).await
    }
}
