//! TMDB (The Movie Database) API client.
//!
//! Implements [`CatalogSource`] on top of the TMDB v3 REST API. Each call is a
//! single GET with the API key as a query parameter; there is no retry or
//! rate limiting here, and the only bound on a call is the client timeout.

use async_trait::async_trait;
use mf_core::config::{TmdbConfig, DEFAULT_TMDB_BASE_URL};
use mf_core::{Category, Error, Genre, Result};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::catalog::{CatalogSource, RawMovie, RawPage};

const PROVIDER: &str = "tmdb";

/// Sub-objects requested alongside movie details.
const DETAILS_APPENDICES: &str = "videos,credits,external_ids,keywords";

// ---------------------------------------------------------------------------
// Response types (private)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct TmdbErrorBody {
    status_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TmdbGenreList {
    #[serde(default)]
    genres: Vec<Genre>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// TMDB catalog client.
///
/// # Examples
///
/// ```no_run
/// use mf_providers::TmdbClient;
///
/// let client = TmdbClient::new("your-api-key").unwrap();
/// ```
pub struct TmdbClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
    language: Option<String>,
}

impl TmdbClient {
    /// Create a client against the public TMDB endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_TMDB_BASE_URL)
    }

    /// Create a client against a custom base URL (including the `/3` prefix).
    pub fn with_base_url(api_key: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: crate::http_client(PROVIDER)?,
            api_key: api_key.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            language: None,
        })
    }

    /// Build a client from configuration. The API key is required.
    pub fn from_config(config: &TmdbConfig) -> Result<Self> {
        let api_key = config
            .api_key()
            .ok_or_else(|| Error::Configuration("TMDB API key is not set".into()))?;
        let client = Self::with_base_url(api_key, config.base_url.as_str())?;
        Ok(client.with_language(config.language.clone()))
    }

    /// Send a `language` parameter with every request.
    pub fn with_language(mut self, language: Option<String>) -> Self {
        self.language = language.filter(|l| !l.is_empty());
        self
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        extra_params: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let mut params: Vec<(&str, &str)> = vec![("api_key", self.api_key.as_str())];
        if let Some(ref language) = self.language {
            params.push(("language", language.as_str()));
        }
        params.extend_from_slice(extra_params);

        debug!(path, "TMDB request");

        let resp = self
            .http
            .get(&url)
            .query(&params)
            .send()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| Error::transport(PROVIDER, e))?;

        if status == StatusCode::NOT_FOUND {
            return Err(Error::not_found("tmdb resource", path));
        }

        if !status.is_success() {
            let message = serde_json::from_str::<TmdbErrorBody>(&body)
                .ok()
                .and_then(|b| b.status_message)
                .unwrap_or_else(|| "Unknown error".to_string());
            warn!(status = %status, path, message = %message, "TMDB returned an error");
            return Err(Error::upstream(PROVIDER, message));
        }

        serde_json::from_str(&body).map_err(|e| Error::parse(PROVIDER, e))
    }
}

#[async_trait]
impl CatalogSource for TmdbClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn list(&self, category: Category, page: u32) -> Result<RawPage> {
        let path = format!("/movie/{}", category.as_str());
        let page = page.to_string();
        self.get(&path, &[("page", &page)]).await
    }

    async fn search(&self, query: &str, page: u32) -> Result<RawPage> {
        let page = page.to_string();
        let params = [("query", query), ("page", page.as_str())];
        self.get("/search/movie", &params).await
    }

    async fn details(&self, id: u64) -> Result<RawMovie> {
        self.get(
            &format!("/movie/{id}"),
            &[("append_to_response", DETAILS_APPENDICES)],
        )
        .await
        .map_err(|e| match e {
            Error::NotFound { .. } => Error::not_found("movie", id),
            other => other,
        })
    }

    async fn genres(&self) -> Result<Vec<Genre>> {
        let list: TmdbGenreList = self.get("/genre/movie/list", &[]).await?;
        Ok(list.genres)
    }
}
