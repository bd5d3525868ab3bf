//! Unified error type for moviefuse.
//!
//! All crates funnel their failures into [`Error`], which carries enough context
//! for API handlers to derive an HTTP status code via [`Error::http_status`].

use std::fmt;

/// Unified error type covering all failure modes in moviefuse.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The requested entity could not be found.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// The kind of entity (e.g. "movie").
        entity: String,
        /// The identifier that was looked up.
        id: String,
    },

    /// Request data failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An upstream provider answered with a well-formed response that signals
    /// a logical failure (bad query, unknown id, invalid key).
    #[error("{provider} API error: {message}")]
    Upstream {
        /// Provider name ("tmdb", "omdb").
        provider: String,
        /// Message reported by the provider.
        message: String,
    },

    /// The request to an upstream provider could not be completed.
    #[error("{provider} request failed: {message}")]
    Transport {
        /// Provider name ("tmdb", "omdb").
        provider: String,
        /// Human-readable error description.
        message: String,
    },

    /// An upstream provider returned a body that could not be decoded.
    #[error("Failed to parse {provider} response: {message}")]
    Parse {
        /// Provider name ("tmdb", "omdb").
        provider: String,
        /// Human-readable error description.
        message: String,
    },

    /// The application is missing required configuration.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Catch-all for unexpected internal errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Map this error to an appropriate HTTP status code.
    pub fn http_status(&self) -> u16 {
        match self {
            Error::NotFound { .. } => 404,
            Error::Validation(_) => 400,
            Error::Upstream { .. } => 502,
            Error::Transport { .. } => 502,
            Error::Parse { .. } => 502,
            Error::Configuration(_) => 500,
            Error::Io { .. } => 500,
            Error::Internal(_) => 500,
        }
    }

    /// Short machine-readable code for API responses.
    pub fn code(&self) -> &'static str {
        match self {
            Error::NotFound { .. } => "not_found",
            Error::Validation(_) => "validation_error",
            Error::Upstream { .. } => "upstream_error",
            Error::Transport { .. } => "upstream_unavailable",
            Error::Parse { .. } => "upstream_parse_error",
            Error::Configuration(_) => "configuration_error",
            Error::Io { .. } => "io_error",
            Error::Internal(_) => "internal_error",
        }
    }

    /// Convenience constructor for [`Error::NotFound`].
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        Error::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Upstream`].
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Upstream {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Transport`].
    pub fn transport(provider: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Transport {
            provider: provider.into(),
            message: message.to_string(),
        }
    }

    /// Convenience constructor for [`Error::Parse`].
    pub fn parse(provider: impl Into<String>, message: impl fmt::Display) -> Self {
        Error::Parse {
            provider: provider.into(),
            message: message.to_string(),
        }
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
