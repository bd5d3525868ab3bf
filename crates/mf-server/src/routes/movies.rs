//! Movie listing, search and details route handlers.

use axum::extract::{Path, Query, State};
use axum::{Extension, Json};
use mf_core::{CanonicalMovie, Category};
use serde::Deserialize;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// Query parameters for listing movies.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListMoviesParams {
    /// `popular` (default), `top_rated`, `now_playing` or `upcoming`.
    pub category: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<String>,
}

/// Query parameters for searching movies.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchMoviesParams {
    /// Title search text.
    pub q: Option<String>,
    /// 1-based page number. Defaults to 1.
    pub page: Option<String>,
}

/// Lenient page parsing: anything that is not a positive integer means page 1.
fn page_number(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|&p| p > 0)
        .unwrap_or(1)
}

/// Unknown or missing categories fall back to popular.
fn category(raw: Option<&str>) -> Category {
    raw.and_then(|c| c.parse().ok()).unwrap_or_default()
}

/// GET /api/movies
#[utoipa::path(
    get,
    path = "/api/movies",
    params(ListMoviesParams),
    responses(
        (status = 200, description = "Enriched movies for the listing", body = Vec<CanonicalMovie>),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn list_movies(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<ListMoviesParams>,
) -> Result<Json<Vec<CanonicalMovie>>, AppError> {
    let category = category(params.category.as_deref());
    let page = page_number(params.page.as_deref());

    let movies = ctx
        .movies
        .list(category, page)
        .await
        .map_err(|e| AppError::new(e).with_request_id(&request_id))?;

    Ok(Json(movies.results))
}

/// GET /api/movies/search
#[utoipa::path(
    get,
    path = "/api/movies/search",
    params(SearchMoviesParams),
    responses(
        (status = 200, description = "Enriched search results", body = Vec<CanonicalMovie>),
        (status = 400, description = "Missing search query"),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn search_movies(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Query(params): Query<SearchMoviesParams>,
) -> Result<Json<Vec<CanonicalMovie>>, AppError> {
    let query = params
        .q
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| {
            AppError::new(mf_core::Error::Validation("Search query is required".into()))
                .with_request_id(&request_id)
        })?;
    let page = page_number(params.page.as_deref());

    let movies = ctx
        .movies
        .search(query, page)
        .await
        .map_err(|e| AppError::new(e).with_request_id(&request_id))?;

    Ok(Json(movies.results))
}

/// GET /api/movies/{id}
#[utoipa::path(
    get,
    path = "/api/movies/{id}",
    params(("id" = u64, Path, description = "TMDB movie id")),
    responses(
        (status = 200, description = "Enriched movie details", body = CanonicalMovie),
        (status = 400, description = "Malformed movie id"),
        (status = 404, description = "Movie not found"),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn get_movie(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
    Path(id): Path<String>,
) -> Result<Json<CanonicalMovie>, AppError> {
    let id: u64 = id.parse().map_err(|_| {
        AppError::new(mf_core::Error::Validation(format!("Invalid movie id: {id}")))
            .with_request_id(&request_id)
    })?;

    let movie = ctx
        .movies
        .details(id)
        .await
        .map_err(|e| AppError::new(e).with_request_id(&request_id))?;

    Ok(Json(movie))
}
