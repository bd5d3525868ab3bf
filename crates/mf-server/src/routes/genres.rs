//! Genre list route handler.

use axum::extract::State;
use axum::{Extension, Json};
use mf_core::Genre;

use crate::context::AppContext;
use crate::error::AppError;
use crate::middleware::request_id::RequestId;

/// GET /api/genres
#[utoipa::path(
    get,
    path = "/api/genres",
    responses(
        (status = 200, description = "Catalog genres", body = Vec<Genre>),
        (status = 502, description = "Catalog unavailable")
    )
)]
pub async fn list_genres(
    State(ctx): State<AppContext>,
    Extension(request_id): Extension<RequestId>,
) -> Result<Json<Vec<Genre>>, AppError> {
    let genres = ctx
        .movies
        .genres()
        .await
        .map_err(|e| AppError::new(e).with_request_id(&request_id))?;
    Ok(Json(genres))
}
