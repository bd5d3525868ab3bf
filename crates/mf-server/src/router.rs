//! Axum router construction.
//!
//! Builds the full application router with the API routes, middleware
//! layers, the OpenAPI document and static file serving.

use axum::middleware;
use axum::routing::get;
use axum::{Extension, Json, Router};
use std::num::NonZeroU32;
use std::path::PathBuf;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::context::AppContext;
use crate::middleware::rate_limit::{create_limiter, rate_limit_middleware};
use crate::middleware::request_id::request_id_middleware;
use crate::routes;

#[derive(OpenApi)]
#[openapi(
    paths(
        routes::movies::list_movies,
        routes::movies::search_movies,
        routes::movies::get_movie,
        routes::genres::list_genres,
        routes::health::health_check,
    ),
    components(schemas(
        mf_core::CanonicalMovie,
        mf_core::Genre,
        mf_core::Category,
        routes::health::HealthResponse,
    ))
)]
struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the complete Axum router.
pub fn build_router(ctx: AppContext, static_dir: Option<PathBuf>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut api = Router::new()
        .route("/movies", get(routes::movies::list_movies))
        .route("/movies/search", get(routes::movies::search_movies))
        .route("/movies/{id}", get(routes::movies::get_movie))
        .route("/genres", get(routes::genres::list_genres));

    let requests_per_minute = ctx.config.server.requests_per_minute;
    if let Some(rpm) = requests_per_minute.and_then(NonZeroU32::new) {
        tracing::info!(requests_per_minute = rpm.get(), "Rate limiting enabled");
        let limiter = create_limiter(rpm);
        let rate_limit = middleware::from_fn(rate_limit_middleware);
        api = api.layer(rate_limit).layer(Extension(limiter));
    }

    let mut app = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx);

    // Static file serving for the browser UI.
    if let Some(dir) = static_dir {
        if dir.exists() {
            tracing::info!("Serving static files from {:?}", dir);
            let index_path = dir.join("index.html");
            app = app.fallback_service(
                tower_http::services::ServeDir::new(&dir)
                    .append_index_html_on_directories(true)
                    .not_found_service(tower_http::services::ServeFile::new(index_path)),
            );
        }
    }

    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use mf_core::config::Config;
    use mf_core::{Category, Error, Genre, Result};
    use mf_engine::{MovieService, TtlCache};
    use mf_providers::{CatalogSource, RawMovie, RawPage};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    #[derive(Default)]
    struct StubCatalog {
        calls: AtomicUsize,
    }

    fn raw(id: u64, title: &str) -> RawMovie {
        serde_json::from_value(json!({ "id": id, "title": title })).unwrap()
    }

    #[async_trait]
    impl CatalogSource for StubCatalog {
        fn name(&self) -> &'static str {
            "stub"
        }

        async fn list(&self, category: Category, page: u32) -> Result<RawPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(RawPage {
                page,
                total_pages: 1,
                total_results: 1,
                results: vec![raw(page as u64, category.as_str())],
            })
        }

        async fn search(&self, query: &str, page: u32) -> Result<RawPage> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if query == "boom" {
                return Err(Error::transport("tmdb", "connection refused"));
            }
            Ok(RawPage {
                page,
                total_pages: 1,
                total_results: 1,
                results: vec![raw(680, query)],
            })
        }

        async fn details(&self, id: u64) -> Result<RawMovie> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if id == 404 {
                return Err(Error::not_found("movie", id));
            }
            Ok(raw(id, "Pulp Fiction"))
        }

        async fn genres(&self) -> Result<Vec<Genre>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![Genre {
                id: 28,
                name: "Action".into(),
            }])
        }
    }

    fn app_with(config: Config, static_dir: Option<PathBuf>) -> (Router, Arc<StubCatalog>) {
        let catalog = Arc::new(StubCatalog::default());
        let service = MovieService::new(catalog.clone(), None, TtlCache::new());
        let ctx = AppContext::new(config, service);
        (build_router(ctx, static_dir), catalog)
    }

    fn app() -> (Router, Arc<StubCatalog>) {
        app_with(Config::default(), None)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn health_reports_ok_with_timestamp() {
        let (app, _) = app();
        let (status, body) = get(&app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "OK");
        let ts = body["timestamp"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
    }

    #[tokio::test]
    async fn list_defaults_to_popular_page_one() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api/movies").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["title"], "popular");
    }

    #[tokio::test]
    async fn list_honours_category_and_page() {
        let (app, _) = app();
        let (_, body) = get(&app, "/api/movies?category=top_rated&page=3").await;
        assert_eq!(body[0]["id"], 3);
        assert_eq!(body[0]["title"], "top_rated");

        let (_, body) = get(&app, "/api/movies?category=now_playing").await;
        assert_eq!(body[0]["title"], "now_playing");

        let (_, body) = get(&app, "/api/movies?category=bogus&page=abc").await;
        assert_eq!(body[0]["id"], 1);
        assert_eq!(body[0]["title"], "popular");
    }

    #[tokio::test]
    async fn repeated_requests_hit_the_cache() {
        let (app, catalog) = app();
        get(&app, "/api/movies?page=2").await;
        get(&app, "/api/movies?page=2").await;
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn search_requires_query() {
        let (app, catalog) = app();
        for uri in [
            "/api/movies/search",
            "/api/movies/search?q=",
            "/api/movies/search?q=%20%20",
        ] {
            let (status, body) = get(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body["error"]
                .as_str()
                .unwrap()
                .contains("Search query is required"));
            assert_eq!(body["code"], "validation_error");
            assert!(body["request_id"].is_string());
        }
        assert_eq!(catalog.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn search_returns_results() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api/movies/search?q=pulp").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "pulp");
    }

    #[tokio::test]
    async fn catalog_failure_is_bad_gateway() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api/movies/search?q=boom").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["code"], "upstream_unavailable");
    }

    #[tokio::test]
    async fn details_by_id() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api/movies/680").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], 680);
        assert_eq!(body["tmdbId"], 680);
        assert_eq!(body["title"], "Pulp Fiction");
    }

    #[tokio::test]
    async fn details_rejects_bad_id_and_reports_missing() {
        let (app, _) = app();
        let (status, _) = get(&app, "/api/movies/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = get(&app, "/api/movies/404").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "not_found");
    }

    #[tokio::test]
    async fn genres_pass_through() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api/genres").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!([{ "id": 28, "name": "Action" }]));
    }

    #[tokio::test]
    async fn request_id_is_echoed() {
        let (app, _) = app();
        let response = app
            .oneshot(
                Request::get("/health")
                    .header("x-request-id", "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let (app, _) = app();
        let (status, body) = get(&app, "/api-docs/openapi.json").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/api/movies"].is_object());
        assert!(body["paths"]["/api/movies/{id}"].is_object());
        assert!(body["paths"]["/health"].is_object());
    }

    #[tokio::test]
    async fn rate_limit_rejects_excess_requests() {
        let mut config = Config::default();
        config.server.requests_per_minute = Some(2);
        let (app, _) = app_with(config, None);

        assert_eq!(get(&app, "/api/genres").await.0, StatusCode::OK);
        assert_eq!(get(&app, "/api/genres").await.0, StatusCode::OK);
        let (status, body) = get(&app, "/api/genres").await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["code"], "rate_limited");

        // Health is outside the limited API.
        assert_eq!(get(&app, "/health").await.0, StatusCode::OK);
    }

    #[tokio::test]
    async fn static_files_with_index_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>moviefuse</h1>").unwrap();
        let (app, _) = app_with(Config::default(), Some(dir.path().to_path_buf()));

        for uri in ["/", "/some/client/route"] {
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            let bytes = response.into_body().collect().await.unwrap().to_bytes();
            assert_eq!(&bytes[..], b"<h1>moviefuse</h1>", "{uri}");
        }
    }
}
