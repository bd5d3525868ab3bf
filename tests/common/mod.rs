//! Shared test harness for integration tests.
//!
//! Provides [`TestHarness`], which stands up wiremock servers in place of
//! TMDB and OMDb and builds the real [`MovieService`] against them. The
//! [`TestHarness::with_server`] constructor also starts Axum on a random port
//! for HTTP-level testing.

#![allow(dead_code)]

use std::net::SocketAddr;

use mf_core::config::Config;
use mf_engine::MovieService;
use mf_server::context::AppContext;
use mf_server::router::build_router;
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TMDB_KEY: &str = "tmdb-test-key";
pub const OMDB_KEY: &str = "omdb-test-key";

const DETAILS_APPENDICES: &str = "videos,credits,external_ids,keywords";

/// Mock upstreams plus the configuration that points at them.
pub struct TestHarness {
    pub tmdb: MockServer,
    pub omdb: MockServer,
    pub config: Config,
}

impl TestHarness {
    /// Harness with both TMDB and OMDb configured.
    pub async fn new() -> Self {
        let tmdb = MockServer::start().await;
        let omdb = MockServer::start().await;

        let mut config = Config::default();
        config.server.static_dir = None;
        config.providers.tmdb.api_key = Some(TMDB_KEY.into());
        config.providers.tmdb.base_url = tmdb.uri();
        config.providers.omdb.api_key = Some(OMDB_KEY.into());
        config.providers.omdb.base_url = omdb.uri();

        Self { tmdb, omdb, config }
    }

    /// Harness whose configuration lacks an OMDb key.
    pub async fn without_ratings() -> Self {
        let mut harness = Self::new().await;
        harness.config.providers.omdb.api_key = None;
        harness
    }

    /// Build the service from the harness configuration.
    pub fn service(&self) -> MovieService {
        MovieService::from_config(&self.config).expect("failed to build movie service")
    }

    /// Start an Axum server on a random port and return its address.
    pub async fn serve(&self) -> SocketAddr {
        let ctx = AppContext::new(self.config.clone(), self.service());
        let app = build_router(ctx, None);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind random port");
        let addr = listener.local_addr().expect("failed to get local addr");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        addr
    }

    /// Create a harness with both upstreams configured and a running server.
    pub async fn with_server() -> (Self, SocketAddr) {
        let harness = Self::new().await;
        let addr = harness.serve().await;
        (harness, addr)
    }

    // -- TMDB mocks ---------------------------------------------------------

    /// Mount a list endpoint (`popular`, `top_rated`, ...) returning `results`.
    pub async fn mount_list(&self, category: &str, page: u32, results: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path(format!("/movie/{category}")))
            .and(query_param("api_key", TMDB_KEY))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(page, results)))
            .expect(times)
            .mount(&self.tmdb)
            .await;
    }

    /// Mount the search endpoint for `query`.
    pub async fn mount_search(&self, query: &str, results: Value, times: u64) {
        Mock::given(method("GET"))
            .and(path("/search/movie"))
            .and(query_param("query", query))
            .respond_with(ResponseTemplate::new(200).set_body_json(page_body(1, results)))
            .expect(times)
            .mount(&self.tmdb)
            .await;
    }

    /// Mount the details endpoint for one movie.
    pub async fn mount_details(&self, id: u64, body: Value) {
        Mock::given(method("GET"))
            .and(path(format!("/movie/{id}")))
            .and(query_param("append_to_response", DETAILS_APPENDICES))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.tmdb)
            .await;
    }

    /// Make every TMDB request under `tmdb_path` fail with `status`.
    pub async fn mount_tmdb_error(&self, tmdb_path: &str, status: u16, message: &str) {
        Mock::given(method("GET"))
            .and(path(tmdb_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(json!({
                "status_code": 7,
                "status_message": message
            })))
            .mount(&self.tmdb)
            .await;
    }

    // -- OMDb mocks ---------------------------------------------------------

    /// Mount an OMDb record for `imdb_id`.
    pub async fn mount_ratings(&self, imdb_id: &str, record: Value) {
        Mock::given(method("GET"))
            .and(path("/"))
            .and(query_param("apikey", OMDB_KEY))
            .and(query_param("i", imdb_id))
            .respond_with(ResponseTemplate::new(200).set_body_json(record))
            .mount(&self.omdb)
            .await;
    }

    /// Mount an in-band OMDb failure for `imdb_id`.
    pub async fn mount_ratings_error(&self, imdb_id: &str, message: &str) {
        let body = json!({ "Response": "False", "Error": message });
        self.mount_ratings(imdb_id, body).await;
    }
}

fn page_body(page: u32, results: Value) -> Value {
    let total = results.as_array().map_or(0, Vec::len);
    json!({
        "page": page,
        "total_pages": 1,
        "total_results": total,
        "results": results
    })
}

/// TMDB list entry for Pulp Fiction.
pub fn pulp_fiction_entry() -> Value {
    json!({
        "id": 680,
        "imdb_id": "tt0110912",
        "title": "Pulp Fiction",
        "original_title": "Pulp Fiction",
        "original_language": "en",
        "release_date": "1994-09-10",
        "overview": "A burger-loving hit man, his philosophical partner...",
        "poster_path": "/d5iIlFn5s0ImszYzBPb8JPIfbXD.jpg",
        "popularity": 74.051,
        "vote_average": 8.491,
        "vote_count": 24004
    })
}

/// TMDB list entry without any IMDb id.
pub fn spirited_away_entry() -> Value {
    json!({
        "id": 129,
        "title": "Spirited Away",
        "original_language": "ja",
        "release_date": "2001-07-20",
        "poster_path": "/39wmItIWsg5sZMyRUHLkWBcuVCM.jpg"
    })
}

/// TMDB details payload for Pulp Fiction with every appendix.
pub fn pulp_fiction_details() -> Value {
    json!({
        "id": 680,
        "title": "Pulp Fiction",
        "original_language": "en",
        "release_date": "1994-09-10",
        "overview": "",
        "runtime": 154,
        "budget": 8000000,
        "revenue": 213928762,
        "status": "Released",
        "genres": [{ "id": 53, "name": "Thriller" }, { "id": 80, "name": "Crime" }],
        "external_ids": { "imdb_id": "tt0110912" },
        "credits": {
            "cast": [{ "name": "John Travolta" }, { "name": "Samuel L. Jackson" }],
            "crew": [{ "name": "Quentin Tarantino", "job": "Director" }]
        },
        "videos": { "results": [{ "key": "tGpTpVyI_OQ", "site": "YouTube", "type": "Trailer" }] },
        "keywords": { "keywords": [{ "name": "nonlinear timeline" }] }
    })
}

/// OMDb record for Pulp Fiction.
pub fn pulp_fiction_ratings() -> Value {
    json!({
        "Title": "Pulp Fiction",
        "Runtime": "154 min",
        "Director": "Quentin Tarantino",
        "Plot": "The lives of two mob hitmen, a boxer, a gangster and his wife intertwine.",
        "imdbRating": "8.9",
        "imdbVotes": "2,033,927",
        "imdbID": "tt0110912",
        "Metascore": "94",
        "Ratings": [
            { "Source": "Internet Movie Database", "Value": "8.9/10" },
            { "Source": "Rotten Tomatoes", "Value": "93%" },
            { "Source": "Metacritic", "Value": "94/100" }
        ],
        "Response": "True"
    })
}
