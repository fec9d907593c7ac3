//! HTTP server for browser-based searching.
//!
//! Serves a single-page search UI and the JSON API behind it. The catalog
//! is loaded before the server starts and shared read-only across
//! handlers, so requests never contend on anything.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET`  | `/` | Search page |
//! | `GET`  | `/api/search?q=<term>&page=<n>` | One page of ranked results |
//! | `GET`  | `/api/sources` | Per-source load reports |
//! | `GET`  | `/health` | Health check (version, product count) |
//!
//! # Error Contract
//!
//! ```json
//! { "error": { "code": "bad_request", "message": "..." } }
//! ```
//!
//! Error codes: `bad_request` (400), `not_found` (404).

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::catalog::{Catalog, SourceReport};
use crate::config::Config;
use crate::search::SearchPage;

const FRONTEND_HTML: &str = include_str!("frontend.html");

/// Shared application state passed to all route handlers via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    config: Arc<Config>,
    catalog: Arc<Catalog>,
}

impl AppState {
    pub fn new(config: Config, catalog: Catalog) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Arc::new(catalog),
        }
    }
}

/// Build the router. Split out from [`run_server`] so tests can bind it to
/// an ephemeral port.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handle_index))
        .route("/api/search", get(handle_search))
        .route("/api/sources", get(handle_sources))
        .route("/health", get(handle_health))
        .fallback(handle_not_found)
        .layer(cors)
        .with_state(state)
}

/// Starts the web server on `[server].bind` and runs until the process is
/// terminated.
pub async fn run_server(config: Config, catalog: Catalog) -> anyhow::Result<()> {
    let bind_addr = config.server.bind.clone();

    if catalog.is_empty() {
        tracing::warn!("no products were loaded from any source; searches will return nothing");
    }

    let app = router(AppState::new(config, catalog));

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!("web server listening on http://{}", bind_addr);
    println!("Marketplace Checker listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

// ============ Error response ============

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: String,
    message: String,
}

struct AppError {
    status: StatusCode,
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

fn bad_request(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::BAD_REQUEST,
        code: "bad_request".to_string(),
        message: message.into(),
    }
}

fn not_found(message: impl Into<String>) -> AppError {
    AppError {
        status: StatusCode::NOT_FOUND,
        code: "not_found".to_string(),
        message: message.into(),
    }
}

async fn handle_not_found() -> AppError {
    not_found("no such endpoint")
}

// ============ GET / ============

async fn handle_index() -> Html<&'static str> {
    Html(FRONTEND_HTML)
}

// ============ GET /api/search ============

#[derive(Debug, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    /// Kept as text so a malformed page number falls back to page 1
    /// instead of rejecting the request.
    page: Option<String>,
}

/// Handler for `GET /api/search`.
///
/// A missing or blank `q` performs no search and returns `term: null`.
async fn handle_search(
    State(state): State<AppState>,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> Result<Json<SearchPage>, AppError> {
    let Query(query) = query.map_err(|e| bad_request(e.body_text()))?;

    let term = query.q.unwrap_or_default();
    let page = query
        .page
        .as_deref()
        .and_then(|p| p.trim().parse::<i64>().ok())
        .unwrap_or(1);

    let found = state
        .catalog
        .search(&term, &state.config.display.placeholder_image);

    tracing::debug!(term = %term, page, matches = found.len(), "search");

    Ok(Json(SearchPage::build(
        found,
        page,
        state.config.display.page_size,
    )))
}

// ============ GET /api/sources ============

#[derive(Serialize)]
struct SourcesResponse {
    total_products: usize,
    sources: Vec<SourceReport>,
}

async fn handle_sources(State(state): State<AppState>) -> Json<SourcesResponse> {
    Json(SourcesResponse {
        total_products: state.catalog.len(),
        sources: state.catalog.reports().to_vec(),
    })
}

// ============ GET /health ============

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
    products: usize,
    loaded_at: String,
}

async fn handle_health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        products: state.catalog.len(),
        loaded_at: state.catalog.loaded_at().to_rfc3339(),
    })
}
