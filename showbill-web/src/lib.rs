//! showbill-web library - listing site for venues, artists and shows
//!
//! Server-rendered HTML pages over the `showbill-common` database layer,
//! plus the `/health` and `/api/buildinfo` JSON endpoints.

use axum::Router;
use showbill_common::CountPolicy;
use sqlx::SqlitePool;
use tower_http::trace::TraceLayer;

pub mod api;
pub mod cli;
pub mod error;
pub mod flash;
pub mod ui;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// How the venue listing counts shows per venue
    pub count_policy: CountPolicy,
}

impl AppState {
    /// Create new application state
    pub fn new(db: SqlitePool, count_policy: CountPolicy) -> Self {
        Self { db, count_policy }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/", get(api::home))
        .merge(api::venue_routes())
        .merge(api::artist_routes())
        .merge(api::show_routes())
        .route("/api/buildinfo", get(api::get_build_info))
        .route("/static/app.css", get(ui::serve_app_css))
        .merge(api::health_routes())
        .fallback(api::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
