//! Health check endpoint
//!
//! Reports the active venue count policy and the schema version of the open
//! database alongside liveness.

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use showbill_common::db::migrations::get_schema_version;
use showbill_common::CountPolicy;
use tracing::warn;

use crate::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub module: &'static str,
    pub version: &'static str,
    pub count_policy: CountPolicy,
    /// `None` when the database could not be queried
    pub schema_version: Option<i32>,
}

/// GET /health
///
/// Status is `"degraded"` when the database does not answer.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let schema_version = match get_schema_version(&state.db).await {
        Ok(version) => Some(version),
        Err(e) => {
            warn!("Health check could not read schema version: {}", e);
            None
        }
    };

    Json(HealthResponse {
        status: if schema_version.is_some() { "ok" } else { "degraded" },
        module: "showbill-web",
        version: env!("CARGO_PKG_VERSION"),
        count_policy: state.count_policy,
        schema_version,
    })
}

pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
