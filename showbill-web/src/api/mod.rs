//! HTTP handlers for showbill-web

pub mod artists;
pub mod buildinfo;
pub mod health;
pub mod home;
pub mod shows;
pub mod venues;

use axum::{http::StatusCode, response::Html};
use serde::{Deserialize, Serialize};

pub use artists::artist_routes;
pub use buildinfo::get_build_info;
pub use health::health_routes;
pub use home::home;
pub use shows::show_routes;
pub use venues::venue_routes;

use crate::ui;

/// Body of the venue/artist search forms
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// JSON reply to `DELETE /venues/:id` and `DELETE /artists/:id`
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}

/// Fallback for unmatched routes
pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(ui::errors::render_error_page(StatusCode::NOT_FOUND, None)),
    )
}
