//! Page-level errors rendered as HTML

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use showbill_common::FailureCategory;
use thiserror::Error;
use tracing::error;

use crate::ui;

#[derive(Debug, Error)]
pub enum PageError {
    /// Requested record does not exist
    #[error("{0}")]
    NotFound(String),

    /// Request was understood but its content was rejected
    #[error("{0}")]
    BadRequest(String),

    /// Storage or other server-side failure; details go to the log only
    #[error("{0}")]
    Internal(String),
}

impl PageError {
    pub fn status(&self) -> StatusCode {
        match self {
            PageError::NotFound(_) => StatusCode::NOT_FOUND,
            PageError::BadRequest(_) => StatusCode::BAD_REQUEST,
            PageError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<showbill_common::Error> for PageError {
    fn from(err: showbill_common::Error) -> Self {
        match err.category() {
            FailureCategory::NotFound => PageError::NotFound(err.to_string()),
            FailureCategory::Validation => PageError::BadRequest(err.to_string()),
            FailureCategory::Storage => {
                error!("Request failed: {}", err);
                PageError::Internal(err.to_string())
            }
        }
    }
}

impl IntoResponse for PageError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            PageError::Internal(_) => None,
            PageError::NotFound(msg) | PageError::BadRequest(msg) => Some(msg.as_str()),
        };
        (status, Html(ui::errors::render_error_page(status, detail))).into_response()
    }
}
