//! Show listing and creation

use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Router,
};
use axum_extra::extract::{CookieJar, Form};
use showbill_common::db::shows;
use showbill_common::time::now_local;
use showbill_common::validation::{ShowFields, ValidationErrors};
use showbill_common::FailureCategory;
use tracing::{error, warn};

use crate::error::PageError;
use crate::flash::{self, Flash};
use crate::ui;
use crate::AppState;

pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}

/// GET /shows
pub async fn list_shows(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let listed = shows::list_shows(&state.db).await?;

    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(ui::shows::render_shows(&listed, flash.as_ref()))))
}

/// GET /shows/create
pub async fn create_show_form() -> Html<String> {
    Html(ui::forms::render_show_form(
        &ShowFields::starting_at(&now_local()),
        &ValidationErrors::default(),
        None,
    ))
}

/// POST /shows/create
///
/// Unknown artist or venue ids re-render the form rather than redirect.
pub async fn create_show(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(fields): Form<ShowFields>,
) -> Response {
    let draft = match fields.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!("Show form rejected: {}", errors);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_show_form(&fields, &errors, None)),
            )
                .into_response();
        }
    };

    match shows::create_show(&state.db, &draft).await {
        Ok(_) => (
            flash::push(jar, Flash::success("Show was successfully listed!")),
            Redirect::to("/"),
        )
            .into_response(),
        Err(e) if e.category() == FailureCategory::NotFound => {
            let notice = Flash::error(format!("Show could not be listed. {}", e));
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_show_form(
                    &fields,
                    &ValidationErrors::default(),
                    Some(&notice),
                )),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to list show: {}", e);
            (
                flash::push(jar, Flash::error("An error occurred. Show could not be listed.")),
                Redirect::to("/"),
            )
                .into_response()
        }
    }
}
