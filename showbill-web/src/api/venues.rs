//! Venue pages: listing, search, detail, create, edit, delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{CookieJar, Form};
use showbill_common::db::{shows, venues};
use showbill_common::schedule::{aggregate_upcoming_counts, classify_for_entity};
use showbill_common::search::partial_match_search;
use showbill_common::time::now_local;
use showbill_common::validation::{ValidationErrors, VenueFields};
use showbill_common::{CounterpartRole, FailureCategory};
use tracing::{error, warn};

use super::{DeleteResponse, SearchForm};
use crate::error::PageError;
use crate::flash::{self, Flash};
use crate::ui::{self, forms::FormMode};
use crate::AppState;

pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
        .route("/venues/:id/delete", post(delete_venue_and_redirect))
}

/// GET /venues
pub async fn list_venues(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let summaries = venues::list_venue_summaries(&state.db).await?;
    let show_times = venues::list_show_times_by_venue(&state.db).await?;
    let areas = aggregate_upcoming_counts(now_local(), &summaries, &show_times, state.count_policy);

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Html(ui::venues::render_venues(&areas, state.count_policy, flash.as_ref())),
    ))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let candidates = venues::list_venue_summaries(&state.db).await?;
    let results = partial_match_search(&form.search_term, candidates);
    Ok(Html(ui::venues::render_venue_search(&form.search_term, &results)))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let venue = venues::get_venue(&state.db, venue_id).await?;
    let anchored = shows::shows_for_venue(&state.db, venue_id).await?;
    let split = classify_for_entity(now_local(), &anchored, CounterpartRole::Artist)
        .map_err(showbill_common::Error::from)?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Html(ui::venues::render_venue_detail(&venue, &split, flash.as_ref())),
    ))
}

/// GET /venues/create
pub async fn create_venue_form() -> Html<String> {
    Html(ui::forms::render_venue_form(
        FormMode::Create,
        &VenueFields::default(),
        &ValidationErrors::default(),
    ))
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(fields): Form<VenueFields>,
) -> Response {
    let draft = match fields.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!(fields = errors.len(), "Venue form rejected: {}", errors);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_venue_form(FormMode::Create, &fields, &errors)),
            )
                .into_response();
        }
    };

    let flash = match venues::create_venue(&state.db, &draft).await {
        Ok(_) => Flash::success(format!("Venue {} was successfully listed!", draft.name)),
        Err(e) => {
            error!("Failed to list venue {}: {}", draft.name, e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be listed.",
                draft.name
            ))
        }
    };
    (flash::push(jar, flash), Redirect::to("/")).into_response()
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let venue = venues::get_venue(&state.db, venue_id).await?;
    Ok(Html(ui::forms::render_venue_form(
        FormMode::Edit { id: venue_id },
        &VenueFields::from(&venue),
        &ValidationErrors::default(),
    )))
}

/// POST /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    jar: CookieJar,
    Form(fields): Form<VenueFields>,
) -> Result<Response, PageError> {
    let draft = match fields.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!(venue_id, "Venue edit rejected: {}", errors);
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_venue_form(
                    FormMode::Edit { id: venue_id },
                    &fields,
                    &errors,
                )),
            )
                .into_response());
        }
    };

    let flash = match venues::update_venue(&state.db, venue_id, &draft).await {
        Ok(()) => Flash::success(format!("Venue {} was successfully updated!", draft.name)),
        Err(e) if e.category() == FailureCategory::NotFound => return Err(e.into()),
        Err(e) => {
            error!(venue_id, "Failed to update venue: {}", e);
            Flash::error(format!(
                "An error occurred. Venue {} could not be updated.",
                draft.name
            ))
        }
    };
    Ok((
        flash::push(jar, flash),
        Redirect::to(&format!("/venues/{}", venue_id)),
    )
        .into_response())
}

/// DELETE /venues/:id
pub async fn delete_venue(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Json<DeleteResponse>) {
    let (status, flash) = delete_with_flash(&state, venue_id).await;
    let success = status.is_success();
    (status, flash::push(jar, flash), Json(DeleteResponse { success }))
}

/// POST /venues/:id/delete (form button)
pub async fn delete_venue_and_redirect(
    State(state): State<AppState>,
    Path(venue_id): Path<i64>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let (_, flash) = delete_with_flash(&state, venue_id).await;
    (flash::push(jar, flash), Redirect::to("/"))
}

async fn delete_with_flash(state: &AppState, venue_id: i64) -> (StatusCode, Flash) {
    match venues::delete_venue(&state.db, venue_id).await {
        Ok(()) => (
            StatusCode::OK,
            Flash::success(format!("Venue {} was successfully deleted.", venue_id)),
        ),
        Err(e) if e.category() == FailureCategory::NotFound => (
            StatusCode::NOT_FOUND,
            Flash::error(format!("Venue {} does not exist.", venue_id)),
        ),
        Err(e) => {
            error!(venue_id, "Failed to delete venue: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Flash::error(format!("An error occurred. Venue {} could not be deleted.", venue_id)),
            )
        }
    }
}
