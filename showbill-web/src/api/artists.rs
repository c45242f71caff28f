//! Artist pages: listing, search, detail, create, edit, delete

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::{CookieJar, Form};
use showbill_common::db::{artists, shows};
use showbill_common::schedule::classify_for_entity;
use showbill_common::search::partial_match_search;
use showbill_common::time::now_local;
use showbill_common::validation::{ArtistFields, ValidationErrors};
use showbill_common::{CounterpartRole, FailureCategory};
use tracing::{error, warn};

use super::{DeleteResponse, SearchForm};
use crate::error::PageError;
use crate::flash::{self, Flash};
use crate::ui::{self, forms::FormMode};
use crate::AppState;

pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
        .route("/artists/:id/delete", post(delete_artist_and_redirect))
}

/// GET /artists
pub async fn list_artists(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let listed = artists::list_artists(&state.db).await?;

    let (jar, flash) = flash::take(jar);
    Ok((jar, Html(ui::artists::render_artists(&listed, flash.as_ref()))))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>, PageError> {
    let candidates = artists::list_artists(&state.db).await?;
    let results = partial_match_search(&form.search_term, candidates);
    Ok(Html(ui::artists::render_artist_search(&form.search_term, &results)))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let artist = artists::get_artist(&state.db, artist_id).await?;
    let anchored = shows::shows_for_artist(&state.db, artist_id).await?;
    let split = classify_for_entity(now_local(), &anchored, CounterpartRole::Venue)
        .map_err(showbill_common::Error::from)?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Html(ui::artists::render_artist_detail(&artist, &split, flash.as_ref())),
    ))
}

/// GET /artists/create
pub async fn create_artist_form() -> Html<String> {
    Html(ui::forms::render_artist_form(
        FormMode::Create,
        &ArtistFields::default(),
        &ValidationErrors::default(),
    ))
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(fields): Form<ArtistFields>,
) -> Response {
    let draft = match fields.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!(fields = errors.len(), "Artist form rejected: {}", errors);
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_artist_form(FormMode::Create, &fields, &errors)),
            )
                .into_response();
        }
    };

    let flash = match artists::create_artist(&state.db, &draft).await {
        Ok(_) => Flash::success(format!("Artist {} was successfully listed!", draft.name)),
        Err(e) => {
            error!("Failed to list artist {}: {}", draft.name, e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be listed.",
                draft.name
            ))
        }
    };
    (flash::push(jar, flash), Redirect::to("/")).into_response()
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
) -> Result<Html<String>, PageError> {
    let artist = artists::get_artist(&state.db, artist_id).await?;
    Ok(Html(ui::forms::render_artist_form(
        FormMode::Edit { id: artist_id },
        &ArtistFields::from(&artist),
        &ValidationErrors::default(),
    )))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    jar: CookieJar,
    Form(fields): Form<ArtistFields>,
) -> Result<Response, PageError> {
    let draft = match fields.validate() {
        Ok(draft) => draft,
        Err(errors) => {
            warn!(artist_id, "Artist edit rejected: {}", errors);
            return Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(ui::forms::render_artist_form(
                    FormMode::Edit { id: artist_id },
                    &fields,
                    &errors,
                )),
            )
                .into_response());
        }
    };

    let flash = match artists::update_artist(&state.db, artist_id, &draft).await {
        Ok(()) => Flash::success(format!("Artist {} was successfully updated!", draft.name)),
        Err(e) if e.category() == FailureCategory::NotFound => return Err(e.into()),
        Err(e) => {
            error!(artist_id, "Failed to update artist: {}", e);
            Flash::error(format!(
                "An error occurred. Artist {} could not be updated.",
                draft.name
            ))
        }
    };
    Ok((
        flash::push(jar, flash),
        Redirect::to(&format!("/artists/{}", artist_id)),
    )
        .into_response())
}

/// DELETE /artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Json<DeleteResponse>) {
    let (status, flash) = delete_with_flash(&state, artist_id).await;
    let success = status.is_success();
    (status, flash::push(jar, flash), Json(DeleteResponse { success }))
}

/// POST /artists/:id/delete (form button)
pub async fn delete_artist_and_redirect(
    State(state): State<AppState>,
    Path(artist_id): Path<i64>,
    jar: CookieJar,
) -> (CookieJar, Redirect) {
    let (_, flash) = delete_with_flash(&state, artist_id).await;
    (flash::push(jar, flash), Redirect::to("/"))
}

async fn delete_with_flash(state: &AppState, artist_id: i64) -> (StatusCode, Flash) {
    match artists::delete_artist(&state.db, artist_id).await {
        Ok(()) => (
            StatusCode::OK,
            Flash::success(format!("Artist {} was successfully deleted.", artist_id)),
        ),
        Err(e) if e.category() == FailureCategory::NotFound => (
            StatusCode::NOT_FOUND,
            Flash::error(format!("Artist {} does not exist.", artist_id)),
        ),
        Err(e) => {
            error!(artist_id, "Failed to delete artist: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Flash::error(format!("An error occurred. Artist {} could not be deleted.", artist_id)),
            )
        }
    }
}
