use axum::{extract::State, response::Html};
use axum_extra::extract::CookieJar;
use showbill_common::db::{artists, venues};

use crate::error::PageError;
use crate::{flash, ui, AppState};

/// How many recent venues/artists the home page shows
const RECENT_LIMIT: i64 = 10;

/// GET /
pub async fn home(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), PageError> {
    let recent_venues = venues::recent_venues(&state.db, RECENT_LIMIT).await?;
    let recent_artists = artists::recent_artists(&state.db, RECENT_LIMIT).await?;

    let (jar, flash) = flash::take(jar);
    Ok((
        jar,
        Html(ui::home::render_home(&recent_venues, &recent_artists, flash.as_ref())),
    ))
}
