//! Show queries and writes

use chrono::NaiveDateTime;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info, warn};

use crate::models::{ShowDraft, ShowListing};
use crate::schedule::{AnchoredShow, Counterpart};
use crate::time::format_show_time;
use crate::{Error, Result};

/// Shows of one venue with their artists joined in, by start time
pub async fn shows_for_venue(pool: &SqlitePool, venue_id: i64) -> Result<Vec<AnchoredShow>> {
    anchored_shows(
        pool,
        r#"
        SELECT s.id, s.start_time, s.artist_id AS counterpart_id,
               a.name AS counterpart_name, a.image_link AS counterpart_image_link
        FROM shows s
        LEFT JOIN artists a ON a.id = s.artist_id
        WHERE s.venue_id = ?
        ORDER BY s.start_time, s.id
        "#,
        venue_id,
    )
    .await
}

/// Shows of one artist with their venues joined in, by start time
pub async fn shows_for_artist(pool: &SqlitePool, artist_id: i64) -> Result<Vec<AnchoredShow>> {
    anchored_shows(
        pool,
        r#"
        SELECT s.id, s.start_time, s.venue_id AS counterpart_id,
               v.name AS counterpart_name, v.image_link AS counterpart_image_link
        FROM shows s
        LEFT JOIN venues v ON v.id = s.venue_id
        WHERE s.artist_id = ?
        ORDER BY s.start_time, s.id
        "#,
        artist_id,
    )
    .await
}

async fn anchored_shows(pool: &SqlitePool, sql: &str, anchor_id: i64) -> Result<Vec<AnchoredShow>> {
    let rows = sqlx::query(sql).bind(anchor_id).fetch_all(pool).await?;

    rows.iter()
        .map(|row| -> Result<AnchoredShow> {
            let name: Option<String> = row.try_get("counterpart_name")?;
            let image_link: Option<String> = row.try_get("counterpart_image_link")?;
            Ok(AnchoredShow {
                show_id: row.try_get("id")?,
                start_time: row.try_get::<NaiveDateTime, _>("start_time")?,
                counterpart_id: row.try_get("counterpart_id")?,
                counterpart: name.map(|name| Counterpart { name, image_link }),
            })
        })
        .collect()
}

/// Every show with venue and artist names, by start time
pub async fn list_shows(pool: &SqlitePool) -> Result<Vec<ShowListing>> {
    let rows = sqlx::query(
        r#"
        SELECT s.id, s.start_time, s.venue_id, v.name AS venue_name,
               s.artist_id, a.name AS artist_name, a.image_link AS artist_image_link
        FROM shows s
        JOIN venues v ON v.id = s.venue_id
        JOIN artists a ON a.id = s.artist_id
        ORDER BY s.start_time, s.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    debug!(count = rows.len(), "Loaded show list");

    rows.iter()
        .map(|row| -> Result<ShowListing> {
            Ok(ShowListing {
                show_id: row.try_get("id")?,
                venue_id: row.try_get("venue_id")?,
                venue_name: row.try_get("venue_name")?,
                artist_id: row.try_get("artist_id")?,
                artist_name: row.try_get("artist_name")?,
                artist_image_link: row.try_get("artist_image_link")?,
                start_time: row.try_get("start_time")?,
            })
        })
        .collect()
}

/// Insert a show after checking both referenced records exist
pub async fn create_show(pool: &SqlitePool, draft: &ShowDraft) -> Result<i64> {
    let mut tx = pool.begin().await?;

    let artist_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM artists WHERE id = ?)")
        .bind(draft.artist_id)
        .fetch_one(&mut *tx)
        .await?;
    if !artist_exists {
        warn!(artist_id = draft.artist_id, "Show rejected: unknown artist");
        return Err(Error::NotFound(format!("artist {}", draft.artist_id)));
    }

    let venue_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM venues WHERE id = ?)")
        .bind(draft.venue_id)
        .fetch_one(&mut *tx)
        .await?;
    if !venue_exists {
        warn!(venue_id = draft.venue_id, "Show rejected: unknown venue");
        return Err(Error::NotFound(format!("venue {}", draft.venue_id)));
    }

    let result = sqlx::query("INSERT INTO shows (start_time, artist_id, venue_id) VALUES (?, ?, ?)")
        .bind(format_show_time(&draft.start_time))
        .bind(draft.artist_id)
        .bind(draft.venue_id)
        .execute(&mut *tx)
        .await?;

    tx.commit().await?;

    let show_id = result.last_insert_rowid();
    info!(
        show_id,
        artist_id = draft.artist_id,
        venue_id = draft.venue_id,
        start_time = %format_show_time(&draft.start_time),
        "Show listed"
    );
    Ok(show_id)
}
