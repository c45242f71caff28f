//! Artist queries and writes

use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{genres_from_row, genres_to_json};
use crate::models::{Artist, ArtistDraft, EntitySummary};
use crate::{Error, Result};

const ARTIST_COLUMNS: &str = "id, name, genres, city, state, phone, website, \
     facebook_link, seeking_venue, seeking_description, image_link";

fn artist_from_row(row: &SqliteRow) -> Result<Artist> {
    Ok(Artist {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        genres: genres_from_row(row)?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        website: row.try_get("website")?,
        facebook_link: row.try_get("facebook_link")?,
        seeking_venue: row.try_get("seeking_venue")?,
        seeking_description: row.try_get("seeking_description")?,
        image_link: row.try_get("image_link")?,
    })
}

pub async fn get_artist(pool: &SqlitePool, artist_id: i64) -> Result<Artist> {
    let row = sqlx::query(&format!("SELECT {} FROM artists WHERE id = ?", ARTIST_COLUMNS))
        .bind(artist_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("artist {}", artist_id)))?;

    artist_from_row(&row)
}

/// All artists ordered by name
pub async fn list_artists(pool: &SqlitePool) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query_as::<_, (i64, String)>("SELECT id, name FROM artists ORDER BY name, id")
        .fetch_all(pool)
        .await?;

    debug!(count = rows.len(), "Loaded artist list");

    Ok(rows
        .into_iter()
        .map(|(id, name)| EntitySummary { id, name })
        .collect())
}

/// Most recently listed artists, newest first
pub async fn recent_artists(pool: &SqlitePool, limit: i64) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, name FROM artists ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| EntitySummary { id, name })
        .collect())
}

pub async fn create_artist(pool: &SqlitePool, draft: &ArtistDraft) -> Result<i64> {
    let genres = genres_to_json(&draft.genres)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO artists (
            name, genres, city, state, phone, website, facebook_link,
            seeking_venue, seeking_description, image_link
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&genres)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .bind(&draft.image_link)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let artist_id = result.last_insert_rowid();
    info!(artist_id, name = %draft.name, "Artist listed");
    Ok(artist_id)
}

pub async fn update_artist(pool: &SqlitePool, artist_id: i64, draft: &ArtistDraft) -> Result<()> {
    let genres = genres_to_json(&draft.genres)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE artists SET
            name = ?, genres = ?, city = ?, state = ?, phone = ?, website = ?,
            facebook_link = ?, seeking_venue = ?, seeking_description = ?,
            image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&genres)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_venue)
    .bind(&draft.seeking_description)
    .bind(&draft.image_link)
    .bind(artist_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", artist_id)));
    }

    tx.commit().await?;
    info!(artist_id, name = %draft.name, "Artist updated");
    Ok(())
}

/// Delete an artist together with their shows
pub async fn delete_artist(pool: &SqlitePool, artist_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM artists WHERE id = ?")
        .bind(artist_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("artist {}", artist_id)));
    }

    tx.commit().await?;
    info!(artist_id, "Artist deleted");
    Ok(())
}
