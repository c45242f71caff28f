//! Venue queries and writes

use std::collections::HashMap;

use chrono::NaiveDateTime;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use tracing::{debug, info};

use super::{genres_from_row, genres_to_json};
use crate::models::{EntitySummary, Venue, VenueDraft, VenueSummary};
use crate::{Error, Result};

const VENUE_COLUMNS: &str = "id, name, genres, address, city, state, phone, website, \
     facebook_link, seeking_talent, seeking_description, image_link";

fn venue_from_row(row: &SqliteRow) -> Result<Venue> {
    Ok(Venue {
        id: row.try_get("id")?,
        name: row.try_get("name")?,
        genres: genres_from_row(row)?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        phone: row.try_get("phone")?,
        website: row.try_get("website")?,
        facebook_link: row.try_get("facebook_link")?,
        seeking_talent: row.try_get("seeking_talent")?,
        seeking_description: row.try_get("seeking_description")?,
        image_link: row.try_get("image_link")?,
    })
}

/// Load one venue, `Error::NotFound` if it doesn't exist
pub async fn get_venue(pool: &SqlitePool, venue_id: i64) -> Result<Venue> {
    let row = sqlx::query(&format!("SELECT {} FROM venues WHERE id = ?", VENUE_COLUMNS))
        .bind(venue_id)
        .fetch_optional(pool)
        .await?
        .ok_or_else(|| Error::NotFound(format!("venue {}", venue_id)))?;

    venue_from_row(&row)
}

/// All venues ordered by area then name, for the listing page and search
pub async fn list_venue_summaries(pool: &SqlitePool) -> Result<Vec<VenueSummary>> {
    let rows = sqlx::query_as::<_, (i64, String, String, String)>(
        "SELECT id, name, city, state FROM venues ORDER BY state, city, name, id",
    )
    .fetch_all(pool)
    .await?;

    debug!(count = rows.len(), "Loaded venue summaries");

    Ok(rows
        .into_iter()
        .map(|(id, name, city, state)| VenueSummary {
            id,
            name,
            city,
            state,
        })
        .collect())
}

/// Start times of every show, keyed by venue id
pub async fn list_show_times_by_venue(
    pool: &SqlitePool,
) -> Result<HashMap<i64, Vec<NaiveDateTime>>> {
    let rows = sqlx::query_as::<_, (i64, NaiveDateTime)>(
        "SELECT venue_id, start_time FROM shows ORDER BY venue_id, start_time, id",
    )
    .fetch_all(pool)
    .await?;

    let mut by_venue: HashMap<i64, Vec<NaiveDateTime>> = HashMap::new();
    for (venue_id, start_time) in rows {
        by_venue.entry(venue_id).or_default().push(start_time);
    }
    Ok(by_venue)
}

/// Most recently listed venues, newest first
pub async fn recent_venues(pool: &SqlitePool, limit: i64) -> Result<Vec<EntitySummary>> {
    let rows = sqlx::query_as::<_, (i64, String)>(
        "SELECT id, name FROM venues ORDER BY created_at DESC, id DESC LIMIT ?",
    )
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .into_iter()
        .map(|(id, name)| EntitySummary { id, name })
        .collect())
}

/// Insert a venue, returning its id
pub async fn create_venue(pool: &SqlitePool, draft: &VenueDraft) -> Result<i64> {
    let genres = genres_to_json(&draft.genres)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        INSERT INTO venues (
            name, genres, address, city, state, phone, website,
            facebook_link, seeking_talent, seeking_description, image_link
        )
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&draft.name)
    .bind(&genres)
    .bind(&draft.address)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .bind(&draft.image_link)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    let venue_id = result.last_insert_rowid();
    info!(venue_id, name = %draft.name, "Venue listed");
    Ok(venue_id)
}

/// Overwrite every editable field of a venue
pub async fn update_venue(pool: &SqlitePool, venue_id: i64, draft: &VenueDraft) -> Result<()> {
    let genres = genres_to_json(&draft.genres)?;
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE venues SET
            name = ?, genres = ?, address = ?, city = ?, state = ?, phone = ?,
            website = ?, facebook_link = ?, seeking_talent = ?,
            seeking_description = ?, image_link = ?
        WHERE id = ?
        "#,
    )
    .bind(&draft.name)
    .bind(&genres)
    .bind(&draft.address)
    .bind(&draft.city)
    .bind(&draft.state)
    .bind(&draft.phone)
    .bind(&draft.website)
    .bind(&draft.facebook_link)
    .bind(draft.seeking_talent)
    .bind(&draft.seeking_description)
    .bind(&draft.image_link)
    .bind(venue_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", venue_id)));
    }

    tx.commit().await?;
    info!(venue_id, name = %draft.name, "Venue updated");
    Ok(())
}

/// Delete a venue; its shows go with it (`ON DELETE CASCADE`)
pub async fn delete_venue(pool: &SqlitePool, venue_id: i64) -> Result<()> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query("DELETE FROM venues WHERE id = ?")
        .bind(venue_id)
        .execute(&mut *tx)
        .await?;

    if result.rows_affected() == 0 {
        return Err(Error::NotFound(format!("venue {}", venue_id)));
    }

    tx.commit().await?;
    info!(venue_id, "Venue deleted");
    Ok(())
}
