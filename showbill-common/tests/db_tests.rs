//! Integration tests for the SQLite persistence layer
//!
//! Each test runs against a fresh database file inside a TempDir.

use chrono::{NaiveDate, NaiveDateTime};
use showbill_common::db::{artists, init_database, seed, shows, venues};
use showbill_common::models::{ArtistDraft, ShowDraft, VenueDraft};
use showbill_common::schedule::{aggregate_upcoming_counts, classify_for_entity};
use showbill_common::search::partial_match_search;
use showbill_common::{CountPolicy, CounterpartRole, Error, FailureCategory};
use sqlx::SqlitePool;
use tempfile::TempDir;

async fn setup_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("temp dir");
    let pool = init_database(&dir.path().join("showbill.db"))
        .await
        .expect("Database initialization failed");
    (dir, pool)
}

fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(h, 0, 0)
        .unwrap()
}

fn venue_draft(name: &str, city: &str, state: &str) -> VenueDraft {
    VenueDraft {
        name: name.to_string(),
        genres: vec!["Jazz".to_string(), "Folk".to_string()],
        address: "1 Main Street".to_string(),
        city: city.to_string(),
        state: state.to_string(),
        phone: Some("415-000-1234".to_string()),
        website: None,
        facebook_link: None,
        seeking_talent: true,
        seeking_description: Some("Always booking".to_string()),
        image_link: Some("https://img.example/venue.jpg".to_string()),
    }
}

fn artist_draft(name: &str) -> ArtistDraft {
    ArtistDraft {
        name: name.to_string(),
        genres: vec!["Rock n Roll".to_string()],
        city: "San Francisco".to_string(),
        state: "CA".to_string(),
        phone: None,
        website: Some("https://band.example".to_string()),
        facebook_link: None,
        seeking_venue: false,
        seeking_description: None,
        image_link: Some("https://img.example/artist.jpg".to_string()),
    }
}

#[tokio::test]
async fn test_database_creation_when_missing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("nested").join("showbill.db");
    assert!(!db_path.exists());

    let pool = init_database(&db_path).await;
    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("showbill.db");

    let pool1 = init_database(&db_path).await.unwrap();
    venues::create_venue(&pool1, &venue_draft("Keeper", "Austin", "TX"))
        .await
        .unwrap();
    drop(pool1);

    let pool2 = init_database(&db_path).await.unwrap();
    let listed = venues::list_venue_summaries(&pool2).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "Keeper");
}

#[tokio::test]
async fn test_venue_create_get_update() {
    let (_dir, pool) = setup_db().await;

    let id = venues::create_venue(&pool, &venue_draft("The Musical Hop", "San Francisco", "CA"))
        .await
        .unwrap();
    let venue = venues::get_venue(&pool, id).await.unwrap();
    assert_eq!(venue.name, "The Musical Hop");
    assert_eq!(venue.genres, vec!["Jazz", "Folk"]);
    assert!(venue.seeking_talent);
    assert_eq!(venue.website, None);

    let mut draft = venue_draft("The Musical Hop II", "Oakland", "CA");
    draft.seeking_talent = false;
    draft.genres = vec!["Blues".to_string()];
    venues::update_venue(&pool, id, &draft).await.unwrap();

    let venue = venues::get_venue(&pool, id).await.unwrap();
    assert_eq!(venue.name, "The Musical Hop II");
    assert_eq!(venue.city, "Oakland");
    assert_eq!(venue.genres, vec!["Blues"]);
    assert!(!venue.seeking_talent);
}

#[tokio::test]
async fn test_missing_records_are_not_found() {
    let (_dir, pool) = setup_db().await;

    let err = venues::get_venue(&pool, 42).await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::NotFound);

    let err = artists::update_artist(&pool, 42, &artist_draft("Nobody"))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));

    let err = venues::delete_venue(&pool, 42).await.unwrap_err();
    assert_eq!(err.category(), FailureCategory::NotFound);
}

#[tokio::test]
async fn test_show_requires_existing_counterparts() {
    let (_dir, pool) = setup_db().await;
    let venue_id = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX"))
        .await
        .unwrap();

    let err = shows::create_show(
        &pool,
        &ShowDraft {
            artist_id: 999,
            venue_id,
            start_time: at(2035, 1, 1, 20),
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.category(), FailureCategory::NotFound);
    assert_eq!(err.to_string(), "Not found: artist 999");

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shows")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0, "failed write must leave nothing behind");
}

#[tokio::test]
async fn test_venue_detail_split() {
    let (_dir, pool) = setup_db().await;
    let venue_id = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX"))
        .await
        .unwrap();
    let early = artists::create_artist(&pool, &artist_draft("Early Act")).await.unwrap();
    let late = artists::create_artist(&pool, &artist_draft("Late Act")).await.unwrap();

    for (artist_id, start_time) in [
        (late, at(2023, 7, 1, 20)),
        (early, at(2023, 5, 1, 20)),
        (early, at(2023, 6, 1, 12)),
    ] {
        shows::create_show(&pool, &ShowDraft { artist_id, venue_id, start_time })
            .await
            .unwrap();
    }

    let anchored = shows::shows_for_venue(&pool, venue_id).await.unwrap();
    let split = classify_for_entity(at(2023, 6, 1, 12), &anchored, CounterpartRole::Artist).unwrap();

    assert_eq!(split.past_count, 2);
    assert_eq!(split.upcoming_count, 1);
    assert_eq!(split.past_shows[0].start_time, "2023-05-01 20:00:00");
    assert_eq!(split.past_shows[1].start_time, "2023-06-01 12:00:00");
    assert_eq!(split.upcoming_shows[0].counterpart_name, "Late Act");
    assert_eq!(split.upcoming_shows[0].counterpart_id, late);
}

#[tokio::test]
async fn test_artist_detail_split_names_venues() {
    let (_dir, pool) = setup_db().await;
    let hall = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX")).await.unwrap();
    let barn = venues::create_venue(&pool, &venue_draft("Barn", "Austin", "TX")).await.unwrap();
    let artist_id = artists::create_artist(&pool, &artist_draft("Touring")).await.unwrap();

    shows::create_show(&pool, &ShowDraft { artist_id, venue_id: barn, start_time: at(2035, 1, 1, 20) })
        .await
        .unwrap();
    shows::create_show(&pool, &ShowDraft { artist_id, venue_id: hall, start_time: at(2020, 1, 1, 20) })
        .await
        .unwrap();

    let anchored = shows::shows_for_artist(&pool, artist_id).await.unwrap();
    let split = classify_for_entity(at(2025, 1, 1, 0), &anchored, CounterpartRole::Venue).unwrap();

    assert_eq!(split.past_shows[0].counterpart_name, "Hall");
    assert_eq!(split.upcoming_shows[0].counterpart_name, "Barn");
    assert_eq!(split.upcoming_shows[0].role, CounterpartRole::Venue);
}

#[tokio::test]
async fn test_delete_venue_cascades_to_shows() {
    let (_dir, pool) = setup_db().await;
    let venue_id = venues::create_venue(&pool, &venue_draft("Doomed", "Austin", "TX")).await.unwrap();
    let artist_id = artists::create_artist(&pool, &artist_draft("Survivor")).await.unwrap();
    shows::create_show(&pool, &ShowDraft { artist_id, venue_id, start_time: at(2035, 1, 1, 20) })
        .await
        .unwrap();

    venues::delete_venue(&pool, venue_id).await.unwrap();

    assert!(shows::list_shows(&pool).await.unwrap().is_empty());
    assert!(shows::shows_for_artist(&pool, artist_id).await.unwrap().is_empty());
    assert!(artists::get_artist(&pool, artist_id).await.is_ok());
}

#[tokio::test]
async fn test_delete_artist_cascades_to_shows() {
    let (_dir, pool) = setup_db().await;
    let venue_id = venues::create_venue(&pool, &venue_draft("Stays", "Austin", "TX")).await.unwrap();
    let artist_id = artists::create_artist(&pool, &artist_draft("Leaves")).await.unwrap();
    shows::create_show(&pool, &ShowDraft { artist_id, venue_id, start_time: at(2035, 1, 1, 20) })
        .await
        .unwrap();

    artists::delete_artist(&pool, artist_id).await.unwrap();

    assert!(shows::shows_for_venue(&pool, venue_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_listing_aggregation_from_database() {
    let (_dir, pool) = setup_db().await;
    let summary = seed::seed_demo_data(&pool).await.unwrap().expect("empty db gets seeded");
    assert_eq!(summary.venues, 3);
    assert_eq!(summary.artists, 3);
    assert_eq!(summary.shows, 5);

    let venue_rows = venues::list_venue_summaries(&pool).await.unwrap();
    let show_times = venues::list_show_times_by_venue(&pool).await.unwrap();
    let now = at(2025, 1, 1, 0);

    let areas = aggregate_upcoming_counts(now, &venue_rows, &show_times, CountPolicy::Upcoming);
    assert_eq!(areas.len(), 2);
    // Ordered by state: CA before NY
    assert_eq!(areas[0].city, "San Francisco");
    assert_eq!(areas[0].venues[0].name, "Park Square Live Music & Coffee");
    assert_eq!(areas[0].venues[0].num_upcoming_shows, 3);
    assert_eq!(areas[0].venues[1].name, "The Musical Hop");
    assert_eq!(areas[0].venues[1].num_upcoming_shows, 0);
    assert_eq!(areas[1].city, "New York");

    let all = aggregate_upcoming_counts(now, &venue_rows, &show_times, CountPolicy::AllShows);
    assert_eq!(all[0].venues[0].num_upcoming_shows, 4);
    assert_eq!(all[0].venues[1].num_upcoming_shows, 1);
}

#[tokio::test]
async fn test_seed_is_skipped_when_data_exists() {
    let (_dir, pool) = setup_db().await;
    assert!(seed::seed_demo_data(&pool).await.unwrap().is_some());
    assert!(seed::seed_demo_data(&pool).await.unwrap().is_none());
    assert_eq!(artists::list_artists(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_search_over_stored_names() {
    let (_dir, pool) = setup_db().await;
    seed::seed_demo_data(&pool).await.unwrap();

    let results = partial_match_search("A", artists::list_artists(&pool).await.unwrap());
    assert_eq!(results.count, 3);

    let results = partial_match_search("band", artists::list_artists(&pool).await.unwrap());
    assert_eq!(results.count, 1);
    assert_eq!(results.data[0].name, "The Wild Sax Band");

    let results = partial_match_search("Music", venues::list_venue_summaries(&pool).await.unwrap());
    assert_eq!(results.count, 2);
}

#[tokio::test]
async fn test_shows_page_listing_order() {
    let (_dir, pool) = setup_db().await;
    seed::seed_demo_data(&pool).await.unwrap();

    let listed = shows::list_shows(&pool).await.unwrap();
    assert_eq!(listed.len(), 5);
    assert_eq!(listed[0].venue_name, "The Musical Hop");
    assert_eq!(listed[0].artist_name, "Guns N Petals");
    assert_eq!(listed[0].start_time, at(2019, 5, 21, 21) + chrono::Duration::minutes(30));
    assert!(listed.windows(2).all(|w| w[0].start_time <= w[1].start_time));
}

#[tokio::test]
async fn test_recent_listings_newest_first() {
    let (_dir, pool) = setup_db().await;
    seed::seed_demo_data(&pool).await.unwrap();

    let recent = venues::recent_venues(&pool, 2).await.unwrap();
    assert_eq!(recent.len(), 2);
    assert_eq!(recent[0].name, "Park Square Live Music & Coffee");

    let recent = artists::recent_artists(&pool, 10).await.unwrap();
    assert_eq!(recent[0].name, "The Wild Sax Band");
}

/// Install a trigger that aborts every `event` (INSERT/UPDATE/DELETE) on `table`
async fn reject_writes(pool: &SqlitePool, table: &str, event: &str) {
    sqlx::query(&format!(
        "CREATE TRIGGER reject_{table}_{event} BEFORE {event} ON {table} \
         BEGIN SELECT RAISE(ABORT, '{table} are read-only'); END"
    ))
    .execute(pool)
    .await
    .unwrap();
}

#[tokio::test]
async fn test_failed_venue_insert_is_storage_failure() {
    let (_dir, pool) = setup_db().await;
    reject_writes(&pool, "venues", "INSERT").await;

    let err = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Storage);
    assert!(matches!(err, Error::Database(_)));
    assert!(venues::list_venue_summaries(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_show_insert_leaves_nothing_behind() {
    let (_dir, pool) = setup_db().await;
    let venue_id = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX")).await.unwrap();
    let artist_id = artists::create_artist(&pool, &artist_draft("Act")).await.unwrap();
    reject_writes(&pool, "shows", "INSERT").await;

    let err = shows::create_show(&pool, &ShowDraft { artist_id, venue_id, start_time: at(2035, 1, 1, 20) })
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Storage);
    assert!(shows::list_shows(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_failed_update_keeps_previous_values() {
    let (_dir, pool) = setup_db().await;
    let artist_id = artists::create_artist(&pool, &artist_draft("Original")).await.unwrap();
    reject_writes(&pool, "artists", "UPDATE").await;

    let err = artists::update_artist(&pool, artist_id, &artist_draft("Renamed"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Storage);
    assert_eq!(artists::get_artist(&pool, artist_id).await.unwrap().name, "Original");
}

#[tokio::test]
async fn test_closed_pool_is_storage_failure() {
    let (_dir, pool) = setup_db().await;
    pool.close().await;

    let err = venues::create_venue(&pool, &venue_draft("Hall", "Austin", "TX"))
        .await
        .unwrap_err();
    assert_eq!(err.category(), FailureCategory::Storage);
}
