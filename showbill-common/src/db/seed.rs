//! Demo data for an empty database

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::info;

use super::{artists, shows, venues};
use crate::models::{ArtistDraft, ShowDraft, VenueDraft};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub venues: usize,
    pub artists: usize,
    pub shows: usize,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

fn some(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn demo_venues() -> Vec<VenueDraft> {
    vec![
        VenueDraft {
            name: "The Musical Hop".into(),
            genres: strings(&["Jazz", "Reggae", "Classical", "Folk"]),
            address: "1015 Folsom Street".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: some("123-123-1234"),
            website: some("https://www.themusicalhop.com"),
            facebook_link: some("https://www.facebook.com/TheMusicalHop"),
            seeking_talent: true,
            seeking_description: some(
                "We are on the lookout for a local artist to play every two weeks. Please call us.",
            ),
            image_link: some("https://images.unsplash.com/photo-1543900694-133f37abaaa5?w=400&q=60"),
        },
        VenueDraft {
            name: "The Dueling Pianos Bar".into(),
            genres: strings(&["Classical", "R&B", "Hip-Hop"]),
            address: "335 Delancey Street".into(),
            city: "New York".into(),
            state: "NY".into(),
            phone: some("914-003-1132"),
            website: some("https://www.theduelingpianos.com"),
            facebook_link: some("https://www.facebook.com/theduelingpianos"),
            seeking_talent: false,
            seeking_description: None,
            image_link: some("https://images.unsplash.com/photo-1497032205916-ac775f0649ae?w=750&q=80"),
        },
        VenueDraft {
            name: "Park Square Live Music & Coffee".into(),
            genres: strings(&["Rock n Roll", "Jazz", "Classical", "Folk"]),
            address: "34 Whiskey Moore Ave".into(),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: some("415-000-1234"),
            website: some("https://www.parksquarelivemusicandcoffee.com"),
            facebook_link: some("https://www.facebook.com/ParkSquareLiveMusicAndCoffee"),
            seeking_talent: false,
            seeking_description: None,
            image_link: some("https://images.unsplash.com/photo-1485686531765-ba63b07845a7?w=747&q=80"),
        },
    ]
}

fn demo_artists() -> Vec<ArtistDraft> {
    vec![
        ArtistDraft {
            name: "Guns N Petals".into(),
            genres: strings(&["Rock n Roll"]),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: some("326-123-5000"),
            website: some("https://www.gunsnpetalsband.com"),
            facebook_link: some("https://www.facebook.com/GunsNPetals"),
            seeking_venue: true,
            seeking_description: some(
                "Looking for shows to perform at in the San Francisco Bay Area!",
            ),
            image_link: some("https://images.unsplash.com/photo-1549213783-8284d0336c4f?w=300&q=80"),
        },
        ArtistDraft {
            name: "Matt Quevado".into(),
            genres: strings(&["Jazz"]),
            city: "New York".into(),
            state: "NY".into(),
            phone: some("300-400-5000"),
            website: None,
            facebook_link: some("https://www.facebook.com/mattquevedo923251523"),
            seeking_venue: false,
            seeking_description: None,
            image_link: some("https://images.unsplash.com/photo-1495223153807-b916f75de8c5?w=334&q=80"),
        },
        ArtistDraft {
            name: "The Wild Sax Band".into(),
            genres: strings(&["Jazz", "Classical"]),
            city: "San Francisco".into(),
            state: "CA".into(),
            phone: some("432-325-5432"),
            website: None,
            facebook_link: None,
            seeking_venue: false,
            seeking_description: None,
            image_link: some("https://images.unsplash.com/photo-1558369981-f9ca78462e61?w=794&q=80"),
        },
    ]
}

/// (venue index, artist index, y, m, d, h, min)
const DEMO_SHOWS: &[(usize, usize, i32, u32, u32, u32, u32)] = &[
    (0, 0, 2019, 5, 21, 21, 30),
    (2, 1, 2019, 6, 15, 23, 0),
    (2, 2, 2035, 4, 1, 20, 0),
    (2, 2, 2035, 4, 8, 20, 0),
    (2, 2, 2035, 4, 15, 20, 0),
];

/// Insert the demo venues, artists and shows unless any venue or artist exists
///
/// Returns `None` when the database already has data.
pub async fn seed_demo_data(pool: &SqlitePool) -> Result<Option<SeedSummary>> {
    let existing: i64 =
        sqlx::query_scalar("SELECT (SELECT COUNT(*) FROM venues) + (SELECT COUNT(*) FROM artists)")
            .fetch_one(pool)
            .await?;
    if existing > 0 {
        info!("Database already has listings - skipping demo seed");
        return Ok(None);
    }

    let mut venue_ids = Vec::new();
    for draft in demo_venues() {
        venue_ids.push(venues::create_venue(pool, &draft).await?);
    }

    let mut artist_ids = Vec::new();
    for draft in demo_artists() {
        artist_ids.push(artists::create_artist(pool, &draft).await?);
    }

    let mut show_count = 0;
    for &(venue, artist, y, m, d, h, min) in DEMO_SHOWS {
        let start_time = NaiveDate::from_ymd_opt(y, m, d)
            .and_then(|date| date.and_hms_opt(h, min, 0))
            .ok_or_else(|| crate::Error::Internal(format!("bad demo date {}-{}-{}", y, m, d)))?;
        shows::create_show(
            pool,
            &ShowDraft {
                artist_id: artist_ids[artist],
                venue_id: venue_ids[venue],
                start_time,
            },
        )
        .await?;
        show_count += 1;
    }

    let summary = SeedSummary {
        venues: venue_ids.len(),
        artists: artist_ids.len(),
        shows: show_count,
    };
    info!(?summary, "Seeded demo data");
    Ok(Some(summary))
}
