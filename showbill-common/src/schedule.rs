//! Show classification and venue listing aggregation
//!
//! Pure functions over a snapshot fetched by the caller. Nothing here reads
//! the clock or the database: `now` and the show rows are always passed in.
//!
//! A show is **past** when `start_time <= now` (a show starting exactly now is
//! past) and **upcoming** otherwise.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::VenueSummary;
use crate::time::format_show_time;

/// Which kind of entity sits on the other side of a show
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterpartRole {
    /// Anchor is a venue, counterparts are artists
    Artist,
    /// Anchor is an artist, counterparts are venues
    Venue,
}

impl fmt::Display for CounterpartRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CounterpartRole::Artist => f.write_str("artist"),
            CounterpartRole::Venue => f.write_str("venue"),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScheduleError {
    /// The show row carries no resolved counterpart record
    #[error("show {show_id} references a missing {role}")]
    MissingCounterpart { show_id: i64, role: CounterpartRole },
}

/// Display data of a counterpart entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counterpart {
    pub name: String,
    pub image_link: Option<String>,
}

/// A show as seen from its anchor entity
#[derive(Debug, Clone, PartialEq)]
pub struct AnchoredShow {
    pub show_id: i64,
    pub start_time: NaiveDateTime,
    pub counterpart_id: i64,
    /// `None` when the referenced row could not be joined
    pub counterpart: Option<Counterpart>,
}

/// One entry of a past/upcoming list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShowEntry {
    pub role: CounterpartRole,
    pub counterpart_id: i64,
    pub counterpart_name: String,
    pub counterpart_image_link: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub start_time: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShowSplit {
    pub past_shows: Vec<ShowEntry>,
    pub upcoming_shows: Vec<ShowEntry>,
    pub past_count: usize,
    pub upcoming_count: usize,
}

/// Past/upcoming boundary. Ties are past.
pub fn is_past(start_time: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    start_time <= now
}

/// Partition an anchor's shows into past and upcoming lists
///
/// The partition is stable: each list keeps the relative order of `shows`.
/// Fails on the first show whose counterpart is missing rather than
/// returning an incomplete schedule.
pub fn classify_for_entity(
    now: NaiveDateTime,
    shows: &[AnchoredShow],
    role: CounterpartRole,
) -> Result<ShowSplit, ScheduleError> {
    let mut split = ShowSplit::default();

    for show in shows {
        let counterpart = show
            .counterpart
            .as_ref()
            .ok_or(ScheduleError::MissingCounterpart {
                show_id: show.show_id,
                role,
            })?;

        let entry = ShowEntry {
            role,
            counterpart_id: show.counterpart_id,
            counterpart_name: counterpart.name.clone(),
            counterpart_image_link: counterpart.image_link.clone(),
            start_time: format_show_time(&show.start_time),
        };

        if is_past(&show.start_time, &now) {
            split.past_shows.push(entry);
        } else {
            split.upcoming_shows.push(entry);
        }
    }

    split.past_count = split.past_shows.len();
    split.upcoming_count = split.upcoming_shows.len();
    Ok(split)
}

/// Which shows the venue listing counts per venue
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountPolicy {
    /// Only shows with `start_time > now`, matching the detail pages
    #[default]
    Upcoming,
    /// Every show of the venue regardless of date
    AllShows,
}

impl CountPolicy {
    pub fn counts(&self, start_time: &NaiveDateTime, now: &NaiveDateTime) -> bool {
        match self {
            CountPolicy::Upcoming => !is_past(start_time, now),
            CountPolicy::AllShows => true,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CountPolicy::Upcoming => "upcoming",
            CountPolicy::AllShows => "all_shows",
        }
    }
}

impl fmt::Display for CountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "upcoming" => Ok(CountPolicy::Upcoming),
            "all_shows" | "all" => Ok(CountPolicy::AllShows),
            other => Err(format!(
                "unknown count policy '{}' (expected 'upcoming' or 'all_shows')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VenueShowCount {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Venues of one (city, state) area
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AreaListing {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueShowCount>,
}

/// Group venues by area and count their shows under `policy`
///
/// Areas appear in the order their first venue appears in `venues`; venues
/// inside an area are ordered by name. Areas only come from existing venues,
/// so an area is never empty. Venues absent from `shows_by_venue` count zero.
pub fn aggregate_upcoming_counts(
    now: NaiveDateTime,
    venues: &[VenueSummary],
    shows_by_venue: &HashMap<i64, Vec<NaiveDateTime>>,
    policy: CountPolicy,
) -> Vec<AreaListing> {
    let mut areas: Vec<AreaListing> = Vec::new();
    let mut area_index: HashMap<(&str, &str), usize> = HashMap::new();

    for venue in venues {
        let num_upcoming_shows = shows_by_venue
            .get(&venue.id)
            .map(|times| times.iter().filter(|t| policy.counts(t, &now)).count())
            .unwrap_or(0);

        let key = (venue.city.as_str(), venue.state.as_str());
        let idx = *area_index.entry(key).or_insert_with(|| {
            areas.push(AreaListing {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: Vec::new(),
            });
            areas.len() - 1
        });

        areas[idx].venues.push(VenueShowCount {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows,
        });
    }

    for area in &mut areas {
        area.venues.sort_by(|a, b| a.name.cmp(&b.name));
    }

    areas
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, s)
            .unwrap()
    }

    fn show(id: i64, start_time: NaiveDateTime, counterpart_id: i64, name: &str) -> AnchoredShow {
        AnchoredShow {
            show_id: id,
            start_time,
            counterpart_id,
            counterpart: Some(Counterpart {
                name: name.to_string(),
                image_link: Some(format!("https://img.example/{}.jpg", counterpart_id)),
            }),
        }
    }

    fn venue(id: i64, name: &str, city: &str, state: &str) -> VenueSummary {
        VenueSummary {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
        }
    }

    #[test]
    fn test_worked_example() {
        let now = at(2023, 6, 1, 12, 0, 0);
        let shows = vec![
            show(1, at(2023, 5, 1, 20, 0, 0), 10, "Guns N Petals"),
            show(2, at(2023, 6, 1, 12, 0, 0), 11, "Matt Quevado"),
            show(3, at(2023, 7, 1, 20, 0, 0), 12, "The Wild Sax Band"),
        ];

        let split = classify_for_entity(now, &shows, CounterpartRole::Artist).unwrap();

        assert_eq!(split.past_count, 2);
        assert_eq!(split.upcoming_count, 1);
        assert_eq!(split.past_shows[0].counterpart_name, "Guns N Petals");
        assert_eq!(split.past_shows[0].start_time, "2023-05-01 20:00:00");
        assert_eq!(split.past_shows[1].counterpart_name, "Matt Quevado");
        assert_eq!(split.upcoming_shows[0].counterpart_id, 12);
        assert_eq!(split.upcoming_shows[0].start_time, "2023-07-01 20:00:00");
        assert_eq!(
            split.upcoming_shows[0].counterpart_image_link.as_deref(),
            Some("https://img.example/12.jpg")
        );
    }

    #[test]
    fn test_tie_is_past() {
        let now = at(2030, 1, 1, 0, 0, 0);
        let split =
            classify_for_entity(now, &[show(1, now, 5, "Tie")], CounterpartRole::Venue).unwrap();
        assert_eq!(split.past_count, 1);
        assert_eq!(split.upcoming_count, 0);
        assert_eq!(split.past_shows[0].role, CounterpartRole::Venue);
    }

    #[test]
    fn test_one_second_after_now_is_upcoming() {
        let now = at(2030, 1, 1, 0, 0, 0);
        let split = classify_for_entity(
            now,
            &[show(1, at(2030, 1, 1, 0, 0, 1), 5, "Later")],
            CounterpartRole::Venue,
        )
        .unwrap();
        assert_eq!(split.upcoming_count, 1);
        assert!(split.past_shows.is_empty());
    }

    #[test]
    fn test_empty_input() {
        let split =
            classify_for_entity(at(2023, 1, 1, 0, 0, 0), &[], CounterpartRole::Artist).unwrap();
        assert!(split.past_shows.is_empty());
        assert!(split.upcoming_shows.is_empty());
        assert_eq!(split.past_count, 0);
        assert_eq!(split.upcoming_count, 0);
    }

    #[test]
    fn test_partition_is_total_and_stable() {
        let now = at(2023, 6, 15, 0, 0, 0);
        // Interleave past and upcoming shows, deliberately out of date order
        let shows: Vec<AnchoredShow> = (0..20)
            .map(|i| {
                let month = if i % 3 == 0 { 8 } else { 4 };
                let day = 28 - i as u32;
                show(i, at(2023, month, day, 20, 0, 0), 100 + i, &format!("Act {}", i))
            })
            .collect();

        let split = classify_for_entity(now, &shows, CounterpartRole::Artist).unwrap();

        assert_eq!(split.past_count + split.upcoming_count, shows.len());
        for entry in &split.past_shows {
            assert!(entry.start_time.as_str() <= "2023-06-15 00:00:00");
        }
        for entry in &split.upcoming_shows {
            assert!(entry.start_time.as_str() > "2023-06-15 00:00:00");
        }

        let past_ids: Vec<i64> = split.past_shows.iter().map(|e| e.counterpart_id).collect();
        let upcoming_ids: Vec<i64> = split.upcoming_shows.iter().map(|e| e.counterpart_id).collect();
        let mut sorted_past = past_ids.clone();
        sorted_past.sort();
        let mut sorted_upcoming = upcoming_ids.clone();
        sorted_upcoming.sort();
        assert_eq!(past_ids, sorted_past, "past bucket must keep input order");
        assert_eq!(upcoming_ids, sorted_upcoming, "upcoming bucket must keep input order");
    }

    #[test]
    fn test_missing_counterpart_fails_fast() {
        let now = at(2023, 6, 1, 12, 0, 0);
        let mut broken = show(2, at(2023, 7, 1, 20, 0, 0), 99, "ignored");
        broken.counterpart = None;
        let shows = vec![show(1, at(2023, 5, 1, 20, 0, 0), 10, "Fine"), broken];

        let err = classify_for_entity(now, &shows, CounterpartRole::Venue).unwrap_err();
        assert_eq!(
            err,
            ScheduleError::MissingCounterpart {
                show_id: 2,
                role: CounterpartRole::Venue
            }
        );
        assert_eq!(err.to_string(), "show 2 references a missing venue");
    }

    #[test]
    fn test_aggregate_groups_and_orders_by_name() {
        let now = at(2023, 6, 1, 12, 0, 0);
        let venues = vec![
            venue(3, "Park Square Live Music & Coffee", "San Francisco", "CA"),
            venue(2, "The Dueling Pianos Bar", "New York", "NY"),
            venue(1, "The Musical Hop", "San Francisco", "CA"),
        ];
        let mut shows = HashMap::new();
        shows.insert(
            3,
            vec![
                at(2023, 7, 1, 20, 0, 0),
                at(2023, 8, 1, 20, 0, 0),
                at(2023, 9, 1, 20, 0, 0),
            ],
        );
        shows.insert(1, vec![at(2019, 5, 21, 21, 30, 0)]);

        let areas = aggregate_upcoming_counts(now, &venues, &shows, CountPolicy::Upcoming);

        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].city, "San Francisco");
        assert_eq!(areas[0].state, "CA");
        assert_eq!(areas[0].venues.len(), 2);
        assert_eq!(areas[0].venues[0].name, "Park Square Live Music & Coffee");
        assert_eq!(areas[0].venues[0].num_upcoming_shows, 3);
        assert_eq!(areas[0].venues[1].name, "The Musical Hop");
        assert_eq!(areas[0].venues[1].num_upcoming_shows, 0);

        assert_eq!(areas[1].city, "New York");
        assert_eq!(areas[1].venues[0].num_upcoming_shows, 0);
    }

    #[test]
    fn test_aggregate_all_shows_policy_counts_past() {
        let now = at(2023, 6, 1, 12, 0, 0);
        let venues = vec![venue(1, "The Musical Hop", "San Francisco", "CA")];
        let mut shows = HashMap::new();
        shows.insert(1, vec![at(2019, 5, 21, 21, 30, 0), at(2023, 6, 1, 12, 0, 0)]);

        let upcoming = aggregate_upcoming_counts(now, &venues, &shows, CountPolicy::Upcoming);
        let all = aggregate_upcoming_counts(now, &venues, &shows, CountPolicy::AllShows);

        assert_eq!(upcoming[0].venues[0].num_upcoming_shows, 0);
        assert_eq!(all[0].venues[0].num_upcoming_shows, 2);
    }

    #[test]
    fn test_aggregate_same_city_different_state_are_separate_areas() {
        let venues = vec![
            venue(1, "Portland Hall", "Portland", "OR"),
            venue(2, "Portland Barn", "Portland", "ME"),
        ];
        let areas = aggregate_upcoming_counts(
            at(2023, 1, 1, 0, 0, 0),
            &venues,
            &HashMap::new(),
            CountPolicy::Upcoming,
        );
        assert_eq!(areas.len(), 2);
        assert_eq!(areas[0].state, "OR");
        assert_eq!(areas[1].state, "ME");
    }

    #[test]
    fn test_aggregate_without_venues_emits_no_areas() {
        let areas = aggregate_upcoming_counts(
            at(2023, 1, 1, 0, 0, 0),
            &[],
            &HashMap::new(),
            CountPolicy::AllShows,
        );
        assert!(areas.is_empty());
    }

    #[test]
    fn test_count_policy_parsing() {
        assert_eq!("upcoming".parse::<CountPolicy>(), Ok(CountPolicy::Upcoming));
        assert_eq!("ALL_SHOWS".parse::<CountPolicy>(), Ok(CountPolicy::AllShows));
        assert_eq!("all-shows".parse::<CountPolicy>(), Ok(CountPolicy::AllShows));
        assert!("future".parse::<CountPolicy>().is_err());
        assert_eq!(CountPolicy::default(), CountPolicy::Upcoming);
        assert_eq!(CountPolicy::AllShows.to_string(), "all_shows");
    }
}
