//! Form field validation
//!
//! Raw form submissions deserialize into the `*Fields` structs (field names
//! match the HTML forms). `validate()` collects every field error at once and
//! produces a draft ready for the database layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::{Artist, ArtistDraft, ShowDraft, Venue, VenueDraft};
use crate::time::{format_show_time, parse_show_time};

/// Genres offered by the venue and artist forms
pub const GENRES: &[&str] = &[
    "Alternative",
    "Blues",
    "Classical",
    "Country",
    "Electronic",
    "Folk",
    "Funk",
    "Hip-Hop",
    "Heavy Metal",
    "Instrumental",
    "Jazz",
    "Musical Theatre",
    "Pop",
    "Punk",
    "R&B",
    "Reggae",
    "Rock n Roll",
    "Soul",
    "Other",
];

/// US state codes (plus DC) offered by the forms
pub const STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MT", "NE", "NV", "NH", "NJ", "NM", "NY", "NC", "ND", "OH",
    "OK", "OR", "MD", "MA", "MI", "MN", "MS", "MO", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Checkbox value the forms submit when ticked
pub const CHECKBOX_ON: &str = "y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// All problems found in one submission
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field,
            message: message.into(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// First message recorded for `field`
    pub fn for_field(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

/// Venue form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_talent: Option<String>,
    pub seeking_description: String,
    pub image_link: String,
}

impl VenueFields {
    pub fn validate(&self) -> Result<VenueDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", "Name", &self.name);
        let city = required(&mut errors, "city", "City", &self.city);
        let state = check_state(&mut errors, &self.state);
        let address = required(&mut errors, "address", "Address", &self.address);
        let phone = check_phone(&mut errors, &self.phone);
        let genres = check_genres(&mut errors, &self.genres);
        let website = check_link(&mut errors, "website_link", &self.website_link);
        let facebook_link = check_link(&mut errors, "facebook_link", &self.facebook_link);
        let image_link = check_link(&mut errors, "image_link", &self.image_link);

        errors.into_result(|| VenueDraft {
            name,
            genres,
            address,
            city,
            state,
            phone,
            website,
            facebook_link,
            seeking_talent: is_checked(&self.seeking_talent),
            seeking_description: optional(&self.seeking_description),
            image_link,
        })
    }
}

impl From<&Venue> for VenueFields {
    fn from(venue: &Venue) -> Self {
        Self {
            name: venue.name.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            address: venue.address.clone(),
            phone: venue.phone.clone().unwrap_or_default(),
            genres: venue.genres.clone(),
            website_link: venue.website.clone().unwrap_or_default(),
            facebook_link: venue.facebook_link.clone().unwrap_or_default(),
            seeking_talent: venue.seeking_talent.then(|| CHECKBOX_ON.to_string()),
            seeking_description: venue.seeking_description.clone().unwrap_or_default(),
            image_link: venue.image_link.clone().unwrap_or_default(),
        }
    }
}

/// Artist form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub website_link: String,
    pub facebook_link: String,
    pub seeking_venue: Option<String>,
    pub seeking_description: String,
    pub image_link: String,
}

impl ArtistFields {
    pub fn validate(&self) -> Result<ArtistDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = required(&mut errors, "name", "Name", &self.name);
        let city = required(&mut errors, "city", "City", &self.city);
        let state = check_state(&mut errors, &self.state);
        let phone = check_phone(&mut errors, &self.phone);
        let genres = check_genres(&mut errors, &self.genres);
        let website = check_link(&mut errors, "website_link", &self.website_link);
        let facebook_link = check_link(&mut errors, "facebook_link", &self.facebook_link);
        let image_link = check_link(&mut errors, "image_link", &self.image_link);

        errors.into_result(|| ArtistDraft {
            name,
            genres,
            city,
            state,
            phone,
            website,
            facebook_link,
            seeking_venue: is_checked(&self.seeking_venue),
            seeking_description: optional(&self.seeking_description),
            image_link,
        })
    }
}

impl From<&Artist> for ArtistFields {
    fn from(artist: &Artist) -> Self {
        Self {
            name: artist.name.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone().unwrap_or_default(),
            genres: artist.genres.clone(),
            website_link: artist.website.clone().unwrap_or_default(),
            facebook_link: artist.facebook_link.clone().unwrap_or_default(),
            seeking_venue: artist.seeking_venue.then(|| CHECKBOX_ON.to_string()),
            seeking_description: artist.seeking_description.clone().unwrap_or_default(),
            image_link: artist.image_link.clone().unwrap_or_default(),
        }
    }
}

/// Show form submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowFields {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowFields {
    pub fn validate(&self) -> Result<ShowDraft, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let artist_id = check_id(&mut errors, "artist_id", "Artist ID", &self.artist_id);
        let venue_id = check_id(&mut errors, "venue_id", "Venue ID", &self.venue_id);
        let start_time = if self.start_time.trim().is_empty() {
            errors.add("start_time", "Start time is required");
            None
        } else {
            let parsed = parse_show_time(&self.start_time);
            if parsed.is_none() {
                errors.add("start_time", "Start time must look like YYYY-MM-DD HH:MM:SS");
            }
            parsed
        };

        match (artist_id, venue_id, start_time) {
            (Some(artist_id), Some(venue_id), Some(start_time)) if errors.is_empty() => {
                Ok(ShowDraft {
                    artist_id,
                    venue_id,
                    start_time,
                })
            }
            _ => Err(errors),
        }
    }

    /// Form prefilled with a suggested start time
    pub fn starting_at(start_time: &chrono::NaiveDateTime) -> Self {
        Self {
            start_time: format_show_time(start_time),
            ..Self::default()
        }
    }
}

fn is_checked(value: &Option<String>) -> bool {
    value.as_deref() == Some(CHECKBOX_ON)
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn required(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{} is required", label));
    }
    trimmed.to_string()
}

fn check_state(errors: &mut ValidationErrors, value: &str) -> String {
    let state = value.trim().to_ascii_uppercase();
    if state.is_empty() {
        errors.add("state", "State is required");
    } else if !STATES.contains(&state.as_str()) {
        errors.add("state", format!("Unknown state '{}'", value.trim()));
    }
    state
}

fn check_phone(errors: &mut ValidationErrors, value: &str) -> Option<String> {
    let phone = optional(value)?;
    let well_formed = phone
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '-' | ' ' | '.' | '(' | ')'));
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !well_formed || digits != 10 {
        errors.add("phone", "Phone number must have 10 digits, e.g. 415-000-1234");
    }
    Some(phone)
}

fn check_genres(errors: &mut ValidationErrors, values: &[String]) -> Vec<String> {
    let genres: Vec<String> = values
        .iter()
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty())
        .collect();

    if genres.is_empty() {
        errors.add("genres", "Pick at least one genre");
    }
    for genre in &genres {
        if !GENRES.contains(&genre.as_str()) {
            errors.add("genres", format!("Unknown genre '{}'", genre));
        }
    }
    genres
}

fn check_link(errors: &mut ValidationErrors, field: &'static str, value: &str) -> Option<String> {
    let link = optional(value)?;
    if !(link.starts_with("http://") || link.starts_with("https://")) {
        errors.add(field, "Links must start with http:// or https://");
    }
    Some(link)
}

fn check_id(errors: &mut ValidationErrors, field: &'static str, label: &str, value: &str) -> Option<i64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(field, format!("{} is required", label));
        return None;
    }
    match trimmed.parse::<i64>() {
        Ok(id) if id > 0 => Some(id),
        _ => {
            errors.add(field, format!("{} must be a positive number", label));
            None
        }
    }
}
