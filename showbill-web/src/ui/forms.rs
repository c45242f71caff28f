//! Create/edit forms
//!
//! Forms are re-rendered with the submitted values and per-field messages
//! when validation fails.

use showbill_common::validation::{
    ArtistFields, ShowFields, ValidationErrors, VenueFields, CHECKBOX_ON, GENRES, STATES,
};

use super::{build_page, html_escape};
use crate::flash::Flash;

/// Whether a form creates a new record or edits record `id`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: i64 },
}

impl FormMode {
    fn action(&self, base: &str) -> String {
        match self {
            FormMode::Create => format!("/{base}/create"),
            FormMode::Edit { id } => format!("/{base}/{id}/edit"),
        }
    }
}

pub fn render_venue_form(mode: FormMode, fields: &VenueFields, errors: &ValidationErrors) -> String {
    let title = match mode {
        FormMode::Create => "List a new venue",
        FormMode::Edit { .. } => "Edit venue",
    };
    let body = [
        text_input("name", "Name", &fields.name, errors),
        text_input("city", "City", &fields.city, errors),
        state_select(&fields.state, errors),
        text_input("address", "Address", &fields.address, errors),
        text_input("phone", "Phone", &fields.phone, errors),
        genre_select(&fields.genres, errors),
        text_input("image_link", "Image link", &fields.image_link, errors),
        text_input("facebook_link", "Facebook link", &fields.facebook_link, errors),
        text_input("website_link", "Website", &fields.website_link, errors),
        checkbox("seeking_talent", "Looking for talent", &fields.seeking_talent),
        textarea("seeking_description", "Seeking description", &fields.seeking_description),
    ]
    .concat();

    entity_form(title, &mode.action("venues"), &body, None)
}

pub fn render_artist_form(mode: FormMode, fields: &ArtistFields, errors: &ValidationErrors) -> String {
    let title = match mode {
        FormMode::Create => "List a new artist",
        FormMode::Edit { .. } => "Edit artist",
    };
    let body = [
        text_input("name", "Name", &fields.name, errors),
        text_input("city", "City", &fields.city, errors),
        state_select(&fields.state, errors),
        text_input("phone", "Phone", &fields.phone, errors),
        genre_select(&fields.genres, errors),
        text_input("image_link", "Image link", &fields.image_link, errors),
        text_input("facebook_link", "Facebook link", &fields.facebook_link, errors),
        text_input("website_link", "Website", &fields.website_link, errors),
        checkbox("seeking_venue", "Looking for venues", &fields.seeking_venue),
        textarea("seeking_description", "Seeking description", &fields.seeking_description),
    ]
    .concat();

    entity_form(title, &mode.action("artists"), &body, None)
}

/// Show form; `notice` carries a failure that is not tied to one field
pub fn render_show_form(fields: &ShowFields, errors: &ValidationErrors, notice: Option<&Flash>) -> String {
    let body = [
        text_input("artist_id", "Artist ID", &fields.artist_id, errors),
        text_input("venue_id", "Venue ID", &fields.venue_id, errors),
        text_input("start_time", "Start time", &fields.start_time, errors),
    ]
    .concat();

    entity_form("List a new show", "/shows/create", &body, notice)
}

fn entity_form(title: &str, action: &str, body: &str, notice: Option<&Flash>) -> String {
    let content = format!(
        r#"<h2>{title}</h2>
<form class="entity" method="post" action="{action}">
{body}
<div class="actions"><button type="submit">Save</button></div>
</form>"#,
        title = html_escape(title),
    );
    build_page(title, notice, &content)
}

fn field_error(field: &str, errors: &ValidationErrors) -> String {
    errors
        .for_field(field)
        .map(|msg| format!(r#"<span class="field-error">{}</span>"#, html_escape(msg)))
        .unwrap_or_default()
}

fn invalid_class(field: &str, errors: &ValidationErrors) -> &'static str {
    if errors.for_field(field).is_some() {
        r#" class="invalid""#
    } else {
        ""
    }
}

fn text_input(name: &str, label: &str, value: &str, errors: &ValidationErrors) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<input id="{name}" name="{name}" value="{value}"{class}>
{error}"#,
        value = html_escape(value),
        class = invalid_class(name, errors),
        error = field_error(name, errors),
    )
}

fn textarea(name: &str, label: &str, value: &str) -> String {
    format!(
        r#"<label for="{name}">{label}</label>
<textarea id="{name}" name="{name}">{value}</textarea>"#,
        value = html_escape(value),
    )
}

fn checkbox(name: &str, label: &str, value: &Option<String>) -> String {
    let checked = if value.as_deref() == Some(CHECKBOX_ON) {
        " checked"
    } else {
        ""
    };
    format!(
        r#"<label><input type="checkbox" name="{name}" value="{CHECKBOX_ON}"{checked}> {label}</label>"#
    )
}

fn state_select(selected: &str, errors: &ValidationErrors) -> String {
    let options: String = STATES
        .iter()
        .map(|state| {
            let attr = if state.eq_ignore_ascii_case(selected.trim()) {
                " selected"
            } else {
                ""
            };
            format!(r#"<option value="{state}"{attr}>{state}</option>"#)
        })
        .collect();
    format!(
        r#"<label for="state">State</label>
<select id="state" name="state"{class}><option value="">Choose a state</option>{options}</select>
{error}"#,
        class = invalid_class("state", errors),
        error = field_error("state", errors),
    )
}

fn genre_select(selected: &[String], errors: &ValidationErrors) -> String {
    let options: String = GENRES
        .iter()
        .map(|genre| {
            let attr = if selected.iter().any(|s| s == genre) {
                " selected"
            } else {
                ""
            };
            format!(
                r#"<option value="{0}"{attr}>{0}</option>"#,
                html_escape(genre)
            )
        })
        .collect();
    format!(
        r#"<label for="genres">Genres</label>
<select id="genres" name="genres" multiple{class}>{options}</select>
{error}"#,
        class = invalid_class("genres", errors),
        error = field_error("genres", errors),
    )
}
