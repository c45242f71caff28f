use showbill_common::models::{Venue, VenueSummary};
use showbill_common::schedule::{AreaListing, CountPolicy, ShowSplit};
use showbill_common::search::SearchResults;

use super::{build_page, genre_tags, html_escape, plural, search_form, show_sections};
use crate::flash::Flash;

/// Venues grouped by city and state
pub fn render_venues(areas: &[AreaListing], policy: CountPolicy, flash: Option<&Flash>) -> String {
    let label = match policy {
        CountPolicy::Upcoming => "upcoming show",
        CountPolicy::AllShows => "show",
    };

    let mut sections = String::new();
    if areas.is_empty() {
        sections.push_str(r#"<p class="count">No venues listed yet.</p>"#);
    }
    for area in areas {
        let items: String = area
            .venues
            .iter()
            .map(|v| {
                format!(
                    r#"<li><a href="/venues/{id}">{name}</a><span class="count">{n} {label}{s}</span></li>"#,
                    id = v.id,
                    name = html_escape(&v.name),
                    n = v.num_upcoming_shows,
                    s = plural(v.num_upcoming_shows),
                )
            })
            .collect();
        sections.push_str(&format!(
            r#"<div class="area"><h3>{}, {}</h3><ul class="items">{}</ul></div>"#,
            html_escape(&area.city),
            html_escape(&area.state),
            items
        ));
    }

    let content = format!(
        "<h2>Venues</h2>{}{}",
        search_form("/venues/search", "Find a venue"),
        sections
    );
    build_page("Venues", flash, &content)
}

pub fn render_venue_search(term: &str, results: &SearchResults<VenueSummary>) -> String {
    let items: String = results
        .data
        .iter()
        .map(|v| {
            format!(
                r#"<li><a href="/venues/{}">{}</a><span class="count">{}, {}</span></li>"#,
                v.id,
                html_escape(&v.name),
                html_escape(&v.city),
                html_escape(&v.state)
            )
        })
        .collect();

    let content = format!(
        r#"<h2>Number of search results for "{}": {}</h2>{}<ul class="items">{}</ul>"#,
        html_escape(term),
        results.count,
        search_form("/venues/search", "Find a venue"),
        items
    );
    build_page("Venue search", None, &content)
}

pub fn render_venue_detail(venue: &Venue, split: &ShowSplit, flash: Option<&Flash>) -> String {
    let mut facts = format!(
        "<p>{}</p><p>{}, {}</p>",
        html_escape(&venue.address),
        html_escape(&venue.city),
        html_escape(&venue.state)
    );
    if let Some(phone) = &venue.phone {
        facts.push_str(&format!("<p>{}</p>", html_escape(phone)));
    }
    for link in [&venue.website, &venue.facebook_link].into_iter().flatten() {
        facts.push_str(&format!(
            r#"<p><a href="{0}" target="_blank" rel="noopener">{0}</a></p>"#,
            html_escape(link)
        ));
    }

    let seeking = if venue.seeking_talent {
        format!(
            r#"<div class="seeking"><strong>Currently seeking talent</strong><p>{}</p></div>"#,
            html_escape(venue.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="count">Not currently seeking talent</p>"#.to_string()
    };

    let image = venue
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, html_escape(src), html_escape(&venue.name)))
        .unwrap_or_default();

    let content = format!(
        r#"<div class="profile">
<div>
<h2>{name}</h2>
<p class="count">ID: {id}</p>
<div>{genres}</div>
{facts}
{seeking}
<div class="actions">
  <a href="/venues/{id}/edit">Edit</a>
  <form method="post" action="/venues/{id}/delete"><button class="danger" type="submit">Delete</button></form>
</div>
</div>
{image}
</div>
{shows}"#,
        name = html_escape(&venue.name),
        id = venue.id,
        genres = genre_tags(&venue.genres),
        shows = show_sections(split),
    );
    build_page(&venue.name, flash, &content)
}
