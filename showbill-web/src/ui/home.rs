use showbill_common::models::EntitySummary;

use super::{build_page, html_escape};
use crate::flash::Flash;

/// Landing page with the most recently listed venues and artists
pub fn render_home(venues: &[EntitySummary], artists: &[EntitySummary], flash: Option<&Flash>) -> String {
    let content = format!(
        r#"<h2>Welcome to Showbill</h2>
<p>Find a venue for your band, or book a band for your venue.</p>
<div class="profile">
<section><h3>Recently listed venues</h3>{venues}</section>
<section><h3>Recently listed artists</h3>{artists}</section>
</div>"#,
        venues = recent_list("venues", venues),
        artists = recent_list("artists", artists),
    );
    build_page("Home", flash, &content)
}

fn recent_list(base: &str, entries: &[EntitySummary]) -> String {
    if entries.is_empty() {
        return r#"<p class="count">Nothing listed yet.</p>"#.to_string();
    }
    let items: String = entries
        .iter()
        .map(|e| format!(r#"<li><a href="/{base}/{}">{}</a></li>"#, e.id, html_escape(&e.name)))
        .collect();
    format!(r#"<ul class="items">{items}</ul>"#)
}
