use showbill_common::models::ShowListing;

use super::{build_page, html_escape, time_element};
use crate::flash::Flash;

/// Every show, soonest first
pub fn render_shows(shows: &[ShowListing], flash: Option<&Flash>) -> String {
    let cards: String = shows
        .iter()
        .map(|show| {
            let image = show
                .artist_image_link
                .as_deref()
                .map(|src| format!(r#"<img src="{}" alt="">"#, html_escape(src)))
                .unwrap_or_default();
            format!(
                r#"<div class="show-card">{image}
<h4><a href="/artists/{artist_id}">{artist}</a></h4>
<p>at <a href="/venues/{venue_id}">{venue}</a></p>
{when}
</div>"#,
                artist_id = show.artist_id,
                artist = html_escape(&show.artist_name),
                venue_id = show.venue_id,
                venue = html_escape(&show.venue_name),
                when = time_element(&show.start_time),
            )
        })
        .collect();

    let body = if shows.is_empty() {
        r#"<p class="count">No shows listed yet.</p>"#.to_string()
    } else {
        format!(r#"<div class="shows">{cards}</div>"#)
    };
    build_page("Shows", flash, &format!("<h2>Shows</h2>{body}"))
}
