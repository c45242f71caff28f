use showbill_common::models::{Artist, EntitySummary};
use showbill_common::schedule::ShowSplit;
use showbill_common::search::SearchResults;

use super::{build_page, genre_tags, html_escape, search_form, show_sections};
use crate::flash::Flash;

fn name_list(artists: &[EntitySummary]) -> String {
    let items: String = artists
        .iter()
        .map(|a| format!(r#"<li><a href="/artists/{}">{}</a></li>"#, a.id, html_escape(&a.name)))
        .collect();
    format!(r#"<ul class="items">{items}</ul>"#)
}

pub fn render_artists(artists: &[EntitySummary], flash: Option<&Flash>) -> String {
    let content = format!(
        "<h2>Artists</h2>{}{}",
        search_form("/artists/search", "Find an artist"),
        name_list(artists)
    );
    build_page("Artists", flash, &content)
}

pub fn render_artist_search(term: &str, results: &SearchResults<EntitySummary>) -> String {
    let content = format!(
        r#"<h2>Number of search results for "{}": {}</h2>{}{}"#,
        html_escape(term),
        results.count,
        search_form("/artists/search", "Find an artist"),
        name_list(&results.data)
    );
    build_page("Artist search", None, &content)
}

pub fn render_artist_detail(artist: &Artist, split: &ShowSplit, flash: Option<&Flash>) -> String {
    let mut facts = format!(
        "<p>{}, {}</p>",
        html_escape(&artist.city),
        html_escape(&artist.state)
    );
    if let Some(phone) = &artist.phone {
        facts.push_str(&format!("<p>{}</p>", html_escape(phone)));
    }
    for link in [&artist.website, &artist.facebook_link].into_iter().flatten() {
        facts.push_str(&format!(
            r#"<p><a href="{0}" target="_blank" rel="noopener">{0}</a></p>"#,
            html_escape(link)
        ));
    }

    let seeking = if artist.seeking_venue {
        format!(
            r#"<div class="seeking"><strong>Currently seeking performance venues</strong><p>{}</p></div>"#,
            html_escape(artist.seeking_description.as_deref().unwrap_or_default())
        )
    } else {
        r#"<p class="count">Not currently seeking performance venues</p>"#.to_string()
    };

    let image = artist
        .image_link
        .as_deref()
        .map(|src| format!(r#"<img src="{}" alt="{}">"#, html_escape(src), html_escape(&artist.name)))
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
  <a href="/artists/{id}/edit">Edit</a>
  <form method="post" action="/artists/{id}/delete"><button class="danger" type="submit">Delete</button></form>
</div>
</div>
{image}
</div>
{shows}"#,
        name = html_escape(&artist.name),
        id = artist.id,
        genres = genre_tags(&artist.genres),
        shows = show_sections(split),
    );
    build_page(&artist.name, flash, &content)
}
