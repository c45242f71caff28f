//! Server-rendered HTML pages
//!
//! Every page is assembled with `format!` inside [`build_page`]; all
//! user-supplied text passes through [`html_escape`].

use axum::{http::header, response::IntoResponse};
use chrono::NaiveDateTime;
use showbill_common::schedule::{ShowEntry, ShowSplit};
use showbill_common::time::{format_display, format_show_time, parse_show_time, DisplayFormat};
use showbill_common::CounterpartRole;

use crate::flash::Flash;

pub mod artists;
pub mod errors;
pub mod forms;
pub mod home;
pub mod shows;
pub mod venues;

const APP_CSS: &str = include_str!("app.css");

/// GET /static/app.css
pub async fn serve_app_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], APP_CSS)
}

pub(crate) fn build_page(title: &str, flash: Option<&Flash>, content: &str) -> String {
    let flash_html = flash
        .map(|f| {
            format!(
                r#"<div class="flash flash-{}" role="alert">{}</div>"#,
                f.kind.as_str(),
                html_escape(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | Showbill</title>
<link rel="stylesheet" href="/static/app.css">
</head>
<body>
<header class="header">
  <h1><a href="/">Showbill</a></h1>
  <nav>
    <a href="/venues">Venues</a>
    <a href="/artists">Artists</a>
    <a href="/shows">Shows</a>
    <a href="/venues/create">List a venue</a>
    <a href="/artists/create">List an artist</a>
    <a href="/shows/create">List a show</a>
  </nav>
</header>
<main class="container">
{flash_html}
{content}
</main>
</body>
</html>"#,
        title = html_escape(title),
    )
}

pub(crate) fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// `<time>` element with the raw timestamp in `datetime`
pub(crate) fn time_element(start_time: &NaiveDateTime) -> String {
    format!(
        r#"<time datetime="{}">{}</time>"#,
        format_show_time(start_time),
        format_display(start_time, DisplayFormat::Medium)
    )
}

/// Past and upcoming sections of a detail page
pub(crate) fn show_sections(split: &ShowSplit) -> String {
    format!(
        r#"<section><h3>{} Upcoming Show{}</h3>{}</section>
<section><h3>{} Past Show{}</h3>{}</section>"#,
        split.upcoming_count,
        plural(split.upcoming_count),
        show_cards(&split.upcoming_shows),
        split.past_count,
        plural(split.past_count),
        show_cards(&split.past_shows),
    )
}

fn show_cards(entries: &[ShowEntry]) -> String {
    if entries.is_empty() {
        return r#"<p class="count">None.</p>"#.to_string();
    }
    let cards: String = entries
        .iter()
        .map(|entry| {
            let base = match entry.role {
                CounterpartRole::Artist => "artists",
                CounterpartRole::Venue => "venues",
            };
            let image = entry
                .counterpart_image_link
                .as_deref()
                .map(|src| format!(r#"<img src="{}" alt="">"#, html_escape(src)))
                .unwrap_or_default();
            let when = parse_show_time(&entry.start_time)
                .map(|t| time_element(&t))
                .unwrap_or_else(|| html_escape(&entry.start_time));
            format!(
                r#"<div class="show-card">{image}<h4><a href="/{base}/{id}">{name}</a></h4>{when}</div>"#,
                id = entry.counterpart_id,
                name = html_escape(&entry.counterpart_name),
            )
        })
        .collect();
    format!(r#"<div class="shows">{cards}</div>"#)
}

pub(crate) fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

/// Search box posting `search_term` to `action`
pub(crate) fn search_form(action: &str, placeholder: &str) -> String {
    format!(
        r#"<form class="search" method="post" action="{action}">
  <input type="search" name="search_term" placeholder="{placeholder}" aria-label="{placeholder}">
  <button type="submit">Search</button>
</form>"#
    )
}

/// Genre chips
pub(crate) fn genre_tags(genres: &[String]) -> String {
    genres
        .iter()
        .map(|g| format!(r#"<span class="genre">{}</span>"#, html_escape(g)))
        .collect::<Vec<_>>()
        .join("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_escape() {
        assert_eq!(
            html_escape(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_page_escapes_flash() {
        let page = build_page("Home", Some(&Flash::error("<oops>")), "<p>body</p>");
        assert!(page.contains(r#"<div class="flash flash-error" role="alert">&lt;oops&gt;</div>"#));
        assert!(page.contains("<p>body</p>"));
    }

    #[test]
    fn test_time_element() {
        let t = chrono::NaiveDate::from_ymd_opt(2019, 5, 21)
            .unwrap()
            .and_hms_opt(21, 30, 0)
            .unwrap();
        assert_eq!(
            time_element(&t),
            r#"<time datetime="2019-05-21 21:30:00">Tue 05, 21, 2019 9:30PM</time>"#
        );
    }
}
