use axum::http::StatusCode;

use super::{build_page, html_escape};

/// Error page for `status`, with an optional detail line
pub fn render_error_page(status: StatusCode, detail: Option<&str>) -> String {
    let heading = match status {
        StatusCode::NOT_FOUND => "Page not found",
        StatusCode::BAD_REQUEST => "Bad request",
        _ => "Something went wrong",
    };
    let detail_html = detail
        .map(|d| format!("<p>{}</p>", html_escape(d)))
        .unwrap_or_default();

    let content = format!(
        r#"<div class="error-page">
<h2>{code} {heading}</h2>
{detail_html}
<p><a href="/">Back to the home page</a></p>
</div>"#,
        code = status.as_u16(),
    );
    build_page(heading, None, &content)
}
