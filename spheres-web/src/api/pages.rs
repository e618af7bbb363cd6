//! Page routes
//!
//! Templates are compiled into the binary. The sphere page takes the
//! requested name as-is; whether the file exists is the viewer script's
//! concern, not the server's.

use axum::{extract::Path, response::Html};

const INDEX_HTML: &str = include_str!("../../templates/index.html");
const SPHERE_HTML: &str = include_str!("../../templates/sphere.html");

const FILENAME_HTML_SLOT: &str = "{{ filename_html }}";
const FILENAME_JS_SLOT: &str = "{{ filename_js }}";

/// GET /
///
/// Serves the map page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// GET /spheres/:sphere
///
/// Serves the viewer page for one sphere. Always 200.
pub async fn serve_sphere(Path(sphere): Path<String>) -> Html<String> {
    Html(render_sphere(&sphere))
}

/// Fill the sphere template with `filename`
///
/// Slots are located in the template only, never in substituted text.
pub fn render_sphere(filename: &str) -> String {
    let html = escape_html(filename);
    let js = js_string_literal(filename);
    let slots = [(FILENAME_HTML_SLOT, html.as_str()), (FILENAME_JS_SLOT, js.as_str())];

    let mut page = String::with_capacity(SPHERE_HTML.len() + html.len() + js.len());
    let mut rest = SPHERE_HTML;

    loop {
        let remaining = rest;
        let next = slots
            .iter()
            .filter_map(move |&(slot, value)| remaining.find(slot).map(|at| (at, slot, value)))
            .min_by_key(|&(at, _, _)| at);
        let Some((at, slot, value)) = next else {
            break;
        };

        page.push_str(&rest[..at]);
        page.push_str(value);
        rest = &rest[at + slot.len()..];
    }
    page.push_str(rest);

    page
}

/// Entity-escape text for HTML content and attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Quoted JSON string, safe inside an inline `<script>`
///
/// `<` is emitted as `\u003c` so the text can never close the script element.
pub fn js_string_literal(text: &str) -> String {
    serde_json::Value::String(text.to_string())
        .to_string()
        .replace('<', "\\u003c")
}
