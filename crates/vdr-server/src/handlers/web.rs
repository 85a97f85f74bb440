//! Embedded web UI

use rocket::get;
use rocket::response::content::RawHtml;

// Embed the page at compile time
const INDEX_HTML: &str = include_str!("templates/index.html");

/// Upload, search and collection management page
#[get("/")]
pub fn index() -> RawHtml<&'static str> {
    RawHtml(INDEX_HTML)
}
