//! MIME type constants and extension-based detection.

use std::path::Path;

pub const HTML: &str = "text/html";
pub const CSS: &str = "text/css";
pub const JS: &str = "application/javascript";
pub const JSON: &str = "application/json";
pub const PNG: &str = "image/png";
pub const JPG: &str = "image/jpeg";
pub const GIF: &str = "image/gif";
pub const SVG: &str = "image/svg+xml";
pub const ICO: &str = "image/x-icon";
pub const TXT: &str = "text/plain";
pub const XML: &str = "text/xml";
pub const PDF: &str = "application/pdf";
pub const ZIP: &str = "application/zip";
pub const BIN: &str = "application/octet-stream";

/// Guesses a content type from the file extension of `path`.
///
/// Unknown or missing extensions map to `application/octet-stream`.
///
/// # Example
///
/// ```
/// # use wicket::http::mime;
/// assert_eq!(mime::guess_type("/static/index.HTML"), "text/html");
/// assert_eq!(mime::guess_type("archive.tar.gz"), "application/octet-stream");
/// ```
pub fn guess_type(path: &str) -> &'static str {
    let ext = match Path::new(path).extension().and_then(|e| e.to_str()) {
        Some(ext) => ext.to_ascii_lowercase(),
        None => return BIN,
    };

    match ext.as_str() {
        "html" | "htm" => HTML,
        "css" => CSS,
        "js" | "mjs" => JS,
        "json" => JSON,
        "png" => PNG,
        "jpg" | "jpeg" => JPG,
        "gif" => GIF,
        "svg" => SVG,
        "ico" => ICO,
        "txt" => TXT,
        "xml" => XML,
        "pdf" => PDF,
        "zip" => ZIP,
        _ => BIN,
    }
}
