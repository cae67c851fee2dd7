// src/rewrite/naming.rs
// =============================================================================
// This module decides what a downloaded image is called on disk.
//
// Two policies (see config::NamingPolicy):
// - simple:   the file name from the URL, e.g. .../photos/cat.png -> cat.png
// - enhanced: <document stem>_<reference ordinal>.<ext>, e.g. intro_3.png
//
// For the enhanced policy the extension comes from, in order:
//   1. the response Content-Type, if it names an image type we know
//   2. a .png / .jpg / .jpeg suffix on the URL (case-sensitive)
//   3. "jpeg"
//
// There is no collision detection. Two different URLs that end in the same
// file name (simple policy) overwrite each other, last one wins.
// =============================================================================

use url::Url;

const FALLBACK_EXTENSION: &str = "jpeg";
const FALLBACK_BASENAME: &str = "image";

// URL suffixes we trust, checked in this order
const KNOWN_SUFFIXES: [(&str, &str); 3] = [(".png", "png"), (".jpg", "jpg"), (".jpeg", "jpeg")];

/// True for references that point at a remote host.
pub fn is_remote(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// File name for the simple policy
//
// Examples:
//   "https://example.com/a/b/cat.png?size=large" -> "cat.png"
//   "https://example.com/a/b/"                   -> "b"
//   "img/dog.jpg"  (not a valid absolute URL)    -> "dog.jpg"
pub fn url_basename(url: &str) -> String {
    let name = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
            .unwrap_or_default()
            .to_string(),
        Err(_) => url
            .split(|c: char| c == '?' || c == '#')
            .next()
            .unwrap_or_default()
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string(),
    };

    if name.is_empty() || name == "." || name == ".." {
        FALLBACK_BASENAME.to_string()
    } else {
        name
    }
}

/// File name for the enhanced policy.
pub fn enhanced_name(document_stem: &str, index: usize, extension: &str) -> String {
    format!("{}_{}.{}", document_stem, index, extension)
}

// Picks the extension for the enhanced policy
//
// Parameters:
//   url: the remote URL as written in the document
//   content_type: the response Content-Type, or None when unavailable or
//                 when sniffing is turned off
pub fn image_extension(url: &str, content_type: Option<&str>) -> &'static str {
    content_type
        .and_then(extension_from_content_type)
        .or_else(|| extension_from_suffix(url))
        .unwrap_or(FALLBACK_EXTENSION)
}

fn extension_from_suffix(url: &str) -> Option<&'static str> {
    KNOWN_SUFFIXES
        .iter()
        .find(|(suffix, _)| url.ends_with(suffix))
        .map(|(_, ext)| *ext)
}

// "image/png; charset=binary" -> Some("png")
fn extension_from_content_type(content_type: &str) -> Option<&'static str> {
    let mime = content_type.split(';').next()?.trim().to_ascii_lowercase();
    let ext = match mime.as_str() {
        "image/png" => "png",
        "image/jpeg" | "image/jpg" | "image/pjpeg" => "jpeg",
        "image/gif" => "gif",
        "image/webp" => "webp",
        "image/svg+xml" => "svg",
        "image/bmp" => "bmp",
        "image/x-icon" | "image/vnd.microsoft.icon" => "ico",
        "image/avif" => "avif",
        "image/tiff" => "tiff",
        _ => return None,
    };
    Some(ext)
}
