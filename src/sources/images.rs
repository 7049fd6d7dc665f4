//! Image URL discovery for feed entries.
//!
//! Strategies are tried in order and the first candidate that normalizes to an
//! absolute http(s) URL wins:
//!
//! 1. `<img>` inside embedded content (`content:encoded`, Atom `<content>`)
//! 2. `<img>` inside the description/summary HTML
//! 3. `<enclosure>` declared with an `image/*` type
//! 4. `media:content`
//! 5. `media:thumbnail`
//! 6. generic image fields: image-typed links or links to image files

use feed_rs::model::Entry;
use url::Url;

use super::html::first_image_src;

const IMAGE_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".gif", ".webp", ".bmp", ".avif"];

/// Find the best image for `entry`, resolving relative candidates against `bases`
pub fn extract_image_url(entry: &Entry, bases: &[&str]) -> Option<String> {
    candidates(entry)
        .into_iter()
        .find_map(|candidate| normalize_image_url(&candidate, bases))
}

/// Every raw candidate in strategy order
fn candidates(entry: &Entry) -> Vec<String> {
    let mut found = Vec::new();

    // 1. embedded content
    if let Some(body) = entry.content.as_ref().and_then(|c| c.body.as_deref()) {
        found.extend(first_image_src(body));
    }

    // 2. description HTML
    if let Some(summary) = &entry.summary {
        found.extend(first_image_src(&summary.content));
    }

    let media_contents = || entry.media.iter().flat_map(|m| m.content.iter());

    // 3. enclosure with an explicit image type
    found.extend(
        media_contents()
            .filter(|c| {
                c.content_type
                    .as_ref()
                    .is_some_and(|ct| ct.ty().as_str() == "image")
            })
            .filter_map(|c| c.url.as_ref().map(|u| u.to_string())),
    );

    // 4. media:content without a type, or whose URL names an image file
    found.extend(
        media_contents()
            .filter(|c| c.content_type.is_none())
            .filter_map(|c| c.url.as_ref().map(|u| u.to_string())),
    );
    found.extend(
        media_contents()
            .filter_map(|c| c.url.as_ref().map(|u| u.to_string()))
            .filter(|u| looks_like_image(u)),
    );

    // 5. media:thumbnail
    found.extend(
        entry
            .media
            .iter()
            .flat_map(|m| m.thumbnails.iter())
            .map(|t| t.image.uri.clone()),
    );

    // 6. generic image fields
    found.extend(
        entry
            .links
            .iter()
            .filter(|l| {
                l.media_type
                    .as_deref()
                    .is_some_and(|mt| mt.starts_with("image/"))
                    || looks_like_image(&l.href)
            })
            .map(|l| l.href.clone()),
    );

    found
}

fn looks_like_image(url: &str) -> bool {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url)
        .to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}

/// Turn a raw candidate into an absolute http(s) URL, or discard it
pub fn normalize_image_url(candidate: &str, bases: &[&str]) -> Option<String> {
    let candidate = candidate.trim();
    if candidate.is_empty() || candidate.starts_with("data:") {
        return None;
    }

    if let Some(rest) = candidate.strip_prefix("//") {
        return web_url(Url::parse(&format!("https://{}", rest)).ok()?);
    }

    match Url::parse(candidate) {
        Ok(url) => web_url(url),
        Err(url::ParseError::RelativeUrlWithoutBase) => bases
            .iter()
            .filter_map(|base| Url::parse(base).ok())
            .filter_map(|base| base.join(candidate).ok())
            .find_map(web_url),
        Err(_) => None,
    }
}

fn web_url(url: Url) -> Option<String> {
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Some(url.to_string()),
        _ => None,
    }
}
