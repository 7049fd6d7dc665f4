use serde::Serialize;
use url::Url;

use super::Category;

/// Display names for known publishers, keyed by registrable host
const KNOWN_SOURCES: &[(&str, &str)] = &[
    ("yna.co.kr", "연합뉴스"),
    ("donga.com", "동아일보"),
    ("hankyung.com", "한국경제"),
    ("khan.co.kr", "경향신문"),
    ("chosun.com", "조선일보"),
    ("hani.co.kr", "한겨레"),
    ("mk.co.kr", "매일경제"),
    ("etnews.com", "전자신문"),
    ("sbs.co.kr", "SBS"),
];

const HOST_PREFIXES: &[&str] = &["www.", "rss.", "feeds.", "feed.", "news."];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Feed {
    pub url: String,
    pub category: Category,
    pub source: String,
}

impl Feed {
    /// Build a feed, deriving its category and source name from the URL
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            category: Category::from_feed_url(url),
            source: source_name(url),
        }
    }
}

/// Derive a human-readable source name from a feed URL's hostname
pub fn source_name(url: &str) -> String {
    let host = match Url::parse(url).ok().and_then(|u| u.host_str().map(str::to_lowercase)) {
        Some(host) => host,
        None => return "Unknown".to_string(),
    };

    if let Some((_, name)) = KNOWN_SOURCES
        .iter()
        .find(|(domain, _)| host == *domain || host.ends_with(&format!(".{}", domain)))
    {
        return name.to_string();
    }

    let mut trimmed = host.as_str();
    for prefix in HOST_PREFIXES {
        if let Some(rest) = trimmed.strip_prefix(prefix) {
            trimmed = rest;
        }
    }
    trimmed.to_string()
}
