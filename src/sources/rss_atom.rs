use chrono::{DateTime, Utc};
use feed_rs::model::{Entry, Text};
use feed_rs::parser;
use url::Url;

use crate::config::Config;
use crate::domain::{Article, Feed};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::sources::html::{html_to_text, truncate_chars};
use crate::sources::images::extract_image_url;

const UNTITLED: &str = "제목 없음";

/// Turns RSS 2.0 / Atom documents into normalized articles
#[derive(Debug, Clone)]
pub struct RssAtomParser {
    max_items: usize,
    description_length: usize,
}

impl RssAtomParser {
    pub fn new(max_items: usize, description_length: usize) -> Self {
        Self {
            max_items,
            description_length,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.max_items_per_feed, config.description_length)
    }

    /// Parse a downloaded feed. Items without a usable link are skipped; a
    /// document with no items at all is an error.
    pub fn parse(
        &self,
        feed: &Feed,
        bytes: &[u8],
        fetched_at: DateTime<Utc>,
    ) -> AggregatorResult<Vec<Article>> {
        let parsed = parser::parse(bytes)
            .map_err(|e| AggregatorError::FeedParse(format!("{}: {}", feed.url, e)))?;

        if parsed.entries.is_empty() {
            return Err(AggregatorError::EmptyFeed(feed.url.clone()));
        }

        let articles = parsed
            .entries
            .into_iter()
            .take(self.max_items)
            .filter_map(|entry| self.to_article(feed, entry, fetched_at))
            .collect();

        Ok(articles)
    }

    fn to_article(&self, feed: &Feed, entry: Entry, fetched_at: DateTime<Utc>) -> Option<Article> {
        let link = entry_link(&entry, &feed.url)?;

        let title = entry
            .title
            .as_ref()
            .map(title_text)
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string());

        let raw_description = entry
            .summary
            .as_ref()
            .map(|s| s.content.as_str())
            .filter(|s| !s.trim().is_empty())
            .or_else(|| entry.content.as_ref().and_then(|c| c.body.as_deref()))
            .unwrap_or_default();
        let description = truncate_chars(&html_to_text(raw_description), self.description_length);

        let pub_date = entry.published.or(entry.updated).unwrap_or(fetched_at);

        let image_url = extract_image_url(&entry, &[link.as_str(), feed.url.as_str()]);

        Some(
            Article::new(link, title, pub_date)
                .with_description(description)
                .with_source(&feed.source)
                .with_category(feed.category)
                .with_image_url(image_url),
        )
    }
}

/// Title text with entities already decoded by the parser. Only titles that
/// declare HTML markup (Atom `type="html"`/`"xhtml"`) have tags stripped.
fn title_text(title: &Text) -> String {
    let is_markup = matches!(title.content_type.subty().as_str(), "html" | "xhtml");
    if is_markup {
        html_to_text(&title.content)
    } else {
        title.content.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

/// Absolute http(s) link for an entry, preferring `alternate` links and
/// falling back to a permalink-style id
fn entry_link(entry: &Entry, feed_url: &str) -> Option<String> {
    let base = Url::parse(feed_url).ok();

    let resolve = |href: &str| -> Option<String> {
        let href = href.trim();
        if href.is_empty() {
            return None;
        }
        let url = match Url::parse(href) {
            Ok(url) => url,
            Err(url::ParseError::RelativeUrlWithoutBase) => base.as_ref()?.join(href).ok()?,
            Err(_) => return None,
        };
        matches!(url.scheme(), "http" | "https").then(|| url.to_string())
    };

    entry
        .links
        .iter()
        .filter(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
        .chain(entry.links.iter())
        .find_map(|l| resolve(&l.href))
        .or_else(|| {
            Url::parse(&entry.id)
                .ok()
                .filter(|u| matches!(u.scheme(), "http" | "https"))
                .map(|u| u.to_string())
        })
}
