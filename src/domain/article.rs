use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::Category;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    pub id: String,
    pub title: String,
    pub description: String,
    pub link: String,
    pub url: String,
    pub pub_date: DateTime<Utc>,
    pub source: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Article {
    pub fn new(link: String, title: String, pub_date: DateTime<Utc>) -> Self {
        Self {
            id: article_id(&link),
            title,
            description: String::new(),
            url: link.clone(),
            link,
            pub_date,
            source: String::new(),
            category: Category::All,
            image_url: None,
        }
    }

    pub fn with_description(mut self, description: String) -> Self {
        self.description = description;
        self
    }

    pub fn with_source(mut self, source: &str) -> Self {
        self.source = source.to_string();
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_image_url(mut self, image_url: Option<String>) -> Self {
        self.image_url = image_url;
        self
    }

    pub fn has_image(&self) -> bool {
        self.image_url.is_some()
    }

    /// Text searched for category keywords
    pub fn searchable_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Stable identifier for an article link: first 16 hex digits of its SHA-256
pub fn article_id(link: &str) -> String {
    let digest = Sha256::digest(link.as_bytes());
    let mut hex = format!("{:x}", digest);
    hex.truncate(16);
    hex
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_id_is_deterministic_per_link() {
        let a = article_id("https://example.com/news/1");
        let b = article_id("https://example.com/news/1");
        let c = article_id("https://example.com/news/2");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }

    #[test]
    fn test_json_shape() {
        let date = Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let article = Article::new(
            "https://example.com/a".to_string(),
            "제목".to_string(),
            date,
        )
        .with_description("요약".to_string())
        .with_source("연합뉴스")
        .with_category(Category::Sports);

        let json = serde_json::to_value(&article).unwrap();

        assert_eq!(json["link"], "https://example.com/a");
        assert_eq!(json["url"], "https://example.com/a");
        assert_eq!(json["pubDate"], "2024-03-01T09:30:00Z");
        assert_eq!(json["category"], "sports");
        assert_eq!(json["source"], "연합뉴스");
        assert!(json.get("imageUrl").is_none(), "absent images are omitted");

        let with_image = article.with_image_url(Some("https://example.com/a.jpg".to_string()));
        let json = serde_json::to_value(&with_image).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/a.jpg");
    }
}
