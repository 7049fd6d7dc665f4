use crate::domain::{Category, Feed};

/// Feeds aggregated by default. Each feed's category is derived from its URL.
pub const BUILTIN_FEEDS: &[&str] = &[
    // 연합뉴스
    "https://www.yna.co.kr/rss/politics.xml",
    "https://www.yna.co.kr/rss/economy.xml",
    "https://www.yna.co.kr/rss/society.xml",
    "https://www.yna.co.kr/rss/international.xml",
    "https://www.yna.co.kr/rss/sports.xml",
    "https://www.yna.co.kr/rss/entertainment.xml",
    // 동아일보
    "https://rss.donga.com/politics.xml",
    "https://rss.donga.com/economy.xml",
    "https://rss.donga.com/national.xml",
    "https://rss.donga.com/international.xml",
    "https://rss.donga.com/sports.xml",
    "https://rss.donga.com/culture.xml",
    "https://rss.donga.com/science.xml",
    // 한국경제
    "https://www.hankyung.com/feed/politics",
    "https://www.hankyung.com/feed/economy",
    "https://www.hankyung.com/feed/society",
    "https://www.hankyung.com/feed/international",
    "https://www.hankyung.com/feed/it",
    "https://www.hankyung.com/feed/sports",
    "https://www.hankyung.com/feed/entertainment",
    // 경향신문
    "https://www.khan.co.kr/rss/rssdata/politic_news.xml",
    "https://www.khan.co.kr/rss/rssdata/economy_news.xml",
    "https://www.khan.co.kr/rss/rssdata/society_news.xml",
    "https://www.khan.co.kr/rss/rssdata/kh_world.xml",
    "https://www.khan.co.kr/rss/rssdata/kh_sports.xml",
    "https://www.khan.co.kr/rss/rssdata/culture_news.xml",
    "https://www.khan.co.kr/rss/rssdata/science_news.xml",
];

#[derive(Debug, Clone)]
pub struct FeedRegistry {
    feeds: Vec<Feed>,
}

impl FeedRegistry {
    pub fn new() -> Self {
        Self::from_urls(BUILTIN_FEEDS)
    }

    pub fn from_urls(urls: &[&str]) -> Self {
        Self {
            feeds: urls.iter().map(|url| Feed::new(url)).collect(),
        }
    }

    pub fn all(&self) -> &[Feed] {
        &self.feeds
    }

    /// Feeds that should be fetched for a request for `category`
    pub fn for_category(&self, category: Category) -> Vec<Feed> {
        self.feeds
            .iter()
            .filter(|feed| category.includes(feed.category))
            .cloned()
            .collect()
    }
}

impl Default for FeedRegistry {
    fn default() -> Self {
        Self::new()
    }
}
