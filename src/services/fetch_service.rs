use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use tracing::{debug, error, warn};

use crate::domain::{Article, Category, Feed};
use crate::errors::{AggregatorError, AggregatorResult};
use crate::sources::{FeedFetcher, RssAtomParser};
use crate::storage::{Clock, FailureTracker, TtlCache};

/// Fetches individual feeds, shielding callers from failures.
///
/// A feed that fails is skipped for the cooldown window; a feed fetched
/// successfully is served from memory until the cache TTL runs out.
pub struct FetchService {
    fetcher: Arc<dyn FeedFetcher>,
    parser: RssAtomParser,
    cache: TtlCache<(String, Category), Vec<Article>>,
    failures: FailureTracker,
    clock: Arc<dyn Clock>,
}

impl FetchService {
    pub fn new(
        fetcher: Arc<dyn FeedFetcher>,
        parser: RssAtomParser,
        cache_ttl: Duration,
        cooldown: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            fetcher,
            parser,
            cache: TtlCache::new(cache_ttl),
            failures: FailureTracker::new(cooldown),
            clock,
        }
    }

    /// Articles for one feed. Never fails: errors become an empty list.
    pub async fn fetch_feed(&self, feed: &Feed) -> Vec<Article> {
        let now = self.clock.now();

        if let Some(remaining) = self.failures.remaining(&feed.url, now) {
            debug!(
                "Skipping {} (cooling down for another {}s)",
                feed.url,
                remaining.as_secs()
            );
            return Vec::new();
        }

        let key = (feed.url.clone(), feed.category);
        if let Some(cached) = self.cache.get(&key, now) {
            debug!("Cache hit for {} ({} articles)", feed.url, cached.len());
            return cached;
        }

        match self.try_fetch(feed).await {
            Ok(articles) => {
                debug!("Fetched {} articles from {}", articles.len(), feed.url);
                self.failures.record_success(&feed.url);
                self.cache.insert(key, articles.clone(), self.clock.now());
                articles
            }
            Err(e) => {
                warn!("Error fetching {}: {}", feed.url, e);
                self.failures.record_failure(&feed.url, self.clock.now());
                Vec::new()
            }
        }
    }

    async fn try_fetch(&self, feed: &Feed) -> AggregatorResult<Vec<Article>> {
        let bytes = self.fetcher.fetch(&feed.url).await?;
        self.parser.parse(feed, &bytes, self.clock.now())
    }

    /// Fetch every feed concurrently and merge the results.
    ///
    /// Each feed runs as its own task and all of them are awaited; a failing
    /// or panicking feed contributes nothing. Only a cancelled task (runtime
    /// shutdown) aborts the whole merge.
    pub async fn fetch_all(self: &Arc<Self>, feeds: Vec<Feed>) -> AggregatorResult<Vec<Article>> {
        let handles: Vec<_> = feeds
            .into_iter()
            .map(|feed| {
                let service = Arc::clone(self);
                tokio::spawn(async move { service.fetch_feed(&feed).await })
            })
            .collect();

        let mut articles = Vec::new();
        for result in join_all(handles).await {
            match result {
                Ok(feed_articles) => articles.extend(feed_articles),
                Err(e) if e.is_cancelled() => {
                    return Err(AggregatorError::Orchestration(e.to_string()));
                }
                Err(e) => error!("Feed task panicked: {}", e),
            }
        }

        Ok(articles)
    }

    pub fn failing_feeds(&self) -> usize {
        self.failures.failing_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::traits::MockFeedFetcher;
    use crate::storage::clock::ManualClock;
    use chrono::{TimeZone, Utc};

    const SPORTS_FEED: &str = "https://www.yna.co.kr/rss/sports.xml";
    const OTHER_FEED: &str = "https://rss.donga.com/sports.xml";

    fn sample_rss(title: &str) -> Vec<u8> {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0"><channel><title>t</title><link>https://example.com</link><description>d</description>
<item><title>{}</title><link>https://example.com/{}</link><pubDate>Mon, 15 Jan 2024 09:00:00 +0900</pubDate></item>
</channel></rss>"#,
            title,
            title.len()
        )
        .into_bytes()
    }

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        ))
    }

    fn service(fetcher: MockFeedFetcher, clock: Arc<ManualClock>) -> Arc<FetchService> {
        Arc::new(FetchService::new(
            Arc::new(fetcher),
            RssAtomParser::new(50, 200),
            Duration::from_secs(600),
            Duration::from_secs(300),
            clock,
        ))
    }

    #[tokio::test]
    async fn test_fetch_feed_caches_until_ttl() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(2)
            .returning(|_| Ok(sample_rss("축구 소식")));

        let clock = clock();
        let service = service(fetcher, clock.clone());
        let feed = Feed::new(SPORTS_FEED);

        assert_eq!(service.fetch_feed(&feed).await.len(), 1);
        clock.advance(Duration::from_secs(599));
        assert_eq!(service.fetch_feed(&feed).await.len(), 1, "served from cache");
        clock.advance(Duration::from_secs(1));
        assert_eq!(service.fetch_feed(&feed).await.len(), 1, "refetched after TTL");
    }

    #[tokio::test]
    async fn test_failure_triggers_cooldown_then_retry() {
        let mut fetcher = MockFeedFetcher::new();
        let mut seq = mockall::Sequence::new();
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|url| Err(AggregatorError::EmptyBody(url.to_string())));
        fetcher
            .expect_fetch()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(sample_rss("야구 소식")));

        let clock = clock();
        let service = service(fetcher, clock.clone());
        let feed = Feed::new(SPORTS_FEED);

        assert!(service.fetch_feed(&feed).await.is_empty());
        assert_eq!(service.failing_feeds(), 1);

        clock.advance(Duration::from_secs(120));
        assert!(
            service.fetch_feed(&feed).await.is_empty(),
            "skipped without fetching during cooldown"
        );

        clock.advance(Duration::from_secs(180));
        assert_eq!(service.fetch_feed(&feed).await.len(), 1, "retried after cooldown");
        assert_eq!(service.failing_feeds(), 0, "success clears the failure record");
    }

    #[tokio::test]
    async fn test_parse_failure_counts_as_failure() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .times(1)
            .returning(|_| Ok(b"<html>nope</html>".to_vec()));

        let service = service(fetcher, clock());
        assert!(service.fetch_feed(&Feed::new(SPORTS_FEED)).await.is_empty());
        assert_eq!(service.failing_feeds(), 1);
    }

    #[tokio::test]
    async fn test_fetch_all_tolerates_individual_failures() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|url| url == SPORTS_FEED)
            .returning(|_| Ok(sample_rss("축구 소식")));
        fetcher
            .expect_fetch()
            .withf(|url| url == OTHER_FEED)
            .returning(|url| {
                Err(AggregatorError::HttpStatus {
                    status: 503,
                    url: url.to_string(),
                })
            });

        let service = service(fetcher, clock());
        let articles = service
            .fetch_all(vec![Feed::new(SPORTS_FEED), Feed::new(OTHER_FEED)])
            .await
            .unwrap();

        assert_eq!(articles.len(), 1);
        assert_eq!(articles[0].title, "축구 소식");
    }

    #[tokio::test]
    async fn test_fetch_all_with_every_feed_failing_is_empty() {
        let mut fetcher = MockFeedFetcher::new();
        fetcher
            .expect_fetch()
            .returning(|url| Err(AggregatorError::EmptyBody(url.to_string())));

        let service = service(fetcher, clock());
        let articles = service
            .fetch_all(vec![Feed::new(SPORTS_FEED), Feed::new(OTHER_FEED)])
            .await
            .unwrap();

        assert!(articles.is_empty());
    }
}
