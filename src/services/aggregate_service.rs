use std::sync::Arc;

use tracing::{debug, info};

use crate::config::Config;
use crate::domain::{Article, Category, Limit};
use crate::errors::AggregatorResult;
use crate::services::fetch_service::FetchService;
use crate::services::ranking;
use crate::sources::{FeedFetcher, FeedRegistry, HttpFetcher, RssAtomParser};
use crate::storage::{Clock, SystemClock, TtlCache};

/// Distinct (category, limit) result sets kept at once
const MAX_CACHED_RESULTS: usize = 64;

/// Answers "latest articles for a category", caching whole result sets
pub struct AggregateService {
    registry: FeedRegistry,
    fetch_service: Arc<FetchService>,
    results: TtlCache<(Category, Limit), Vec<Article>>,
    clock: Arc<dyn Clock>,
    min_results: usize,
}

impl AggregateService {
    pub fn new(
        config: &Config,
        registry: FeedRegistry,
        fetcher: Arc<dyn FeedFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let fetch_service = FetchService::new(
            fetcher,
            RssAtomParser::from_config(config),
            config.cache_ttl,
            config.cooldown,
            clock.clone(),
        );

        Self {
            registry,
            fetch_service: Arc::new(fetch_service),
            results: TtlCache::bounded(config.cache_ttl, MAX_CACHED_RESULTS),
            clock,
            min_results: config.min_results,
        }
    }

    /// Production wiring: built-in feeds over HTTP with the system clock
    pub fn from_config(config: &Config) -> AggregatorResult<Self> {
        let fetcher = HttpFetcher::new(config)?;
        Ok(Self::new(
            config,
            FeedRegistry::new(),
            Arc::new(fetcher),
            Arc::new(SystemClock),
        ))
    }

    pub fn registry(&self) -> &FeedRegistry {
        &self.registry
    }

    pub async fn aggregate(
        &self,
        category: Category,
        limit: Limit,
    ) -> AggregatorResult<Vec<Article>> {
        let key = (category, limit);
        let now = self.clock.now();

        if let Some(cached) = self.results.get(&key, now) {
            debug!("Serving cached results for {} (limit {})", category, limit);
            return Ok(cached);
        }
        self.results.purge_expired(now);

        let feeds = self.registry.for_category(category);
        let feed_count = feeds.len();
        let articles = self.fetch_service.fetch_all(feeds).await?;
        let fetched = articles.len();

        let ranked = ranking::rank(articles, category, self.min_results, limit);

        info!(
            "Aggregated {} articles for {} from {} feeds ({} fetched, {} failing)",
            ranked.len(),
            category,
            feed_count,
            fetched,
            self.fetch_service.failing_feeds()
        );

        self.results.insert(key, ranked.clone(), self.clock.now());
        Ok(ranked)
    }
}
