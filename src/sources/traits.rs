use async_trait::async_trait;

use crate::errors::AggregatorResult;

/// Transport used to download raw feed documents
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FeedFetcher: Send + Sync {
    /// Download the feed at `url`, failing on non-success status or an empty body
    async fn fetch(&self, url: &str) -> AggregatorResult<Vec<u8>>;
}
