use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE};
use reqwest::{Client, ClientBuilder};

use crate::config::Config;
use crate::errors::{AggregatorError, AggregatorResult};
use crate::sources::traits::FeedFetcher;

const FEED_ACCEPT: &str =
    "application/rss+xml, application/atom+xml, application/xml;q=0.9, text/xml;q=0.8, */*;q=0.5";

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(config: &Config) -> AggregatorResult<Self> {
        Self::with_builder(config, Client::builder())
    }

    fn with_builder(config: &Config, builder: ClientBuilder) -> AggregatorResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(FEED_ACCEPT));
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("ko-KR,ko;q=0.9,en;q=0.5"));

        let client = builder
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FeedFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AggregatorResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AggregatorError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = response.bytes().await?;
        if bytes.iter().all(|b| b.is_ascii_whitespace()) {
            return Err(AggregatorError::EmptyBody(url.to_string()));
        }

        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderMap as RequestHeaders, StatusCode};
    use axum::routing::get;
    use axum::Router;
    use std::time::Duration;

    const FEED_BODY: &str = "<rss version=\"2.0\"><channel></channel></rss>";

    async fn echo_headers(headers: RequestHeaders) -> String {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string()
        };
        format!("{}\n{}", header("user-agent"), header("accept"))
    }

    /// Serve a few fixed routes on an ephemeral local port
    async fn spawn_server() -> String {
        let app = Router::new()
            .route("/feed.xml", get(|| async { FEED_BODY }))
            .route("/headers", get(echo_headers))
            .route("/blank", get(|| async { "  \n\t " }))
            .route("/gone", get(|| async { (StatusCode::NOT_FOUND, "missing") }))
            .route(
                "/slow",
                get(|| async {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                    FEED_BODY
                }),
            );

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        format!("http://{}", addr)
    }

    fn fetcher(config: &Config) -> HttpFetcher {
        HttpFetcher::with_builder(config, Client::builder().no_proxy()).unwrap()
    }

    fn test_config() -> Config {
        Config {
            user_agent: "TestAgent/1.0".to_string(),
            request_timeout: Duration::from_millis(500),
            ..Config::default()
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_body() {
        let base = spawn_server().await;
        let bytes = fetcher(&test_config())
            .fetch(&format!("{}/feed.xml", base))
            .await
            .unwrap();

        assert_eq!(bytes, FEED_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_fetch_sends_user_agent_and_accept() {
        let base = spawn_server().await;
        let bytes = fetcher(&test_config())
            .fetch(&format!("{}/headers", base))
            .await
            .unwrap();

        let echoed = String::from_utf8(bytes).unwrap();
        let mut lines = echoed.lines();
        assert_eq!(lines.next(), Some("TestAgent/1.0"));
        assert_eq!(lines.next(), Some(FEED_ACCEPT));
    }

    #[tokio::test]
    async fn test_non_success_status_is_error() {
        let base = spawn_server().await;
        let url = format!("{}/gone", base);
        let err = fetcher(&test_config()).fetch(&url).await.unwrap_err();

        assert!(matches!(
            err,
            AggregatorError::HttpStatus { status: 404, url: ref u } if *u == url
        ));
    }

    #[tokio::test]
    async fn test_whitespace_body_is_error() {
        let base = spawn_server().await;
        let err = fetcher(&test_config())
            .fetch(&format!("{}/blank", base))
            .await
            .unwrap_err();

        assert!(matches!(err, AggregatorError::EmptyBody(_)));
    }

    #[tokio::test]
    async fn test_slow_feed_times_out() {
        let base = spawn_server().await;
        let err = fetcher(&test_config())
            .fetch(&format!("{}/slow", base))
            .await
            .unwrap_err();

        assert!(matches!(err, AggregatorError::Http(ref e) if e.is_timeout()));
    }
}
