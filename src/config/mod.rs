use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use crate::errors::{AggregatorError, AggregatorResult};

pub const DEFAULT_BIND: &str = "0.0.0.0:3000";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (compatible; NewsAggregator/0.1; +https://github.com/news-aggregator)";

#[derive(Debug, Clone)]
pub struct Config {
    pub bind: SocketAddr,
    pub cache_ttl: Duration,
    pub cooldown: Duration,
    pub request_timeout: Duration,
    pub max_items_per_feed: usize,
    /// Keyword-filtered results below this count are backfilled
    pub min_results: usize,
    pub description_length: usize,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 3000)),
            cache_ttl: Duration::from_secs(10 * 60),
            cooldown: Duration::from_secs(5 * 60),
            request_timeout: Duration::from_secs(15),
            max_items_per_feed: 50,
            min_results: 30,
            description_length: 200,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> AggregatorResult<Self> {
        // Try to load .env from executable's directory first
        if let Some(dir) = Self::exe_dir() {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build a config from an arbitrary variable lookup, falling back to defaults
    pub fn from_lookup<F>(lookup: F) -> AggregatorResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let bind = parse_var(&lookup, "AGGREGATOR_BIND")?.unwrap_or(defaults.bind);

        let cache_ttl = parse_var::<u64, _>(&lookup, "AGGREGATOR_CACHE_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        let cooldown = parse_var::<u64, _>(&lookup, "AGGREGATOR_COOLDOWN_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cooldown);

        let request_timeout = parse_var::<u64, _>(&lookup, "AGGREGATOR_REQUEST_TIMEOUT_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.request_timeout);

        let max_items_per_feed = parse_var(&lookup, "AGGREGATOR_MAX_ITEMS_PER_FEED")?
            .unwrap_or(defaults.max_items_per_feed);

        let min_results =
            parse_var(&lookup, "AGGREGATOR_MIN_RESULTS")?.unwrap_or(defaults.min_results);

        let description_length = parse_var(&lookup, "AGGREGATOR_DESCRIPTION_LENGTH")?
            .unwrap_or(defaults.description_length);

        let user_agent = lookup("AGGREGATOR_USER_AGENT")
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or(defaults.user_agent);

        if request_timeout.is_zero() {
            return Err(AggregatorError::Config(
                "request timeout must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            bind,
            cache_ttl,
            cooldown,
            request_timeout,
            max_items_per_feed,
            min_results,
            description_length,
            user_agent,
        })
    }
}

fn parse_var<T, F>(lookup: &F, name: &str) -> AggregatorResult<Option<T>>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| AggregatorError::InvalidEnvVar {
                name: name.to_string(),
                value: raw,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.bind.to_string(), DEFAULT_BIND);
        assert_eq!(config.cache_ttl, Duration::from_secs(600));
        assert_eq!(config.cooldown, Duration::from_secs(300));
        assert_eq!(config.max_items_per_feed, 50);
        assert_eq!(config.min_results, 30);
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
    }

    #[test]
    fn test_overrides_are_applied() {
        let config = Config::from_lookup(lookup_from(&[
            ("AGGREGATOR_BIND", "127.0.0.1:8080"),
            ("AGGREGATOR_CACHE_TTL_SECS", "60"),
            ("AGGREGATOR_MIN_RESULTS", "10"),
            ("AGGREGATOR_USER_AGENT", "TestAgent/1.0"),
        ]))
        .unwrap();

        assert_eq!(config.bind.to_string(), "127.0.0.1:8080");
        assert_eq!(config.cache_ttl, Duration::from_secs(60));
        assert_eq!(config.min_results, 10);
        assert_eq!(config.user_agent, "TestAgent/1.0");
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("AGGREGATOR_COOLDOWN_SECS", "soon")]))
            .unwrap_err();

        assert!(matches!(
            err,
            AggregatorError::InvalidEnvVar { ref name, .. } if name == "AGGREGATOR_COOLDOWN_SECS"
        ));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let err = Config::from_lookup(lookup_from(&[("AGGREGATOR_REQUEST_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(matches!(err, AggregatorError::Config(_)));
    }
}
