use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::cache::is_fresh;

/// Remembers when each feed last failed so it can be skipped for a while
#[derive(Debug)]
pub struct FailureTracker {
    failures: Mutex<HashMap<String, DateTime<Utc>>>,
    cooldown: Duration,
}

impl FailureTracker {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            failures: Mutex::new(HashMap::new()),
            cooldown,
        }
    }

    pub fn record_failure(&self, feed_url: &str, now: DateTime<Utc>) {
        self.lock().insert(feed_url.to_string(), now);
    }

    pub fn record_success(&self, feed_url: &str) {
        self.lock().remove(feed_url);
    }

    pub fn is_cooling_down(&self, feed_url: &str, now: DateTime<Utc>) -> bool {
        self.remaining(feed_url, now).is_some()
    }

    /// Time left before `feed_url` may be retried, if it is cooling down
    pub fn remaining(&self, feed_url: &str, now: DateTime<Utc>) -> Option<Duration> {
        let failed_at = *self.lock().get(feed_url)?;

        if !is_fresh(failed_at, now, self.cooldown) {
            return None;
        }

        let elapsed = now
            .signed_duration_since(failed_at)
            .to_std()
            .unwrap_or_default();
        Some(self.cooldown.saturating_sub(elapsed))
    }

    pub fn failing_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, DateTime<Utc>>> {
        self.failures.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
