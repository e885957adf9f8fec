//! Rate limiter for preventing brute force attacks on login

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

/// Rate limiter configuration
#[derive(Debug, Clone)]
pub struct RateLimiterConfig {
    /// Failed attempts allowed per window
    pub max_attempts: u32,
    /// Time window in seconds
    pub window_seconds: u64,
    /// Ban duration in seconds
    pub ban_duration_seconds: u64,
    /// Upper bound on tracked keys
    pub max_tracked_keys: usize,
}

impl Default for RateLimiterConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            window_seconds: 300,        // 5 minutes
            ban_duration_seconds: 3600, // 1 hour
            max_tracked_keys: 10_000,
        }
    }
}

/// Rate limiter entry
#[derive(Debug)]
struct RateLimiterEntry {
    /// Failed attempts in the current window
    failures: u32,
    /// Start of the current window
    window_start: Instant,
    /// Ban expiration time
    ban_expires: Option<Instant>,
}

impl RateLimiterEntry {
    fn is_banned(&self, now: Instant) -> bool {
        self.ban_expires.is_some_and(|expires| now < expires)
    }

    fn is_stale(&self, now: Instant, window: Duration) -> bool {
        !self.is_banned(now) && now.duration_since(self.window_start) >= window
    }
}

/// Failed-login limiter keyed by an arbitrary string
///
/// Only failures are counted, so a correct password never uses up the
/// allowance. Entries whose window and ban have both passed are dropped.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    config: RateLimiterConfig,
    entries: Arc<Mutex<HashMap<String, RateLimiterEntry>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    pub fn new(config: RateLimiterConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Whether `key` may attempt a login right now
    pub async fn is_allowed(&self, key: &str) -> bool {
        self.check_at(key, Instant::now()).await
    }

    /// Count a failed login for `key`
    pub async fn record_failure(&self, key: &str) {
        self.record_failure_at(key, Instant::now()).await
    }

    /// Forget the failures recorded for `key`
    pub async fn reset(&self, key: &str) {
        self.entries.lock().await.remove(key);
    }

    fn window(&self) -> Duration {
        Duration::from_secs(self.config.window_seconds)
    }

    async fn check_at(&self, key: &str, now: Instant) -> bool {
        let entries = self.entries.lock().await;

        match entries.get(key) {
            Some(entry) => !entry.is_banned(now),
            None => true,
        }
    }

    async fn record_failure_at(&self, key: &str, now: Instant) {
        let window = self.window();
        let mut entries = self.entries.lock().await;

        entries.retain(|_, entry| !entry.is_stale(now, window));

        if !entries.contains_key(key) && entries.len() >= self.config.max_tracked_keys {
            let oldest = entries
                .iter()
                .filter(|(_, entry)| !entry.is_banned(now))
                .min_by_key(|(_, entry)| entry.window_start)
                .map(|(k, _)| k.clone());
            if let Some(oldest) = oldest {
                entries.remove(&oldest);
            }
        }

        let entry = entries.entry(key.to_string()).or_insert(RateLimiterEntry {
            failures: 0,
            window_start: now,
            ban_expires: None,
        });

        if entry.ban_expires.is_some_and(|expires| now >= expires) {
            entry.failures = 0;
            entry.ban_expires = None;
            entry.window_start = now;
        }

        if now.duration_since(entry.window_start) >= window {
            entry.failures = 0;
            entry.window_start = now;
        }

        entry.failures += 1;

        if entry.failures >= self.config.max_attempts && entry.ban_expires.is_none() {
            entry.ban_expires = Some(now + Duration::from_secs(self.config.ban_duration_seconds));
            warn!(
                "Banned key {} for {} seconds",
                key, self.config.ban_duration_seconds
            );
        }
    }

    #[cfg(test)]
    async fn tracked_keys(&self) -> usize {
        self.entries.lock().await.len()
    }
}
