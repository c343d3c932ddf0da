use std::collections::HashMap;
use std::net::IpAddr;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::config::RateLimitConfig;

/// Sliding-window request counter keyed by client IP.
///
/// Every call to [`check`](Self::check) charges the window, including requests
/// that later fail authentication or validation.
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    hits: Mutex<HashMap<IpAddr, Vec<Instant>>>,
}

impl RateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            max_requests: config.max_requests,
            window: config.window,
            hits: Mutex::new(HashMap::new()),
        }
    }

    /// Records a request from `ip` and reports whether it is within the limit.
    pub async fn check(&self, ip: IpAddr) -> bool {
        let now = Instant::now();
        let mut hits = self.hits.lock().await;

        // Prune expired hits and drop clients with none left, so the map
        // stays bounded by the set of recently active IPs.
        hits.retain(|_, entries| {
            entries.retain(|hit| now.duration_since(*hit) < self.window);
            !entries.is_empty()
        });

        let entries = hits.entry(ip).or_default();
        if entries.len() >= self.max_requests as usize {
            false
        } else {
            entries.push(now);
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limiter(max_requests: u32, window: Duration) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            max_requests,
            window,
        })
    }

    #[tokio::test]
    async fn test_allows_up_to_limit_then_rejects() {
        let limiter = limiter(3, Duration::from_secs(60));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        for _ in 0..3 {
            assert!(limiter.check(ip).await);
        }
        assert!(!limiter.check(ip).await);
    }

    #[tokio::test]
    async fn test_clients_are_independent() {
        let limiter = limiter(1, Duration::from_secs(60));
        let first: IpAddr = "10.0.0.1".parse().unwrap();
        let second: IpAddr = "10.0.0.2".parse().unwrap();

        assert!(limiter.check(first).await);
        assert!(!limiter.check(first).await);
        assert!(limiter.check(second).await);
    }

    #[tokio::test]
    async fn test_idle_clients_are_evicted() {
        let limiter = limiter(5, Duration::from_millis(20));
        for octet in 1..=10u8 {
            let ip: IpAddr = format!("10.0.0.{octet}").parse().unwrap();
            assert!(limiter.check(ip).await);
        }
        assert_eq!(limiter.hits.lock().await.len(), 10);

        tokio::time::sleep(Duration::from_millis(30)).await;

        // The next check prunes every client whose window has lapsed.
        let ip: IpAddr = "10.0.0.99".parse().unwrap();
        assert!(limiter.check(ip).await);
        assert_eq!(limiter.hits.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_window_expiry_frees_budget() {
        let limiter = limiter(1, Duration::from_millis(20));
        let ip: IpAddr = "10.0.0.1".parse().unwrap();

        assert!(limiter.check(ip).await);
        assert!(!limiter.check(ip).await);

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert!(limiter.check(ip).await);
    }
}
