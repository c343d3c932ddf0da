use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_RATE_LIMIT: &str = "20/minute";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";
const DEFAULT_RESOLVER_TIMEOUT_SECS: u64 = 60;

/// Process-wide configuration, read from the environment once at startup and
/// passed down explicitly.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub rate_limit: RateLimitConfig,
    pub bind_addr: SocketAddr,
    pub resolver_timeout: Duration,
    pub log_format: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let api_key =
            std::env::var("API_KEY").context("API_KEY environment variable is required")?;

        let rate_limit = std::env::var("RATE_LIMIT")
            .unwrap_or_else(|_| DEFAULT_RATE_LIMIT.to_string())
            .parse::<RateLimitConfig>()
            .context("Failed to parse RATE_LIMIT")?;

        let bind_addr = std::env::var("BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("Failed to parse BIND_ADDR")?;

        let resolver_timeout = match std::env::var("RESOLVER_TIMEOUT") {
            Ok(value) => Duration::from_secs(
                value
                    .parse::<u64>()
                    .context("Failed to parse RESOLVER_TIMEOUT")?,
            ),
            Err(_) => Duration::from_secs(DEFAULT_RESOLVER_TIMEOUT_SECS),
        };

        let log_format = std::env::var("LOG_FORMAT").unwrap_or_else(|_| "json".to_string());

        Ok(Self {
            api_key,
            rate_limit,
            bind_addr,
            resolver_timeout,
            log_format,
        })
    }
}

/// Rate limit in the "<N>/<unit>" notation, e.g. "20/minute".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max_requests: u32,
    pub window: Duration,
}

impl FromStr for RateLimitConfig {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let (count, unit) = s
            .trim()
            .split_once('/')
            .with_context(|| format!("Invalid rate limit '{s}', expected '<N>/<unit>'"))?;

        let max_requests: u32 = count
            .trim()
            .parse()
            .with_context(|| format!("Invalid rate limit count in '{s}'"))?;

        let window = match unit.trim().to_ascii_lowercase().as_str() {
            "second" => Duration::from_secs(1),
            "minute" => Duration::from_secs(60),
            "hour" => Duration::from_secs(60 * 60),
            "day" => Duration::from_secs(60 * 60 * 24),
            other => anyhow::bail!(
                "Invalid rate limit unit '{other}', expected second, minute, hour or day"
            ),
        };

        Ok(Self {
            max_requests,
            window,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_parse() {
        let limit: RateLimitConfig = "20/minute".parse().unwrap();
        assert_eq!(limit.max_requests, 20);
        assert_eq!(limit.window, Duration::from_secs(60));

        let limit: RateLimitConfig = "5/second".parse().unwrap();
        assert_eq!(limit.max_requests, 5);
        assert_eq!(limit.window, Duration::from_secs(1));

        let limit: RateLimitConfig = "100/HOUR".parse().unwrap();
        assert_eq!(limit.window, Duration::from_secs(3600));

        let limit: RateLimitConfig = " 10 / day ".parse().unwrap();
        assert_eq!(limit.window, Duration::from_secs(86400));
    }

    #[test]
    fn test_rate_limit_parse_rejects_garbage() {
        assert!("".parse::<RateLimitConfig>().is_err());
        assert!("20".parse::<RateLimitConfig>().is_err());
        assert!("twenty/minute".parse::<RateLimitConfig>().is_err());
        assert!("20/fortnight".parse::<RateLimitConfig>().is_err());
    }
}
