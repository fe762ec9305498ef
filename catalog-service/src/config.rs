use std::str::FromStr;
use std::time::Duration;
use tracing::warn;

pub const DEFAULT_UPSTREAM_URL: &str = "https://api.dunddermifflin.com";

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub upstream_url: String,
    pub upstream_timeout: Duration,
    pub upstream_retry: bool,
    pub site_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 7004,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_timeout: Duration::from_secs(10),
            upstream_retry: false,
            site_name: "Lectulandiaa".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any variable source; unset or unparseable
    /// values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let upstream_url = lookup("UPSTREAM_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or(defaults.upstream_url);

        let timeout_secs = parse_or(
            &lookup,
            "UPSTREAM_TIMEOUT_SECS",
            defaults.upstream_timeout.as_secs(),
        );
        // A zero timeout would fail every upstream request immediately.
        let upstream_timeout = if timeout_secs == 0 {
            warn!("Ignoring UPSTREAM_TIMEOUT_SECS=0, using default");
            defaults.upstream_timeout
        } else {
            Duration::from_secs(timeout_secs)
        };

        Self {
            port: parse_or(&lookup, "PORT", defaults.port),
            upstream_url,
            upstream_timeout,
            upstream_retry: parse_or(&lookup, "UPSTREAM_RETRY", defaults.upstream_retry),
            site_name: lookup("SITE_NAME").unwrap_or(defaults.site_name),
        }
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    match lookup(key) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring invalid {}={:?}, using default", key, raw);
            default
        }),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]);
        assert_eq!(config.port, 7004);
        assert_eq!(config.upstream_url, DEFAULT_UPSTREAM_URL);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
        assert!(!config.upstream_retry);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("PORT", "8080"),
            ("UPSTREAM_URL", "http://books.internal:9000/"),
            ("UPSTREAM_TIMEOUT_SECS", "3"),
            ("UPSTREAM_RETRY", "true"),
            ("SITE_NAME", "Biblioteca"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.upstream_url, "http://books.internal:9000");
        assert_eq!(config.upstream_timeout, Duration::from_secs(3));
        assert!(config.upstream_retry);
        assert_eq!(config.site_name, "Biblioteca");
    }

    #[test]
    fn invalid_values_fall_back() {
        let config = config(&[("PORT", "eighty"), ("UPSTREAM_RETRY", "yes")]);
        assert_eq!(config.port, 7004);
        assert!(!config.upstream_retry);
    }

    #[test]
    fn zero_timeout_falls_back_to_default() {
        let config = config(&[("UPSTREAM_TIMEOUT_SECS", "0")]);
        assert_eq!(config.upstream_timeout, Duration::from_secs(10));
    }
}
