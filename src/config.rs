use anyhow::Context;
use std::env;

pub const DEFAULT_DATABASE_URL: &str = "sqlite:./investhub.sqlite?mode=rwc";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Runtime settings, read from the environment (and `.env` if present).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    /// Requests allowed per client IP before the 60s replenish kicks in.
    /// `None` disables rate limiting.
    pub rate_limit_burst: Option<u32>,
    pub cors_permissive: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            rate_limit_burst: None,
            cors_permissive: true,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes `std::env::var`.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let rate_limit_burst = match read("RATE_LIMIT_BURST") {
            Some(raw) => {
                let burst: u32 = raw
                    .parse()
                    .with_context(|| format!("RATE_LIMIT_BURST must be a positive integer, got {:?}", raw))?;
                anyhow::ensure!(burst > 0, "RATE_LIMIT_BURST must be greater than zero");
                Some(burst)
            }
            None => None,
        };

        let cors_permissive = match read("CORS_PERMISSIVE") {
            Some(raw) => matches!(raw.as_str(), "1" | "true" | "TRUE" | "True" | "yes"),
            None => defaults.cors_permissive,
        };

        Ok(Self {
            database_url: read("DATABASE_URL").unwrap_or(defaults.database_url),
            bind_addr: read("BIND_ADDR").unwrap_or(defaults.bind_addr),
            rate_limit_burst,
            cors_permissive,
        })
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
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_nothing_set() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.bind_addr, "127.0.0.1:3000");
        assert!(config.rate_limit_burst.is_none());
    }

    #[test]
    fn test_reads_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/investhub"),
            ("BIND_ADDR", "0.0.0.0:8080"),
            ("RATE_LIMIT_BURST", "20"),
            ("CORS_PERMISSIVE", "false"),
        ]))
        .unwrap();
        assert_eq!(config.database_url, "postgres://localhost/investhub");
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.rate_limit_burst, Some(20));
        assert!(!config.cors_permissive);
    }

    #[test]
    fn test_blank_values_fall_back_to_defaults() {
        let config = Config::from_lookup(lookup_from(&[("DATABASE_URL", "   ")])).unwrap();
        assert_eq!(config.database_url, DEFAULT_DATABASE_URL);
    }

    #[test]
    fn test_rejects_bad_rate_limit() {
        assert!(Config::from_lookup(lookup_from(&[("RATE_LIMIT_BURST", "lots")])).is_err());
        assert!(Config::from_lookup(lookup_from(&[("RATE_LIMIT_BURST", "0")])).is_err());
    }
}
