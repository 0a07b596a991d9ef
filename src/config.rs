//! Runtime configuration.
//!
//! Values come from the environment (optionally seeded from `.env` by
//! `dotenv`), falling back to the constants below.

use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_LISTEN: &str = "0.0.0.0:8080";
pub const GEOIP_JSON_URL: &str =
    "https://raw.githubusercontent.com/clarkzjw/starlink-geoip-data/refs/heads/master/geoip/geoip-latest.json";
pub const POP_JSON_URL: &str =
    "https://raw.githubusercontent.com/clarkzjw/starlink-geoip-data/refs/heads/master/map/pop.json";
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_CACHE_DIR: &str = ".";

const ENV_LISTEN: &str = "STARLINK_POP_LISTEN";
const ENV_GEOIP_URL: &str = "STARLINK_POP_GEOIP_URL";
const ENV_POP_URL: &str = "STARLINK_POP_POP_URL";
const ENV_FETCH_TIMEOUT_SECS: &str = "STARLINK_POP_FETCH_TIMEOUT_SECS";
const ENV_TRUST_PEER_ADDR: &str = "STARLINK_POP_TRUST_PEER_ADDR";
const ENV_CACHE_DIR: &str = "STARLINK_POP_CACHE_DIR";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Address the HTTP server binds to.
    pub listen: SocketAddr,
    pub geoip_url: String,
    pub pop_url: String,
    /// Budget for each dataset fetch.
    pub fetch_timeout: Duration,
    /// Use the TCP peer address when `CF-Connecting-IP` is absent.
    pub trust_peer_addr: bool,
    /// Directory for the CLI's dated cache files.
    pub cache_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            listen: ([0, 0, 0, 0], 8080).into(),
            geoip_url: GEOIP_JSON_URL.to_string(),
            pop_url: POP_JSON_URL.to_string(),
            fetch_timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            trust_peer_addr: false,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
        }
    }
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Config, Box<dyn Error>> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, Box<dyn Error>>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(listen) = lookup(ENV_LISTEN) {
            config.listen = listen
                .parse()
                .map_err(|e| format!("Invalid {ENV_LISTEN} '{listen}': {e}"))?;
        }
        if let Some(url) = lookup(ENV_GEOIP_URL) {
            config.geoip_url = url;
        }
        if let Some(url) = lookup(ENV_POP_URL) {
            config.pop_url = url;
        }
        if let Some(secs) = lookup(ENV_FETCH_TIMEOUT_SECS) {
            let secs: u64 = secs
                .parse()
                .map_err(|e| format!("Invalid {ENV_FETCH_TIMEOUT_SECS} '{secs}': {e}"))?;
            config.fetch_timeout = Duration::from_secs(secs);
        }
        if let Some(flag) = lookup(ENV_TRUST_PEER_ADDR) {
            config.trust_peer_addr = parse_flag(&flag)
                .ok_or_else(|| format!("Invalid {ENV_TRUST_PEER_ADDR} '{flag}'"))?;
        }
        if let Some(dir) = lookup(ENV_CACHE_DIR) {
            config.cache_dir = PathBuf::from(dir);
        }

        log::debug!("Config: {config:?}");
        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
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
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.listen.to_string(), DEFAULT_LISTEN);
        assert_eq!(config.geoip_url, GEOIP_JSON_URL);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("STARLINK_POP_LISTEN", "127.0.0.1:3000"),
            ("STARLINK_POP_FETCH_TIMEOUT_SECS", "3"),
            ("STARLINK_POP_TRUST_PEER_ADDR", "yes"),
            ("STARLINK_POP_POP_URL", "http://localhost/pop.json"),
        ]))
        .unwrap();
        assert_eq!(config.listen.to_string(), "127.0.0.1:3000");
        assert_eq!(config.fetch_timeout, Duration::from_secs(3));
        assert!(config.trust_peer_addr);
        assert_eq!(config.pop_url, "http://localhost/pop.json");
    }

    #[test]
    fn test_invalid_values() {
        assert!(Config::from_lookup(lookup_from(&[("STARLINK_POP_LISTEN", "nope")])).is_err());
        assert!(
            Config::from_lookup(lookup_from(&[("STARLINK_POP_FETCH_TIMEOUT_SECS", "-1")])).is_err()
        );
        assert!(
            Config::from_lookup(lookup_from(&[("STARLINK_POP_TRUST_PEER_ADDR", "maybe")])).is_err()
        );
    }
}
