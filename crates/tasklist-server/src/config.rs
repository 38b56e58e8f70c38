use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;

/// `EnvFilter` directives used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "tasklist=debug,tasklist_api=debug,tasklist_db=info,tower_http=debug";

/// Runtime settings, read from the environment (and `.env`, if present).
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_path: PathBuf,
    pub static_dir: PathBuf,
    pub store_timeout: Duration,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let host = get("TASKLIST_HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port: u16 = get("TASKLIST_PORT")
            .unwrap_or_else(|| "8080".into())
            .parse()
            .context("TASKLIST_PORT must be a port number")?;
        let db_path = get("TASKLIST_DB_PATH")
            .unwrap_or_else(|| "tasklist.db".into())
            .into();
        let static_dir = get("TASKLIST_STATIC_DIR")
            .unwrap_or_else(|| "static".into())
            .into();
        let timeout_secs: u64 = get("TASKLIST_STORE_TIMEOUT_SECS")
            .unwrap_or_else(|| "5".into())
            .parse()
            .context("TASKLIST_STORE_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Self {
            host,
            port,
            db_path,
            static_dir,
            store_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.db_path, PathBuf::from("tasklist.db"));
        assert_eq!(config.static_dir, PathBuf::from("static"));
        assert_eq!(config.store_timeout, Duration::from_secs(5));
        assert_eq!(config.addr().unwrap().to_string(), "0.0.0.0:8080");
    }

    #[test]
    fn overrides() {
        let config = Config::from_lookup(lookup(&[
            ("TASKLIST_HOST", "127.0.0.1"),
            ("TASKLIST_PORT", "9000"),
            ("TASKLIST_STORE_TIMEOUT_SECS", "2"),
        ]))
        .unwrap();
        assert_eq!(config.addr().unwrap().to_string(), "127.0.0.1:9000");
        assert_eq!(config.store_timeout, Duration::from_secs(2));
    }

    #[test]
    fn default_log_filter_parses() {
        assert!(tracing_subscriber::EnvFilter::try_new(DEFAULT_LOG_FILTER).is_ok());
        assert!(DEFAULT_LOG_FILTER.contains("tasklist_db=info"));
    }

    #[test]
    fn bad_numbers_are_rejected() {
        assert!(Config::from_lookup(lookup(&[("TASKLIST_PORT", "eighty")])).is_err());
        assert!(Config::from_lookup(lookup(&[("TASKLIST_STORE_TIMEOUT_SECS", "-1")])).is_err());
    }
}
