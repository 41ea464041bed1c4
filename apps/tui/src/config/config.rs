use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use store_prices_core::DEFAULT_DEBOUNCE;

const DEFAULT_DATA_PATH: &str = "./all.json";
const DEFAULT_DEBUG_LOG: &str = "store-prices.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub data_path: PathBuf,
    pub search_debounce: Duration,
    pub log_file: Option<PathBuf>,
    pub debug: bool,
}

/// Initializes the application configuration from `.env` and the process
/// environment. CLI flags have already been folded into the environment.
pub fn init_app_config() -> AppConfig {
    // Load environment variables from .env file
    dotenv().ok();

    config_from_lookup(|key| env::var(key).ok())
}

fn config_from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppConfig {
    let data_path = lookup("DATA_PATH").map_or_else(|| PathBuf::from(DEFAULT_DATA_PATH), PathBuf::from);

    let search_debounce = lookup("SEARCH_DEBOUNCE_MS")
        .and_then(|value| match value.trim().parse::<u64>() {
            Ok(ms) => Some(Duration::from_millis(ms)),
            Err(e) => {
                tracing::warn!(value = %value, error = %e, "ignoring invalid SEARCH_DEBOUNCE_MS");
                None
            }
        })
        .unwrap_or(DEFAULT_DEBOUNCE);

    let debug = lookup("DEBUG").is_some_and(|value| !value.is_empty() && value != "0");

    // Debug runs always get a log file; the terminal owns stdout and stderr
    let log_file = lookup("LOG_FILE")
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| debug.then(|| PathBuf::from(DEFAULT_DEBUG_LOG)));

    AppConfig {
        data_path,
        search_debounce,
        log_file,
        debug,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        config_from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults() {
        let config = config(&[]);
        assert_eq!(config.data_path, PathBuf::from("./all.json"));
        assert_eq!(config.search_debounce, Duration::from_millis(300));
        assert_eq!(config.log_file, None);
        assert!(!config.debug);
    }

    #[test]
    fn reads_overrides() {
        let config = config(&[
            ("DATA_PATH", "/tmp/prices.json"),
            ("SEARCH_DEBOUNCE_MS", "120"),
            ("LOG_FILE", "/tmp/prices.log"),
        ]);
        assert_eq!(config.data_path, PathBuf::from("/tmp/prices.json"));
        assert_eq!(config.search_debounce, Duration::from_millis(120));
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/prices.log")));
    }

    #[test]
    fn invalid_debounce_falls_back() {
        let config = config(&[("SEARCH_DEBOUNCE_MS", "soon")]);
        assert_eq!(config.search_debounce, DEFAULT_DEBOUNCE);
    }

    #[test]
    fn debug_gets_a_log_file() {
        let config = config(&[("DEBUG", "1")]);
        assert!(config.debug);
        assert_eq!(config.log_file, Some(PathBuf::from("store-prices.log")));
    }
}
