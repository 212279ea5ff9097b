use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Backend
    pub api_url: String,

    // Polling
    pub poll_interval_secs: u64,

    // Backtest dashboard
    pub initial_capital: f64,
    pub ticker_limit: usize,

    // Watchlist
    pub watchlist_file: String,

    // Logging
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            poll_interval_secs: 10,
            initial_capital: 10_000.0,
            ticker_limit: 50,
            watchlist_file: "data/watchlist.json".to_string(),
            log_level: "INFO".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let env = |key: &str, default: &str| -> String {
            std::env::var(key).unwrap_or_else(|_| default.to_string())
        };

        // The dashboard historically read NEXT_PUBLIC_API_URL
        let api_url = std::env::var("SMARK_API_URL")
            .or_else(|_| std::env::var("NEXT_PUBLIC_API_URL"))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        let defaults = Config::default();

        Config {
            api_url: api_url.trim_end_matches('/').to_string(),
            poll_interval_secs: env("POLL_INTERVAL_SECS", "10")
                .parse()
                .unwrap_or(defaults.poll_interval_secs),
            initial_capital: env("INITIAL_CAPITAL", "10000")
                .parse()
                .unwrap_or(defaults.initial_capital),
            ticker_limit: env("TICKER_LIMIT", "50")
                .parse()
                .unwrap_or(defaults.ticker_limit),
            watchlist_file: env("WATCHLIST_FILE", &defaults.watchlist_file),
            log_level: env("LOG_LEVEL", &defaults.log_level),
        }
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs(self.poll_interval_secs.max(1))
    }
}
