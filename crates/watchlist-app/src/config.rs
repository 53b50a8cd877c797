use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Runtime configuration, loaded from the environment
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub rapidapi_key: String,
    pub rapidapi_host: String,
    pub search_debounce_ms: u64,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            database_url: env::var("DATABASE_URL")
                .unwrap_or_else(|_| "sqlite:stocks.db".to_string()),
            rapidapi_key: env::var("RAPIDAPI_KEY").context("RAPIDAPI_KEY not set")?,
            rapidapi_host: env::var("RAPIDAPI_HOST")
                .unwrap_or_else(|_| "ms-finance.p.rapidapi.com".to_string()),
            search_debounce_ms: env::var("SEARCH_DEBOUNCE_MS")
                .unwrap_or_else(|_| "300".to_string())
                .parse()?,
        })
    }

    pub fn search_debounce(&self) -> Duration {
        Duration::from_millis(self.search_debounce_ms)
    }
}
