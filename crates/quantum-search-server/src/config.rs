//! Server configuration
//!
//! Read from the environment (a `.env` file is loaded first when present).

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::time::Duration;

use crate::adapters::ZaiConfig;
use quantum_search::application::DEFAULT_RESULT_COUNT;

const DEFAULT_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PROVIDER_TIMEOUT_SECS: u64 = 30;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub provider: ZaiConfig,
    pub result_count: usize,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let addr = get("QUANTUM_SEARCH_ADDR")
            .unwrap_or_else(|| DEFAULT_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("QUANTUM_SEARCH_ADDR must be a socket address like 0.0.0.0:3000")?;

        let Some(base_url) = get("ZAI_BASE_URL").filter(|v| !v.trim().is_empty()) else {
            bail!("ZAI_BASE_URL is not set");
        };
        let Some(api_key) = get("ZAI_API_KEY").filter(|v| !v.trim().is_empty()) else {
            bail!("ZAI_API_KEY is not set");
        };

        let result_count = match get("SEARCH_RESULT_COUNT") {
            Some(raw) => raw
                .parse::<usize>()
                .context("SEARCH_RESULT_COUNT must be a positive integer")?,
            None => DEFAULT_RESULT_COUNT,
        };

        let timeout_secs = match get("PROVIDER_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .context("PROVIDER_TIMEOUT_SECS must be a number of seconds")?,
            None => DEFAULT_PROVIDER_TIMEOUT_SECS,
        };

        Ok(Self {
            addr,
            provider: ZaiConfig {
                base_url: base_url.trim_end_matches('/').to_string(),
                api_key,
                model: get("ZAI_MODEL").filter(|v| !v.trim().is_empty()),
                timeout: Duration::from_secs(timeout_secs),
            },
            result_count,
        })
    }
}
