//! Process configuration read from the environment.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use spiritfood_enrichment::application::enrich::DEFAULT_ENRICHMENT_TIMEOUT;
use spiritfood_event_store::memory_event_repository::DEFAULT_MAX_STREAMS;

use crate::error::AppError;

/// Server settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// YAML file replacing the built-in quiz.
    pub content_path: Option<PathBuf>,
    /// Base URL of the enrichment service. `None` disables enrichment.
    pub enrichment_url: Option<String>,
    pub enrichment_timeout: Duration,
    /// Attempts kept in memory before the oldest is evicted.
    pub max_attempts: usize,
}

impl Config {
    /// Reads `HOST`, `PORT`, `SPIRITFOOD_CONTENT_PATH`, `SPIRITFOOD_MAX_ATTEMPTS`,
    /// `ENRICHMENT_URL` and `ENRICHMENT_TIMEOUT_MS`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`Config::from_env`], reading variables through `lookup`.
    ///
    /// Blank values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a numeric variable does not parse.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_owned());
        let port = match var("PORT") {
            Some(port) => port
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };
        let enrichment_timeout = match var("ENRICHMENT_TIMEOUT_MS") {
            Some(ms) => Duration::from_millis(ms.parse().map_err(|e| {
                AppError::Config(format!("ENRICHMENT_TIMEOUT_MS must be milliseconds: {e}"))
            })?),
            None => DEFAULT_ENRICHMENT_TIMEOUT,
        };
        let max_attempts = match var("SPIRITFOOD_MAX_ATTEMPTS") {
            Some(max) => max.parse().map_err(|e| {
                AppError::Config(format!("SPIRITFOOD_MAX_ATTEMPTS must be a count: {e}"))
            })?,
            None => DEFAULT_MAX_STREAMS,
        };

        Ok(Self {
            host,
            port,
            content_path: var("SPIRITFOOD_CONTENT_PATH").map(PathBuf::from),
            enrichment_url: var("ENRICHMENT_URL"),
            enrichment_timeout,
            max_attempts,
        })
    }

    /// The address to bind.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `HOST:PORT` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}
