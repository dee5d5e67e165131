//! Server configuration read from the environment.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::time::Duration;

use bowling_summary::SummaryConfig;
use bowling_summary::client::{DEFAULT_API_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};

use crate::error::AppError;

/// Runtime configuration for the API server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Interface to bind.
    pub host: String,
    /// Port to bind.
    pub port: u16,
    /// Chat-completion settings; `None` selects the local score-sheet summarizer.
    pub summary: Option<SummaryConfig>,
    /// OTLP collector endpoint; `None` disables span export.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Reads configuration from process environment variables, falling back
    /// to a `.env` file in the working directory or one of its ancestors.
    /// Process variables take precedence over the file.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the `.env` file cannot be parsed or a
    /// variable holds an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        let dotenv = match dotenvy::dotenv_iter() {
            Ok(iter) => dotenv_vars(iter)?,
            Err(e) if e.not_found() => HashMap::new(),
            Err(e) => return Err(AppError::Config(format!("failed to read .env: {e}"))),
        };
        Self::from_lookup(|key| std::env::var(key).ok().or_else(|| dotenv.get(key).cloned()))
    }

    /// Reads configuration through `lookup`. Empty values count as unset.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable holds an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = match var("PORT") {
            Some(raw) => raw
                .parse()
                .map_err(|e| AppError::Config(format!("PORT must be a valid u16: {e}")))?,
            None => 3000,
        };

        let api_key = var("SUMMARY_API_KEY")
            .or_else(|| var("OPENAI_API_KEY"))
            .or_else(|| var("OPENAI_API"));
        let summary = match api_key {
            Some(api_key) => {
                let timeout_secs = match var("SUMMARY_TIMEOUT_SECS") {
                    Some(raw) => raw.parse::<u64>().map_err(|e| {
                        AppError::Config(format!("SUMMARY_TIMEOUT_SECS must be a whole number: {e}"))
                    })?,
                    None => DEFAULT_TIMEOUT_SECS,
                };
                if timeout_secs == 0 {
                    return Err(AppError::Config(
                        "SUMMARY_TIMEOUT_SECS must be greater than zero".into(),
                    ));
                }
                Some(SummaryConfig {
                    api_url: var("SUMMARY_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string()),
                    api_key,
                    model: var("SUMMARY_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        Ok(Self {
            host,
            port,
            summary,
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT"),
        })
    }

    /// The address to listen on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if `host` and `port` do not form a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr, AppError> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::Config(format!("invalid HOST:PORT combination: {e}")))
    }
}

fn dotenv_vars<R: std::io::Read>(
    iter: dotenvy::Iter<R>,
) -> Result<HashMap<String, String>, AppError> {
    iter.collect::<Result<_, _>>()
        .map_err(|e| AppError::Config(format!("failed to parse .env: {e}")))
}
