//! Warehouse API adapter for product position lookups.

use std::time::Duration;

use reqwest::StatusCode;
use tracing::{error, warn};

use crate::error::LookupError;
use crate::models::Position;
use crate::traits::PositionLookup;

pub const BASE_URL_VAR: &str = "WAREHOUSE_API_BASE_URL";
pub const API_KEY_VAR: &str = "WAREHOUSE_API_KEY";

#[derive(Debug, Clone)]
pub struct WarehouseConfig {
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
    /// Extra attempts after the first failure. Only transport errors and
    /// 5xx responses are retried.
    pub max_retries: u32,
    /// Backoff before retry `n` is `retry_backoff_ms × n`.
    pub retry_backoff_ms: u64,
}

impl Default for WarehouseConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            api_key: String::new(),
            timeout_secs: 10,
            max_retries: 2,
            retry_backoff_ms: 200,
        }
    }
}

impl WarehouseConfig {
    /// Reads the base URL and API key from the environment.
    pub fn from_env() -> Result<Self, LookupError> {
        let base_url = std::env::var(BASE_URL_VAR)
            .map_err(|_| LookupError::MissingConfig { var: BASE_URL_VAR })?;
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| LookupError::MissingConfig { var: API_KEY_VAR })?;

        Ok(Self {
            base_url,
            api_key,
            ..Self::default()
        })
    }
}

#[derive(Debug, Clone)]
pub struct WarehouseClient {
    config: WarehouseConfig,
    client: reqwest::blocking::Client,
}

impl WarehouseClient {
    pub fn new(config: WarehouseConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { config, client })
    }

    fn positions_url(&self, product_id: &str) -> Result<reqwest::Url, LookupError> {
        let mut url = reqwest::Url::parse(&self.config.base_url)
            .map_err(|err| LookupError::InvalidBaseUrl(err.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| LookupError::InvalidBaseUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .extend(&["products", product_id, "positions"]);
        Ok(url)
    }

    fn fetch_once(&self, product_id: &str) -> Result<Vec<Position>, LookupError> {
        let url = self.positions_url(product_id)?;
        let response = self
            .client
            .get(url)
            .header("x-api-key", &self.config.api_key)
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(Vec::new());
        }
        if !status.is_success() {
            return Err(LookupError::Status {
                product_id: product_id.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.json::<Vec<Position>>()?)
    }
}

fn is_retryable(err: &LookupError) -> bool {
    match err {
        LookupError::Http(err) => !err.is_decode() && !err.is_builder(),
        LookupError::Status { status, .. } => *status >= 500,
        _ => false,
    }
}

impl PositionLookup for WarehouseClient {
    fn resolve_positions(&self, product_id: &str) -> Result<Vec<Position>, LookupError> {
        let attempts = self.config.max_retries + 1;
        let mut attempt = 1;
        loop {
            let err = match self.fetch_once(product_id) {
                Ok(positions) => return Ok(positions),
                Err(err) => err,
            };

            if !is_retryable(&err) {
                return Err(err);
            }
            if attempt >= attempts {
                error!(product_id, attempts, error = %err, "Giving up on position lookup");
                return Err(if attempts > 1 {
                    LookupError::Exhausted {
                        product_id: product_id.to_string(),
                        attempts,
                        last: Box::new(err),
                    }
                } else {
                    err
                });
            }

            warn!(product_id, attempt, error = %err, "Position lookup failed, retrying");
            std::thread::sleep(Duration::from_millis(
                self.config.retry_backoff_ms * u64::from(attempt),
            ));
            attempt += 1;
        }
    }
}
