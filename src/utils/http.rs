// src/utils/http.rs

//! HTTP client utilities.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;

/// Create a configured asynchronous HTTP client.
pub fn create_async_client(config: &CrawlerConfig) -> Result<Client> {
    let client = Client::builder()
        .user_agent(&config.user_agent)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

/// Source of page bodies for the pipeline.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetch `url` and return the response body.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// `PageFetcher` over reqwest with retry and linear backoff.
pub struct HttpFetcher {
    client: Client,
    max_retries: u32,
    backoff: Duration,
}

impl HttpFetcher {
    /// Build a fetcher and its client from crawler settings.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::with_client(create_async_client(config)?, config))
    }

    /// Wrap an existing client.
    pub fn with_client(client: Client, config: &CrawlerConfig) -> Self {
        Self {
            client,
            max_retries: config.max_retries,
            backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    async fn fetch_once(&self, url: &str) -> Result<String> {
        let response = self.client.get(url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut attempt = 0;
        loop {
            match self.fetch_once(url).await {
                Ok(body) => return Ok(body),
                Err(e) if attempt < self.max_retries && is_transient(&e) => {
                    attempt += 1;
                    log::debug!(
                        "Retrying {} ({}/{}) after error: {}",
                        url,
                        attempt,
                        self.max_retries,
                        e
                    );
                    tokio::time::sleep(self.backoff * attempt).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

/// Whether a failed fetch is worth another attempt.
///
/// Network failures, timeouts, 408, 429 and 5xx are retried. Other statuses
/// and request-building errors fail at once.
fn is_transient(error: &AppError) -> bool {
    let AppError::Http(e) = error else {
        return false;
    };
    match e.status() {
        Some(status) => {
            matches!(
                status,
                StatusCode::REQUEST_TIMEOUT | StatusCode::TOO_MANY_REQUESTS
            ) || status.is_server_error()
        }
        None => e.is_timeout() || e.is_connect() || e.is_body(),
    }
}
