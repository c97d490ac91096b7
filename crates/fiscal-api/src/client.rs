//! Rate-limited HTTP client for the financials API.

use async_trait::async_trait;
use fiscal_core::{DataProvider, FinancialRow, FinancialRowSource, FiscalError, Result, Symbol};
use reqwest::{Response, StatusCode, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::{Instant, sleep};
use tracing::{debug, instrument, warn};

use crate::config::ClientConfig;

const PROVIDER_NAME: &str = "Financials API";

/// Rate limiter spacing consecutive requests.
#[derive(Debug)]
struct RateLimiter {
    last_request: Option<Instant>,
    min_interval: Duration,
}

impl RateLimiter {
    const fn new(min_interval: Duration) -> Self {
        Self {
            last_request: None,
            min_interval,
        }
    }

    async fn wait(&mut self) {
        if let Some(last) = self.last_request {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                sleep(self.min_interval - elapsed).await;
            }
        }
        self.last_request = Some(Instant::now());
    }
}

/// State of the API's own row cache.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteCacheState {
    /// Nothing cached.
    Empty,
    /// Cached rows within their TTL.
    Valid,
    /// Cached rows past their TTL.
    Expired,
}

/// Response of `GET /api/cache/status`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RemoteCacheStatus {
    /// Cache state.
    pub status: RemoteCacheState,
    /// Number of cached rows.
    #[serde(default)]
    pub records: usize,
    /// Age of the cached rows in minutes.
    #[serde(default)]
    pub age_minutes: Option<f64>,
    /// Configured TTL in minutes.
    #[serde(default)]
    pub ttl_minutes: Option<u64>,
}

/// Client for the financials API.
///
/// Fetches [`FinancialRow`]s per ticker or in bulk. Requests are serialized
/// through a shared rate limiter so clones of one client respect the same
/// spacing.
#[derive(Clone, Debug)]
pub struct FinancialsClient {
    client: reqwest::Client,
    base_url: String,
    rate_limiter: Arc<Mutex<RateLimiter>>,
}

impl FinancialsClient {
    /// Creates a client from a configuration.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::ProviderNotConfigured`] if the base URL is empty
    /// and [`FiscalError::Network`] if the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()
            .map_err(|e| FiscalError::Network(format!("Failed to build HTTP client: {e}")))?;
        Self::with_client(client, config)
    }

    /// Creates a client around a pre-configured [`reqwest::Client`].
    ///
    /// Only `base_url` and `min_request_interval` are read from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`FiscalError::ProviderNotConfigured`] if the base URL is empty.
    pub fn with_client(client: reqwest::Client, config: ClientConfig) -> Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(FiscalError::ProviderNotConfigured(
                "financials API base URL is empty".to_string(),
            ));
        }
        Ok(Self {
            client,
            base_url,
            rate_limiter: Arc::new(Mutex::new(RateLimiter::new(config.min_request_interval))),
        })
    }

    /// Returns the base URL requests are sent to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// URL of the per-ticker rows endpoint.
    #[must_use]
    pub fn ticker_url(&self, symbol: &Symbol) -> String {
        format!("{}/api/financials/{}", self.base_url, symbol.as_str())
    }

    /// URL of the bulk rows endpoint.
    #[must_use]
    pub fn all_url(&self, force_refresh: bool) -> String {
        if force_refresh {
            format!("{}/api/financials?force_refresh=true", self.base_url)
        } else {
            format!("{}/api/financials", self.base_url)
        }
    }

    /// Fetches every row the API holds, optionally bypassing its cache.
    ///
    /// # Errors
    ///
    /// Returns a network, rate limit or parse error.
    #[instrument(skip(self))]
    pub async fn fetch_all_with(&self, force_refresh: bool) -> Result<Vec<FinancialRow>> {
        let response = self.get(&self.all_url(force_refresh)).await?;
        let rows = check_status(response, None)
            .await?
            .json::<Vec<FinancialRow>>()
            .await
            .map_err(|e| FiscalError::Parse(format!("Failed to parse financial rows: {e}")))?;
        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }

    /// Reads the state of the API's own cache.
    ///
    /// # Errors
    ///
    /// Returns a network, rate limit or parse error.
    #[instrument(skip(self))]
    pub async fn cache_status(&self) -> Result<RemoteCacheStatus> {
        let url = format!("{}/api/cache/status", self.base_url);
        let response = self.get(&url).await?;
        check_status(response, None)
            .await?
            .json::<RemoteCacheStatus>()
            .await
            .map_err(|e| FiscalError::Parse(format!("Failed to parse cache status: {e}")))
    }

    /// Asks the API to drop its cached rows.
    ///
    /// # Errors
    ///
    /// Returns a network or rate limit error.
    #[instrument(skip(self))]
    pub async fn clear_remote_cache(&self) -> Result<()> {
        let url = format!("{}/api/cache/clear", self.base_url);
        self.rate_limiter.lock().await.wait().await;
        debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .send()
            .await
            .map_err(|e| FiscalError::Network(e.to_string()))?;
        check_status(response, None).await?;
        Ok(())
    }

    async fn get(&self, url: &str) -> Result<Response> {
        self.rate_limiter.lock().await.wait().await;
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| FiscalError::Network(e.to_string()))
    }
}

/// Maps non-success statuses to errors.
async fn check_status(response: Response, symbol: Option<&Symbol>) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    if status == StatusCode::TOO_MANY_REQUESTS {
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(Duration::from_secs);
        warn!(?retry_after, "rate limited by financials API");
        return Err(FiscalError::RateLimited {
            source_name: PROVIDER_NAME.to_string(),
            retry_after,
        });
    }

    if status == StatusCode::NOT_FOUND
        && let Some(symbol) = symbol
    {
        return Err(FiscalError::SymbolNotFound(symbol.to_string()));
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    Err(FiscalError::Network(format!(
        "HTTP {status} for {url}: {}",
        body.trim()
    )))
}

impl DataProvider for FinancialsClient {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "Per-ticker income, balance sheet and cash flow rows"
    }
}

#[async_trait]
impl FinancialRowSource for FinancialsClient {
    #[instrument(skip(self), fields(symbol = %symbol))]
    async fn fetch_rows(&self, symbol: &Symbol) -> Result<Vec<FinancialRow>> {
        if symbol.as_str().is_empty() {
            return Err(FiscalError::InvalidParameter("Empty ticker".to_string()));
        }

        let response = self.get(&self.ticker_url(symbol)).await?;
        let rows = check_status(response, Some(symbol))
            .await?
            .json::<Vec<FinancialRow>>()
            .await
            .map_err(|e| {
                FiscalError::Parse(format!("Failed to parse financial rows for {symbol}: {e}"))
            })?;

        debug!("Fetched {} rows", rows.len());
        Ok(rows)
    }

    async fn fetch_all(&self) -> Result<Vec<FinancialRow>> {
        self.fetch_all_with(false).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> FinancialsClient {
        FinancialsClient::new(ClientConfig::new(base)).unwrap()
    }

    #[test]
    fn test_urls() {
        let client = client("http://localhost:8000/");
        assert_eq!(client.base_url(), "http://localhost:8000");
        assert_eq!(
            client.ticker_url(&Symbol::new("aapl")),
            "http://localhost:8000/api/financials/AAPL"
        );
        assert_eq!(client.all_url(false), "http://localhost:8000/api/financials");
        assert_eq!(
            client.all_url(true),
            "http://localhost:8000/api/financials?force_refresh=true"
        );
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let err = FinancialsClient::new(ClientConfig::new("  ")).unwrap_err();
        assert!(matches!(err, FiscalError::ProviderNotConfigured(_)));
    }

    #[test]
    fn test_provider_metadata() {
        let client = client("http://localhost:8000");
        assert_eq!(client.name(), "Financials API");
        assert!(!client.description().is_empty());
    }

    #[test]
    fn test_remote_cache_status_shapes() {
        let empty: RemoteCacheStatus =
            serde_json::from_str(r#"{"status": "empty", "records": 0}"#).unwrap();
        assert_eq!(empty.status, RemoteCacheState::Empty);
        assert_eq!(empty.age_minutes, None);

        let valid: RemoteCacheStatus = serde_json::from_str(
            r#"{"status": "valid", "records": 5120, "age_minutes": 12.5, "ttl_minutes": 1440}"#,
        )
        .unwrap();
        assert_eq!(valid.status, RemoteCacheState::Valid);
        assert_eq!(valid.records, 5120);
        assert_eq!(valid.ttl_minutes, Some(1440));
    }

    #[tokio::test]
    async fn test_empty_ticker_rejected() {
        let client = client("http://localhost:8000");
        let err = client.fetch_rows(&Symbol::new(" ")).await.unwrap_err();
        assert!(matches!(err, FiscalError::InvalidParameter(_)));
    }

    #[tokio::test]
    async fn test_rate_limiter_spacing() {
        let mut limiter = RateLimiter::new(Duration::from_millis(20));
        let start = Instant::now();
        limiter.wait().await;
        limiter.wait().await;
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
