//! SerpApi Google Finance rate client.
//!
//! Fetches live exchange rates by querying the `google_finance` engine
//! for a currency pair such as `USD-BRL` and reading the quote out of
//! the response's summary block.

use serde::Deserialize;

use super::cache::RateProvider;
use super::code::CurrencyPair;
use super::error::RateError;

/// Default SerpApi search endpoint.
const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";

/// Configuration for the rate client.
#[derive(Debug, Clone)]
pub struct RateClientConfig {
    /// SerpApi key sent with every request
    pub api_key: String,
    /// Endpoint queried; the production one unless overridden
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl RateClientConfig {
    /// Config around an API key, with production defaults.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
        }
    }

    /// Point the client at a different endpoint (used by tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Replace the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Google Finance response envelope. Everything except the summary
/// quote is ignored.
#[derive(Debug, Clone, Deserialize)]
struct FinanceResponse {
    summary: Option<FinanceSummary>,
}

#[derive(Debug, Clone, Deserialize)]
struct FinanceSummary {
    price: Option<f64>,
}

/// SerpApi Google Finance client.
#[derive(Debug, Clone)]
pub struct SerpApiRateClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SerpApiRateClient {
    /// Create a new rate client with the given configuration.
    pub fn new(config: RateClientConfig) -> Result<Self, RateError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }
}

impl RateProvider for SerpApiRateClient {
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64, RateError> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("engine", "google_finance".to_string()),
                ("q", pair.to_string()),
                ("api_key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(RateError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(RateError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RateError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: FinanceResponse = serde_json::from_str(&body).map_err(|e| RateError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        parsed
            .summary
            .and_then(|s| s.price)
            .ok_or(RateError::MissingRate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = RateClientConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = RateClientConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn client_creation() {
        let config = RateClientConfig::new("test-key");
        assert!(SerpApiRateClient::new(config).is_ok());
    }

    #[test]
    fn parses_summary_price() {
        let body = r#"{"summary": {"title": "USD / BRL", "price": 5.43}}"#;
        let parsed: FinanceResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.summary.unwrap().price, Some(5.43));
    }

    #[test]
    fn tolerates_missing_summary() {
        let parsed: FinanceResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.summary.is_none());

        let parsed: FinanceResponse = serde_json::from_str(r#"{"summary": {}}"#).unwrap();
        assert_eq!(parsed.summary.unwrap().price, None);
    }

    // Integration tests would require a real API key and live HTTP;
    // the cached client is exercised against a mock provider instead.
}
