//! Cached exchange rate lookup.
//!
//! Exchange rates move slowly compared to how often an optimization run
//! needs them, so fetched quotes are held in a TTL cache. A provider
//! failure falls back to a configured constant rate, and the fallback is
//! stamped into the cache too, so a failing provider is asked again only
//! after the TTL passes rather than on every lookup.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::warn;

use super::code::CurrencyPair;
use super::error::RateError;

/// Trait for fetching a live exchange rate.
///
/// This abstraction allows the cached client to be tested with mock
/// providers.
#[allow(async_fn_in_trait)]
pub trait RateProvider {
    /// Fetch the current rate for a pair: how many units of the quote
    /// currency one unit of the base currency buys.
    async fn fetch_rate(&self, pair: &CurrencyPair) -> Result<f64, RateError>;
}

/// Where a returned exchange rate came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateSource {
    /// Fetched from the provider within the TTL window.
    Provider,

    /// Provider failed; the configured fallback constant was used.
    Fallback,
}

/// An exchange rate together with its provenance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateQuote {
    /// Units of quote currency per unit of base currency.
    pub rate: f64,

    /// Whether the rate is live or the fallback constant.
    pub source: RateSource,
}

/// Configuration for the rate cache.
#[derive(Debug, Clone)]
pub struct RateCacheConfig {
    /// How long a fetched rate stays fresh.
    pub ttl: Duration,

    /// Rate returned when the provider fails.
    pub fallback_rate: f64,

    /// Maximum number of cached pairs.
    pub max_capacity: u64,
}

impl RateCacheConfig {
    /// Create a config with the given fallback rate, a one hour TTL and
    /// room for 64 pairs.
    pub fn new(fallback_rate: f64) -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            fallback_rate,
            max_capacity: 64,
        }
    }

    /// Set the freshness window.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }
}

/// Rate provider with caching and a fallback constant.
///
/// Lookups never fail: within the TTL the cached quote is returned, on
/// a miss the provider is asked once, and if the provider errors the
/// fallback rate is returned instead, flagged via its
/// [`RateSource`].
pub struct CachedRateClient<P> {
    provider: P,
    quotes: MokaCache<CurrencyPair, RateQuote>,
    fallback_rate: f64,
}

impl<P: RateProvider> CachedRateClient<P> {
    /// Create a new cached client around a provider.
    pub fn new(provider: P, config: &RateCacheConfig) -> Self {
        let quotes = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self {
            provider,
            quotes,
            fallback_rate: config.fallback_rate,
        }
    }

    /// Return the rate for a pair, fetching when the cache is stale.
    pub async fn rate(&self, pair: CurrencyPair) -> RateQuote {
        if let Some(quote) = self.quotes.get(&pair).await {
            return quote;
        }

        let quote = match self.provider.fetch_rate(&pair).await {
            Ok(rate) => RateQuote {
                rate,
                source: RateSource::Provider,
            },
            Err(error) => {
                warn!(
                    pair = %pair,
                    error = %error,
                    fallback = self.fallback_rate,
                    "rate fetch failed, using fallback"
                );
                RateQuote {
                    rate: self.fallback_rate,
                    source: RateSource::Fallback,
                }
            }
        };

        self.quotes.insert(pair, quote).await;
        quote
    }

    /// Number of cached pairs.
    pub fn entry_count(&self) -> u64 {
        self.quotes.entry_count()
    }

    /// Drop all cached rates.
    pub fn invalidate_all(&self) {
        self.quotes.invalidate_all();
    }
}
