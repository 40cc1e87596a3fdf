//! Exchange rate lookup.
//!
//! Lodging offers come back quoted in US dollars, so folding them into a
//! budget kept in another currency needs an exchange rate. This module
//! provides a SerpApi Google Finance client behind a [`RateProvider`]
//! trait and a TTL-cached wrapper whose lookups never fail: a provider
//! error degrades to a configured fallback rate that is flagged in the
//! returned quote.

mod cache;
mod client;
mod code;
mod error;

pub use cache::{CachedRateClient, RateCacheConfig, RateProvider, RateQuote, RateSource};
pub use client::{RateClientConfig, SerpApiRateClient};
pub use code::{CurrencyCode, CurrencyPair, InvalidCurrency};
pub use error::RateError;
