//! SerpApi Google Hotels client.
//!
//! Searches lodging for a stay via the `google_hotels` engine and maps
//! the payload into ranked [`LodgingOffer`]s. The payload is messy in
//! practice: prices appear in several shapes and star ratings arrive as
//! numbers, bare strings or marketing text, so extraction is layered and
//! lenient. Ranking is redone locally (rating, then review count, then
//! total cost) since the API's own ordering is not guaranteed.

use chrono::NaiveDate;
use serde::Deserialize;

use super::error::LodgingError;
use super::offer::{DEFAULT_TOP_OFFERS, LodgingOffer};
use crate::currency::CurrencyCode;

/// Default SerpApi search endpoint.
const DEFAULT_BASE_URL: &str = "https://serpapi.com/search.json";

/// Configuration for the hotel client.
#[derive(Debug, Clone)]
pub struct HotelClientConfig {
    /// SerpApi key sent with every request
    pub api_key: String,
    /// Endpoint queried; the production one unless overridden
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl HotelClientConfig {
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

/// A lodging search: where, when, for how long and for whom.
#[derive(Debug, Clone)]
pub struct HotelQuery {
    /// Destination, as free-form search text
    pub destination: String,
    /// First night of the stay
    pub check_in: NaiveDate,
    /// Length of the stay in nights (at least one)
    pub nights: u32,
    /// Number of adult guests
    pub guests: u8,
    /// Currency prices are quoted in
    pub currency: CurrencyCode,
}

impl HotelQuery {
    /// Query for a stay, quoted in dollars for two guests.
    pub fn new(destination: impl Into<String>, check_in: NaiveDate, nights: u32) -> Self {
        Self {
            destination: destination.into(),
            check_in,
            nights,
            guests: 2,
            currency: CurrencyCode::USD,
        }
    }

    /// Set the number of adult guests.
    pub fn with_guests(mut self, guests: u8) -> Self {
        self.guests = guests;
        self
    }

    /// Set the currency prices are quoted in.
    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    fn check_out(&self) -> NaiveDate {
        self.check_in + chrono::Duration::days(i64::from(self.nights))
    }
}

/// Google Hotels response envelope.
#[derive(Debug, Clone, Deserialize)]
struct HotelsResponse {
    properties: Option<Vec<PropertyItem>>,
}

/// One property in the response. `Option` everywhere: the API omits
/// fields freely, and several price fields carry a number or a display
/// string depending on the payload.
#[derive(Debug, Clone, Deserialize)]
struct PropertyItem {
    name: Option<String>,

    /// Marketing category, most often text like "3-star hotel".
    #[serde(rename = "type")]
    property_type: Option<String>,

    description: Option<String>,

    /// Star class; arrives as a number or as text depending on locale.
    hotel_class: Option<serde_json::Value>,

    overall_rating: Option<f64>,

    reviews: Option<u32>,

    rate_per_night: Option<RateBlock>,

    total_rate: Option<RateBlock>,

    // Top-level price fields seen in older payload variants
    price: Option<serde_json::Value>,
    price_per_night: Option<serde_json::Value>,
    lowest_rate: Option<serde_json::Value>,
    rate: Option<serde_json::Value>,
}

/// A price block: parsed numbers when available, display text otherwise.
#[derive(Debug, Clone, Deserialize)]
struct RateBlock {
    extracted_lowest: Option<f64>,
    extracted: Option<f64>,
    price: Option<serde_json::Value>,
    lowest: Option<String>,
}

/// Intermediate carrying the rank keys before mapping to offers.
struct RankedProperty {
    name: String,
    total_cost: f64,
    stars: Option<u8>,
    rating: f64,
    reviews: u32,
}

/// SerpApi Google Hotels client.
#[derive(Debug, Clone)]
pub struct HotelClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HotelClient {
    /// Create a new hotel client with the given configuration.
    pub fn new(config: HotelClientConfig) -> Result<Self, LodgingError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url,
            api_key: config.api_key,
        })
    }

    /// Search lodging offers for a stay.
    ///
    /// Returns at most [`DEFAULT_TOP_OFFERS`] offers ranked best-rated
    /// first; each offer's total is the per-night price times the number
    /// of nights.
    pub async fn search_offers(
        &self,
        query: &HotelQuery,
    ) -> Result<Vec<LodgingOffer>, LodgingError> {
        if query.destination.trim().is_empty() {
            return Err(LodgingError::InvalidRequest(
                "destination is required".to_string(),
            ));
        }
        if query.nights == 0 {
            return Err(LodgingError::InvalidRequest(
                "stay must cover at least one night".to_string(),
            ));
        }

        // sort_by 8 asks for best-rated first; the order is re-derived
        // locally anyway
        let response = self
            .http
            .get(&self.base_url)
            .query(&[
                ("engine", "google_hotels".to_string()),
                ("q", query.destination.clone()),
                ("check_in_date", query.check_in.to_string()),
                ("check_out_date", query.check_out().to_string()),
                ("adults", query.guests.to_string()),
                ("currency", query.currency.to_string()),
                ("hl", "en".to_string()),
                ("gl", "us".to_string()),
                ("sort_by", "8".to_string()),
                ("api_key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LodgingError::Unauthorized);
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LodgingError::RateLimited);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LodgingError::ApiError {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.text().await?;

        let parsed: HotelsResponse = serde_json::from_str(&body).map_err(|e| LodgingError::Json {
            message: e.to_string(),
            body: Some(body.chars().take(500).collect()),
        })?;

        let properties = parsed.properties.unwrap_or_default();
        let mut offers = rank_properties(&properties, query.nights);
        offers.truncate(DEFAULT_TOP_OFFERS);
        Ok(offers)
    }
}

/// Convert raw properties into offers ranked best-rated first: rating
/// descending, then review count descending, then total cost ascending.
/// Properties without a name or any extractable price are dropped.
fn rank_properties(properties: &[PropertyItem], nights: u32) -> Vec<LodgingOffer> {
    let mut ranked: Vec<RankedProperty> = properties
        .iter()
        .filter_map(|property| {
            let name = property
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())?;
            let per_night = extract_per_night(property)?;

            Some(RankedProperty {
                name: name.to_string(),
                total_cost: per_night * f64::from(nights),
                stars: parse_stars(property),
                rating: property.overall_rating.unwrap_or(0.0),
                reviews: property.reviews.unwrap_or(0),
            })
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.rating
            .total_cmp(&a.rating)
            .then(b.reviews.cmp(&a.reviews))
            .then(a.total_cost.total_cmp(&b.total_cost))
    });

    ranked
        .into_iter()
        .map(|p| LodgingOffer {
            name: p.name,
            total_cost: p.total_cost,
            stars: p.stars,
        })
        .collect()
}

/// Per-night price, probed through every shape the payload has been seen
/// to use: the rate-per-night block, then bare top-level price fields,
/// then the total-rate block as a last resort.
fn extract_per_night(property: &PropertyItem) -> Option<f64> {
    if let Some(price) = property.rate_per_night.as_ref().and_then(block_price) {
        return Some(price);
    }

    let top_level = [
        &property.price,
        &property.price_per_night,
        &property.lowest_rate,
        &property.rate,
    ];
    for field in top_level {
        if let Some(price) = field.as_ref().and_then(value_price) {
            return Some(price);
        }
    }

    property.total_rate.as_ref().and_then(block_price)
}

/// Price out of one rate block, numbers before display text.
fn block_price(rate: &RateBlock) -> Option<f64> {
    if let Some(price) = rate.extracted_lowest.or(rate.extracted) {
        return Some(price);
    }
    if let Some(price) = rate.price.as_ref().and_then(value_price) {
        return Some(price);
    }
    rate.lowest.as_deref().and_then(parse_price_text)
}

/// Price out of a JSON value that is either a number or display text.
fn value_price(value: &serde_json::Value) -> Option<f64> {
    if let Some(number) = value.as_f64() {
        return Some(number);
    }
    value.as_str().and_then(parse_price_text)
}

/// Parse a price out of display text such as "$1,234" or "US$89".
fn parse_price_text(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.parse().ok()
}

/// Star rating for a property: the `hotel_class` field when it is
/// usable, otherwise marketing text, most often `type: "3-star hotel"`.
fn parse_stars(property: &PropertyItem) -> Option<u8> {
    if let Some(value) = &property.hotel_class {
        if let Some(stars) = value.as_f64().and_then(stars_from_number) {
            return Some(stars);
        }
        if let Some(text) = value.as_str() {
            if let Some(stars) = parse_star_text(text) {
                return Some(stars);
            }
            if let Some(stars) = text.trim().parse::<f64>().ok().and_then(stars_from_number) {
                return Some(stars);
            }
        }
    }

    [
        property.property_type.as_deref(),
        property.description.as_deref(),
        property.name.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find_map(parse_star_text)
}

fn stars_from_number(value: f64) -> Option<u8> {
    let stars = value as i64;
    if (1..=5).contains(&stars) {
        Some(stars as u8)
    } else {
        None
    }
}

/// Extract a star count from text such as "4-star hotel", "5 star
/// resort", "3 estrelas" or a row of star glyphs.
fn parse_star_text(text: &str) -> Option<u8> {
    let lower = text.to_lowercase();

    for marker in ["star", "estrela"] {
        if let Some(pos) = lower.find(marker) {
            if let Some(stars) = digit_before(&lower[..pos]) {
                return Some(stars);
            }
        }
    }

    let glyphs = lower.chars().filter(|&c| c == '★').count();
    if (1..=5).contains(&glyphs) {
        return Some(glyphs as u8);
    }

    None
}

/// A single digit 1-5 immediately before the marker, allowing a space or
/// hyphen separator ("4-star", "4 star", "4star"). Multi-digit runs such
/// as "12-star" do not count.
fn digit_before(prefix: &str) -> Option<u8> {
    let trimmed = prefix.trim_end_matches([' ', '-']);
    let mut chars = trimmed.chars().rev();
    let last = chars.next()?;
    if !last.is_ascii_digit() {
        return None;
    }
    if chars.next().is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }

    let stars = last as u8 - b'0';
    if (1..=5).contains(&stars) { Some(stars) } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_builder() {
        let config = HotelClientConfig::new("test-key")
            .with_base_url("http://localhost:8080")
            .with_timeout(60);

        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn config_defaults() {
        let config = HotelClientConfig::new("test-key");

        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn query_defaults() {
        let check_in = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let query = HotelQuery::new("Lisbon", check_in, 4);

        assert_eq!(query.guests, 2);
        assert_eq!(query.currency, CurrencyCode::USD);
        assert_eq!(
            query.check_out(),
            NaiveDate::from_ymd_opt(2025, 7, 5).unwrap()
        );
    }

    #[test]
    fn client_creation() {
        let config = HotelClientConfig::new("test-key");
        assert!(HotelClient::new(config).is_ok());
    }

    #[test]
    fn price_text_parsing() {
        assert_eq!(parse_price_text("$210"), Some(210.0));
        assert_eq!(parse_price_text("US$1,234.50"), Some(1234.5));
        assert_eq!(parse_price_text("R$89"), Some(89.0));
        assert_eq!(parse_price_text("from $99"), Some(99.0));

        assert_eq!(parse_price_text(""), None);
        assert_eq!(parse_price_text("call us"), None);
    }

    #[test]
    fn star_text_parsing() {
        assert_eq!(parse_star_text("4-star hotel"), Some(4));
        assert_eq!(parse_star_text("5 star resort"), Some(5));
        assert_eq!(parse_star_text("3star"), Some(3));
        assert_eq!(parse_star_text("3 estrelas"), Some(3));
        assert_eq!(parse_star_text("★★★★"), Some(4));

        assert_eq!(parse_star_text("star hotel"), None);
        assert_eq!(parse_star_text("12-star"), None);
        assert_eq!(parse_star_text("6-star"), None);
        assert_eq!(parse_star_text("boutique hotel"), None);
    }

    #[test]
    fn hotel_class_takes_priority() {
        let body = r#"{"name": "X", "type": "2-star hotel", "hotel_class": 4,
                       "rate_per_night": {"extracted_lowest": 10.0}}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(parse_stars(&property), Some(4));
    }

    #[test]
    fn hotel_class_as_text_still_parses() {
        let body = r#"{"name": "X", "hotel_class": "4-star hotel"}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(parse_stars(&property), Some(4));

        let body = r#"{"name": "X", "hotel_class": "4"}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(parse_stars(&property), Some(4));
    }

    #[test]
    fn price_chain_falls_back_in_order() {
        let body = r#"{"name": "X", "rate_per_night": {"lowest": "$75"}}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(extract_per_night(&property), Some(75.0));

        let body = r#"{"name": "X", "price_per_night": "US$120"}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(extract_per_night(&property), Some(120.0));

        let body = r#"{"name": "X", "total_rate": {"extracted": 360.0}}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(extract_per_night(&property), Some(360.0));

        let body = r#"{"name": "X",
                       "rate_per_night": {"extracted_lowest": 80.0},
                       "price": 999,
                       "total_rate": {"extracted": 240.0}}"#;
        let property: PropertyItem = serde_json::from_str(body).unwrap();
        assert_eq!(extract_per_night(&property), Some(80.0));
    }

    #[test]
    fn parses_and_ranks_a_sample_payload() {
        let body = r#"{
            "properties": [
                {"name": "Budget Inn", "type": "2-star hotel", "overall_rating": 3.9,
                 "reviews": 120, "rate_per_night": {"extracted_lowest": 40.0}},
                {"name": "Harbour Grand", "hotel_class": 5, "overall_rating": 4.8,
                 "reviews": 2400, "rate_per_night": {"lowest": "$210"}},
                {"name": "No Price Hostel", "overall_rating": 4.9, "reviews": 10},
                {"name": "City Stay", "hotel_class": "4-star hotel", "overall_rating": 4.8,
                 "reviews": 310, "rate_per_night": {"extracted_lowest": 95.0}}
            ]
        }"#;
        let parsed: HotelsResponse = serde_json::from_str(body).unwrap();
        let offers = rank_properties(&parsed.properties.unwrap(), 3);

        // Equal ratings fall back to review count; the unpriced hostel
        // is dropped
        let names: Vec<&str> = offers.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Harbour Grand", "City Stay", "Budget Inn"]);

        assert_eq!(offers[0].total_cost, 630.0);
        assert_eq!(offers[0].stars, Some(5));
        assert_eq!(offers[1].stars, Some(4));
        assert_eq!(offers[2].stars, Some(2));
    }

    #[test]
    fn unnamed_properties_are_dropped() {
        let body = r#"{
            "properties": [
                {"rate_per_night": {"extracted_lowest": 40.0}},
                {"name": "   ", "rate_per_night": {"extracted_lowest": 50.0}},
                {"name": "Kept", "rate_per_night": {"extracted_lowest": 60.0}}
            ]
        }"#;
        let parsed: HotelsResponse = serde_json::from_str(body).unwrap();
        let offers = rank_properties(&parsed.properties.unwrap(), 1);

        assert_eq!(offers.len(), 1);
        assert_eq!(offers[0].name, "Kept");
    }

    // Integration tests would require a real API key and live HTTP;
    // ranking and extraction are covered against canned payloads above.
}
