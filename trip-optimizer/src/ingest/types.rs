//! Raw leg DTOs for the scraping hand-off file.
//!
//! Every field is optional: scraped payloads drop fields without notice,
//! and a leg with a missing label still has to make it into the
//! candidate list. Conversion decides how to recover.

use serde::Deserialize;

/// One itinerary step as scraped.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawItineraryStep {
    /// Human-readable step description.
    pub text: Option<String>,
    /// Position of the step; scrape order is used when missing.
    pub order: Option<usize>,
}

/// One scraped transport leg, as written by the scraping hand-off.
///
/// `duration_label` and `price_label` carry display text such as
/// `"25h 6min"` and `"R$8.659,00"`; the numeric metrics are derived from
/// them during conversion.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawLeg {
    pub departure: Option<String>,
    pub arrival: Option<String>,
    pub duration_label: Option<String>,
    pub price_label: Option<String>,
    pub connections: Option<u32>,
    pub itinerary_steps: Option<Vec<RawItineraryStep>>,
}
