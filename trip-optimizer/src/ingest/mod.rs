//! Scraped-leg ingestion.
//!
//! The scraping side of the pipeline hands routes over as JSON files of
//! raw legs. This module loads those files and converts the legs into
//! validated [`Alternative`](crate::domain::Alternative)s, recovering
//! from the malformed labels that real scrapes produce.

mod convert;
mod types;

pub use convert::{ConversionWarning, DefaultedField, LegFileError, convert_legs, load_legs};
pub use types::{RawItineraryStep, RawLeg};
