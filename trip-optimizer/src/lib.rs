//! Route selection for multi-leg trips.
//!
//! Takes the scraped travel alternatives for a route and answers: "which
//! one should this traveler book, given their time ceiling, budget and
//! priorities?"

pub mod currency;
pub mod domain;
pub mod ingest;
pub mod lodging;
pub mod optimizer;
