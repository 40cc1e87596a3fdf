//! Domain types for the route selection engine.
//!
//! This module contains the core model types shared by the solvers and
//! the providers. All types enforce their invariants at construction
//! time, so code that receives these types can trust their validity.

mod alternative;
mod constraints;
mod error;
mod labels;
mod profile;

pub use alternative::{Alternative, ItineraryStep};
pub use constraints::Constraints;
pub use error::DomainError;
pub use labels::{
    LabelError, format_duration_hours, format_price, parse_duration_label, parse_price_label,
};
pub use profile::{DEFAULT_VALUE_PER_HOUR, ParseProfileError, Profile, ScoreWeights};
