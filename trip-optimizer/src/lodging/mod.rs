//! Lodging offers and the stay cost that feeds the travel budget.
//!
//! [`HotelClient`] fetches offers from SerpApi's Google Hotels engine;
//! [`reference_cost`] reduces a ranked offer list to the single number
//! the optimizer subtracts from the budget.

mod client;
mod error;
mod offer;

pub use client::{HotelClient, HotelClientConfig, HotelQuery};
pub use error::LodgingError;
pub use offer::{DEFAULT_TOP_OFFERS, InvalidStarRange, LodgingOffer, StarRange, reference_cost};
