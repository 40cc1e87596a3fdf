//! Lodging offers and the reference cost fed into trip economics.

use std::fmt;

/// Error returned when constructing an invalid star range.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid star range: {reason}")]
pub struct InvalidStarRange {
    reason: &'static str,
}

/// How many top-ranked offers participate in the reference cost.
pub const DEFAULT_TOP_OFFERS: usize = 10;

/// One candidate lodging: a total cost for the whole stay and an
/// optional star rating.
#[derive(Debug, Clone, PartialEq)]
pub struct LodgingOffer {
    /// Hotel or property name.
    pub name: String,

    /// Total cost of the stay (per-night price times nights).
    pub total_cost: f64,

    /// Star rating, when the listing exposed one.
    pub stars: Option<u8>,
}

/// An inclusive star rating filter.
///
/// Offers without a known rating always pass the filter; only an offer
/// whose rating is known and outside the range is excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StarRange {
    min: u8,
    max: u8,
}

impl StarRange {
    /// Create a range, validating `1 <= min <= max <= 5`.
    pub fn new(min: u8, max: u8) -> Result<Self, InvalidStarRange> {
        if min < 1 || max > 5 {
            return Err(InvalidStarRange {
                reason: "bounds must lie within 1 to 5",
            });
        }
        if min > max {
            return Err(InvalidStarRange {
                reason: "minimum must not exceed maximum",
            });
        }
        Ok(Self { min, max })
    }

    /// The widest range: any rated offer passes.
    pub fn any() -> Self {
        Self { min: 1, max: 5 }
    }

    /// Lower bound.
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> u8 {
        self.max
    }

    /// Whether an offer with this rating passes the filter. Unknown
    /// ratings pass.
    pub fn admits(&self, stars: Option<u8>) -> bool {
        match stars {
            Some(stars) => self.min <= stars && stars <= self.max,
            None => true,
        }
    }
}

impl fmt::Display for StarRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{} stars", self.min, self.max)
    }
}

/// Reference lodging cost: the cheapest total among the first `top`
/// ranked offers that pass the star filter.
///
/// `offers` must already be ranked best-first; this function preserves
/// that order when truncating. Offers with a non-finite total are
/// skipped. Returns `0.0` when nothing qualifies, in which case
/// transport-only economics apply.
///
/// # Examples
///
/// ```
/// use trip_optimizer::lodging::{LodgingOffer, StarRange, reference_cost};
///
/// let offers = vec![
///     LodgingOffer { name: "Grand".into(), total_cost: 900.0, stars: Some(5) },
///     LodgingOffer { name: "Plain".into(), total_cost: 300.0, stars: Some(2) },
///     LodgingOffer { name: "Mystery".into(), total_cost: 250.0, stars: None },
/// ];
///
/// let range = StarRange::new(4, 5).unwrap();
/// // The unrated offer passes the filter and sets the reference cost
/// assert_eq!(reference_cost(&offers, range, 10), 250.0);
///
/// assert_eq!(reference_cost(&[], range, 10), 0.0);
/// ```
pub fn reference_cost(offers: &[LodgingOffer], stars: StarRange, top: usize) -> f64 {
    let cheapest = offers
        .iter()
        .filter(|offer| stars.admits(offer.stars))
        .take(top)
        .map(|offer| offer.total_cost)
        .filter(|cost| cost.is_finite())
        .fold(f64::INFINITY, f64::min);

    if cheapest.is_finite() { cheapest } else { 0.0 }
}
