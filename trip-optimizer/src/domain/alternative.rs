//! Travel alternative type.
//!
//! An `Alternative` is one way of covering a route: a total travel time,
//! a ticket price, a connection count, and the display metadata scraped
//! alongside them. Alternatives are immutable once constructed; solvers
//! identify them by their index in the candidate list, and that index is
//! stable from filtering through to the reported result.

use super::DomainError;

/// One step of an itinerary, e.g. "Train to Lyon Part-Dieu".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItineraryStep {
    /// Human-readable step description.
    pub text: String,
    /// Position of the step within the itinerary (0-based).
    pub order: usize,
}

/// A candidate way of travelling a route.
///
/// Numeric metrics are validated at construction so the scorer and the
/// solvers never meet a NaN or a negative value.
///
/// # Invariants
///
/// - `time_hours` and `price` are finite and non-negative
/// - `itinerary` is sorted by step order
#[derive(Debug, Clone, PartialEq)]
pub struct Alternative {
    time_hours: f64,
    price: f64,
    connections: u32,
    departure: String,
    arrival: String,
    duration_label: String,
    price_label: String,
    itinerary: Vec<ItineraryStep>,
}

impl Alternative {
    /// Construct an alternative, validating the numeric metrics.
    ///
    /// The itinerary is re-sorted by step order so callers can hand steps
    /// over in scrape order.
    ///
    /// # Errors
    ///
    /// Returns `Err` if `time_hours` or `price` is NaN, infinite or
    /// negative.
    ///
    /// # Examples
    ///
    /// ```
    /// use trip_optimizer::domain::Alternative;
    ///
    /// let alt = Alternative::new(25.1, 8659.0, 2, "Paris", "Rome").unwrap();
    /// assert_eq!(alt.time_hours(), 25.1);
    /// assert_eq!(alt.connections(), 2);
    ///
    /// assert!(Alternative::new(-1.0, 100.0, 0, "A", "B").is_err());
    /// assert!(Alternative::new(1.0, f64::NAN, 0, "A", "B").is_err());
    /// ```
    pub fn new(
        time_hours: f64,
        price: f64,
        connections: u32,
        departure: impl Into<String>,
        arrival: impl Into<String>,
    ) -> Result<Self, DomainError> {
        if !time_hours.is_finite() || time_hours < 0.0 {
            return Err(DomainError::InvalidAlternative(
                "time must be finite and non-negative",
            ));
        }
        if !price.is_finite() || price < 0.0 {
            return Err(DomainError::InvalidAlternative(
                "price must be finite and non-negative",
            ));
        }

        Ok(Alternative {
            time_hours,
            price,
            connections,
            departure: departure.into(),
            arrival: arrival.into(),
            duration_label: String::new(),
            price_label: String::new(),
            itinerary: Vec::new(),
        })
    }

    /// Attach the original display labels, preserving what was scraped
    /// even when parsing had to fall back to defaults.
    pub fn with_labels(
        mut self,
        duration_label: impl Into<String>,
        price_label: impl Into<String>,
    ) -> Self {
        self.duration_label = duration_label.into();
        self.price_label = price_label.into();
        self
    }

    /// Attach the itinerary steps, sorting them by their order field.
    pub fn with_itinerary(mut self, mut steps: Vec<ItineraryStep>) -> Self {
        steps.sort_by_key(|s| s.order);
        self.itinerary = steps;
        self
    }

    /// Returns the total travel time in fractional hours.
    pub fn time_hours(&self) -> f64 {
        self.time_hours
    }

    /// Returns the ticket price.
    pub fn price(&self) -> f64 {
        self.price
    }

    /// Returns the number of connections (transfers).
    pub fn connections(&self) -> u32 {
        self.connections
    }

    /// Returns the departure description (e.g. station or city).
    pub fn departure(&self) -> &str {
        &self.departure
    }

    /// Returns the arrival description.
    pub fn arrival(&self) -> &str {
        &self.arrival
    }

    /// Returns the scraped duration label, if one was attached.
    pub fn duration_label(&self) -> &str {
        &self.duration_label
    }

    /// Returns the scraped price label, if one was attached.
    pub fn price_label(&self) -> &str {
        &self.price_label
    }

    /// Returns the itinerary steps in order.
    pub fn itinerary(&self) -> &[ItineraryStep] {
        &self.itinerary
    }
}
