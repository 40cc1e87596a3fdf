//! Traveler profiles and scoring weights.
//!
//! A profile names what the traveler cares about; the weights attached to
//! a profile parameterize the scorer. Profiles are selected once per run
//! and never mutated while a batch is in flight.

use std::fmt;
use std::str::FromStr;

/// What the traveler optimizes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Profile {
    /// Minimize ticket price.
    Cheapest,
    /// Minimize travel time.
    Fastest,
    /// Trade time against money at a configured value per hour.
    Balanced,
}

impl Profile {
    /// Returns the default scoring weights for this profile.
    ///
    /// Connection discomfort is charged in the profile's own unit: in
    /// currency for `Cheapest` and `Balanced`, in hours for `Fastest`.
    pub fn weights(self) -> ScoreWeights {
        match self {
            Profile::Cheapest => ScoreWeights::new(2.0, 2.0, 50.0, DEFAULT_VALUE_PER_HOUR),
            Profile::Fastest => ScoreWeights::new(2.0, 2.0, 0.5, DEFAULT_VALUE_PER_HOUR),
            Profile::Balanced => ScoreWeights::new(2.0, 2.0, 50.0, DEFAULT_VALUE_PER_HOUR),
        }
    }
}

impl fmt::Display for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Profile::Cheapest => "cheapest",
            Profile::Fastest => "fastest",
            Profile::Balanced => "balanced",
        };
        write!(f, "{name}")
    }
}

/// Error returned when parsing an unknown profile name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown profile: {0} (expected cheapest, fastest or balanced)")]
pub struct ParseProfileError(String);

impl FromStr for Profile {
    type Err = ParseProfileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cheapest" => Ok(Profile::Cheapest),
            "fastest" => Ok(Profile::Fastest),
            "balanced" => Ok(Profile::Balanced),
            other => Err(ParseProfileError(other.to_string())),
        }
    }
}

/// How many currency units one hour of travel time is worth to the
/// balanced traveler.
pub const DEFAULT_VALUE_PER_HOUR: f64 = 300.0;

/// Weights parameterizing the profile scorer.
///
/// Violation weights scale the soft penalty for exceeding the time
/// ceiling or the budget; the connection weight charges a flat discomfort
/// per transfer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    /// Multiplier on the time-ceiling violation penalty.
    pub time_violation_weight: f64,
    /// Multiplier on the budget violation penalty.
    pub price_violation_weight: f64,
    /// Flat cost added per connection.
    pub connection_weight: f64,
    /// Currency value of one hour, used by the balanced profile.
    pub value_per_hour: f64,
}

impl ScoreWeights {
    /// Construct weights explicitly.
    pub fn new(
        time_violation_weight: f64,
        price_violation_weight: f64,
        connection_weight: f64,
        value_per_hour: f64,
    ) -> Self {
        Self {
            time_violation_weight,
            price_violation_weight,
            connection_weight,
            value_per_hour,
        }
    }

    /// Replace the connection weight.
    pub fn with_connection_weight(mut self, weight: f64) -> Self {
        self.connection_weight = weight;
        self
    }

    /// Replace the value-per-hour tradeoff.
    pub fn with_value_per_hour(mut self, value: f64) -> Self {
        self.value_per_hour = value;
        self
    }
}
