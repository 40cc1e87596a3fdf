//! Profile scoring.
//!
//! The scorer reduces one alternative to a single number under a
//! traveler profile; lower is better. It is a total function: constraint
//! violations become soft penalties instead of errors, so it can rank
//! candidates that filtering would reject. Feasible candidates have zero
//! violation terms.
//!
//! The price side of the score works against the budget net of lodging,
//! the same quantity the feasibility filter enforces.

use crate::domain::{Alternative, Constraints, Profile, ScoreWeights};

/// Relative violation of a limit: `max(0, (value - limit) / limit)`.
///
/// A non-positive limit degenerates to the raw value, which keeps the
/// scorer total when the ceiling or remaining budget is zero (or lodging
/// has eaten past the budget).
pub fn violation_ratio(value: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        ((value - limit) / limit).max(0.0)
    } else {
        value
    }
}

/// Absolute overshoot of a limit: `max(0, value - limit)`, with the same
/// degenerate rule as [`violation_ratio`] (ratio times limit collapses to
/// this, and a zero limit leaves the raw value).
fn scaled_violation(value: f64, limit: f64) -> f64 {
    if limit > 0.0 {
        (value - limit).max(0.0)
    } else {
        value
    }
}

/// Score raw metrics under a profile; lower is better.
///
/// - `Cheapest`: ticket price, inflated proportionally for any time or
///   budget violation, plus a per-connection charge in currency.
/// - `Fastest`: travel time, inflated for budget violation, plus a
///   per-connection charge in hours.
/// - `Balanced`: price plus time converted to currency at
///   `value_per_hour`, plus violation overshoots in currency, plus a
///   per-connection charge in currency.
pub fn score(
    profile: Profile,
    weights: &ScoreWeights,
    time_hours: f64,
    price: f64,
    connections: u32,
    constraints: &Constraints,
) -> f64 {
    let time_violation = violation_ratio(time_hours, constraints.time_ceiling_hours());
    let price_violation = violation_ratio(price, constraints.effective_budget());
    let connections = connections as f64;

    match profile {
        Profile::Cheapest => {
            price
                + price * time_violation * weights.time_violation_weight
                + price * price_violation * weights.price_violation_weight
                + connections * weights.connection_weight
        }
        Profile::Fastest => {
            time_hours
                + time_hours * price_violation * weights.price_violation_weight
                + connections * weights.connection_weight
        }
        Profile::Balanced => {
            let excess_hours = scaled_violation(time_hours, constraints.time_ceiling_hours());
            let excess_price = scaled_violation(price, constraints.effective_budget());
            price
                + time_hours * weights.value_per_hour
                + excess_hours * weights.value_per_hour * weights.time_violation_weight
                + excess_price * weights.price_violation_weight
                + connections * weights.connection_weight
        }
    }
}

/// Score an alternative under a profile; lower is better.
pub fn score_alternative(
    profile: Profile,
    weights: &ScoreWeights,
    alternative: &Alternative,
    constraints: &Constraints,
) -> f64 {
    score(
        profile,
        weights,
        alternative.time_hours(),
        alternative.price(),
        alternative.connections(),
        constraints,
    )
}
