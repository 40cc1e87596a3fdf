//! Hard feasibility constraints for a route.

use super::DomainError;

/// The traveler's hard limits for one route.
///
/// An alternative is feasible when its time is within the ceiling and its
/// price, plus the reference lodging cost for the stay, is within budget.
/// A ceiling or budget of zero is allowed; the scorer applies a degenerate
/// rule for those instead of dividing by zero.
///
/// # Examples
///
/// ```
/// use trip_optimizer::domain::Constraints;
///
/// let constraints = Constraints::new(30.0, 6000.0)
///     .unwrap()
///     .with_lodging(850.0)
///     .unwrap();
/// assert_eq!(constraints.budget(), 6000.0);
/// assert_eq!(constraints.effective_budget(), 5150.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraints {
    time_ceiling_hours: f64,
    budget: f64,
    lodging_reference_cost: f64,
}

impl Constraints {
    /// Construct constraints with no lodging cost.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the ceiling or budget is NaN, infinite or
    /// negative.
    pub fn new(time_ceiling_hours: f64, budget: f64) -> Result<Self, DomainError> {
        if !time_ceiling_hours.is_finite() || time_ceiling_hours < 0.0 {
            return Err(DomainError::InvalidConstraints(
                "time ceiling must be finite and non-negative",
            ));
        }
        if !budget.is_finite() || budget < 0.0 {
            return Err(DomainError::InvalidConstraints(
                "budget must be finite and non-negative",
            ));
        }

        Ok(Constraints {
            time_ceiling_hours,
            budget,
            lodging_reference_cost: 0.0,
        })
    }

    /// Merge a reference lodging cost into the constraints.
    ///
    /// The cost may exceed the budget; every alternative then fails the
    /// budget check and the route comes back empty.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the cost is NaN, infinite or negative.
    pub fn with_lodging(mut self, reference_cost: f64) -> Result<Self, DomainError> {
        if !reference_cost.is_finite() || reference_cost < 0.0 {
            return Err(DomainError::InvalidConstraints(
                "lodging cost must be finite and non-negative",
            ));
        }
        self.lodging_reference_cost = reference_cost;
        Ok(self)
    }

    /// Returns the travel time ceiling in fractional hours.
    pub fn time_ceiling_hours(&self) -> f64 {
        self.time_ceiling_hours
    }

    /// Returns the total budget.
    pub fn budget(&self) -> f64 {
        self.budget
    }

    /// Returns the reference lodging cost (0 when no lodging data).
    pub fn lodging_reference_cost(&self) -> f64 {
        self.lodging_reference_cost
    }

    /// Returns the budget left for the ticket once lodging is paid.
    ///
    /// Negative when lodging alone exceeds the budget.
    pub fn effective_budget(&self) -> f64 {
        self.budget - self.lodging_reference_cost
    }
}
