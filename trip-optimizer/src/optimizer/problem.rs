//! Route problem data for the solvers.
//!
//! Both solvers consume the same shape: parallel arrays of times, prices
//! and connection counts, where position `i` across all three arrays
//! describes candidate `i`. Construction validates the arrays once so the
//! solvers can index freely.

use crate::domain::{Alternative, Constraints, DomainError};

use super::feasibility::is_feasible_metrics;

/// Validated candidate metrics plus the constraints they are judged
/// against.
///
/// # Invariants
///
/// - All three arrays have the same non-zero length
/// - Times and prices are finite and non-negative
#[derive(Debug, Clone, PartialEq)]
pub struct RouteProblem {
    times: Vec<f64>,
    prices: Vec<f64>,
    connections: Vec<u32>,
    constraints: Constraints,
}

impl RouteProblem {
    /// Construct a problem from parallel metric arrays.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the arrays disagree on length, are empty, or
    /// contain a NaN, infinite or negative time or price.
    pub fn new(
        times: Vec<f64>,
        prices: Vec<f64>,
        connections: Vec<u32>,
        constraints: Constraints,
    ) -> Result<Self, DomainError> {
        if times.len() != prices.len() || times.len() != connections.len() {
            return Err(DomainError::MismatchedArrays {
                times: times.len(),
                prices: prices.len(),
                connections: connections.len(),
            });
        }
        if times.is_empty() {
            return Err(DomainError::EmptyCandidateSet);
        }
        for (index, &time) in times.iter().enumerate() {
            if !time.is_finite() || time < 0.0 {
                return Err(DomainError::InvalidMetric {
                    metric: "time",
                    index,
                });
            }
        }
        for (index, &price) in prices.iter().enumerate() {
            if !price.is_finite() || price < 0.0 {
                return Err(DomainError::InvalidMetric {
                    metric: "price",
                    index,
                });
            }
        }

        Ok(RouteProblem {
            times,
            prices,
            connections,
            constraints,
        })
    }

    /// Construct a problem from already-validated alternatives.
    ///
    /// Accepts any iterator of references, so a filtered subset can be
    /// passed without cloning the alternatives themselves.
    ///
    /// # Errors
    ///
    /// Returns `Err` only when the iterator yields nothing.
    pub fn from_alternatives<'a, I>(
        alternatives: I,
        constraints: Constraints,
    ) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = &'a Alternative>,
    {
        let mut times = Vec::new();
        let mut prices = Vec::new();
        let mut connections = Vec::new();
        for alternative in alternatives {
            times.push(alternative.time_hours());
            prices.push(alternative.price());
            connections.push(alternative.connections());
        }
        if times.is_empty() {
            return Err(DomainError::EmptyCandidateSet);
        }

        Ok(RouteProblem {
            times,
            prices,
            connections,
            constraints,
        })
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Always false: construction rejects empty candidate sets.
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Travel times in fractional hours, one per candidate.
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Ticket prices, one per candidate.
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Connection counts, one per candidate.
    pub fn connections(&self) -> &[u32] {
        &self.connections
    }

    /// The hard constraints candidates are judged against.
    pub fn constraints(&self) -> &Constraints {
        &self.constraints
    }

    /// The two minimized objectives for candidate `index`:
    /// `[price, connections]`.
    pub fn objectives(&self, index: usize) -> [f64; 2] {
        [self.prices[index], self.connections[index] as f64]
    }

    /// Whether candidate `index` satisfies both hard constraints.
    pub fn is_feasible_at(&self, index: usize) -> bool {
        is_feasible_metrics(self.times[index], self.prices[index], &self.constraints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn constraints() -> Constraints {
        Constraints::new(20.0, 1800.0).unwrap()
    }

    #[test]
    fn valid_construction() {
        let problem = RouteProblem::new(
            vec![10.0, 15.0],
            vec![2000.0, 1500.0],
            vec![0, 1],
            constraints(),
        )
        .unwrap();

        assert_eq!(problem.len(), 2);
        assert!(!problem.is_empty());
        assert_eq!(problem.objectives(1), [1500.0, 1.0]);
    }

    #[test]
    fn rejects_mismatched_lengths() {
        let err =
            RouteProblem::new(vec![10.0], vec![1.0, 2.0], vec![0], constraints()).unwrap_err();
        assert_eq!(
            err,
            DomainError::MismatchedArrays {
                times: 1,
                prices: 2,
                connections: 1
            }
        );
    }

    #[test]
    fn rejects_empty() {
        let err = RouteProblem::new(vec![], vec![], vec![], constraints()).unwrap_err();
        assert_eq!(err, DomainError::EmptyCandidateSet);

        let none: Vec<Alternative> = Vec::new();
        let err = RouteProblem::from_alternatives(&none, constraints()).unwrap_err();
        assert_eq!(err, DomainError::EmptyCandidateSet);
    }

    #[test]
    fn rejects_bad_metrics() {
        let err = RouteProblem::new(
            vec![10.0, f64::NAN],
            vec![1.0, 2.0],
            vec![0, 0],
            constraints(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidMetric {
                metric: "time",
                index: 1
            }
        );

        let err = RouteProblem::new(vec![10.0], vec![-1.0], vec![0], constraints()).unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidMetric {
                metric: "price",
                index: 0
            }
        );
    }

    #[test]
    fn from_alternatives_copies_metrics() {
        let alternatives = vec![
            Alternative::new(10.0, 2000.0, 0, "A", "B").unwrap(),
            Alternative::new(15.0, 1500.0, 1, "A", "B").unwrap(),
        ];
        let problem = RouteProblem::from_alternatives(&alternatives, constraints()).unwrap();

        assert_eq!(problem.times(), &[10.0, 15.0]);
        assert_eq!(problem.prices(), &[2000.0, 1500.0]);
        assert_eq!(problem.connections(), &[0, 1]);

        let subset =
            RouteProblem::from_alternatives(alternatives.iter().skip(1), constraints()).unwrap();
        assert_eq!(subset.prices(), &[1500.0]);
    }

    #[test]
    fn feasibility_matches_filter_predicate() {
        let problem = RouteProblem::new(
            vec![10.0, 15.0, 30.0],
            vec![2000.0, 1500.0, 1000.0],
            vec![0, 1, 2],
            constraints(),
        )
        .unwrap();

        assert!(!problem.is_feasible_at(0)); // over budget
        assert!(problem.is_feasible_at(1));
        assert!(!problem.is_feasible_at(2)); // over ceiling
    }
}
