//! Exact single-choice selection.
//!
//! The selection problem is phrased the way a linear program would be:
//! an objective coefficient per candidate (plus an optional constant
//! offset), a sense, and constraint rows relating per-candidate
//! coefficients to a right-hand side. The decision variables are binary
//! pick-this-candidate flags of which exactly one is set, so instead of
//! delegating to an ILP library the solver scans the `n` single-choice
//! assignments directly. The answer is exact, and every inequality row is
//! reported back as equality-plus-slack, like an LP solver's tableau
//! would show it.

use crate::domain::DomainError;

/// Tolerance for floating-point constraint satisfaction and equality.
pub const FEASIBILITY_EPS: f64 = 1e-9;

/// Whether the objective is minimized or maximized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    Minimize,
    Maximize,
}

/// How a constraint row relates its candidate coefficient to the
/// right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    /// `coefficient <= rhs`; reported slack is `rhs - coefficient`.
    LessEq,
    /// `coefficient >= rhs`; reported surplus is `coefficient - rhs`.
    GreaterEq,
    /// `coefficient == rhs` within tolerance; reported slack is 0.
    Equal,
}

#[derive(Debug, Clone, PartialEq)]
struct ConstraintRow {
    coefficients: Vec<f64>,
    relation: Relation,
    rhs: f64,
}

/// A single-choice selection problem.
///
/// Candidate `i` is described by `objective[i]` and by position `i` of
/// every constraint row. Exactly one candidate is chosen; a row stating
/// that explicitly (all ones, [`Relation::Equal`], 1) is always satisfied
/// and may be included for parity with the LP formulation.
///
/// # Examples
///
/// ```
/// use trip_optimizer::optimizer::{Relation, Selection, SelectionProblem};
///
/// let selection = SelectionProblem::minimize(vec![2000.0, 1500.0, 1000.0])
///     .unwrap()
///     .subject_to(vec![10.0, 15.0, 30.0], Relation::LessEq, 20.0)
///     .unwrap()
///     .solve();
///
/// // Candidate 2 is cheapest but takes 30 hours; candidate 1 wins
/// match selection {
///     Selection::Optimal { index, .. } => assert_eq!(index, 1),
///     other => panic!("expected optimal, got {other:?}"),
/// }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionProblem {
    objective: Vec<f64>,
    offset: f64,
    sense: Sense,
    rows: Vec<ConstraintRow>,
}

impl SelectionProblem {
    /// Build a minimization problem over the given objective vector.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the vector is empty or contains a non-finite
    /// coefficient.
    pub fn minimize(objective: Vec<f64>) -> Result<Self, DomainError> {
        Self::new(objective, Sense::Minimize)
    }

    /// Build a maximization problem over the given objective vector.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the vector is empty or contains a non-finite
    /// coefficient.
    pub fn maximize(objective: Vec<f64>) -> Result<Self, DomainError> {
        Self::new(objective, Sense::Maximize)
    }

    fn new(objective: Vec<f64>, sense: Sense) -> Result<Self, DomainError> {
        if objective.is_empty() {
            return Err(DomainError::EmptyCandidateSet);
        }
        if let Some(index) = objective.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::NonFinite {
                what: "objective coefficient",
                index,
            });
        }

        Ok(SelectionProblem {
            objective,
            offset: 0.0,
            sense,
            rows: Vec::new(),
        })
    }

    /// Add a constant to the objective value of every candidate.
    ///
    /// The offset shifts reported objective values without changing
    /// which candidate wins.
    pub fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// Add a constraint row.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the row length does not match the candidate
    /// count or a coefficient is non-finite.
    pub fn subject_to(
        mut self,
        coefficients: Vec<f64>,
        relation: Relation,
        rhs: f64,
    ) -> Result<Self, DomainError> {
        if coefficients.len() != self.objective.len() {
            return Err(DomainError::MismatchedRow {
                row: coefficients.len(),
                candidates: self.objective.len(),
            });
        }
        if let Some(index) = coefficients.iter().position(|v| !v.is_finite()) {
            return Err(DomainError::NonFinite {
                what: "constraint coefficient",
                index,
            });
        }

        self.rows.push(ConstraintRow {
            coefficients,
            relation,
            rhs,
        });
        Ok(self)
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.objective.len()
    }

    /// Always false: construction rejects empty candidate sets.
    pub fn is_empty(&self) -> bool {
        self.objective.is_empty()
    }

    /// Solve by scanning every single-choice assignment.
    ///
    /// Objective ties keep the lowest candidate index, so results are
    /// deterministic for identical input.
    pub fn solve(&self) -> Selection {
        let mut best: Option<(usize, f64)> = None;

        for candidate in 0..self.objective.len() {
            if !self.rows.iter().all(|row| row.satisfied_by(candidate)) {
                continue;
            }

            let value = self.objective[candidate] + self.offset;
            let improves = match best {
                None => true,
                Some((_, incumbent)) => match self.sense {
                    Sense::Minimize => value < incumbent,
                    Sense::Maximize => value > incumbent,
                },
            };
            if improves {
                best = Some((candidate, value));
            }
        }

        match best {
            Some((index, objective_value)) => Selection::Optimal {
                index,
                objective_value,
                slack: self.rows.iter().map(|row| row.slack_for(index)).collect(),
            },
            None => Selection::Infeasible,
        }
    }
}

impl ConstraintRow {
    fn satisfied_by(&self, candidate: usize) -> bool {
        let lhs = self.coefficients[candidate];
        match self.relation {
            Relation::LessEq => lhs <= self.rhs + FEASIBILITY_EPS,
            Relation::GreaterEq => lhs >= self.rhs - FEASIBILITY_EPS,
            Relation::Equal => (lhs - self.rhs).abs() <= FEASIBILITY_EPS,
        }
    }

    fn slack_for(&self, candidate: usize) -> f64 {
        let lhs = self.coefficients[candidate];
        match self.relation {
            Relation::LessEq => self.rhs - lhs,
            Relation::GreaterEq => lhs - self.rhs,
            Relation::Equal => 0.0,
        }
    }
}

/// Outcome of a selection solve.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    /// A best feasible candidate exists.
    Optimal {
        /// Index of the chosen candidate.
        index: usize,
        /// Objective coefficient of the chosen candidate plus the offset.
        objective_value: f64,
        /// One entry per constraint row, in the order rows were added:
        /// unused margin for `LessEq`, surplus over the bound for
        /// `GreaterEq`, 0 for `Equal`.
        slack: Vec<f64>,
    },
    /// No candidate satisfies every constraint row.
    Infeasible,
    /// The objective could improve without bound. Never produced by
    /// [`SelectionProblem::solve`], which scans a finite assignment set.
    Unbounded,
}

impl Selection {
    /// Whether a candidate was chosen.
    pub fn is_optimal(&self) -> bool {
        matches!(self, Selection::Optimal { .. })
    }

    /// The chosen candidate index, if any.
    pub fn chosen_index(&self) -> Option<usize> {
        match self {
            Selection::Optimal { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// The achieved objective value, if any.
    pub fn objective_value(&self) -> Option<f64> {
        match self {
            Selection::Optimal {
                objective_value, ..
            } => Some(*objective_value),
            _ => None,
        }
    }
}
