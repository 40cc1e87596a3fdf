//! Route selection optimizers.
//!
//! This module answers: given a list of travel alternatives and the
//! traveler's limits, which one should be booked? Candidates are first
//! filtered against the hard constraints, then either explored as a
//! Pareto frontier over price and connections or handed to an exact
//! single-choice selector over profile scores. Both paths report indices
//! into the caller's original candidate list.

mod config;
mod explore;
mod feasibility;
mod optimize;
mod problem;
mod score;
mod select;

pub use config::{DEFAULT_EXHAUSTIVE_THRESHOLD, ExplorerConfig};
pub use explore::{Explorer, Frontier, ParetoPoint, dominates};
pub use feasibility::{feasible_indices, is_feasible, is_feasible_metrics};
pub use optimize::{EmptyResult, OptimizationResult, RouteOptimizer, RouteOutcome, RouteRequest};
pub use problem::RouteProblem;
pub use score::{score, score_alternative, violation_ratio};
pub use select::{FEASIBILITY_EPS, Relation, Selection, SelectionProblem, Sense};
