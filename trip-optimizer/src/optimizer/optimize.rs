//! Route optimization pipeline.
//!
//! Ties the stages together: hard feasibility filtering, frontier
//! exploration (or exact single-choice selection), profile-based picking
//! and translation of every reported index back to the caller's original
//! candidate list.

use tracing::{debug, info, warn};

use crate::domain::{Alternative, Constraints, DomainError, Profile, ScoreWeights};

use super::config::ExplorerConfig;
use super::explore::{Explorer, Frontier};
use super::feasibility::feasible_indices;
use super::problem::RouteProblem;
use super::score::score_alternative;
use super::select::{Relation, Selection, SelectionProblem};

/// One optimization request: a candidate list, the traveler's profile
/// and the hard constraints to respect.
#[derive(Debug, Clone)]
pub struct RouteRequest<'a> {
    /// Candidate alternatives, indexed as the caller knows them.
    pub alternatives: &'a [Alternative],

    /// Selection profile to optimize for.
    pub profile: Profile,

    /// Hard time and budget constraints.
    pub constraints: Constraints,

    /// Optional scoring weight override; the profile's defaults apply
    /// when absent.
    pub weights: Option<ScoreWeights>,
}

impl<'a> RouteRequest<'a> {
    /// Create a request with the profile's default weights.
    pub fn new(
        alternatives: &'a [Alternative],
        profile: Profile,
        constraints: Constraints,
    ) -> Self {
        Self {
            alternatives,
            profile,
            constraints,
            weights: None,
        }
    }

    /// Override the scoring weights.
    pub fn with_weights(mut self, weights: ScoreWeights) -> Self {
        self.weights = Some(weights);
        self
    }

    fn effective_weights(&self) -> ScoreWeights {
        self.weights.unwrap_or_else(|| self.profile.weights())
    }
}

/// Explanation for an optimization that selected nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct EmptyResult {
    /// Human-readable reason naming the limits that filtered everything.
    pub reason: String,

    /// Profile the optimization ran under.
    pub profile: Profile,

    /// Hard constraints that were applied.
    pub constraints: Constraints,
}

impl EmptyResult {
    fn no_candidates(profile: Profile, constraints: Constraints) -> Self {
        Self {
            reason: "no route alternatives were provided".to_string(),
            profile,
            constraints,
        }
    }

    fn nothing_feasible(profile: Profile, constraints: Constraints) -> Self {
        Self {
            reason: format!(
                "no alternative within the {:.1} h time ceiling and {:.2} effective budget",
                constraints.time_ceiling_hours(),
                constraints.effective_budget()
            ),
            profile,
            constraints,
        }
    }
}

/// A chosen route plus the objective surface explored to choose it.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Index of the chosen alternative in the request's original list.
    pub chosen_index: usize,

    /// The chosen alternative.
    pub chosen: Alternative,

    /// Profile score of the chosen alternative.
    pub objective_value: f64,

    /// Pareto frontier explored, indices into the original list. Empty
    /// when the exact selector produced the result.
    pub frontier: Frontier,

    /// Profile the optimization ran under.
    pub profile: Profile,

    /// Hard constraints that were applied.
    pub constraints: Constraints,
}

/// Outcome of optimizing one candidate list.
#[derive(Debug, Clone)]
pub enum RouteOutcome {
    /// A route was chosen.
    Selected(OptimizationResult),

    /// Nothing survived the hard constraints, or nothing was given.
    Empty(EmptyResult),
}

impl RouteOutcome {
    /// Whether the optimization selected nothing.
    pub fn is_empty(&self) -> bool {
        matches!(self, RouteOutcome::Empty(_))
    }

    /// The selection, if one was made.
    pub fn selected(&self) -> Option<&OptimizationResult> {
        match self {
            RouteOutcome::Selected(result) => Some(result),
            RouteOutcome::Empty(_) => None,
        }
    }
}

/// Route optimizer over a fixed explorer configuration.
pub struct RouteOptimizer {
    config: ExplorerConfig,
}

impl Default for RouteOptimizer {
    fn default() -> Self {
        Self::new(ExplorerConfig::default())
    }
}

impl RouteOptimizer {
    /// Create an optimizer with the given explorer configuration.
    pub fn new(config: ExplorerConfig) -> Self {
        Self { config }
    }

    /// Optimize via the Pareto frontier over `(price, connections)`.
    ///
    /// Infeasible candidates are dropped before exploration; the chosen
    /// index, and every index on the returned frontier, refer to the
    /// request's original list regardless of how many candidates were
    /// filtered out in between.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for structurally invalid candidate data, which
    /// cannot happen for alternatives built through [`Alternative::new`].
    pub fn optimize(&self, request: &RouteRequest<'_>) -> Result<RouteOutcome, DomainError> {
        if request.alternatives.is_empty() {
            return Ok(RouteOutcome::Empty(EmptyResult::no_candidates(
                request.profile,
                request.constraints,
            )));
        }

        let keep = feasible_indices(request.alternatives, &request.constraints);
        if keep.is_empty() {
            debug!(
                candidates = request.alternatives.len(),
                "all candidates infeasible"
            );
            return Ok(RouteOutcome::Empty(EmptyResult::nothing_feasible(
                request.profile,
                request.constraints,
            )));
        }

        let problem = RouteProblem::from_alternatives(
            keep.iter().map(|&i| &request.alternatives[i]),
            request.constraints,
        )?;

        let explorer = Explorer::new(&problem, &self.config);
        let frontier = explorer.pareto_front();
        let Some(survivor_choice) = explorer.pick(&frontier, request.profile) else {
            return Ok(RouteOutcome::Empty(EmptyResult::nothing_feasible(
                request.profile,
                request.constraints,
            )));
        };

        let chosen_index = keep[survivor_choice];
        let frontier = frontier.map_indices(|i| keep[i]);
        let weights = request.effective_weights();
        let objective_value = score_alternative(
            request.profile,
            &weights,
            &request.alternatives[chosen_index],
            &request.constraints,
        );

        debug!(
            profile = %request.profile,
            candidates = request.alternatives.len(),
            survivors = keep.len(),
            frontier = frontier.len(),
            chosen = chosen_index,
            "frontier optimization complete"
        );

        Ok(RouteOutcome::Selected(OptimizationResult {
            chosen_index,
            chosen: request.alternatives[chosen_index].clone(),
            objective_value,
            frontier,
            profile: request.profile,
            constraints: request.constraints,
        }))
    }

    /// Optimize via exact 0/1 selection over profile scores.
    ///
    /// Every candidate is scored with soft violation penalties, then an
    /// exact single-choice selector minimizes the score subject to the
    /// hard time and budget rows. The result carries no frontier.
    ///
    /// # Errors
    ///
    /// Returns `Err` only for structurally invalid candidate data.
    pub fn optimize_exact(&self, request: &RouteRequest<'_>) -> Result<RouteOutcome, DomainError> {
        if request.alternatives.is_empty() {
            return Ok(RouteOutcome::Empty(EmptyResult::no_candidates(
                request.profile,
                request.constraints,
            )));
        }

        let weights = request.effective_weights();
        let scores: Vec<f64> = request
            .alternatives
            .iter()
            .map(|a| score_alternative(request.profile, &weights, a, &request.constraints))
            .collect();
        let times: Vec<f64> = request.alternatives.iter().map(Alternative::time_hours).collect();
        let prices: Vec<f64> = request.alternatives.iter().map(Alternative::price).collect();
        let choose_one = vec![1.0; request.alternatives.len()];

        let problem = SelectionProblem::minimize(scores)?
            .subject_to(times, Relation::LessEq, request.constraints.time_ceiling_hours())?
            .subject_to(prices, Relation::LessEq, request.constraints.effective_budget())?
            .subject_to(choose_one, Relation::Equal, 1.0)?;

        match problem.solve() {
            Selection::Optimal {
                index,
                objective_value,
                slack,
            } => {
                debug!(
                    profile = %request.profile,
                    chosen = index,
                    objective = objective_value,
                    slack = ?slack,
                    "exact selection complete"
                );
                Ok(RouteOutcome::Selected(OptimizationResult {
                    chosen_index: index,
                    chosen: request.alternatives[index].clone(),
                    objective_value,
                    frontier: Frontier::default(),
                    profile: request.profile,
                    constraints: request.constraints,
                }))
            }
            Selection::Infeasible => Ok(RouteOutcome::Empty(EmptyResult::nothing_feasible(
                request.profile,
                request.constraints,
            ))),
            Selection::Unbounded => Ok(RouteOutcome::Empty(EmptyResult {
                reason: "selection was unbounded".to_string(),
                profile: request.profile,
                constraints: request.constraints,
            })),
        }
    }

    /// Optimize a batch of independent requests.
    ///
    /// Each request is optimized on its own and one route never aborts
    /// the rest: a route that fails outright comes back as an empty
    /// outcome whose reason carries the error. Outcomes keep the
    /// request order.
    pub fn optimize_batch(&self, requests: &[RouteRequest<'_>]) -> Vec<RouteOutcome> {
        let mut outcomes = Vec::with_capacity(requests.len());
        for (position, request) in requests.iter().enumerate() {
            let outcome = match self.optimize(request) {
                Ok(RouteOutcome::Selected(result)) => {
                    info!(
                        route = position,
                        profile = %request.profile,
                        chosen = result.chosen_index,
                        "route selected"
                    );
                    RouteOutcome::Selected(result)
                }
                Ok(RouteOutcome::Empty(empty)) => {
                    info!(
                        route = position,
                        reason = %empty.reason,
                        "route came back empty"
                    );
                    RouteOutcome::Empty(empty)
                }
                Err(error) => {
                    warn!(
                        route = position,
                        error = %error,
                        "route optimization failed"
                    );
                    RouteOutcome::Empty(EmptyResult {
                        reason: format!("optimization failed: {error}"),
                        profile: request.profile,
                        constraints: request.constraints,
                    })
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::optimizer::feasibility::is_feasible;
    use proptest::prelude::*;

    #[derive(Debug, Clone)]
    struct Case {
        metrics: Vec<(f64, f64, u32)>,
        ceiling: f64,
        budget: f64,
    }

    fn case_strategy() -> impl Strategy<Value = Case> {
        (
            prop::collection::vec((0.0f64..50.0, 0.0f64..3_000.0, 0u32..5), 0..16),
            10.0f64..60.0,
            500.0f64..4_000.0,
        )
            .prop_map(|(metrics, ceiling, budget)| Case {
                metrics,
                ceiling,
                budget,
            })
    }

    fn build(case: &Case) -> (Vec<Alternative>, Constraints) {
        let alternatives = case
            .metrics
            .iter()
            .map(|&(time, price, connections)| {
                Alternative::new(time, price, connections, "A", "B").unwrap()
            })
            .collect();
        let constraints = Constraints::new(case.ceiling, case.budget).unwrap();
        (alternatives, constraints)
    }

    proptest! {
        /// The frontier path selects a feasible candidate exactly when
        /// one exists, and reports in-range original indices.
        #[test]
        fn selection_is_feasible_and_in_range(case in case_strategy(), profile_idx in 0usize..3) {
            let profile = [Profile::Cheapest, Profile::Fastest, Profile::Balanced][profile_idx];
            let (alternatives, constraints) = build(&case);
            let request = RouteRequest::new(&alternatives, profile, constraints);

            let outcome = RouteOptimizer::default().optimize(&request).unwrap();
            let any_feasible = alternatives.iter().any(|a| is_feasible(a, &constraints));

            match outcome {
                RouteOutcome::Selected(result) => {
                    prop_assert!(any_feasible);
                    prop_assert!(result.chosen_index < alternatives.len());
                    prop_assert!(is_feasible(&alternatives[result.chosen_index], &constraints));
                    for index in result.frontier.indices() {
                        prop_assert!(index < alternatives.len());
                        prop_assert!(is_feasible(&alternatives[index], &constraints));
                    }
                }
                RouteOutcome::Empty(_) => prop_assert!(!any_feasible),
            }
        }

        /// The exact path agrees with a brute-force scan: lowest score
        /// among feasible candidates, earliest index on ties.
        #[test]
        fn exact_matches_brute_force(case in case_strategy()) {
            let (alternatives, constraints) = build(&case);
            let request = RouteRequest::new(&alternatives, Profile::Cheapest, constraints);
            let outcome = RouteOptimizer::default().optimize_exact(&request).unwrap();

            let weights = Profile::Cheapest.weights();
            let mut best: Option<(usize, f64)> = None;
            for (index, alternative) in alternatives.iter().enumerate() {
                if !is_feasible(alternative, &constraints) {
                    continue;
                }
                let score =
                    score_alternative(Profile::Cheapest, &weights, alternative, &constraints);
                if best.is_none_or(|(_, current)| score < current) {
                    best = Some((index, score));
                }
            }

            match (outcome.selected(), best) {
                (Some(result), Some((index, score))) => {
                    prop_assert_eq!(result.chosen_index, index);
                    prop_assert!((result.objective_value - score).abs() < 1e-9);
                }
                (None, None) => {}
                (got, want) => prop_assert!(false, "got {:?}, want {:?}", got.is_some(), want),
            }
        }

        /// Frontier and exact paths agree on whether anything is
        /// feasible at all.
        #[test]
        fn paths_agree_on_emptiness(case in case_strategy()) {
            let (alternatives, constraints) = build(&case);
            let request = RouteRequest::new(&alternatives, Profile::Cheapest, constraints);
            let optimizer = RouteOptimizer::default();

            let frontier_empty = optimizer.optimize(&request).unwrap().is_empty();
            let exact_empty = optimizer.optimize_exact(&request).unwrap().is_empty();
            prop_assert_eq!(frontier_empty, exact_empty);
        }

        /// Batch optimization returns one outcome per request, equal to
        /// optimizing each request alone.
        #[test]
        fn batch_equals_individual_runs(case in case_strategy()) {
            let (alternatives, constraints) = build(&case);
            let requests = vec![
                RouteRequest::new(&alternatives, Profile::Cheapest, constraints),
                RouteRequest::new(&alternatives, Profile::Fastest, constraints),
            ];
            let optimizer = RouteOptimizer::default();

            let batch = optimizer.optimize_batch(&requests);
            prop_assert_eq!(batch.len(), requests.len());

            for (outcome, request) in batch.iter().zip(&requests) {
                let alone = optimizer.optimize(request).unwrap();
                prop_assert_eq!(outcome.is_empty(), alone.is_empty());
                if let (Some(got), Some(want)) = (outcome.selected(), alone.selected()) {
                    prop_assert_eq!(got.chosen_index, want.chosen_index);
                }
            }
        }
    }
}
