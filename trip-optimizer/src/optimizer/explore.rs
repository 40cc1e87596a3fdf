//! Frontier exploration over route candidates.
//!
//! The explorer searches the candidate index space for objective-optimal
//! alternatives. In two-objective mode it builds the Pareto frontier over
//! `(price, connections)` among candidates that satisfy the hard
//! constraints; in scalar mode it minimizes one profile score with
//! violations as soft penalties. Small candidate sets are enumerated
//! outright; past a configured threshold the explorer falls back to a
//! seeded population search, trading exactness for bounded work.
//!
//! Frontiers are canonical: unique objective vectors, sorted
//! lexicographically, each represented by the lowest candidate index that
//! achieves it. Identical inputs and seed give identical frontiers.

use std::cmp::Ordering;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::domain::{Profile, ScoreWeights};

use super::config::ExplorerConfig;
use super::problem::RouteProblem;
use super::score::score;

/// Divisor guard for min-max normalization of frontier columns.
const NORMALIZE_EPS: f64 = 1e-9;

/// One frontier member: an objective vector and the candidate index that
/// achieves it.
#[derive(Debug, Clone, PartialEq)]
pub struct ParetoPoint {
    /// Minimized objectives; `[price, connections]` in frontier mode,
    /// `[score]` in scalar mode.
    pub objectives: Vec<f64>,
    /// Index of the candidate within the explored problem.
    pub index: usize,
}

/// A canonical Pareto frontier.
///
/// # Invariants
///
/// - No point dominates another
/// - Objective vectors are unique and sorted lexicographically
/// - Each vector is represented by the lowest index achieving it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Frontier {
    /// Frontier members, best-price-first in two-objective mode.
    pub points: Vec<ParetoPoint>,
}

impl Frontier {
    /// Number of frontier points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the frontier has no points (nothing was feasible).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Candidate indices of the frontier members, in frontier order.
    pub fn indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.points.iter().map(|p| p.index)
    }

    /// Rewrite each point's candidate index, preserving objectives and
    /// order. Used to translate survivor-relative indices back to
    /// positions in the original candidate list.
    pub fn map_indices(mut self, f: impl Fn(usize) -> usize) -> Frontier {
        for point in &mut self.points {
            point.index = f(point.index);
        }
        self
    }
}

/// Whether objective vector `a` dominates `b`: no worse everywhere and
/// strictly better somewhere. Both vectors are minimized and must have
/// equal length.
pub fn dominates(a: &[f64], b: &[f64]) -> bool {
    let mut strictly_better = false;
    for (x, y) in a.iter().zip(b) {
        if x > y {
            return false;
        }
        if x < y {
            strictly_better = true;
        }
    }
    strictly_better
}

/// Frontier search over one validated problem.
pub struct Explorer<'a> {
    problem: &'a RouteProblem,
    config: &'a ExplorerConfig,
}

impl<'a> Explorer<'a> {
    /// Create an explorer over a problem.
    pub fn new(problem: &'a RouteProblem, config: &'a ExplorerConfig) -> Self {
        Self { problem, config }
    }

    /// Build the Pareto frontier over `(price, connections)`.
    ///
    /// Hard constraints apply: infeasible candidates never appear. The
    /// frontier is empty when no candidate is feasible.
    pub fn pareto_front(&self) -> Frontier {
        self.front_with(&|index| self.problem.objectives(index).to_vec(), true)
    }

    /// Minimize one profile score over all candidates.
    ///
    /// Violations of the constraints are soft penalties inside the score,
    /// so no hard filter applies and the result always holds exactly one
    /// point (the problem is never empty).
    pub fn scalar_minimum(&self, profile: Profile, weights: &ScoreWeights) -> Frontier {
        let problem = self.problem;
        self.front_with(
            &|index| {
                vec![score(
                    profile,
                    weights,
                    problem.times()[index],
                    problem.prices()[index],
                    problem.connections()[index],
                    problem.constraints(),
                )]
            },
            false,
        )
    }

    /// Choose one frontier member for a profile.
    ///
    /// - `Cheapest`: lowest first objective (price, or score in scalar
    ///   mode).
    /// - `Fastest`: lowest travel time, looked up in the problem's time
    ///   array.
    /// - `Balanced`: lowest sum of min-max-normalized objectives, each
    ///   column scaled by `(v - min) / (max - min + ε)`.
    ///
    /// Ties resolve to the earliest frontier position, so the choice is
    /// deterministic. Returns the winning candidate index, or `None` for
    /// an empty frontier.
    pub fn pick(&self, frontier: &Frontier, profile: Profile) -> Option<usize> {
        if frontier.is_empty() {
            return None;
        }

        let position = match profile {
            Profile::Cheapest => {
                position_of_min(frontier.points.len(), |p| frontier.points[p].objectives[0])
            }
            Profile::Fastest => position_of_min(frontier.points.len(), |p| {
                self.problem.times()[frontier.points[p].index]
            }),
            Profile::Balanced => balanced_position(frontier),
        };

        Some(frontier.points[position].index)
    }

    fn front_with(&self, objectives_of: &dyn Fn(usize) -> Vec<f64>, hard_filter: bool) -> Frontier {
        let candidates = self.problem.len();
        if candidates <= self.config.exhaustive_threshold {
            self.exhaustive_front(objectives_of, hard_filter)
        } else {
            self.sampled_front(objectives_of, hard_filter)
        }
    }

    /// Evaluate every candidate and keep the non-dominated set.
    fn exhaustive_front(
        &self,
        objectives_of: &dyn Fn(usize) -> Vec<f64>,
        hard_filter: bool,
    ) -> Frontier {
        let points: Vec<ParetoPoint> = (0..self.problem.len())
            .filter(|&index| !hard_filter || self.problem.is_feasible_at(index))
            .map(|index| ParetoPoint {
                objectives: objectives_of(index),
                index,
            })
            .collect();

        canonicalize(non_dominated(points))
    }

    /// Population search for candidate sets too large to enumerate.
    ///
    /// Random index genomes evolve for a fixed number of generations;
    /// every feasible evaluation folds into a non-dominated archive, so
    /// the result only approximates the true frontier when sampling
    /// misses part of the index space.
    fn sampled_front(
        &self,
        objectives_of: &dyn Fn(usize) -> Vec<f64>,
        hard_filter: bool,
    ) -> Frontier {
        let candidates = self.problem.len();
        let mut rng = SmallRng::seed_from_u64(self.config.seed);
        let population_size = self.config.population_size.min(candidates).max(1);

        let mut population: Vec<usize> = (0..population_size)
            .map(|_| rng.random_range(0..candidates))
            .collect();
        let mut archive: Vec<ParetoPoint> = Vec::new();

        for generation in 0..=self.config.generations {
            for &index in &population {
                if hard_filter && !self.problem.is_feasible_at(index) {
                    continue;
                }
                archive_insert(
                    &mut archive,
                    ParetoPoint {
                        objectives: objectives_of(index),
                        index,
                    },
                );
            }

            if generation < self.config.generations {
                population = population
                    .iter()
                    .map(|&index| mutate(index, candidates, &mut rng))
                    .collect();
            }
        }

        canonicalize(archive)
    }
}

/// Offspring of one index genome: half the time a uniform jump anywhere,
/// otherwise a short step in the neighbourhood.
fn mutate(index: usize, candidates: usize, rng: &mut SmallRng) -> usize {
    if rng.random_bool(0.5) {
        rng.random_range(0..candidates)
    } else {
        let step = rng.random_range(1..=5usize);
        if rng.random_bool(0.5) {
            index.saturating_add(step).min(candidates - 1)
        } else {
            index.saturating_sub(step)
        }
    }
}

/// Keep the points not dominated by any other point in the set.
fn non_dominated(points: Vec<ParetoPoint>) -> Vec<ParetoPoint> {
    points
        .iter()
        .filter(|p| {
            !points
                .iter()
                .any(|q| dominates(&q.objectives, &p.objectives))
        })
        .cloned()
        .collect()
}

/// Insert a point into a non-dominated archive: rejected if dominated,
/// otherwise added after evicting anything it dominates. Points with
/// identical objective vectors coexist until [`canonicalize`] collapses
/// them.
fn archive_insert(archive: &mut Vec<ParetoPoint>, point: ParetoPoint) {
    if archive
        .iter()
        .any(|existing| dominates(&existing.objectives, &point.objectives))
    {
        return;
    }
    if archive
        .iter()
        .any(|existing| existing.objectives == point.objectives && existing.index == point.index)
    {
        return;
    }
    archive.retain(|existing| !dominates(&point.objectives, &existing.objectives));
    archive.push(point);
}

/// Sort lexicographically by objectives (index breaks ties) and collapse
/// duplicate vectors onto their lowest index.
fn canonicalize(mut points: Vec<ParetoPoint>) -> Frontier {
    points.sort_by(|a, b| {
        cmp_objectives(&a.objectives, &b.objectives).then(a.index.cmp(&b.index))
    });
    points.dedup_by(|later, earlier| later.objectives == earlier.objectives);
    Frontier { points }
}

/// Lexicographic order on objective vectors. Values are validated finite
/// upstream, so `total_cmp` agrees with the usual numeric order.
fn cmp_objectives(a: &[f64], b: &[f64]) -> Ordering {
    for (x, y) in a.iter().zip(b) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}

/// First position achieving the minimum of `value_at` over `0..len`.
fn position_of_min(len: usize, value_at: impl Fn(usize) -> f64) -> usize {
    let mut best = 0;
    for position in 1..len {
        if value_at(position) < value_at(best) {
            best = position;
        }
    }
    best
}

/// Balanced pick: min-max normalize each objective column over the
/// frontier, sum the normalized columns per point, take the first
/// minimum.
fn balanced_position(frontier: &Frontier) -> usize {
    let width = frontier.points[0].objectives.len();
    let mut mins = vec![f64::INFINITY; width];
    let mut maxs = vec![f64::NEG_INFINITY; width];
    for point in &frontier.points {
        for (k, &v) in point.objectives.iter().enumerate() {
            mins[k] = mins[k].min(v);
            maxs[k] = maxs[k].max(v);
        }
    }

    position_of_min(frontier.points.len(), |p| {
        frontier.points[p]
            .objectives
            .iter()
            .enumerate()
            .map(|(k, &v)| (v - mins[k]) / (maxs[k] - mins[k] + NORMALIZE_EPS))
            .sum()
    })
}
