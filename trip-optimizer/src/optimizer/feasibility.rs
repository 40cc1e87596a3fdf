//! Hard-constraint feasibility filtering.
//!
//! Filtering runs before either solver: alternatives that bust the time
//! ceiling or the budget (ticket plus reference lodging) never reach
//! scoring. The filter preserves candidate order and reports positions
//! into the original list, so downstream indices stay meaningful.

use crate::domain::{Alternative, Constraints};

/// Whether one alternative satisfies both hard constraints.
///
/// Feasible means `time <= time_ceiling` and
/// `price + lodging_reference_cost <= budget`. Bounds are inclusive.
pub fn is_feasible(alternative: &Alternative, constraints: &Constraints) -> bool {
    is_feasible_metrics(alternative.time_hours(), alternative.price(), constraints)
}

/// Feasibility check on raw metrics, shared with solvers that work on
/// parallel arrays rather than `Alternative` values.
pub fn is_feasible_metrics(time_hours: f64, price: f64, constraints: &Constraints) -> bool {
    time_hours <= constraints.time_ceiling_hours()
        && price + constraints.lodging_reference_cost() <= constraints.budget()
}

/// Returns the original-list indices of all feasible alternatives,
/// in their original order.
///
/// # Examples
///
/// ```
/// use trip_optimizer::domain::{Alternative, Constraints};
/// use trip_optimizer::optimizer::feasible_indices;
///
/// let alternatives = vec![
///     Alternative::new(10.0, 2000.0, 0, "A", "B").unwrap(),
///     Alternative::new(15.0, 1500.0, 1, "A", "B").unwrap(),
///     Alternative::new(30.0, 1000.0, 2, "A", "B").unwrap(),
/// ];
/// let constraints = Constraints::new(20.0, 1800.0).unwrap();
///
/// // Index 0 busts the budget, index 2 busts the ceiling
/// assert_eq!(feasible_indices(&alternatives, &constraints), vec![1]);
/// ```
pub fn feasible_indices(alternatives: &[Alternative], constraints: &Constraints) -> Vec<usize> {
    alternatives
        .iter()
        .enumerate()
        .filter(|(_, alt)| is_feasible(alt, constraints))
        .map(|(i, _)| i)
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn alternative_strategy() -> impl Strategy<Value = Alternative> {
        (0.0f64..200.0, 0.0f64..10_000.0, 0u32..6).prop_map(|(time, price, connections)| {
            Alternative::new(time, price, connections, "A", "B").unwrap()
        })
    }

    fn alternatives_strategy() -> impl Strategy<Value = Vec<Alternative>> {
        prop::collection::vec(alternative_strategy(), 0..25)
    }

    proptest! {
        /// Every index the filter returns satisfies both constraints, and
        /// every index it drops violates at least one.
        #[test]
        fn kept_iff_feasible(
            alternatives in alternatives_strategy(),
            ceiling in 0.0f64..200.0,
            budget in 0.0f64..10_000.0,
            lodging in 0.0f64..2_000.0,
        ) {
            let constraints = Constraints::new(ceiling, budget)
                .unwrap()
                .with_lodging(lodging)
                .unwrap();
            let kept = feasible_indices(&alternatives, &constraints);

            for (i, alt) in alternatives.iter().enumerate() {
                let within = alt.time_hours() <= ceiling
                    && alt.price() + lodging <= budget;
                prop_assert_eq!(
                    kept.contains(&i),
                    within,
                    "index {} kept={} but within={}",
                    i,
                    kept.contains(&i),
                    within
                );
            }
        }

        /// Returned indices are strictly increasing (original order).
        #[test]
        fn indices_strictly_increasing(
            alternatives in alternatives_strategy(),
            ceiling in 0.0f64..200.0,
            budget in 0.0f64..10_000.0,
        ) {
            let constraints = Constraints::new(ceiling, budget).unwrap();
            let kept = feasible_indices(&alternatives, &constraints);

            for window in kept.windows(2) {
                prop_assert!(window[0] < window[1]);
            }
        }

        /// Filtering twice with the same constraints changes nothing.
        #[test]
        fn filter_is_idempotent(
            alternatives in alternatives_strategy(),
            ceiling in 0.0f64..200.0,
            budget in 0.0f64..10_000.0,
        ) {
            let constraints = Constraints::new(ceiling, budget).unwrap();
            let kept = feasible_indices(&alternatives, &constraints);

            let survivors: Vec<Alternative> =
                kept.iter().map(|&i| alternatives[i].clone()).collect();
            let rekept = feasible_indices(&survivors, &constraints);

            prop_assert_eq!(rekept, (0..survivors.len()).collect::<Vec<_>>());
        }
    }
}
