//! Objective Builder (§4.3): a single weighted-lexicographic linear objective.
//!
//! Three tiers are folded into one sum with weights chosen so each tier strictly dominates the
//! next (10^8, 10^5, 1) — the usual trick for expressing a lexicographic preference as a single
//! MILP objective without a multi-pass solve.

use good_lp::Expression;

use crate::constraints::{sum_of, week_of, Variables};
use crate::model::League;

const PRIMARY_WEIGHT: f64 = 1e8;
const SECONDARY_WEIGHT: f64 = 1e5;

/// Builds the objective expression to maximize.
pub fn build(league: &League, vars: &Variables) -> Expression {
    let w_min = league.min_week_number();
    let w_xmas = league.christmas_week_number();
    let ideal_end_week = 2 * w_xmas - w_min;

    let primary = sum_of((0..league.fixture_court_slots.len()).map(|id| vars.of(id)));

    let secondary = sum_of(
        (0..league.fixture_court_slots.len())
            .filter(|&id| week_of(league, id) < w_xmas)
            .map(|id| vars.of(id)),
    );

    let mut tertiary = Expression::from(0.0);
    for id in 0..league.fixture_court_slots.len() {
        let week = week_of(league, id);
        if week > ideal_end_week {
            tertiary += sum_of([vars.of(id)]) * (week as f64);
        }
    }

    primary * PRIMARY_WEIGHT + secondary * SECONDARY_WEIGHT - tertiary
}
