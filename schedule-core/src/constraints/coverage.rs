//! C1 and C2: the two constraints that keep fixtures and court slots from colliding with
//! themselves.

use good_lp::Constraint;

use super::{sum_of, Variables};
use crate::model::League;

/// C1 — one slot per fixture: `Σ_{fcs∈f} x[fcs] ≤ 1` for every fixture.
///
/// Deliberately `≤` rather than `=`: a fixture that ends up with no scheduled FCS is left for
/// the driver to detect and report (§4.4 step 4), rather than making the whole model
/// infeasible whenever a single fixture has no eligible court slot.
pub fn one_slot_per_fixture(league: &League, vars: &Variables) -> Vec<Constraint> {
    league
        .fixtures
        .iter()
        .map(|fixture| {
            let lhs = sum_of(fixture.fixture_court_slot_ids.iter().map(|&id| vars.of(id)));
            lhs.leq(1)
        })
        .collect()
}

/// C2 — one fixture per court slot: `Σ_{fcs∈c} x[fcs] ≤ 1` for every court slot.
pub fn one_fixture_per_court_slot(league: &League, vars: &Variables) -> Vec<Constraint> {
    league
        .court_slots
        .iter()
        .map(|slot| {
            let lhs = sum_of(slot.fixture_court_slot_ids.iter().map(|&id| vars.of(id)));
            lhs.leq(1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_fixtures;
    use crate::model::League;
    use crate::test_support::single_league_two_clubs;

    #[test]
    fn emits_one_constraint_per_fixture_and_per_slot() {
        let mut league = League::from_config(&single_league_two_clubs()).unwrap();
        generate_fixtures(&mut league);
        let vars = Variables::declare(&league);

        assert_eq!(one_slot_per_fixture(&league, &vars).len(), league.fixtures.len());
        assert_eq!(
            one_fixture_per_court_slot(&league, &vars).len(),
            league.court_slots.len()
        );
    }
}
