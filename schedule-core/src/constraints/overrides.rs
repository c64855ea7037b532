//! C11, C12 and C13: constraints driven by caller-supplied parameters rather than pure league
//! topology.

use std::collections::HashSet;

use good_lp::Constraint;

use super::{sum_of, BuildParams, Variables};
use crate::model::League;

/// C11 — at most `num_allowed_incorrect` scheduled FCSes may have the wrong league-type week.
pub fn bounded_incorrect_week(
    league: &League,
    vars: &Variables,
    num_allowed_incorrect: u32,
) -> Vec<Constraint> {
    let incorrect = league
        .fixture_court_slots
        .iter()
        .enumerate()
        .filter(|(_, fcs)| !fcs.is_correct_week)
        .map(|(id, _)| vars.of(id));
    vec![sum_of(incorrect).leq(num_allowed_incorrect as i32)]
}

/// C12 — at least `num_forced` scheduled FCSes must sit on a priority court slot.
pub fn forced_priority_slots(league: &League, vars: &Variables, num_forced: u32) -> Vec<Constraint> {
    let priority = league
        .fixture_court_slots
        .iter()
        .enumerate()
        .filter(|(_, fcs)| league.court_slots[fcs.court_slot].priority)
        .map(|(id, _)| vars.of(id));
    vec![sum_of(priority).geq(num_forced as i32)]
}

/// C13 — predefined fixtures are pinned to exactly one matching slot, and any FCS dated on or
/// before `params.as_of` that isn't part of a predefined fixture is forced to zero (the
/// schedule cannot retroactively assign a match to a day that's already passed).
pub fn predefined_fixtures(league: &League, vars: &Variables, params: &BuildParams) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    let mut pinned: HashSet<usize> = HashSet::new();

    for resolved in &params.predefined_fixtures {
        let fixture_id = league.teams[resolved.home_team]
            .home_fixture_ids
            .iter()
            .copied()
            .find(|&fid| league.fixtures[fid].away_team == resolved.away_team);

        let Some(fixture_id) = fixture_id else {
            log::warn!(
                "predefined fixture between teams {} and {} has no matching generated fixture",
                league.teams[resolved.home_team].name,
                league.teams[resolved.away_team].name
            );
            continue;
        };

        let matches: Vec<usize> = league.fixtures[fixture_id]
            .fixture_court_slot_ids
            .iter()
            .copied()
            .filter(|&fcs_id| league.court_slots[league.fixture_court_slots[fcs_id].court_slot].date == resolved.date)
            .collect();

        if matches.is_empty() {
            log::warn!(
                "predefined fixture \"{}\" has no court slot on {}",
                league.fixtures[fixture_id].name,
                league.dates[resolved.date].date_str
            );
            continue;
        }

        constraints.push(sum_of(matches.iter().copied().map(|id| vars.of(id))).eq(1));
        pinned.extend(matches);
    }

    for (fcs_id, fcs) in league.fixture_court_slots.iter().enumerate() {
        if pinned.contains(&fcs_id) {
            continue;
        }
        let date = league.dates[league.court_slots[fcs.court_slot].date].date;
        if date <= params.as_of {
            constraints.push(sum_of([vars.of(fcs_id)]).eq(0));
        }
    }

    constraints
}
