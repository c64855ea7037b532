//! C3 and C4: sliding-week exclusivity constraints on a single team's fixtures.

use std::collections::HashMap;

use good_lp::Constraint;

use super::{sum_of, Variables};
use crate::model::League;

/// Every FCS touching `team`, paired with its week number and whether `team` is home in it.
fn team_fcs(league: &League, team: usize) -> Vec<(usize, i64, bool)> {
    let mut out = Vec::new();
    for &fixture_id in &league.teams[team].home_fixture_ids {
        for &fcs_id in &league.fixtures[fixture_id].fixture_court_slot_ids {
            let week = league.dates[league.court_slots[league.fixture_court_slots[fcs_id].court_slot].date].week_number;
            out.push((fcs_id, week, true));
        }
    }
    for &fixture_id in &league.teams[team].away_fixture_ids {
        for &fcs_id in &league.fixtures[fixture_id].fixture_court_slot_ids {
            let week = league.dates[league.court_slots[league.fixture_court_slots[fcs_id].court_slot].date].week_number;
            out.push((fcs_id, week, false));
        }
    }
    out
}

/// C3 — one fixture per rolling `weeks_separated`-week window per team.
///
/// Buckets each FCS into every window start it participates in (§4.2's "bucket over `w ∈
/// [W(fcs), W(fcs)+weeks_separated)`"), then caps each bucket's sum at 1.
pub fn one_fixture_per_rolling_window(
    league: &League,
    vars: &Variables,
    weeks_separated: i64,
) -> Vec<Constraint> {
    let mut buckets: HashMap<(usize, i64), Vec<usize>> = HashMap::new();
    for team in 0..league.teams.len() {
        for (fcs_id, week, _is_home) in team_fcs(league, team) {
            for delta in 0..weeks_separated {
                buckets.entry((team, week - delta)).or_default().push(fcs_id);
            }
        }
    }

    buckets
        .into_values()
        .map(|fcs_ids| sum_of(fcs_ids.into_iter().map(|id| vars.of(id))).leq(1))
        .collect()
}

/// C4 — at most `max_per_period` home (or away) fixtures per `weeks_separated`-week window per
/// team. Buckets are keyed by `(team, window start, is_home)`.
pub fn home_or_away_cap_per_window(
    league: &League,
    vars: &Variables,
    weeks_separated: i64,
    max_per_period: i32,
) -> Vec<Constraint> {
    let mut buckets: HashMap<(usize, i64, bool), Vec<usize>> = HashMap::new();
    for team in 0..league.teams.len() {
        for (fcs_id, week, is_home) in team_fcs(league, team) {
            for delta in 0..weeks_separated {
                buckets
                    .entry((team, week - delta, is_home))
                    .or_default()
                    .push(fcs_id);
            }
        }
    }

    buckets
        .into_values()
        .map(|fcs_ids| sum_of(fcs_ids.into_iter().map(|id| vars.of(id))).leq(max_per_period))
        .collect()
}
