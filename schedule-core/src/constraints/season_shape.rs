//! C5, C6 and C7: constraints that shape how a season's fixtures spread across weeks.

use good_lp::Constraint;

use super::{sum_of, week_of, Variables};
use crate::model::League;

/// C5 — intra-club fixtures booked first.
///
/// A team with `k` intra-club home fixtures must play all of its intra-club fixtures (home or
/// away) either in the first `k` weeks of the season or the first `k` weeks after the
/// season's Christmas break; every other candidate slot for those fixtures is forced to zero.
pub fn intra_club_fixtures_first(league: &League, vars: &Variables) -> Vec<Constraint> {
    let w_min = league.min_week_number();
    let w_xmas = league.christmas_week_number();
    let mut constraints = Vec::new();

    for team in 0..league.teams.len() {
        let k = league.teams[team]
            .home_fixture_ids
            .iter()
            .filter(|&&fid| league.fixtures[fid].is_intra_club)
            .count() as i64;
        if k == 0 {
            continue;
        }

        let intra_fixtures = league.teams[team]
            .home_fixture_ids
            .iter()
            .chain(league.teams[team].away_fixture_ids.iter())
            .copied()
            .filter(|&fid| league.fixtures[fid].is_intra_club);

        for fixture_id in intra_fixtures {
            let disallowed: Vec<usize> = league.fixtures[fixture_id]
                .fixture_court_slot_ids
                .iter()
                .copied()
                .filter(|&fcs_id| {
                    let week = week_of(league, fcs_id);
                    let in_start_window = (0..k).contains(&(week - w_min));
                    let in_xmas_window = (0..k).contains(&(week - w_xmas));
                    !(in_start_window || in_xmas_window)
                })
                .collect();
            if !disallowed.is_empty() {
                constraints.push(sum_of(disallowed.into_iter().map(|id| vars.of(id))).leq(0));
            }
        }
    }

    constraints
}

/// C6 — at most (and, with a floor, at least) half of a team's fixtures fall before Christmas.
pub fn pre_christmas_ceiling_and_floor(league: &League, vars: &Variables) -> Vec<Constraint> {
    let w_xmas = league.christmas_week_number();
    let mut constraints = Vec::new();

    for team in 0..league.teams.len() {
        let fixtures: Vec<usize> = league.teams[team]
            .home_fixture_ids
            .iter()
            .chain(league.teams[team].away_fixture_ids.iter())
            .copied()
            .collect();
        if fixtures.is_empty() {
            continue;
        }
        let ceiling = (fixtures.len() as i32) / 2;
        let floor_value = ceiling.min(3);

        let pre_xmas_fcs = fixtures
            .iter()
            .flat_map(|&fid| league.fixtures[fid].fixture_court_slot_ids.iter().copied())
            .filter(|&fcs_id| week_of(league, fcs_id) <= w_xmas);

        let expr = sum_of(pre_xmas_fcs.map(|id| vars.of(id)));
        constraints.push(expr.clone().leq(ceiling));
        constraints.push(expr.geq(floor_value));
    }

    constraints
}

/// C7 — home/away balance before and after Christmas, and more fixtures after than before.
pub fn home_away_balance(league: &League, vars: &Variables, allowed_imbalance: i32) -> Vec<Constraint> {
    let w_xmas = league.christmas_week_number();
    let mut constraints = Vec::new();

    for team in 0..league.teams.len() {
        let home_fcs: Vec<usize> = league.teams[team]
            .home_fixture_ids
            .iter()
            .flat_map(|&fid| league.fixtures[fid].fixture_court_slot_ids.iter().copied())
            .collect();
        let away_fcs: Vec<usize> = league.teams[team]
            .away_fixture_ids
            .iter()
            .flat_map(|&fid| league.fixtures[fid].fixture_court_slot_ids.iter().copied())
            .collect();

        let pre_home = sum_of(
            home_fcs
                .iter()
                .copied()
                .filter(|&id| week_of(league, id) <= w_xmas)
                .map(|id| vars.of(id)),
        );
        let post_home = sum_of(
            home_fcs
                .iter()
                .copied()
                .filter(|&id| week_of(league, id) > w_xmas)
                .map(|id| vars.of(id)),
        );
        let pre_away = sum_of(
            away_fcs
                .iter()
                .copied()
                .filter(|&id| week_of(league, id) <= w_xmas)
                .map(|id| vars.of(id)),
        );
        let post_away = sum_of(
            away_fcs
                .iter()
                .copied()
                .filter(|&id| week_of(league, id) > w_xmas)
                .map(|id| vars.of(id)),
        );

        constraints.push((pre_home.clone() - pre_away.clone()).leq(allowed_imbalance));
        constraints.push((pre_away.clone() - pre_home.clone()).leq(allowed_imbalance));
        constraints.push((post_home.clone() - post_away.clone()).leq(allowed_imbalance));
        constraints.push((post_away.clone() - post_home.clone()).leq(allowed_imbalance));

        let pre_total = pre_home + pre_away;
        let post_total = post_home + post_away;
        constraints.push(pre_total.leq(post_total));
    }

    constraints
}
