//! C8, C9 and C10: constraints that relate two teams' fixtures to each other.

use good_lp::Constraint;

use super::{sum_of, week_of, Variables};
use crate::model::League;

/// Every unordered pair of teams in the same (league, division) that belong to different
/// clubs — the population C8 and C9 reason about.
fn unordered_inter_club_pairs(league: &League) -> Vec<(usize, usize)> {
    let mut pairs = Vec::new();
    for t1 in 0..league.teams.len() {
        for t2 in (t1 + 1)..league.teams.len() {
            let (a, b) = (&league.teams[t1], &league.teams[t2]);
            if a.league == b.league && a.division == b.division && a.club != b.club {
                pairs.push((t1, t2));
            }
        }
    }
    pairs
}

/// All FCSes of either fixture direction between `t1` and `t2`.
fn reverse_pair_fcs_ids(league: &League, t1: usize, t2: usize) -> Vec<usize> {
    let fixture_ids = league.teams[t1]
        .home_fixture_ids
        .iter()
        .copied()
        .filter(|&fid| league.fixtures[fid].away_team == t2)
        .chain(
            league.teams[t2]
                .home_fixture_ids
                .iter()
                .copied()
                .filter(|&fid| league.fixtures[fid].away_team == t1),
        );
    fixture_ids
        .flat_map(|fid| league.fixtures[fid].fixture_court_slot_ids.iter().copied())
        .collect()
}

/// C8 — reverse-fixture separation: no two candidate slots for the two fixtures between the
/// same pair of teams may both be chosen if their dates are within `weeks_separated` weeks.
pub fn reverse_fixture_separation(
    league: &League,
    vars: &Variables,
    weeks_separated: i64,
) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    for (t1, t2) in unordered_inter_club_pairs(league) {
        let fcs_ids = reverse_pair_fcs_ids(league, t1, t2);
        for i in 0..fcs_ids.len() {
            for j in (i + 1)..fcs_ids.len() {
                let (w1, w2) = (week_of(league, fcs_ids[i]), week_of(league, fcs_ids[j]));
                if (w1 - w2).abs() <= weeks_separated {
                    constraints.push(sum_of([vars.of(fcs_ids[i]), vars.of(fcs_ids[j])]).leq(1));
                }
            }
        }
    }
    constraints
}

/// C9 — at most one of the two reverse fixtures between a pair of teams is scheduled before
/// the season's Christmas week.
pub fn at_most_one_reverse_pre_christmas(league: &League, vars: &Variables) -> Vec<Constraint> {
    let w_xmas = league.christmas_week_number();
    unordered_inter_club_pairs(league)
        .into_iter()
        .map(|(t1, t2)| {
            let pre_xmas = reverse_pair_fcs_ids(league, t1, t2)
                .into_iter()
                .filter(|&id| week_of(league, id) < w_xmas);
            sum_of(pre_xmas.map(|id| vars.of(id))).leq(1)
        })
        .collect()
}

fn share_players(league: &League, t1: usize, t2: usize) -> bool {
    league.teams[t1].is_mixed() != league.teams[t2].is_mixed()
}

fn team_fcs_ids(league: &League, team: usize) -> impl Iterator<Item = usize> + '_ {
    league.teams[team]
        .home_fixture_ids
        .iter()
        .chain(league.teams[team].away_fixture_ids.iter())
        .flat_map(move |&fid| league.fixtures[fid].fixture_court_slot_ids.iter().copied())
}

/// C10 — two same-club teams that share players (one Mixed, one not) may not both have a
/// scheduled fixture in the same week.
pub fn shared_players_different_week(league: &League, vars: &Variables) -> Vec<Constraint> {
    let mut weeks: Vec<i64> = league.dates.iter().map(|d| d.week_number).collect();
    weeks.sort_unstable();
    weeks.dedup();

    let mut constraints = Vec::new();
    for club in &league.clubs {
        for i in 0..club.team_ids.len() {
            for j in (i + 1)..club.team_ids.len() {
                let (t1, t2) = (club.team_ids[i], club.team_ids[j]);
                if !share_players(league, t1, t2) {
                    continue;
                }
                for &week in &weeks {
                    let fcs_ids = team_fcs_ids(league, t1)
                        .chain(team_fcs_ids(league, t2))
                        .filter(|&id| week_of(league, id) == week);
                    let expr = sum_of(fcs_ids.map(|id| vars.of(id)));
                    constraints.push(expr.leq(1));
                }
            }
        }
    }
    constraints
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generator::generate_fixtures;
    use crate::model::League;
    use crate::test_support::single_league_two_clubs;

    #[test]
    fn reverse_pair_constraints_exist_for_the_one_inter_club_pair() {
        let mut league = League::from_config(&single_league_two_clubs()).unwrap();
        generate_fixtures(&mut league);
        let vars = Variables::declare(&league);
        assert_eq!(at_most_one_reverse_pre_christmas(&league, &vars).len(), 1);
    }

    #[test]
    fn no_shared_player_constraints_without_a_mixed_nonmixed_split() {
        let mut league = League::from_config(&single_league_two_clubs()).unwrap();
        generate_fixtures(&mut league);
        let vars = Variables::declare(&league);
        assert!(shared_players_different_week(&league, &vars).is_empty());
    }
}
