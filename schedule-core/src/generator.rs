//! Fixture generation (§4.1): turns a populated [`League`] into the full set of candidate
//! [`Fixture`]s and [`FixtureCourtSlot`]s the constraint builder will choose between.

use crate::model::{Fixture, FixtureCourtSlot, League};

/// Builds every fixture and every candidate fixture/court-slot pairing.
///
/// For each ordered pair of distinct teams sharing a (league, division), creates one
/// [`Fixture`]. For each fixture, creates one [`FixtureCourtSlot`] per court slot owned by the
/// home team's club that the home team is eligible to use.
///
/// Idempotent on a freshly-built `League`: call this exactly once, before any constraints are
/// built. Calling it twice on the same league would duplicate fixtures; nothing here guards
/// against that since the crate's own driver never does it.
pub fn generate_fixtures(league: &mut League) {
    let team_count = league.teams.len();

    for home in 0..team_count {
        for away in 0..team_count {
            if home == away {
                continue;
            }
            let (h, a) = (&league.teams[home], &league.teams[away]);
            if h.league != a.league || h.division != a.division {
                continue;
            }

            let fixture_id = league.fixtures.len();
            let name = format!("{} vs {}", h.name, a.name);
            let is_intra_club = h.club == a.club;
            league.fixtures.push(Fixture {
                home_team: home,
                away_team: away,
                name,
                is_intra_club,
                fixture_court_slot_ids: Vec::new(),
            });
            league.teams[home].home_fixture_ids.push(fixture_id);
            league.teams[away].away_fixture_ids.push(fixture_id);

            let home_club = league.teams[home].club;
            let slot_ids: Vec<usize> = league.clubs[home_club]
                .court_slot_ids
                .iter()
                .copied()
                .filter(|&slot_id| league.court_slots[slot_id].team_ids.contains(&home))
                .collect();

            for slot_id in slot_ids {
                create_fixture_court_slot(league, fixture_id, slot_id);
            }
        }
    }
}

fn create_fixture_court_slot(league: &mut League, fixture_id: usize, slot_id: usize) {
    let fixture = &league.fixtures[fixture_id];
    let slot = &league.court_slots[slot_id];
    let date = &league.dates[slot.date];

    let identifier = format!(
        "{}|{}|{}",
        fixture.name, date.date_str, slot.concurrency
    )
    .replace(' ', "_");

    let home_is_mixed = league.teams[fixture.home_team].is_mixed();
    let date_is_mixed = crate::model::is_mixed_league(&date.league_type);
    let is_correct_week = date_is_mixed == home_is_mixed;

    let fcs_id = league.fixture_court_slots.len();
    league.fixture_court_slots.push(FixtureCourtSlot {
        fixture: fixture_id,
        court_slot: slot_id,
        identifier,
        is_correct_week,
        is_scheduled: false,
    });
    league.fixtures[fixture_id].fixture_court_slot_ids.push(fcs_id);
    league.court_slots[slot_id].fixture_court_slot_ids.push(fcs_id);
}
