//! Shared `LeagueConfig` builders for unit tests across this crate's modules.
//!
//! Kept deliberately minimal; `tests/scenarios.rs` builds the richer end-to-end leagues (S1-S6).

use crate::model::{
    AvailabilityRow, ClubConfig, LeagueConfig, PreviousDivisionRow, TeamEntryRow,
};

/// Two clubs, one Mixed team each, two shared Mixed-typed dates with one court each.
///
/// This is scenario S1 from the testable-properties table: the minimal reverse-fixture pair.
pub fn single_league_two_clubs() -> LeagueConfig {
    let team = |availability_group: &str| TeamEntryRow {
        league_name: "Mixed".to_string(),
        team_rank: 'A',
        availability_group: availability_group.to_string(),
        home_nights_required: 1,
    };

    let availability = |date: &str| AvailabilityRow {
        date: date.to_string(),
        league_type: "Mixed".to_string(),
        weekday: "Tuesday".to_string(),
        available: "Group1".to_string(),
        num_concurrent_matches: 1,
        priority: false,
    };

    LeagueConfig {
        clubs: vec![
            ClubConfig {
                name: "Alpha".to_string(),
                teams: vec![team("Group1")],
                availability: vec![availability("02-Nov-2021"), availability("16-Nov-2021")],
            },
            ClubConfig {
                name: "Beta".to_string(),
                teams: vec![team("Group1")],
                availability: vec![availability("09-Nov-2021"), availability("23-Nov-2021")],
            },
        ],
        previous_division: vec![
            PreviousDivisionRow {
                club: "Alpha".to_string(),
                league: "Mixed".to_string(),
                team_rank: 'A',
                new_division: "1".to_string(),
            },
            PreviousDivisionRow {
                club: "Beta".to_string(),
                league: "Mixed".to_string(),
                team_rank: 'A',
                new_division: "1".to_string(),
            },
        ],
        predefined_fixtures: Vec::new(),
    }
}
