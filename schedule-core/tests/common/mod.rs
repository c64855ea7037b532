//! League builders for the end-to-end scenarios (S1-S6) described in the testable-properties
//! section of the scheduling specification this crate implements.

use chrono::{Datelike, NaiveDate};
use schedule_core::model::{
    AvailabilityRow, ClubConfig, LeagueConfig, PreviousDivisionRow, TeamEntryRow,
};

/// One weekly availability row per week starting at `start`, all sharing `availability_group`
/// `"Group1"` and `num_concurrent_matches` concurrency.
pub fn weekly_availability(
    start: NaiveDate,
    weeks: i64,
    concurrency: u32,
    league_type: &str,
) -> Vec<AvailabilityRow> {
    (0..weeks)
        .map(|w| {
            let date = start + chrono::Duration::days(w * 7);
            AvailabilityRow {
                date: date.format("%d-%b-%Y").to_string(),
                league_type: league_type.to_string(),
                weekday: weekday_name(&date).to_string(),
                available: "Group1".to_string(),
                num_concurrent_matches: concurrency,
                priority: false,
            }
        })
        .collect()
}

/// Same as [`weekly_availability`] but alternating `league_type` between `a` and `b` week by
/// week, and flagging every slot as priority when `priority` is set.
pub fn weekly_availability_alternating(
    start: NaiveDate,
    weeks: i64,
    concurrency: u32,
    a: &str,
    b: &str,
    priority: bool,
) -> Vec<AvailabilityRow> {
    (0..weeks)
        .map(|w| {
            let date = start + chrono::Duration::days(w * 7);
            let league_type = if w % 2 == 0 { a } else { b };
            AvailabilityRow {
                date: date.format("%d-%b-%Y").to_string(),
                league_type: league_type.to_string(),
                weekday: weekday_name(&date).to_string(),
                available: "Group1".to_string(),
                num_concurrent_matches: concurrency,
                priority,
            }
        })
        .collect()
}

fn weekday_name(date: &NaiveDate) -> &'static str {
    match date.weekday() {
        chrono::Weekday::Mon => "Monday",
        chrono::Weekday::Tue => "Tuesday",
        chrono::Weekday::Wed => "Wednesday",
        chrono::Weekday::Thu => "Thursday",
        chrono::Weekday::Fri => "Friday",
        chrono::Weekday::Sat => "Saturday",
        chrono::Weekday::Sun => "Sunday",
    }
}

pub fn team(league_name: &str, rank: char, availability_group: &str) -> TeamEntryRow {
    TeamEntryRow {
        league_name: league_name.to_string(),
        team_rank: rank,
        availability_group: availability_group.to_string(),
        home_nights_required: 1,
    }
}

pub fn division_row(club: &str, league: &str, rank: char, division: u32) -> PreviousDivisionRow {
    PreviousDivisionRow {
        club: club.to_string(),
        league: league.to_string(),
        team_rank: rank,
        new_division: division.to_string(),
    }
}

pub fn club(name: &str, teams: Vec<TeamEntryRow>, availability: Vec<AvailabilityRow>) -> ClubConfig {
    ClubConfig {
        name: name.to_string(),
        teams,
        availability,
    }
}

pub fn season_anchor() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 11, 1).unwrap()
}

/// S1: two clubs, one Mixed team each, two Mixed-typed dates, one court each.
pub fn s1_trivial() -> LeagueConfig {
    let start = season_anchor();
    LeagueConfig {
        clubs: vec![
            club(
                "Alpha",
                vec![team("Mixed", 'A', "Group1")],
                weekly_availability(start, 2, 1, "Mixed"),
            ),
            club(
                "Beta",
                vec![team("Mixed", 'A', "Group1")],
                weekly_availability(start, 2, 1, "Mixed"),
            ),
        ],
        previous_division: vec![
            division_row("Alpha", "Mixed", 'A', 1),
            division_row("Beta", "Mixed", 'A', 1),
        ],
        predefined_fixtures: Vec::new(),
    }
}

/// S2: same shape as S1, but every date is typed "Open/Ladies" while both teams play "Mixed" —
/// every FCS is incorrect-week.
pub fn s2_wrong_week_type() -> LeagueConfig {
    let mut config = s1_trivial();
    for c in &mut config.clubs {
        for row in &mut c.availability {
            row.league_type = "Open/Ladies".to_string();
        }
    }
    config
}

/// S3: one club fields two Mixed teams (ranks A and B); two further single-team Mixed clubs
/// complete the division. A generous multi-week season gives the solver room to actually
/// schedule the intra-club fixture, so the C5 window it lands in can be checked.
pub fn s3_intra_club_first() -> LeagueConfig {
    let start = season_anchor();
    let weeks = 20;
    LeagueConfig {
        clubs: vec![
            club(
                "Home",
                vec![team("Mixed", 'A', "Group1"), team("Mixed", 'B', "Group1")],
                weekly_availability(start, weeks, 2, "Mixed"),
            ),
            club(
                "Away1",
                vec![team("Mixed", 'A', "Group1")],
                weekly_availability(start, weeks, 1, "Mixed"),
            ),
            club(
                "Away2",
                vec![team("Mixed", 'A', "Group1")],
                weekly_availability(start, weeks, 1, "Mixed"),
            ),
        ],
        previous_division: vec![
            division_row("Home", "Mixed", 'A', 1),
            division_row("Home", "Mixed", 'B', 1),
            division_row("Away1", "Mixed", 'A', 1),
            division_row("Away2", "Mixed", 'A', 1),
        ],
        predefined_fixtures: Vec::new(),
    }
}

/// S4: one club fields an Open team and a Mixed team (shared players, §4.2 C10), each playing
/// a separate opponent club in its own league.
pub fn s4_shared_players() -> LeagueConfig {
    let start = season_anchor();
    let weeks = 12;
    LeagueConfig {
        clubs: vec![
            club(
                "Home",
                vec![team("Open", 'A', "Group1"), team("Mixed", 'A', "Group1")],
                weekly_availability_alternating(start, weeks, 2, "Open", "Mixed", false),
            ),
            club(
                "OpponentOpen",
                vec![team("Open", 'A', "Group1")],
                weekly_availability(start, weeks, 1, "Open"),
            ),
            club(
                "OpponentMixed",
                vec![team("Mixed", 'A', "Group1")],
                weekly_availability(start, weeks, 1, "Mixed"),
            ),
        ],
        previous_division: vec![
            division_row("Home", "Open", 'A', 1),
            division_row("Home", "Mixed", 'A', 1),
            division_row("OpponentOpen", "Open", 'A', 1),
            division_row("OpponentMixed", "Mixed", 'A', 1),
        ],
        predefined_fixtures: Vec::new(),
    }
}

/// S6: four single-team Mixed clubs, every court slot flagged priority, so the priority floor
/// is satisfiable purely by scheduling enough fixtures.
pub fn s6_priority_floor() -> LeagueConfig {
    let start = season_anchor();
    let weeks = 14;
    let mut clubs = Vec::new();
    for name in ["Alpha", "Beta", "Gamma", "Delta"] {
        let mut availability = weekly_availability(start, weeks, 2, "Mixed");
        for row in &mut availability {
            row.priority = true;
        }
        clubs.push(club(name, vec![team("Mixed", 'A', "Group1")], availability));
    }
    let previous_division = clubs
        .iter()
        .map(|c| division_row(&c.name, "Mixed", 'A', 1))
        .collect();
    LeagueConfig {
        clubs,
        previous_division,
        predefined_fixtures: Vec::new(),
    }
}
