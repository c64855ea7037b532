//! Reporting (§6): flattens a solved [`League`] into the three output tables, emittable as
//! either JSON row vectors or flat CSV text.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::League;

/// One row of the "Match Fixture slots" table: every FCS, scheduled or not.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FixtureSlotRow {
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub court_no: u32,
    pub is_scheduled: u8,
    pub league: String,
    pub division: u32,
    pub home_club: String,
    pub away_club: String,
    pub is_correct_week: bool,
}

/// One row of the "Match Fixture slots by team" table: a [`FixtureSlotRow`] duplicated once for
/// each team (home and away) that appears in it.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct FixtureSlotByTeamRow {
    pub team: String,
    pub home_team: String,
    pub away_team: String,
    pub date: String,
    pub court_no: u32,
    pub is_scheduled: u8,
    pub league: String,
    pub division: u32,
    pub home_club: String,
    pub away_club: String,
    pub is_correct_week: bool,
}

/// One row of the "Teams Entered" table.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct TeamsEnteredRow {
    pub league: String,
    pub club: String,
    pub rank: char,
}

/// All three output tables for one solved league.
#[derive(Debug, Clone, Serialize, Deserialize, schemars::JsonSchema)]
pub struct OutputTables {
    pub fixture_slots: Vec<FixtureSlotRow>,
    pub fixture_slots_by_team: Vec<FixtureSlotByTeamRow>,
    pub teams_entered: Vec<TeamsEnteredRow>,
}

/// Failures while serializing output tables. Never raised by the scheduling algorithm itself —
/// only by the CSV/JSON encoding step.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("failed to write CSV row: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV buffer: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV output was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Builds the three output tables from a league after [`crate::solver::schedule`] has run.
pub fn build_tables(league: &League) -> OutputTables {
    let mut fixture_slots = Vec::with_capacity(league.fixture_court_slots.len());
    let mut fixture_slots_by_team = Vec::new();

    for fcs in &league.fixture_court_slots {
        let fixture = &league.fixtures[fcs.fixture];
        let slot = &league.court_slots[fcs.court_slot];
        let date = &league.dates[slot.date];
        let home = &league.teams[fixture.home_team];
        let away = &league.teams[fixture.away_team];
        let home_club = &league.clubs[home.club].name;
        let away_club = &league.clubs[away.club].name;

        let row = FixtureSlotRow {
            home_team: home.name.clone(),
            away_team: away.name.clone(),
            date: date.date_str.clone(),
            court_no: slot.concurrency,
            is_scheduled: u8::from(fcs.is_scheduled),
            league: home.league.clone(),
            division: home.division,
            home_club: home_club.clone(),
            away_club: away_club.clone(),
            is_correct_week: fcs.is_correct_week,
        };

        for team_name in [home.name.clone(), away.name.clone()] {
            fixture_slots_by_team.push(FixtureSlotByTeamRow {
                team: team_name,
                home_team: row.home_team.clone(),
                away_team: row.away_team.clone(),
                date: row.date.clone(),
                court_no: row.court_no,
                is_scheduled: row.is_scheduled,
                league: row.league.clone(),
                division: row.division,
                home_club: row.home_club.clone(),
                away_club: row.away_club.clone(),
                is_correct_week: row.is_correct_week,
            });
        }

        fixture_slots.push(row);
    }

    let teams_entered = league
        .teams
        .iter()
        .map(|team| TeamsEnteredRow {
            league: team.league.clone(),
            club: league.clubs[team.club].name.clone(),
            rank: team.rank,
        })
        .collect();

    OutputTables {
        fixture_slots,
        fixture_slots_by_team,
        teams_entered,
    }
}

/// Serializes any row slice to flat CSV text.
pub fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, ReportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer.into_inner().map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}

impl OutputTables {
    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
