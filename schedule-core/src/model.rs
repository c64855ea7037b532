//! The league data model: clubs, teams, dates, court slots, fixtures and the
//! fixture/court-slot candidates the solver chooses between.
//!
//! Everything here is built once, in one pass, from a [`LeagueConfig`] and then treated as
//! immutable by every downstream component except for [`FixtureCourtSlot::is_scheduled`],
//! which the solver driver fills in after solving.
//!
//! # Internal representation
//!
//! Entities live in flat arenas (`Vec<T>`) on [`League`] and refer to each other by integer
//! index rather than by reference, so the object graph (club ↔ team ↔ fixture ↔ court slot)
//! never needs `Rc`/`RefCell` or lifetimes. A handful of `HashMap`s provide O(1) lookup from
//! the string identifiers callers and constraints use back to those indices.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One badminton club: a set of teams and the court slots it makes available.
#[derive(Debug, Clone, Serialize)]
pub struct Club {
    pub name: String,
    pub team_ids: Vec<usize>,
    pub court_slot_ids: Vec<usize>,
}

/// One team: a club entered in one league type at one rank, assigned a division.
///
/// Identified by `"{club} {league} {rank}"` (§3).
#[derive(Debug, Clone, Serialize)]
pub struct Team {
    pub club: usize,
    pub league: String,
    pub rank: char,
    pub availability_group: String,
    /// Set by [`League::from_config`] from the previous-league-organisation table.
    /// Zero means "not yet assigned" and is rejected before fixture generation.
    pub division: u32,
    pub name: String,
    pub home_fixture_ids: Vec<usize>,
    pub away_fixture_ids: Vec<usize>,
}

impl Team {
    pub fn is_mixed(&self) -> bool {
        is_mixed_league(&self.league)
    }
}

/// True for any league-type tag the scheduler treats as "Mixed" (case-insensitive).
pub fn is_mixed_league(league_type: &str) -> bool {
    league_type.eq_ignore_ascii_case("mixed")
}

/// A calendar day on which a club may offer court slots.
#[derive(Debug, Clone, Serialize)]
pub struct LeagueDate {
    pub date: NaiveDate,
    pub date_str: String,
    pub league_type: String,
    pub weekday: String,
    /// Days since the season anchor, floor-divided by 7 (§3).
    pub week_number: i64,
    pub court_slot_ids: Vec<usize>,
}

/// One playable court, at one club, on one date.
///
/// Composite key is `(club, date, concurrency)`; `team_ids` lists which of the club's teams
/// this slot is available to (the availability-group match).
#[derive(Debug, Clone, Serialize)]
pub struct CourtSlot {
    pub date: usize,
    pub club: usize,
    pub concurrency: u32,
    pub priority: bool,
    pub name: String,
    pub team_ids: Vec<usize>,
    pub fixture_court_slot_ids: Vec<usize>,
}

/// A directional match between two teams. `A@B` and `B@A` are distinct fixtures.
#[derive(Debug, Clone, Serialize)]
pub struct Fixture {
    pub home_team: usize,
    pub away_team: usize,
    pub name: String,
    pub is_intra_club: bool,
    pub fixture_court_slot_ids: Vec<usize>,
}

/// A candidate assignment of a [`Fixture`] to a [`CourtSlot`].
///
/// One boolean decision variable in the constraint model corresponds to exactly one FCS,
/// keyed by [`FixtureCourtSlot::identifier`].
#[derive(Debug, Clone, Serialize)]
pub struct FixtureCourtSlot {
    pub fixture: usize,
    pub court_slot: usize,
    pub identifier: String,
    /// `(court_slot.date.league_type == "Mixed") == (fixture.home_team.league == "Mixed")`.
    pub is_correct_week: bool,
    /// Written by the solver driver after solving; `false` until then.
    pub is_scheduled: bool,
}

/// Errors that can occur while building a [`League`] from a [`LeagueConfig`].
///
/// These are all fatal and surfaced before any solving is attempted (§7).
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("team \"{0}\" has no entry in the previous-league-organisation table (division is unset)")]
    MissingDivision(String),

    #[error("team \"{team}\" has a non-integer division in the previous-league-organisation table: {value:?}")]
    InvalidDivision { team: String, value: String },

    #[error("previous-league-organisation table references unknown club {0:?}")]
    UnknownClubInDivisionTable(String),

    #[error("previous-league-organisation table references unknown team {league:?} {rank:?} at club {club:?}")]
    UnknownTeamInDivisionTable {
        club: String,
        league: String,
        rank: char,
    },

    #[error("availability row for club {club:?} could not parse date {date:?}: {source}")]
    InvalidDate {
        club: String,
        date: String,
        source: chrono::ParseError,
    },

    #[error("attempted to register team \"{team}\" (club {team_club:?}) on a court slot owned by club {slot_club:?}")]
    CrossClubCourtSlot {
        team: String,
        team_club: String,
        slot_club: String,
    },

    #[error("predefined fixture references unknown team {0:?}")]
    UnknownTeam(String),

    #[error("predefined fixture references unknown date {0:?} (expected dd/mm/yyyy): {1}")]
    UnknownDate(String, chrono::ParseError),

    #[error("predefined fixture date {0} does not match any date in the league's availability tables")]
    DateNotInSeason(NaiveDate),
}

/// One row of the teams-entering table (§6).
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct TeamEntryRow {
    pub league_name: String,
    pub team_rank: char,
    pub availability_group: String,
    #[serde(default)]
    pub home_nights_required: u32,
}

/// One row of a club's availability table (§6).
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct AvailabilityRow {
    /// `dd-MMM-yyyy`, e.g. `"15-Nov-2021"`.
    pub date: String,
    pub league_type: String,
    pub weekday: String,
    /// An availability-group label, or the literal string `"Unavailable"`.
    pub available: String,
    pub num_concurrent_matches: u32,
    #[serde(default)]
    pub priority: bool,
}

/// One row of the previous-league-organisation table (§6).
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct PreviousDivisionRow {
    pub club: String,
    pub league: String,
    pub team_rank: char,
    /// Kept as a string so a non-integer value is a reportable [`ConfigError`] rather than a
    /// silent deserialization failure.
    pub new_division: String,
}

/// One row of the optional predefined-fixtures table (§6).
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct PredefinedFixtureRow {
    pub division: String,
    pub home_team: String,
    pub away_team: String,
    pub status: String,
    /// `dd/mm/yyyy`.
    pub match_date: String,
    pub time: String,
    pub courts: String,
}

/// One club's configuration: its name, its entered teams, and its court availability.
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema)]
pub struct ClubConfig {
    pub name: String,
    pub teams: Vec<TeamEntryRow>,
    pub availability: Vec<AvailabilityRow>,
}

/// The full external input contract (§6): everything needed to build a [`League`].
///
/// This is the boundary of "in scope" for this crate. Turning an actual spreadsheet/workbook
/// into a `LeagueConfig` is an external collaborator's job (§1).
#[derive(Debug, Clone, Deserialize, Serialize, schemars::JsonSchema, Default)]
pub struct LeagueConfig {
    pub clubs: Vec<ClubConfig>,
    pub previous_division: Vec<PreviousDivisionRow>,
    #[serde(default)]
    pub predefined_fixtures: Vec<PredefinedFixtureRow>,
}

/// Appends a trailing rank letter to a team name lacking one (§6, §8 property 12).
///
/// `fix("X Open A") == "X Open A"`; `fix("X Open") == "X Open A"`.
pub fn fixup_team_name(name: &str) -> String {
    let mut chars = name.chars().rev();
    let last = chars.next();
    let before_last = chars.next();
    let has_trailing_rank = matches!(last, Some('A'..='G')) && before_last == Some(' ');
    if has_trailing_rank {
        name.to_string()
    } else {
        format!("{name} A")
    }
}

/// The in-memory league model (§3).
///
/// Built once by [`League::from_config`], then enriched in place by
/// [`crate::generator::generate_fixtures`], and finally annotated by the solver driver.
#[derive(Debug, Clone, Serialize)]
pub struct League {
    pub clubs: Vec<Club>,
    pub teams: Vec<Team>,
    pub dates: Vec<LeagueDate>,
    pub court_slots: Vec<CourtSlot>,
    pub fixtures: Vec<Fixture>,
    pub fixture_court_slots: Vec<FixtureCourtSlot>,

    #[serde(skip)]
    date_by_str: HashMap<String, usize>,
    #[serde(skip)]
    team_by_name: HashMap<String, usize>,
}

impl League {
    /// Builds the league model from its external configuration (§3.1).
    ///
    /// Order of operations mirrors the original per-club ingestion: clubs and their teams and
    /// court slots first, then the previous-league-organisation table assigns divisions. Any
    /// team left at division zero afterwards is a fatal [`ConfigError`].
    pub fn from_config(config: &LeagueConfig) -> Result<League, ConfigError> {
        let mut league = League {
            clubs: Vec::new(),
            teams: Vec::new(),
            dates: Vec::new(),
            court_slots: Vec::new(),
            fixtures: Vec::new(),
            fixture_court_slots: Vec::new(),
            date_by_str: HashMap::new(),
            team_by_name: HashMap::new(),
        };

        for club_config in &config.clubs {
            league.add_club(club_config)?;
        }

        league.apply_previous_divisions(&config.previous_division)?;

        for team in &league.teams {
            if team.division == 0 {
                return Err(ConfigError::MissingDivision(team.name.clone()));
            }
        }

        Ok(league)
    }

    fn add_club(&mut self, config: &ClubConfig) -> Result<(), ConfigError> {
        let club_id = self.clubs.len();
        self.clubs.push(Club {
            name: config.name.clone(),
            team_ids: Vec::new(),
            court_slot_ids: Vec::new(),
        });

        for row in &config.teams {
            let team_id = self.teams.len();
            let name = format!("{} {} {}", config.name, row.league_name, row.team_rank);
            self.teams.push(Team {
                club: club_id,
                league: row.league_name.clone(),
                rank: row.team_rank,
                availability_group: row.availability_group.clone(),
                division: 0,
                name: name.clone(),
                home_fixture_ids: Vec::new(),
                away_fixture_ids: Vec::new(),
            });
            self.team_by_name.insert(name, team_id);
            self.clubs[club_id].team_ids.push(team_id);
        }

        for row in &config.availability {
            if row.available.eq_ignore_ascii_case("unavailable") {
                continue;
            }
            let date_id = self.intern_date(&config.name, row)?;
            for concurrency in 0..row.num_concurrent_matches {
                let slot_id = self.court_slots.len();
                let slot_name = format!("{} {} {}", config.name, row.date, concurrency);
                self.court_slots.push(CourtSlot {
                    date: date_id,
                    club: club_id,
                    concurrency,
                    priority: row.priority,
                    name: slot_name,
                    team_ids: Vec::new(),
                    fixture_court_slot_ids: Vec::new(),
                });
                self.dates[date_id].court_slot_ids.push(slot_id);
                self.clubs[club_id].court_slot_ids.push(slot_id);

                for &team_id in &self.clubs[club_id].team_ids.clone() {
                    if self.teams[team_id].availability_group == row.available {
                        self.add_team_to_court_slot(team_id, slot_id)?;
                    }
                }
            }
        }

        Ok(())
    }

    fn intern_date(&mut self, club_name: &str, row: &AvailabilityRow) -> Result<usize, ConfigError> {
        if let Some(&id) = self.date_by_str.get(&row.date) {
            return Ok(id);
        }
        let parsed = NaiveDate::parse_from_str(&row.date, "%d-%b-%Y").map_err(|source| {
            ConfigError::InvalidDate {
                club: club_name.to_string(),
                date: row.date.clone(),
                source,
            }
        })?;
        let anchor = self.season_anchor(parsed);
        let week_number = (parsed - anchor).num_days().div_euclid(7);
        let id = self.dates.len();
        self.dates.push(LeagueDate {
            date: parsed,
            date_str: row.date.clone(),
            league_type: row.league_type.clone(),
            weekday: row.weekday.clone(),
            week_number,
            court_slot_ids: Vec::new(),
        });
        self.date_by_str.insert(row.date.clone(), id);
        Ok(id)
    }

    /// The season anchor is the earliest date seen so far, recomputed as dates are interned.
    ///
    /// Week numbers for already-interned dates are *not* retroactively rebased; callers are
    /// expected to supply availability rows in roughly chronological order, matching the
    /// original implementation's single up-front anchor. See DESIGN.md for why this crate
    /// derives the anchor from the data instead of hard-coding a season's start date.
    fn season_anchor(&self, candidate: NaiveDate) -> NaiveDate {
        self.dates
            .iter()
            .map(|d| d.date)
            .chain(std::iter::once(candidate))
            .min()
            .unwrap_or(candidate)
    }

    fn add_team_to_court_slot(&mut self, team_id: usize, slot_id: usize) -> Result<(), ConfigError> {
        let team_club = self.teams[team_id].club;
        let slot_club = self.court_slots[slot_id].club;
        if team_club != slot_club {
            return Err(ConfigError::CrossClubCourtSlot {
                team: self.teams[team_id].name.clone(),
                team_club: self.clubs[team_club].name.clone(),
                slot_club: self.clubs[slot_club].name.clone(),
            });
        }
        self.court_slots[slot_id].team_ids.push(team_id);
        Ok(())
    }

    fn apply_previous_divisions(&mut self, rows: &[PreviousDivisionRow]) -> Result<(), ConfigError> {
        for row in rows {
            let club_id = self
                .clubs
                .iter()
                .position(|c| c.name == row.club)
                .ok_or_else(|| ConfigError::UnknownClubInDivisionTable(row.club.clone()))?;
            let team_id = self.clubs[club_id]
                .team_ids
                .iter()
                .copied()
                .find(|&t| self.teams[t].league == row.league && self.teams[t].rank == row.team_rank)
                .ok_or_else(|| ConfigError::UnknownTeamInDivisionTable {
                    club: row.club.clone(),
                    league: row.league.clone(),
                    rank: row.team_rank,
                })?;
            let division: u32 = row.new_division.trim().parse().map_err(|_| ConfigError::InvalidDivision {
                team: self.teams[team_id].name.clone(),
                value: row.new_division.clone(),
            })?;
            self.teams[team_id].division = division;
        }
        Ok(())
    }

    pub fn get_team_by_name(&self, name: &str) -> Option<usize> {
        self.team_by_name.get(name).copied()
    }

    pub fn get_date_by_str(&self, date_str: &str) -> Option<usize> {
        self.date_by_str.get(date_str).copied()
    }

    /// The minimum week number of any date in the season (`W_min`, §4.2).
    pub fn min_week_number(&self) -> i64 {
        self.dates.iter().map(|d| d.week_number).min().unwrap_or(0)
    }

    /// The first schedulable week number in the calendar year after the season's first date
    /// (`W_xmas`, §4.2).
    pub fn christmas_week_number(&self) -> i64 {
        let Some(min_date) = self.dates.iter().map(|d| d.date).min() else {
            return 0;
        };
        let second_year = min_date.year_ce().1 as i32 + 1;
        self.dates
            .iter()
            .filter(|d| d.date.year_ce().1 as i32 == second_year)
            .map(|d| d.week_number)
            .min()
            .unwrap_or_else(|| self.min_week_number())
    }
}
