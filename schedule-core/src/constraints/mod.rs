//! Constraint Builder (§4.2): turns league rules into linear constraints over one boolean
//! decision variable per [`crate::model::FixtureCourtSlot`] (FCS).
//!
//! Each submodule groups the constraints that share bookkeeping:
//! - [`coverage`] — C1, C2 (one slot per fixture, one fixture per court slot)
//! - [`windows`] — C3, C4 (rolling-week exclusivity, home/away-per-window cap)
//! - [`season_shape`] — C5, C6, C7 (intra-club-first, pre-Christmas ceiling/floor, balance)
//! - [`pairing`] — C8, C9, C10 (reverse-fixture separation, shared players)
//! - [`overrides`] — C11, C12, C13 (incorrect-week budget, priority floor, predefined fixtures)

pub mod coverage;
pub mod overrides;
pub mod pairing;
pub mod season_shape;
pub mod windows;

use std::collections::HashMap;

use chrono::NaiveDate;
use good_lp::{variable, Constraint, Expression, ProblemVariables, Variable};

use crate::model::{ConfigError, League};

/// All of a model's decision variables, indexed two ways: densely by FCS id (the hot path used
/// by every constraint builder) and by string identifier (for callers and the relaxation
/// search, which refer to candidates by name rather than by internal index).
pub struct Variables {
    pub problem: ProblemVariables,
    by_fcs: Vec<Variable>,
    by_identifier: HashMap<String, Variable>,
}

impl Variables {
    /// Declares one binary variable per FCS in the league.
    pub fn declare(league: &League) -> Variables {
        let mut problem = ProblemVariables::new();
        let mut by_fcs = Vec::with_capacity(league.fixture_court_slots.len());
        let mut by_identifier = HashMap::with_capacity(league.fixture_court_slots.len());
        for fcs in &league.fixture_court_slots {
            let v = problem.add(variable().binary());
            by_fcs.push(v);
            by_identifier.insert(fcs.identifier.clone(), v);
        }
        Variables {
            problem,
            by_fcs,
            by_identifier,
        }
    }

    pub fn of(&self, fcs_id: usize) -> Variable {
        self.by_fcs[fcs_id]
    }

    pub fn by_name(&self, identifier: &str) -> Option<Variable> {
        self.by_identifier.get(identifier).copied()
    }

    pub fn len(&self) -> usize {
        self.by_fcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_fcs.is_empty()
    }

    /// Consumes `self`, handing back the raw `good_lp` problem (for `.maximise(...)`) alongside
    /// the dense and named lookups, which keep working as plain local bindings once the struct
    /// itself has been taken apart.
    pub fn into_parts(self) -> (ProblemVariables, Vec<Variable>, HashMap<String, Variable>) {
        (self.problem, self.by_fcs, self.by_identifier)
    }
}

/// Sums an iterator of FCS variables into a linear expression.
///
/// `good_lp::Expression` doesn't implement `std::iter::Sum<Variable>`, so constraint builders
/// accumulate by hand the same way the reference MILP crate in this corpus does.
pub(crate) fn sum_of(vars: impl IntoIterator<Item = Variable>) -> Expression {
    let mut expr = Expression::from(0.0);
    for v in vars {
        expr += v;
    }
    expr
}

/// The week number of the date an FCS's court slot sits on.
pub(crate) fn week_of(league: &League, fcs_id: usize) -> i64 {
    let fcs = &league.fixture_court_slots[fcs_id];
    league.dates[league.court_slots[fcs.court_slot].date].week_number
}

/// One resolved row of the predefined-fixtures table (C13): a specific fixture pinned to a
/// specific date, independent of which court slot concurrency index it lands on.
pub struct ResolvedPredefinedFixture {
    pub home_team: usize,
    pub away_team: usize,
    pub date: usize,
}

impl League {
    /// Resolves a raw [`crate::model::PredefinedFixtureRow`] against this league's teams and
    /// dates, applying the team-name fix-up law (§6, §8 property 12) first.
    pub fn resolve_predefined_fixture(
        &self,
        row: &crate::model::PredefinedFixtureRow,
    ) -> Result<ResolvedPredefinedFixture, ConfigError> {
        let home_name = crate::model::fixup_team_name(&row.home_team);
        let away_name = crate::model::fixup_team_name(&row.away_team);
        let home_team = self
            .get_team_by_name(&home_name)
            .ok_or_else(|| ConfigError::UnknownTeam(home_name.clone()))?;
        let away_team = self
            .get_team_by_name(&away_name)
            .ok_or_else(|| ConfigError::UnknownTeam(away_name.clone()))?;

        let parsed: NaiveDate = NaiveDate::parse_from_str(&row.match_date, "%d/%m/%Y")
            .map_err(|e| ConfigError::UnknownDate(row.match_date.clone(), e))?;
        let date_str = self
            .dates
            .iter()
            .find(|d| d.date == parsed)
            .map(|d| d.date_str.clone())
            .ok_or(ConfigError::DateNotInSeason(parsed))?;
        let date = self.get_date_by_str(&date_str).expect("just looked up by date_str");

        Ok(ResolvedPredefinedFixture {
            home_team,
            away_team,
            date,
        })
    }
}

/// Parameters shared by the constraint builders that need them (everything besides the pure
/// topology constraints C1/C2/C8/C9/C10 which only depend on the league shape).
pub struct BuildParams {
    pub num_allowed_incorrect_fixture_week: u32,
    pub num_forced_prioritised_nights: u32,
    pub predefined_fixtures: Vec<ResolvedPredefinedFixture>,
    /// Fixtures scheduled on or before this date cannot be retroactively assigned (C13).
    pub as_of: NaiveDate,
}

/// Builds every constraint (C1-C13) for the given league and variable set.
pub fn build_all(league: &League, vars: &Variables, params: &BuildParams) -> Vec<Constraint> {
    let mut constraints = Vec::new();
    constraints.extend(coverage::one_slot_per_fixture(league, vars));
    constraints.extend(coverage::one_fixture_per_court_slot(league, vars));
    constraints.extend(windows::one_fixture_per_rolling_window(league, vars, 2));
    constraints.extend(windows::home_or_away_cap_per_window(league, vars, 6, 2));
    constraints.extend(season_shape::intra_club_fixtures_first(league, vars));
    constraints.extend(season_shape::pre_christmas_ceiling_and_floor(league, vars));
    constraints.extend(season_shape::home_away_balance(league, vars, 1));
    constraints.extend(pairing::reverse_fixture_separation(league, vars, 6));
    constraints.extend(pairing::at_most_one_reverse_pre_christmas(league, vars));
    constraints.extend(pairing::shared_players_different_week(league, vars));
    constraints.extend(overrides::bounded_incorrect_week(
        league,
        vars,
        params.num_allowed_incorrect_fixture_week,
    ));
    constraints.extend(overrides::forced_priority_slots(
        league,
        vars,
        params.num_forced_prioritised_nights,
    ));
    constraints.extend(overrides::predefined_fixtures(league, vars, params));
    constraints
}
