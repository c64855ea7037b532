//! The relaxation search (§4.4, §9): when a league is infeasible as stated, widen the
//! incorrect-week budget until it solves, then tighten the priority floor back up as far as it
//! will go.
//!
//! Each attempt rebuilds the league and the model from scratch; nothing here edits an existing
//! model incrementally (§9's "constraints and objective are not incrementally edited").

use crate::generator::generate_fixtures;
use crate::model::{League, LeagueConfig};

use super::{schedule, ScheduleError, ScheduleOutcome, ScheduleParams, ScheduleStatus};

/// The parameters and outcome the search settled on.
pub struct RelaxationResult {
    pub num_allowed_incorrect_fixture_week: u32,
    pub num_forced_prioritised_nights: u32,
    pub league: League,
    pub outcome: ScheduleOutcome,
}

/// Searches for the smallest `num_allowed_incorrect_fixture_week` (up to `max_incorrect_to_try`)
/// that yields a feasible schedule, then the largest `num_forced_prioritised_nights` (up to
/// `max_forced_to_try`) that stays feasible alongside it.
///
/// `base_params` supplies everything else (wall-time budget, predefined fixtures, `as_of`,
/// `write_output`); its own `num_allowed_incorrect_fixture_week` and
/// `num_forced_prioritised_nights` are overwritten during the search.
pub fn find_feasible(
    config: &LeagueConfig,
    base_params: &ScheduleParams,
    max_incorrect_to_try: u32,
    max_forced_to_try: u32,
) -> Result<RelaxationResult, ScheduleError> {
    let mut num_allowed_incorrect = 0u32;
    let (mut league, mut outcome) = loop {
        let mut league = League::from_config(config)?;
        generate_fixtures(&mut league);
        let mut params = base_params.clone();
        params.num_allowed_incorrect_fixture_week = num_allowed_incorrect;
        params.num_forced_prioritised_nights = 0;
        log::info!("relaxation search: trying num_allowed_incorrect_fixture_week = {num_allowed_incorrect}");
        let outcome = schedule(&mut league, &params)?;
        let feasible = matches!(outcome.status, ScheduleStatus::Optimal | ScheduleStatus::Feasible);
        if feasible || num_allowed_incorrect >= max_incorrect_to_try {
            break (league, outcome);
        }
        num_allowed_incorrect += 1;
    };

    if !matches!(outcome.status, ScheduleStatus::Optimal | ScheduleStatus::Feasible) {
        return Ok(RelaxationResult {
            num_allowed_incorrect_fixture_week: num_allowed_incorrect,
            num_forced_prioritised_nights: 0,
            league,
            outcome,
        });
    }

    let mut num_forced = 0u32;
    while num_forced < max_forced_to_try {
        let candidate = num_forced + 1;
        let mut candidate_league = League::from_config(config)?;
        generate_fixtures(&mut candidate_league);
        let mut params = base_params.clone();
        params.num_allowed_incorrect_fixture_week = num_allowed_incorrect;
        params.num_forced_prioritised_nights = candidate;
        log::info!("relaxation search: trying num_forced_prioritised_nights = {candidate}");
        let candidate_outcome = schedule(&mut candidate_league, &params)?;
        if matches!(candidate_outcome.status, ScheduleStatus::Optimal | ScheduleStatus::Feasible) {
            num_forced = candidate;
            league = candidate_league;
            outcome = candidate_outcome;
        } else {
            break;
        }
    }

    Ok(RelaxationResult {
        num_allowed_incorrect_fixture_week: num_allowed_incorrect,
        num_forced_prioritised_nights: num_forced,
        league,
        outcome,
    })
}
