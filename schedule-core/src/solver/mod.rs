//! Solver Driver (§4.4): assembles the linear model, invokes the MILP solver within a wall-time
//! budget, and projects the result back onto the league.

pub mod relax;

use std::time::{Duration, Instant};

use chrono::NaiveDate;
use good_lp::{default_solver, ResolutionError, Solution, SolverModel};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraints::{self, BuildParams, Variables};
use crate::model::{ConfigError, League, PredefinedFixtureRow};
use crate::objective;
use crate::report::{self, OutputTables, ReportError};

/// The result of a solve attempt, matching the CP-SAT-shaped vocabulary the original modelling
/// approach used (§2.2), reconstructed on top of `good_lp`/CBC's coarser status reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
pub enum ScheduleStatus {
    /// The solver proved this is the best possible assignment within the time budget.
    Optimal,
    /// The time budget expired with an incumbent in hand; it may not be optimal.
    Feasible,
    /// No assignment satisfies every constraint under the current parameters.
    Infeasible,
    /// The time budget expired with no incumbent at all.
    Unknown,
    /// The model itself was malformed (should not occur for a well-formed league).
    ModelInvalid,
}

/// Errors `schedule` can return. Model infeasibility and timeouts are *not* among them — see
/// [`ScheduleStatus`] — only configuration and output-emission failures are.
#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to emit output: {0}")]
    Report(#[from] ReportError),
}

/// Everything `schedule` needs beyond the league itself (§6).
#[derive(Debug, Clone)]
pub struct ScheduleParams {
    pub allowed_run_time: Duration,
    pub num_allowed_incorrect_fixture_week: u32,
    pub num_forced_prioritised_nights: u32,
    pub predefined_fixtures: Vec<PredefinedFixtureRow>,
    pub write_output: bool,
    /// Fixtures dated on or before this day cannot be retroactively scheduled (C13).
    pub as_of: NaiveDate,
}

impl ScheduleParams {
    pub fn new(allowed_run_time: Duration) -> Self {
        ScheduleParams {
            allowed_run_time,
            num_allowed_incorrect_fixture_week: 0,
            num_forced_prioritised_nights: 0,
            predefined_fixtures: Vec::new(),
            write_output: true,
            as_of: chrono::Local::now().date_naive(),
        }
    }
}

/// The outcome of one [`schedule`] run.
pub struct ScheduleOutcome {
    pub status: ScheduleStatus,
    /// Names of fixtures left unscheduled. Always empty unless `status` was downgraded to
    /// `Infeasible` after an otherwise-successful solve (§4.4 step 4).
    pub unscheduled_fixtures: Vec<String>,
    /// `Some` only when `write_output` was set and solving produced an assignment.
    pub tables: Option<OutputTables>,
}

/// Runs the full pipeline: resolve predefined fixtures, build the model, solve it within
/// `params.allowed_run_time`, project the result back onto `league`, and optionally emit the
/// output tables.
pub fn schedule(league: &mut League, params: &ScheduleParams) -> Result<ScheduleOutcome, ScheduleError> {
    let resolved_predefined = params
        .predefined_fixtures
        .iter()
        .map(|row| league.resolve_predefined_fixture(row))
        .collect::<Result<Vec<_>, _>>()?;

    let vars = Variables::declare(league);
    let objective = objective::build(league, &vars);
    let build_params = BuildParams {
        num_allowed_incorrect_fixture_week: params.num_allowed_incorrect_fixture_week,
        num_forced_prioritised_nights: params.num_forced_prioritised_nights,
        predefined_fixtures: resolved_predefined,
        as_of: params.as_of,
    };
    let model_constraints = constraints::build_all(league, &vars, &build_params);

    log::info!(
        "model built: {} variables, {} constraints",
        vars.len(),
        model_constraints.len()
    );

    let (problem, by_fcs, _by_identifier) = vars.into_parts();

    let mut model = problem.maximise(objective.clone()).using(default_solver);
    model.set_parameter("sec", &params.allowed_run_time.as_secs().to_string());
    for constraint in model_constraints {
        model = model.with(constraint);
    }

    let start = Instant::now();
    let solve_result = model.solve();
    let elapsed = start.elapsed();

    let mut status = match &solve_result {
        Ok(solution) => {
            log::info!(
                "solved in {:.2}s, objective = {:.0}",
                elapsed.as_secs_f64(),
                solution.eval(&objective)
            );
            // good_lp/CBC does not distinguish a proven-optimal solve from one cut short by
            // the time limit the way CP-SAT's status does; the elapsed time against the
            // requested budget is the closest available proxy (§2.2).
            if elapsed + Duration::from_millis(250) >= params.allowed_run_time {
                ScheduleStatus::Feasible
            } else {
                ScheduleStatus::Optimal
            }
        }
        Err(ResolutionError::Infeasible) => {
            log::warn!("model is infeasible under the current parameters");
            ScheduleStatus::Infeasible
        }
        Err(ResolutionError::Unbounded) => {
            log::error!("model was unbounded; this indicates a modelling bug, not a league problem");
            ScheduleStatus::ModelInvalid
        }
        Err(other) => {
            log::warn!("solver returned an unexpected error: {other}");
            ScheduleStatus::Unknown
        }
    };

    let mut unscheduled_fixtures = Vec::new();
    if matches!(status, ScheduleStatus::Optimal | ScheduleStatus::Feasible) {
        let solution = solve_result.as_ref().expect("checked above");
        for fixture_id in 0..league.fixtures.len() {
            let fcs_ids = league.fixtures[fixture_id].fixture_court_slot_ids.clone();
            let mut any_scheduled = false;
            for fcs_id in fcs_ids {
                let scheduled = solution.value(by_fcs[fcs_id]) > 0.5;
                league.fixture_court_slots[fcs_id].is_scheduled = scheduled;
                any_scheduled |= scheduled;
            }
            if !any_scheduled {
                unscheduled_fixtures.push(league.fixtures[fixture_id].name.clone());
            }
        }

        if !unscheduled_fixtures.is_empty() {
            for name in &unscheduled_fixtures {
                log::warn!("fixture \"{name}\" could not be scheduled");
            }
            status = ScheduleStatus::Infeasible;
        }
    }

    let tables = if params.write_output && matches!(status, ScheduleStatus::Optimal | ScheduleStatus::Feasible) {
        Some(report::build_tables(league))
    } else {
        None
    };

    Ok(ScheduleOutcome {
        status,
        unscheduled_fixtures,
        tables,
    })
}
