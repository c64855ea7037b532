//! Thin CLI front end over `schedule-core` (§6): JSON in, JSON out, no spreadsheet I/O.

use std::io::Read;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use schedule_core::generator::generate_fixtures;
use schedule_core::model::{League, LeagueConfig};
use schedule_core::report::OutputTables;
use schedule_core::solver::relax::find_feasible;
use schedule_core::solver::{schedule, ScheduleParams};

#[derive(Parser)]
#[command(name = "schedule-cli", about = "Fixture scheduler for an amateur badminton association")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the model and solve it, printing the resulting status and (if solved) output tables.
    Schedule {
        input: Option<PathBuf>,
        #[arg(long)]
        stdin: bool,
        #[arg(long, default_value_t = 30)]
        allowed_run_time_secs: u64,
        #[arg(long, default_value_t = 0)]
        num_allowed_incorrect_fixture_week: u32,
        #[arg(long, default_value_t = 0)]
        num_forced_prioritised_nights: u32,
    },
    /// Construct the league and generate fixtures without solving; reports configuration errors.
    Validate {
        input: Option<PathBuf>,
        #[arg(long)]
        stdin: bool,
    },
    /// Run the relaxation search and report the parameters it settled on.
    Relax {
        input: Option<PathBuf>,
        #[arg(long)]
        stdin: bool,
        #[arg(long, default_value_t = 30)]
        allowed_run_time_secs: u64,
        #[arg(long, default_value_t = 10)]
        max_incorrect_to_try: u32,
        #[arg(long, default_value_t = 20)]
        max_forced_to_try: u32,
    },
    /// Print the JSON Schema for `LeagueConfig` and the output tables.
    Schema,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Schedule {
            input,
            stdin,
            allowed_run_time_secs,
            num_allowed_incorrect_fixture_week,
            num_forced_prioritised_nights,
        } => cmd_schedule(
            input,
            stdin,
            allowed_run_time_secs,
            num_allowed_incorrect_fixture_week,
            num_forced_prioritised_nights,
        ),
        Commands::Validate { input, stdin } => cmd_validate(input, stdin),
        Commands::Relax {
            input,
            stdin,
            allowed_run_time_secs,
            max_incorrect_to_try,
            max_forced_to_try,
        } => cmd_relax(input, stdin, allowed_run_time_secs, max_incorrect_to_try, max_forced_to_try),
        Commands::Schema => cmd_schema(),
    }
}

fn read_input(input: &Option<PathBuf>, stdin: bool) -> Result<LeagueConfig> {
    let text = if stdin || input.is_none() {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("reading LeagueConfig from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input.as_ref().unwrap()).context("reading LeagueConfig file")?
    };
    serde_json::from_str(&text).context("parsing LeagueConfig JSON")
}

fn cmd_schedule(
    input: Option<PathBuf>,
    stdin: bool,
    allowed_run_time_secs: u64,
    num_allowed_incorrect_fixture_week: u32,
    num_forced_prioritised_nights: u32,
) -> Result<()> {
    let config = read_input(&input, stdin)?;
    let mut league = League::from_config(&config)?;
    generate_fixtures(&mut league);

    eprintln!("Running solver...");
    let mut params = ScheduleParams::new(Duration::from_secs(allowed_run_time_secs));
    params.num_allowed_incorrect_fixture_week = num_allowed_incorrect_fixture_week;
    params.num_forced_prioritised_nights = num_forced_prioritised_nights;
    let outcome = schedule(&mut league, &params)?;

    println!("status: {:?}", outcome.status);
    if !outcome.unscheduled_fixtures.is_empty() {
        eprintln!("unscheduled fixtures:");
        for name in &outcome.unscheduled_fixtures {
            eprintln!("  - {name}");
        }
    }
    if let Some(tables) = outcome.tables {
        println!("{}", tables.to_json()?);
    }
    Ok(())
}

fn cmd_validate(input: Option<PathBuf>, stdin: bool) -> Result<()> {
    let config = read_input(&input, stdin)?;
    let mut league = League::from_config(&config)?;
    generate_fixtures(&mut league);
    println!(
        "league is valid: {} clubs, {} teams, {} fixtures, {} candidate slots",
        league.clubs.len(),
        league.teams.len(),
        league.fixtures.len(),
        league.fixture_court_slots.len()
    );
    Ok(())
}

fn cmd_relax(
    input: Option<PathBuf>,
    stdin: bool,
    allowed_run_time_secs: u64,
    max_incorrect_to_try: u32,
    max_forced_to_try: u32,
) -> Result<()> {
    let config = read_input(&input, stdin)?;
    let base_params = ScheduleParams::new(Duration::from_secs(allowed_run_time_secs));

    eprintln!("Running relaxation search...");
    let result = find_feasible(&config, &base_params, max_incorrect_to_try, max_forced_to_try)?;

    println!("status: {:?}", result.outcome.status);
    println!(
        "num_allowed_incorrect_fixture_week: {}",
        result.num_allowed_incorrect_fixture_week
    );
    println!(
        "num_forced_prioritised_nights: {}",
        result.num_forced_prioritised_nights
    );
    Ok(())
}

fn cmd_schema() -> Result<()> {
    let config_schema = schemars::schema_for!(LeagueConfig);
    let output_schema = schemars::schema_for!(OutputTables);
    println!("{}", serde_json::to_string_pretty(&config_schema)?);
    println!("{}", serde_json::to_string_pretty(&output_schema)?);
    Ok(())
}
