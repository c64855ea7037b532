//! Core scheduling engine for an amateur badminton association's fixture list.
//!
//! Given a [`model::LeagueConfig`] describing clubs, teams and court availability, this crate
//! builds the league model, enumerates candidate fixture/court-slot pairings, encodes the
//! league's scheduling rules as a mixed-integer-linear model, and drives a solver to assign
//! each fixture to a court slot.
//!
//! The entry point most callers want is [`solver::schedule`]:
//!
//! ```no_run
//! use std::time::Duration;
//! use schedule_core::model::{League, LeagueConfig};
//! use schedule_core::solver::{schedule, ScheduleParams};
//!
//! # fn load_config() -> LeagueConfig { LeagueConfig::default() }
//! let config = load_config();
//! let mut league = League::from_config(&config)?;
//! schedule_core::generator::generate_fixtures(&mut league);
//!
//! let params = ScheduleParams::new(Duration::from_secs(30));
//! let outcome = schedule(&mut league, &params)?;
//! println!("status: {:?}", outcome.status);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod constraints;
pub mod generator;
pub mod model;
pub mod objective;
pub mod report;
pub mod solver;

#[cfg(test)]
pub(crate) mod test_support;
