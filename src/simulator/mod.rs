//! Balance simulator for Monte Carlo analysis.
//!
//! Runs thousands of scripted fishing sessions to analyze:
//! - Catch rates per species and per angler profile
//! - How often gear breaks
//! - Fight length and time between fish
//!
//! The simulator drives the real SessionOrchestrator, so results match what
//! a player would see.

mod config;
mod report;
mod runner;

pub use config::SimConfig;
pub use report::{ResultCount, SimReport, SpeciesSummary};
pub use runner::{run_simulation, RunStats};
