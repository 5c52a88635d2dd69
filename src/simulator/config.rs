//! Simulation configuration.

use crate::core::config::FishingConfig;
use crate::core::constants::MAX_TICK_SECONDS;

/// Configuration for a simulation run.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Number of simulation runs to perform
    pub num_runs: u32,

    /// Encounters each run plays before it stops
    pub encounters_per_run: u32,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Seconds the simulated angler needs to react to a bite
    pub reaction_time: f64,

    /// Chance the angler notices a bite at all
    pub hook_reliability: f64,

    pub player_strength: f64,
    pub fishing_luck: f64,

    /// Simulated seconds per run before it is cut off
    pub max_seconds_per_run: f64,

    pub tick_seconds: f64,

    /// Engine tuning under test
    pub fishing: FishingConfig,

    /// Log verbosity (0 = silent, 1 = summary, 2 = per run)
    pub verbosity: u8,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            num_runs: 200,
            encounters_per_run: 50,
            seed: None,
            reaction_time: 0.4,
            hook_reliability: 0.9,
            player_strength: 10.0,
            fishing_luck: 1.0,
            max_seconds_per_run: 6.0 * 60.0 * 60.0,
            tick_seconds: MAX_TICK_SECONDS,
            fishing: FishingConfig::default(),
            verbosity: 1,
        }
    }
}

impl SimConfig {
    /// Small run for a fast sanity check
    pub fn quick() -> Self {
        Self {
            num_runs: 20,
            encounters_per_run: 20,
            ..Default::default()
        }
    }

    /// Slow, weak beginner: misses perch and loses big carp
    pub fn novice() -> Self {
        Self {
            reaction_time: 1.1,
            hook_reliability: 0.7,
            player_strength: 3.0,
            ..Default::default()
        }
    }

    /// Fast, strong veteran
    pub fn expert() -> Self {
        Self {
            reaction_time: 0.25,
            hook_reliability: 0.98,
            player_strength: 25.0,
            fishing_luck: 1.2,
            ..Default::default()
        }
    }
}
